//! Spellbook pages: list, detail and the create form.

use axum::{
    Form, Json, Router,
    extract::{Path, State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::app_state::AppState;
use super::auth_context::AuthGuard;
use super::error::PageError;
use crate::models::{ClassTag, Spellbook};
use crate::services::{CreateSpellbookForm, FormState, validate_create_form};

pub const SPELLBOOKS_PATH: &str = "/spellbooks";

#[derive(Debug, Serialize)]
pub struct SpellbookListPage {
    pub spellbooks: Vec<Spellbook>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellbookDetailPage {
    pub spellbook_item: Value,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CreateSpellbookPage {
    pub form: FormState,
    /// Options for the class selects
    pub classes: Vec<ClassTag>,
}

/// Create the spellbook pages router
pub fn spellbooks_router() -> Router<AppState> {
    Router::new()
        .route(SPELLBOOKS_PATH, get(list_spellbooks))
        .route(
            "/spellbooks/create",
            get(load_create_form).post(create_spellbook),
        )
        .route("/spellbooks/{spellbook_id}", get(load_spellbook))
}

/// GET /spellbooks - Every spellbook owned by the session user
pub async fn list_spellbooks(
    State(state): State<AppState>,
    guard: AuthGuard,
) -> Result<Json<SpellbookListPage>, PageError> {
    let user = guard.require_or_redirect(StatusCode::FOUND, &state.config.login_path)?;

    let spellbooks = state.storage.list_spellbooks_by_owner(user.user_id).await?;

    Ok(Json(SpellbookListPage { spellbooks }))
}

/// GET /spellbooks/{spellbook_id} - One spellbook, fetched through the internal API
pub async fn load_spellbook(
    State(state): State<AppState>,
    guard: AuthGuard,
    Path(spellbook_id): Path<String>,
) -> Result<Json<SpellbookDetailPage>, PageError> {
    let user = guard.require_or_redirect(StatusCode::TEMPORARY_REDIRECT, &state.config.login_path)?;

    let response = state
        .catalog
        .fetch_spellbook(&spellbook_id, user.user_id)
        .await?;
    if !response.is_success() {
        return Err(PageError::Upstream {
            status: response.status,
            body: response.body,
        });
    }

    Ok(Json(SpellbookDetailPage {
        spellbook_item: response.body,
        user_id: user.user_id,
    }))
}

/// GET /spellbooks/create - Empty create form
pub async fn load_create_form(
    State(state): State<AppState>,
    guard: AuthGuard,
) -> Result<Json<CreateSpellbookPage>, PageError> {
    guard.require_or_redirect(StatusCode::FOUND, &state.config.login_path)?;

    Ok(Json(CreateSpellbookPage {
        form: FormState::empty(),
        classes: ClassTag::ALL.to_vec(),
    }))
}

/// POST /spellbooks/create - Validate the form and store a new spellbook
///
/// The owner is taken from the session presented with the submission itself.
/// A body that does not decode as form fields is reported like any other
/// invalid submission.
pub async fn create_spellbook(
    State(state): State<AppState>,
    guard: AuthGuard,
    form: Result<Form<CreateSpellbookForm>, FormRejection>,
) -> Result<Response, PageError> {
    let user = guard.require_or_redirect(StatusCode::FOUND, &state.config.login_path)?;

    let Form(form) = form.map_err(|rejection| {
        debug!("Rejected create-form body: {}", rejection.body_text());
        PageError::InvalidForm(FormState::malformed(rejection.body_text()))
    })?;

    let validated = validate_create_form(form).map_err(PageError::InvalidForm)?;
    let new_spellbook = validated.into_new_spellbook(user.user_id);

    let created = state
        .storage
        .create_spellbook(new_spellbook)
        .await
        .map_err(|e| {
            error!("Failed to create spellbook for user {}: {}", user.user_id, e);
            PageError::Storage(e)
        })?;

    info!(
        "Created spellbook {} ({}) for user {}",
        created.id, created.index, user.user_id
    );

    Ok(Redirect::to(SPELLBOOKS_PATH).into_response())
}
