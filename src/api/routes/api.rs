//! Internal JSON API consumed by the page loaders.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;
use uuid::Uuid;

use super::error::ApiError;
use super::openapi::openapi_router;
use crate::models::{Spell, Spellbook};
use crate::storage::SharedStorage;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SpellbookQuery {
    /// Owner the spellbook must belong to
    pub user_id: Option<String>,
}

/// Create the API router (mounted under `/api`)
pub fn api_router() -> Router<SharedStorage> {
    Router::new()
        .route("/spellbooks/{spellbook_id}", get(get_spellbook))
        .route("/spells", get(list_spells))
        .merge(openapi_router())
}

/// The API router with `/api` prefix and storage attached, ready to serve
/// requests in-process.
pub fn api_service(storage: SharedStorage) -> Router {
    Router::new().nest("/api", api_router()).with_state(storage)
}

fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::bad_request(format!("Invalid {}: {}", what, raw)))
}

/// GET /api/spellbooks/{spellbook_id}?user_id={user_id} - Get one spellbook owned by a user
#[utoipa::path(
    get,
    path = "/api/spellbooks/{spellbook_id}",
    tag = "Spellbooks",
    params(
        ("spellbook_id" = String, Path, description = "Spellbook ID"),
        SpellbookQuery
    ),
    responses(
        (status = 200, description = "Spellbook found", body = Spellbook),
        (status = 400, description = "Malformed spellbook or user ID"),
        (status = 404, description = "No such spellbook for this user")
    )
)]
pub async fn get_spellbook(
    State(storage): State<SharedStorage>,
    Path(spellbook_id): Path<String>,
    Query(query): Query<SpellbookQuery>,
) -> Result<Json<Spellbook>, ApiError> {
    let spellbook_id = parse_uuid(&spellbook_id, "spellbook id")?;
    let user_id = match query.user_id.as_deref() {
        Some(raw) => parse_uuid(raw, "user_id")?,
        None => return Err(ApiError::bad_request("user_id query parameter is required")),
    };

    match storage.get_spellbook_for_owner(spellbook_id, user_id).await? {
        Some(spellbook) => Ok(Json(spellbook)),
        None => {
            debug!("Spellbook {} not found for user {}", spellbook_id, user_id);
            Err(ApiError::not_found(format!(
                "Spellbook {} not found",
                spellbook_id
            )))
        }
    }
}

/// GET /api/spells - List the full spell catalog
#[utoipa::path(
    get,
    path = "/api/spells",
    tag = "Spells",
    responses(
        (status = 200, description = "Spell catalog ordered by level then name", body = [Spell])
    )
)]
pub async fn list_spells(State(storage): State<SharedStorage>) -> Result<Json<Vec<Spell>>, ApiError> {
    let spells = storage.list_spells().await?;
    Ok(Json(spells))
}
