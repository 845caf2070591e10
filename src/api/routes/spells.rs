//! Spell catalog page.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use serde_json::Value;

use super::app_state::AppState;
use super::auth_context::AuthGuard;
use super::error::PageError;

#[derive(Debug, Serialize)]
pub struct SpellListPage {
    pub item: Value,
}

/// Create the spells page router
pub fn spells_router() -> Router<AppState> {
    Router::new().route("/spells", get(load_spells))
}

/// GET /spells - Load the spell catalog from the internal API, unmodified
pub async fn load_spells(
    State(state): State<AppState>,
    guard: AuthGuard,
) -> Result<Json<SpellListPage>, PageError> {
    guard.require_or_redirect(StatusCode::FOUND, &state.config.login_path)?;

    let response = state.catalog.fetch_spells().await?;
    if !response.is_success() {
        return Err(PageError::Upstream {
            status: response.status,
            body: response.body,
        });
    }

    Ok(Json(SpellListPage {
        item: response.body,
    }))
}
