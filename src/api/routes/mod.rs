//! Routes module - organizes all route handlers.
//!
//! Page handlers live at the root (`/spellbooks`, `/spells`, `/logout`);
//! the internal JSON API they consume is nested under `/api`.

pub mod api;
pub mod app_state;
pub mod auth_context;
pub mod error;
pub mod logout;
pub mod openapi;
pub mod spellbooks;
pub mod spells;

use axum::{Router, response::Json, routing::get};
use serde_json::{Value, json};

pub use app_state::{AppState, StartupError};
pub use auth_context::AuthGuard;
pub use error::{ApiError, PageError};

/// Create the application router with state applied.
///
/// Middleware layers are added by [`build_app`]; tests can drive this router
/// directly.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(logout::logout_router())
        .merge(spellbooks::spellbooks_router())
        .merge(spells::spells_router())
        .nest(
            "/api",
            api::api_router().with_state(app_state.storage.clone()),
        )
        .with_state(app_state)
}

/// Create the application router with tracing and CORS layers.
pub fn build_app(app_state: AppState) -> Router {
    let cors = crate::middleware::create_cors_layer(&app_state.config.cors_origins);
    create_router(app_state)
        .layer(crate::middleware::observability::create_trace_layer())
        .layer(cors)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "spellbook-server",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
