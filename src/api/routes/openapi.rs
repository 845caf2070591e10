//! OpenAPI specification endpoint.

use axum::{Router, response::Json, routing::get};
use utoipa::OpenApi;

use super::super::openapi::ApiDoc;

/// Create the OpenAPI router
pub fn openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/openapi.json", get(serve_openapi_json))
}

/// GET /api/openapi.json - Serve the OpenAPI specification as JSON
pub async fn serve_openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
