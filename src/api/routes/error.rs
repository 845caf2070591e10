//! Error types for page handlers and API handlers, with their HTTP mapping.

use crate::services::{CatalogError, FormState};
use crate::storage::StorageError;
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

/// Build a redirect with an explicit status (302, 303 or 307).
pub fn redirect(status: StatusCode, location: &str) -> Response {
    (status, [(header::LOCATION, location.to_string())]).into_response()
}

/// What a handler does with a request that has no valid session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unauthenticated {
    Redirect { status: StatusCode, location: String },
    Status(StatusCode),
}

/// Failures a page handler can end in.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("request is not authenticated")]
    Unauthenticated(Unauthenticated),
    #[error("form validation failed")]
    InvalidForm(FormState),
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The internal API answered with a non-success status
    #[error("API returned {status}")]
    Upstream { status: StatusCode, body: Value },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::Unauthenticated(Unauthenticated::Redirect { status, location }) => {
                redirect(status, &location)
            }
            PageError::Unauthenticated(Unauthenticated::Status(status)) => ApiError {
                status,
                message: "Not authenticated".to_string(),
            }
            .into_response(),
            PageError::InvalidForm(form) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "form": form }))).into_response()
            }
            PageError::Storage(e) => ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Failed to save changes: {}", e),
            }
            .into_response(),
            PageError::Upstream { status, body } => (status, Json(body)).into_response(),
            PageError::Catalog(e) => ApiError {
                status: StatusCode::BAD_GATEWAY,
                message: e.to_string(),
            }
            .into_response(),
        }
    }
}

/// API error response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Storage failure while serving API request: {}", err);
        match err {
            StorageError::NotFound {
                entity_type,
                entity_id,
            } => ApiError::not_found(format!("{} {} not found", entity_type, entity_id)),
            other => ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.message,
            "status": self.status.as_u16(),
        });

        (self.status, axum::Json(body)).into_response()
    }
}
