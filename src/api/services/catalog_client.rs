//! Internal API client used by the page loaders.
//!
//! Page loaders never query the catalog tables directly; they fetch the
//! sibling `/api` endpoints and pass the parsed JSON through. The fetch runs
//! either over HTTP against a configured base URL or in-process against the
//! API router.

use crate::storage::SharedStorage;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tower::ServiceExt;
use tracing::debug;
use uuid::Uuid;

/// Largest API body the in-process client will buffer.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Upper bound on a single HTTP API call, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Status and parsed JSON body of an internal API call.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl CatalogResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("API request failed: {0}")]
    Transport(String),
    #[error("API returned invalid JSON: {0}")]
    InvalidBody(String),
}

/// Fetches data from the internal API endpoints.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /api/spellbooks/{id}?user_id={id}`
    async fn fetch_spellbook(
        &self,
        spellbook_id: &str,
        user_id: Uuid,
    ) -> Result<CatalogResponse, CatalogError>;

    /// `GET /api/spells`
    async fn fetch_spells(&self) -> Result<CatalogResponse, CatalogError>;
}

pub type SharedCatalog = Arc<dyn CatalogApi>;

pub fn spellbook_path(spellbook_id: &str, user_id: Uuid) -> String {
    format!(
        "/api/spellbooks/{}?user_id={}",
        urlencoding::encode(spellbook_id),
        user_id
    )
}

pub const SPELLS_PATH: &str = "/api/spells";

fn parse_body(bytes: &[u8]) -> Result<Value, CatalogError> {
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| CatalogError::InvalidBody(e.to_string()))
}

/// Calls the API over HTTP.
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, CatalogError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, path: &str) -> Result<CatalogResponse, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        Ok(CatalogResponse {
            status,
            body: parse_body(&bytes)?,
        })
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn fetch_spellbook(
        &self,
        spellbook_id: &str,
        user_id: Uuid,
    ) -> Result<CatalogResponse, CatalogError> {
        self.get(&spellbook_path(spellbook_id, user_id)).await
    }

    async fn fetch_spells(&self) -> Result<CatalogResponse, CatalogError> {
        self.get(SPELLS_PATH).await
    }
}

/// Dispatches API requests to the API router in-process.
pub struct LocalCatalogClient {
    storage: SharedStorage,
}

impl LocalCatalogClient {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    async fn get(&self, path: &str) -> Result<CatalogResponse, CatalogError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let router = crate::routes::api::api_service(self.storage.clone());
        let response = router
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        Ok(CatalogResponse {
            status,
            body: parse_body(&bytes)?,
        })
    }
}

#[async_trait]
impl CatalogApi for LocalCatalogClient {
    async fn fetch_spellbook(
        &self,
        spellbook_id: &str,
        user_id: Uuid,
    ) -> Result<CatalogResponse, CatalogError> {
        self.get(&spellbook_path(spellbook_id, user_id)).await
    }

    async fn fetch_spells(&self) -> Result<CatalogResponse, CatalogError> {
        self.get(SPELLS_PATH).await
    }
}
