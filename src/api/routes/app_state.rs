//! Application state management.
//!
//! Defines the AppState struct that holds all shared application state:
//! configuration, storage backend, session store, internal API client and
//! the optional database pool.

use crate::config::AppConfig;
use crate::services::{CatalogError, HttpCatalogClient, LocalCatalogClient, SharedCatalog};
use crate::storage::{
    DbSessionStore, MemorySessionStore, MemoryStorageBackend, PostgresStorageBackend,
    SharedSessionStore, SharedStorage, StorageError,
};
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Failure to assemble application state at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Failed to build API client: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Spellbook and spell storage
    pub storage: SharedStorage,
    /// Session store for authentication
    pub sessions: SharedSessionStore,
    /// Client for the internal API endpoints
    pub catalog: SharedCatalog,
    /// PostgreSQL database connection pool (optional)
    pub database: Option<PgPool>,
}

impl AppState {
    /// Assemble state from explicit backends. API fetches are dispatched
    /// in-process until a different client is set with `with_catalog`.
    pub fn with_backends(
        config: AppConfig,
        storage: SharedStorage,
        sessions: SharedSessionStore,
    ) -> Self {
        let catalog: SharedCatalog = Arc::new(LocalCatalogClient::new(storage.clone()));

        Self {
            config: Arc::new(config),
            storage,
            sessions,
            catalog,
            database: None,
        }
    }

    /// State backed entirely by in-memory stores.
    pub fn in_memory(config: AppConfig) -> Self {
        Self::with_backends(
            config,
            Arc::new(MemoryStorageBackend::new()),
            Arc::new(MemorySessionStore::new()),
        )
    }

    /// Replace the internal API client.
    pub fn with_catalog(mut self, catalog: SharedCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Initialize state from configuration.
    ///
    /// Connects to PostgreSQL and runs migrations if DATABASE_URL is set,
    /// otherwise falls back to in-memory storage. API fetches go over HTTP
    /// when API_BASE_URL is set.
    pub async fn from_config(config: AppConfig) -> Result<Self, StartupError> {
        let api_base_url = config.api_base_url.clone();
        let state = match config.database_url.clone() {
            Some(database_url) => Self::connect(config, &database_url).await?,
            None => {
                info!("DATABASE_URL not set, using in-memory storage");
                Self::in_memory(config)
            }
        };

        match api_base_url {
            Some(base_url) => {
                let client = HttpCatalogClient::new(base_url)?;
                Ok(state.with_catalog(Arc::new(client)))
            }
            None => Ok(state),
        }
    }

    async fn connect(config: AppConfig, database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPool::connect(database_url).await.map_err(|e| {
            StorageError::ConnectionError(format!("Failed to connect to database: {}", e))
        })?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StorageError::ConnectionError(format!("Migration failed: {}", e)))?;
        info!("Database migrations applied");

        let storage: SharedStorage = Arc::new(PostgresStorageBackend::new(pool.clone()));
        let sessions: SharedSessionStore = Arc::new(DbSessionStore::new(pool.clone()));

        let mut state = Self::with_backends(config, storage, sessions);
        state.database = Some(pool);
        Ok(state)
    }

    /// Get a reference to the database pool if available.
    pub fn database(&self) -> Option<&PgPool> {
        self.database.as_ref()
    }
}
