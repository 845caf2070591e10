//! Session store for PostgreSQL.
//!
//! Sessions are written by the login provider; this store looks them up
//! and deletes them.

use super::{SessionStore, StorageError};
use crate::models::Session;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            user_id: row.user_id,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

/// Database-backed session store
pub struct DbSessionStore {
    pool: PgPool,
}

impl DbSessionStore {
    /// Create a new database session store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for DbSessionStore {
    async fn validate_session(&self, session_id: &str) -> Result<Option<Session>, StorageError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_id, created_at, expires_at
            FROM sessions
            WHERE id = $1 AND expires_at > NOW()
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Session::from))
    }

    async fn invalidate_session(&self, session_id: &str) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Start background task to clean up expired sessions
pub async fn start_session_cleanup_task(pool: PgPool) {
    let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(3600)); // Run every hour

    loop {
        interval.tick().await;

        match sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE expires_at < NOW()
            "#,
        )
        .execute(&pool)
        .await
        {
            Ok(result) => {
                tracing::debug!("Removed {} expired sessions", result.rows_affected());
            }
            Err(e) => tracing::error!("Failed to cleanup expired sessions: {}", e),
        }
    }
}
