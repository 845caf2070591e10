//! Storage trait definitions for the storage backends.

use super::StorageError;
use crate::models::{NewSpellbook, Session, Spell, Spellbook};
use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

/// How long a freshly issued session stays valid.
pub const SESSION_TTL_DAYS: i64 = 7;

pub fn session_ttl() -> Duration {
    Duration::days(SESSION_TTL_DAYS)
}

/// Storage backend trait for spellbook and spell operations
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// List every spellbook owned by a user, oldest first
    async fn list_spellbooks_by_owner(&self, user_id: Uuid)
    -> Result<Vec<Spellbook>, StorageError>;

    /// Get a spellbook by ID, only if it belongs to the given user
    async fn get_spellbook_for_owner(
        &self,
        spellbook_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Spellbook>, StorageError>;

    /// Create a new spellbook
    async fn create_spellbook(&self, spellbook: NewSpellbook) -> Result<Spellbook, StorageError>;

    /// List the whole spell catalog, ordered by level then name
    async fn list_spells(&self) -> Result<Vec<Spell>, StorageError>;
}

/// Session store trait. Sessions are issued by the auth provider at login
/// and checked here on every request.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up a live session. Expired sessions yield `None`.
    async fn validate_session(&self, session_id: &str) -> Result<Option<Session>, StorageError>;

    /// Destroy a session. Invalidating an unknown session is not an error.
    async fn invalidate_session(&self, session_id: &str) -> Result<(), StorageError>;
}

pub type SharedStorage = Arc<dyn StorageBackend>;
pub type SharedSessionStore = Arc<dyn SessionStore>;
