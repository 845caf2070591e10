//! In-memory storage backend and session store.
//!
//! Used when no DATABASE_URL is configured, and by the test suites.

use super::{SessionStore, StorageBackend, StorageError, traits::session_ttl};
use crate::models::{NewSpellbook, Session, Spell, Spellbook};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// In-memory spellbook and spell storage.
#[derive(Default)]
pub struct MemoryStorageBackend {
    spellbooks: RwLock<Vec<Spellbook>>,
    spells: RwLock<Vec<Spell>>,
}

impl MemoryStorageBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with a pre-loaded spell catalog.
    pub fn with_spells(spells: Vec<Spell>) -> Self {
        Self {
            spellbooks: RwLock::new(Vec::new()),
            spells: RwLock::new(spells),
        }
    }
}

#[async_trait]
impl StorageBackend for MemoryStorageBackend {
    async fn list_spellbooks_by_owner(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Spellbook>, StorageError> {
        let spellbooks = self.spellbooks.read().await;
        Ok(spellbooks
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_spellbook_for_owner(
        &self,
        spellbook_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Spellbook>, StorageError> {
        let spellbooks = self.spellbooks.read().await;
        Ok(spellbooks
            .iter()
            .find(|s| s.id == spellbook_id && s.user_id == user_id)
            .cloned())
    }

    async fn create_spellbook(&self, spellbook: NewSpellbook) -> Result<Spellbook, StorageError> {
        let created = spellbook.into_spellbook(Uuid::new_v4(), Utc::now());
        self.spellbooks.write().await.push(created.clone());
        Ok(created)
    }

    async fn list_spells(&self) -> Result<Vec<Spell>, StorageError> {
        let mut spells = self.spells.read().await.clone();
        spells.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));
        Ok(spells)
    }
}

/// In-memory session store keyed by session id.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh session for a user, the way the login provider would.
    pub async fn issue(&self, user_id: Uuid) -> Session {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().simple().to_string(),
            user_id,
            created_at: now,
            expires_at: now + session_ttl(),
        };
        self.insert(session.clone()).await;
        session
    }

    /// Insert a session record as-is, e.g. one issued elsewhere.
    pub async fn insert(&self, session: Session) {
        self.sessions.lock().await.insert(session.id.clone(), session);
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn validate_session(&self, session_id: &str) -> Result<Option<Session>, StorageError> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(session_id) {
            Some(session) if session.is_expired(Utc::now()) => {
                sessions.remove(session_id);
                Ok(None)
            }
            Some(session) => Ok(Some(session.clone())),
            None => Ok(None),
        }
    }

    async fn invalidate_session(&self, session_id: &str) -> Result<(), StorageError> {
        self.sessions.lock().await.remove(session_id);
        Ok(())
    }
}
