//! Storage module for the API.
//!
//! Provides PostgreSQL and in-memory backends for spellbooks, spells and sessions.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod session_store;
pub mod traits;

pub use error::StorageError;
pub use memory::{MemorySessionStore, MemoryStorageBackend};
pub use postgres::PostgresStorageBackend;
pub use session_store::DbSessionStore;
pub use traits::{SessionStore, SharedSessionStore, SharedStorage, StorageBackend};
