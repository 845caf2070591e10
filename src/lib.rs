//! Spellbook server: session-guarded pages for managing spellbooks and
//! browsing the spell catalog, plus the internal JSON API behind them.

pub mod api;

// Re-export api modules at crate root so routes can use crate::services, crate::models
pub use api::config;
pub use api::middleware;
pub use api::models;
pub use api::routes;
pub use api::services;
pub use api::storage;
