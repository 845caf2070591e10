//! Services module - internal API client and spellbook form handling.

pub mod catalog_client;
pub mod spellbook_service;

pub use catalog_client::{
    CatalogApi, CatalogError, CatalogResponse, HttpCatalogClient, LocalCatalogClient,
    SharedCatalog,
};
pub use spellbook_service::{
    CreateSpellbookForm, FormState, ValidatedSpellbook, string_to_index, validate_create_form,
};
