//! OpenAPI specification definition.
//!
//! Aggregates the internal API handlers and schemas for documentation generation.

use crate::models::{ClassTag, Spell, Spellbook};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::api::get_spellbook,
        crate::routes::api::list_spells,
    ),
    components(schemas(Spellbook, Spell, ClassTag)),
    tags(
        (name = "Spellbooks", description = "User-owned spellbooks"),
        (name = "Spells", description = "Read-only spell catalog")
    ),
    info(
        title = "Spellbook Server API",
        description = "Internal API consumed by the spellbook page handlers"
    )
)]
pub struct ApiDoc;
