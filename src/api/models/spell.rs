use super::class_tag::ClassTag;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog spell. Read-only from the service's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Spell {
    pub index: String,
    pub name: String,
    /// 0 for cantrips, otherwise 1-9
    pub level: i16,
    pub school: String,
    pub casting_time: String,
    pub range: String,
    #[serde(default)]
    pub components: Vec<String>,
    pub duration: String,
    pub description: String,
    #[serde(default)]
    pub classes: Vec<ClassTag>,
}
