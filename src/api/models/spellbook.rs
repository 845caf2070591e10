use super::class_tag::ClassTag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A user-owned spellbook as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Spellbook {
    pub id: Uuid,
    /// Lookup index derived from the spellbook name
    pub index: String,
    pub spellbook_name: String,
    pub character_name: String,
    pub description: String,
    /// One to three classes, in the order they were submitted
    pub classes: Vec<ClassTag>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insert parameters for a spellbook. The owner is fixed here and never
/// changes afterwards.
#[derive(Debug, Clone)]
pub struct NewSpellbook {
    pub index: String,
    pub spellbook_name: String,
    pub character_name: String,
    pub description: String,
    pub classes: Vec<ClassTag>,
    pub user_id: Uuid,
}

impl NewSpellbook {
    pub fn into_spellbook(self, id: Uuid, created_at: DateTime<Utc>) -> Spellbook {
        Spellbook {
            id,
            index: self.index,
            spellbook_name: self.spellbook_name,
            character_name: self.character_name,
            description: self.description,
            classes: self.classes,
            user_id: self.user_id,
            created_at,
        }
    }
}
