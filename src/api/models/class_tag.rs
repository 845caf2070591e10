use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Character class a spellbook (or spell) is associated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassTag {
    Artificer,
    Bard,
    Cleric,
    Druid,
    Paladin,
    Ranger,
    Sorcerer,
    Warlock,
    Wizard,
}

impl ClassTag {
    pub const ALL: [ClassTag; 9] = [
        ClassTag::Artificer,
        ClassTag::Bard,
        ClassTag::Cleric,
        ClassTag::Druid,
        ClassTag::Paladin,
        ClassTag::Ranger,
        ClassTag::Sorcerer,
        ClassTag::Warlock,
        ClassTag::Wizard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassTag::Artificer => "artificer",
            ClassTag::Bard => "bard",
            ClassTag::Cleric => "cleric",
            ClassTag::Druid => "druid",
            ClassTag::Paladin => "paladin",
            ClassTag::Ranger => "ranger",
            ClassTag::Sorcerer => "sorcerer",
            ClassTag::Warlock => "warlock",
            ClassTag::Wizard => "wizard",
        }
    }
}

impl fmt::Display for ClassTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ClassTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == wanted)
            .ok_or_else(|| format!("Invalid class: {}", s))
    }
}
