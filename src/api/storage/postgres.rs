//! PostgreSQL storage backend implementation.
//!
//! Uses sqlx for database operations and implements the StorageBackend trait.

use super::{StorageError, traits::*};
use crate::models::{ClassTag, NewSpellbook, Spell, Spellbook};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct SpellbookRow {
    id: Uuid,
    index: String,
    spellbook_name: String,
    character_name: String,
    description: String,
    classes: Vec<String>,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<SpellbookRow> for Spellbook {
    type Error = StorageError;

    fn try_from(row: SpellbookRow) -> Result<Self, Self::Error> {
        Ok(Spellbook {
            id: row.id,
            index: row.index,
            spellbook_name: row.spellbook_name,
            character_name: row.character_name,
            description: row.description,
            classes: parse_classes(&row.classes)?,
            user_id: row.user_id,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SpellRow {
    index: String,
    name: String,
    level: i16,
    school: String,
    casting_time: String,
    range: String,
    components: Vec<String>,
    duration: String,
    description: String,
    classes: Vec<String>,
}

impl TryFrom<SpellRow> for Spell {
    type Error = StorageError;

    fn try_from(row: SpellRow) -> Result<Self, Self::Error> {
        Ok(Spell {
            index: row.index,
            name: row.name,
            level: row.level,
            school: row.school,
            casting_time: row.casting_time,
            range: row.range,
            components: row.components,
            duration: row.duration,
            description: row.description,
            classes: parse_classes(&row.classes)?,
        })
    }
}

fn parse_classes(raw: &[String]) -> Result<Vec<ClassTag>, StorageError> {
    raw.iter()
        .map(|c| c.parse::<ClassTag>().map_err(StorageError::Corrupt))
        .collect()
}

/// PostgreSQL storage backend implementation.
pub struct PostgresStorageBackend {
    pool: PgPool,
}

impl PostgresStorageBackend {
    /// Create a new PostgreSQL storage backend.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorageBackend for PostgresStorageBackend {
    async fn list_spellbooks_by_owner(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Spellbook>, StorageError> {
        let rows = sqlx::query_as::<_, SpellbookRow>(
            r#"
            SELECT id, index, spellbook_name, character_name, description, classes, user_id, created_at
            FROM spellbooks
            WHERE user_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Spellbook::try_from).collect()
    }

    async fn get_spellbook_for_owner(
        &self,
        spellbook_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Spellbook>, StorageError> {
        let row = sqlx::query_as::<_, SpellbookRow>(
            r#"
            SELECT id, index, spellbook_name, character_name, description, classes, user_id, created_at
            FROM spellbooks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(spellbook_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Spellbook::try_from).transpose()
    }

    async fn create_spellbook(&self, spellbook: NewSpellbook) -> Result<Spellbook, StorageError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let classes: Vec<String> = spellbook
            .classes
            .iter()
            .map(|c| c.as_str().to_string())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO spellbooks (id, index, spellbook_name, character_name, description, classes, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(&spellbook.index)
        .bind(&spellbook.spellbook_name)
        .bind(&spellbook.character_name)
        .bind(&spellbook.description)
        .bind(&classes)
        .bind(spellbook.user_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(spellbook.into_spellbook(id, now))
    }

    async fn list_spells(&self) -> Result<Vec<Spell>, StorageError> {
        let rows = sqlx::query_as::<_, SpellRow>(
            r#"
            SELECT index, name, level, school, casting_time, range, components, duration, description, classes
            FROM spells
            ORDER BY level, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Spell::try_from).collect()
    }
}
