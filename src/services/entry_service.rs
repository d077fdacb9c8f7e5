use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use super::validation::{non_empty, FieldErrors};
use super::ServiceError;
use crate::catalog::{CategoryId, Entry, SectionId};
use crate::database::Repository;
use crate::types::{ContentFormat, ContentType, EntryStatus};

fn default_format() -> ContentFormat {
    ContentFormat::Plaintext
}

fn default_status() -> EntryStatus {
    EntryStatus::Draft
}

/// Admin form payload for creating or replacing an entry
#[derive(Debug, Clone, Deserialize)]
pub struct EntryInput {
    pub title: String,
    pub description: Option<String>,
    pub category_id: CategoryId,
    pub section_id: Option<SectionId>,
    pub content_type: ContentType,
    pub content: String,
    #[serde(default = "default_format")]
    pub content_format: ContentFormat,
    #[serde(default = "default_status")]
    pub status: EntryStatus,
    #[serde(default)]
    pub is_favorite: bool,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}

impl EntryInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut errors = FieldErrors::new();
        errors.length("title", &self.title, 3, 200);
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            errors.length("description", description, 10, 500);
        }
        errors.not_blank("content", &self.content);
        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                errors.add("rating", "Must be between 1 and 5");
            }
        }
        errors.finish()
    }

    fn unique_tag_ids(&self) -> Vec<Uuid> {
        let mut ids = self.tag_ids.clone();
        ids.sort();
        ids.dedup();
        ids
    }
}

/// Row of the admin entry table
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EntryListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub entry: Entry,
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryDetail {
    #[serde(flatten)]
    pub entry: Entry,
    pub tag_ids: Vec<Uuid>,
}

pub struct EntryService {
    pool: PgPool,
}

impl EntryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every entry regardless of status, newest first
    pub async fn list(&self) -> Result<Vec<EntryListItem>, ServiceError> {
        let rows = sqlx::query_as::<_, EntryListItem>(
            r#"
            SELECT e.*, c.name AS category_name
            FROM entries e
            LEFT JOIN categories c ON c.id = e.category_id
            ORDER BY e.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: Uuid) -> Result<EntryDetail, ServiceError> {
        let entry = Repository::<Entry>::new("entries", self.pool.clone()).select_by_id(id).await?;
        let tag_ids = sqlx::query_scalar::<_, Uuid>("SELECT tag_id FROM entry_tags WHERE entry_id = $1 ORDER BY tag_id")
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(EntryDetail { entry, tag_ids })
    }

    pub async fn create(&self, input: EntryInput, created_by: Uuid) -> Result<EntryDetail, ServiceError> {
        input.validate()?;
        let tag_ids = input.unique_tag_ids();

        let mut tx = self.pool.begin().await?;
        check_section(&mut tx, input.category_id, input.section_id).await?;

        let entry = sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO entries
                (title, description, category_id, section_id, content_type, content,
                 content_format, status, is_favorite, rating, notes, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(non_empty(input.description))
        .bind(input.category_id)
        .bind(input.section_id)
        .bind(input.content_type.as_str())
        .bind(&input.content)
        .bind(input.content_format.as_str())
        .bind(input.status.as_str())
        .bind(input.is_favorite)
        .bind(input.rating)
        .bind(non_empty(input.notes))
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;

        replace_tags(&mut tx, entry.id, &tag_ids).await?;
        tx.commit().await?;

        info!(id = %entry.id, status = %entry.status, "Created entry");
        Ok(EntryDetail { entry, tag_ids })
    }

    /// Replace every field, and the tag set wholesale, in one transaction
    pub async fn update(&self, id: Uuid, input: EntryInput) -> Result<EntryDetail, ServiceError> {
        input.validate()?;
        let tag_ids = input.unique_tag_ids();

        let mut tx = self.pool.begin().await?;
        check_section(&mut tx, input.category_id, input.section_id).await?;

        let entry = sqlx::query_as::<_, Entry>(
            r#"
            UPDATE entries
            SET title = $2, description = $3, category_id = $4, section_id = $5,
                content_type = $6, content = $7, content_format = $8, status = $9,
                is_favorite = $10, rating = $11, notes = $12, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(non_empty(input.description))
        .bind(input.category_id)
        .bind(input.section_id)
        .bind(input.content_type.as_str())
        .bind(&input.content)
        .bind(input.content_format.as_str())
        .bind(input.status.as_str())
        .bind(input.is_favorite)
        .bind(input.rating)
        .bind(non_empty(input.notes))
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Entry {} not found", id)))?;

        replace_tags(&mut tx, id, &tag_ids).await?;
        tx.commit().await?;

        info!(%id, tags = tag_ids.len(), "Updated entry");
        Ok(EntryDetail { entry, tag_ids })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound(format!("Entry {} not found", id)));
        }
        info!(%id, "Deleted entry");
        Ok(())
    }
}

/// The chosen category must exist, and a chosen section must belong to it
async fn check_section(
    conn: &mut PgConnection,
    category_id: CategoryId,
    section_id: Option<SectionId>,
) -> Result<(), ServiceError> {
    let category = sqlx::query_scalar::<_, Uuid>("SELECT id FROM categories WHERE id = $1")
        .bind(category_id)
        .fetch_optional(&mut *conn)
        .await?;
    if category.is_none() {
        return Err(ServiceError::field("category_id", "Select a valid category"));
    }

    if let Some(section_id) = section_id {
        let owner = sqlx::query_scalar::<_, Uuid>("SELECT category_id FROM sections WHERE id = $1")
            .bind(section_id)
            .fetch_optional(&mut *conn)
            .await?;
        if owner != Some(category_id) {
            return Err(ServiceError::field("section_id", "Section does not belong to the selected category"));
        }
    }
    Ok(())
}

async fn replace_tags(conn: &mut PgConnection, entry_id: Uuid, tag_ids: &[Uuid]) -> Result<(), ServiceError> {
    sqlx::query("DELETE FROM entry_tags WHERE entry_id = $1")
        .bind(entry_id)
        .execute(&mut *conn)
        .await?;
    if !tag_ids.is_empty() {
        sqlx::query("INSERT INTO entry_tags (entry_id, tag_id) SELECT $1, unnest($2::uuid[])")
            .bind(entry_id)
            .bind(tag_ids)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn input() -> EntryInput {
        serde_json::from_value(json!({
            "title": "Code review prompt",
            "description": "Reviews a diff for obvious bugs",
            "category_id": Uuid::new_v4(),
            "content_type": "prompt",
            "content": "Review the following diff...",
        }))
        .unwrap()
    }

    #[test]
    fn defaults_are_draft_plaintext() {
        let e = input();
        assert_eq!(e.status, EntryStatus::Draft);
        assert_eq!(e.content_format, ContentFormat::Plaintext);
        assert!(e.section_id.is_none());
        assert!(e.tag_ids.is_empty());
        assert!(e.validate().is_ok());
    }

    #[test]
    fn field_rules() {
        let mut e = input();
        e.title = "ab".into();
        e.description = Some("short".into());
        e.content = "   ".into();
        e.rating = Some(6);
        assert_matches!(e.validate(), Err(ServiceError::Validation { field_errors, .. }) => {
            for field in ["title", "description", "content", "rating"] {
                assert!(field_errors.contains_key(field), "missing {field}");
            }
        });
    }

    #[test]
    fn empty_description_is_allowed() {
        let mut e = input();
        e.description = Some(String::new());
        e.rating = Some(5);
        assert!(e.validate().is_ok());
    }

    #[test]
    fn unknown_content_type_is_rejected_on_parse() {
        let parsed = serde_json::from_value::<EntryInput>(json!({
            "title": "Video", "category_id": Uuid::new_v4(),
            "content_type": "video", "content": "x",
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn tag_ids_are_deduplicated() {
        let t = Uuid::new_v4();
        let mut e = input();
        e.tag_ids = vec![t, t];
        assert_eq!(e.unique_tag_ids(), vec![t]);
    }
}
