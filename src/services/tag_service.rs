use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::validation::{non_empty, slugify, FieldErrors, DEFAULT_COLOR};
use super::ServiceError;
use crate::catalog::Tag;
use crate::database::Repository;
use crate::filter::FilterData;

/// Slug and color may be omitted; they default from the name and the
/// house color.
#[derive(Debug, Clone, Deserialize)]
pub struct TagInput {
    pub name: String,
    pub slug: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct ResolvedTag {
    name: String,
    slug: String,
    color: String,
}

impl TagInput {
    fn resolve(self) -> Result<ResolvedTag, ServiceError> {
        let name = self.name.trim().to_string();
        let slug = non_empty(self.slug).unwrap_or_else(|| slugify(&name));
        let color = non_empty(self.color).unwrap_or_else(|| DEFAULT_COLOR.to_string());

        let mut errors = FieldErrors::new();
        errors.length("name", &name, 2, 50);
        errors.length("slug", &slug, 2, 50);
        errors.color("color", &color);
        errors.finish()?;

        Ok(ResolvedTag { name, slug, color })
    }
}

pub struct TagService {
    pool: PgPool,
}

impl TagService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Tag>, ServiceError> {
        Ok(Repository::<Tag>::new("tags", self.pool.clone())
            .select_any(FilterData::default().order_by("name"))
            .await?)
    }

    pub async fn create(&self, input: TagInput) -> Result<Tag, ServiceError> {
        let tag = input.resolve()?;
        let created = sqlx::query_as::<_, Tag>("INSERT INTO tags (name, slug, color) VALUES ($1, $2, $3) RETURNING *")
            .bind(&tag.name)
            .bind(&tag.slug)
            .bind(&tag.color)
            .fetch_one(&self.pool)
            .await?;
        info!(id = %created.id, slug = %created.slug, "Created tag");
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, input: TagInput) -> Result<Tag, ServiceError> {
        let tag = input.resolve()?;
        sqlx::query_as::<_, Tag>("UPDATE tags SET name = $2, slug = $3, color = $4 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(&tag.name)
            .bind(&tag.slug)
            .bind(&tag.color)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Tag {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1").bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound(format!("Tag {} not found", id)));
        }
        info!(%id, "Deleted tag");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_and_color_default_from_name() {
        let tag = TagInput { name: " Machine Learning ".into(), slug: None, color: Some("".into()) }
            .resolve()
            .unwrap();
        assert_eq!(
            tag,
            ResolvedTag {
                name: "Machine Learning".into(),
                slug: "machine-learning".into(),
                color: DEFAULT_COLOR.into(),
            }
        );
    }

    #[test]
    fn explicit_values_are_validated() {
        let err = TagInput { name: "AI".into(), slug: Some("a".into()), color: Some("#12345".into()) }
            .resolve()
            .unwrap_err();
        match err {
            ServiceError::Validation { field_errors, .. } => {
                assert!(field_errors.contains_key("slug"));
                assert!(field_errors.contains_key("color"));
                assert!(!field_errors.contains_key("name"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
