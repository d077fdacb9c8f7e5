use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::validation::{non_empty, FieldErrors, DEFAULT_COLOR};
use super::ServiceError;
use crate::catalog::{Category, CategoryId, Section, SectionId};
use crate::database::Repository;
use crate::filter::FilterData;

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CategoryInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut errors = FieldErrors::new();
        errors.length("name", &self.name, 2, 100);
        errors.length("slug", &self.slug, 2, 100);
        errors.max_length("description", self.description.as_deref(), 500);
        errors.max_length("icon", self.icon.as_deref(), 50);
        errors.color("color", &self.color);
        errors.finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionInput {
    pub category_id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl SectionInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut errors = FieldErrors::new();
        errors.length("name", &self.name, 2, 100);
        errors.length("slug", &self.slug, 2, 100);
        errors.max_length("description", self.description.as_deref(), 500);
        errors.finish()
    }
}

/// Category and section administration. Unlike the public catalog these
/// reads include inactive rows.
pub struct TaxonomyService {
    pool: PgPool,
}

impl TaxonomyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ServiceError> {
        let categories = Repository::<Category>::new("categories", self.pool.clone())
            .select_any(FilterData::default().order_by("order_index asc"))
            .await?;
        Ok(categories)
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<Category, ServiceError> {
        Ok(Repository::<Category>::new("categories", self.pool.clone()).select_by_id(id).await?)
    }

    pub async fn create_category(&self, input: CategoryInput) -> Result<Category, ServiceError> {
        input.validate()?;
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, slug, description, icon, color, order_index, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(non_empty(input.description))
        .bind(non_empty(input.icon))
        .bind(&input.color)
        .bind(input.order_index)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await?;

        info!(id = %category.id, slug = %category.slug, "Created category");
        Ok(category)
    }

    pub async fn update_category(&self, id: CategoryId, input: CategoryInput) -> Result<Category, ServiceError> {
        input.validate()?;
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, slug = $3, description = $4, icon = $5, color = $6,
                order_index = $7, is_active = $8, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(non_empty(input.description))
        .bind(non_empty(input.icon))
        .bind(&input.color)
        .bind(input.order_index)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", id)))
    }

    /// Fails with a conflict while entries still reference the category
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound(format!("Category {} not found", id)));
        }
        info!(%id, "Deleted category");
        Ok(())
    }

    pub async fn list_sections(&self, category_id: Option<CategoryId>) -> Result<Vec<Section>, ServiceError> {
        let filter = match category_id {
            Some(id) => FilterData::eq("category_id", id.to_string()).order_by("order_index asc"),
            None => FilterData::default().order_by("category_id, order_index"),
        };
        Ok(Repository::<Section>::new("sections", self.pool.clone()).select_any(filter).await?)
    }

    pub async fn create_section(&self, input: SectionInput) -> Result<Section, ServiceError> {
        input.validate()?;
        self.require_category(input.category_id).await?;

        let section = sqlx::query_as::<_, Section>(
            r#"
            INSERT INTO sections (category_id, name, slug, description, order_index, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(input.category_id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(non_empty(input.description))
        .bind(input.order_index)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await?;

        info!(id = %section.id, category = %section.category_id, "Created section");
        Ok(section)
    }

    pub async fn update_section(&self, id: SectionId, input: SectionInput) -> Result<Section, ServiceError> {
        input.validate()?;
        self.require_category(input.category_id).await?;

        sqlx::query_as::<_, Section>(
            r#"
            UPDATE sections
            SET category_id = $2, name = $3, slug = $4, description = $5,
                order_index = $6, is_active = $7, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.category_id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(non_empty(input.description))
        .bind(input.order_index)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Section {} not found", id)))
    }

    /// Entries in the section keep their category and lose the section
    pub async fn delete_section(&self, id: SectionId) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound(format!("Section {} not found", id)));
        }
        info!(%id, "Deleted section");
        Ok(())
    }

    async fn require_category(&self, id: Uuid) -> Result<(), ServiceError> {
        let count = Repository::<Category>::new("categories", self.pool.clone())
            .count(FilterData::eq("id", id.to_string()))
            .await?;
        if count == 0 {
            return Err(ServiceError::field("category_id", "Select a valid category"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn category_input() -> CategoryInput {
        serde_json::from_value(json!({ "name": "Prompts", "slug": "prompts" })).unwrap()
    }

    #[test]
    fn category_defaults_apply() {
        let input = category_input();
        assert_eq!(input.color, DEFAULT_COLOR);
        assert_eq!(input.order_index, 0);
        assert!(input.is_active);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn category_rules() {
        let mut input = category_input();
        input.name = "P".into();
        input.color = "blue".into();
        input.icon = Some("i".repeat(51));
        assert_matches!(input.validate(), Err(ServiceError::Validation { field_errors, .. }) => {
            assert!(field_errors.contains_key("name"));
            assert!(field_errors.contains_key("color"));
            assert!(field_errors.contains_key("icon"));
            assert!(!field_errors.contains_key("slug"));
        });
    }

    #[test]
    fn section_rules() {
        let input: SectionInput = serde_json::from_value(json!({
            "category_id": Uuid::new_v4(),
            "name": "Coding",
            "slug": "c",
            "description": "d".repeat(501),
        }))
        .unwrap();
        assert_matches!(input.validate(), Err(ServiceError::Validation { field_errors, .. }) => {
            assert_eq!(field_errors.len(), 2);
            assert!(field_errors.contains_key("slug"));
            assert!(field_errors.contains_key("description"));
        });
    }
}
