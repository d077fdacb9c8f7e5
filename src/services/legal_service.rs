use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use super::validation::FieldErrors;
use super::ServiceError;
use crate::database::Repository;
use crate::filter::FilterData;
use crate::types::LegalPageType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LegalPage {
    pub id: Uuid,
    #[sqlx(try_from = "String")]
    pub page_type: LegalPageType,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegalPageInput {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl LegalPageInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut errors = FieldErrors::new();
        errors.length("title", self.title.trim(), 2, 200);
        errors.finish()
    }
}

pub struct LegalService {
    pool: PgPool,
}

impl LegalService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<LegalPage>, ServiceError> {
        Ok(Repository::<LegalPage>::new("legal_pages", self.pool.clone())
            .select_any(FilterData::default().order_by("page_type"))
            .await?)
    }

    pub async fn get(&self, page_type: LegalPageType) -> Result<LegalPage, ServiceError> {
        Repository::<LegalPage>::new("legal_pages", self.pool.clone())
            .select_one(FilterData::eq("page_type", page_type.as_str()))
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Legal page '{}' not found", page_type)))
    }

    pub async fn update(&self, page_type: LegalPageType, input: LegalPageInput) -> Result<LegalPage, ServiceError> {
        input.validate()?;
        let page = sqlx::query_as::<_, LegalPage>(
            r#"
            UPDATE legal_pages
            SET title = $2, content = $3, updated_at = now()
            WHERE page_type = $1
            RETURNING *
            "#,
        )
        .bind(page_type.as_str())
        .bind(input.title.trim())
        .bind(&input.content)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Legal page '{}' not found", page_type)))?;

        info!(page_type = %page_type, "Updated legal page");
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_required() {
        let input = LegalPageInput { title: "  ".into(), content: String::new() };
        assert!(input.validate().is_err());
        let input = LegalPageInput { title: "Aviso Legal".into(), content: String::new() };
        assert!(input.validate().is_ok());
    }
}
