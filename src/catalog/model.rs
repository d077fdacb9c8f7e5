//! Catalog records as stored in Postgres and served over the public API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::{ContentFormat, ContentType, EntryStatus};

pub type CategoryId = Uuid;
pub type SectionId = Uuid;

/// Top-level taxonomy node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    /// Presentation only
    pub color: String,
    /// Display order; not unique
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Second-level taxonomy node, owned by exactly one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Section {
    pub id: SectionId,
    pub category_id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category_id: CategoryId,
    pub section_id: Option<SectionId>,
    #[sqlx(try_from = "String")]
    pub content_type: ContentType,
    pub content: String,
    #[sqlx(try_from = "String")]
    pub content_format: ContentFormat,
    #[sqlx(try_from = "String")]
    pub status: EntryStatus,
    pub is_favorite: bool,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}
