//! In-memory catalog fixtures for unit tests.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::catalog::error::{CatalogError, Slice};
use crate::catalog::model::{Category, CategoryId, Entry, Section, SectionId};
use crate::catalog::source::CatalogSource;
use crate::types::{ContentFormat, ContentType, EntryStatus};

pub fn category(name: &str, order_index: i32) -> Category {
    let now = Utc::now();
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: name.to_lowercase(),
        description: None,
        icon: None,
        color: "#3B82F6".to_string(),
        order_index,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn section(category_id: CategoryId, name: &str, order_index: i32) -> Section {
    let now = Utc::now();
    Section {
        id: Uuid::new_v4(),
        category_id,
        name: name.to_string(),
        slug: name.to_lowercase(),
        description: None,
        order_index,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// A draft entry; wrap in `published` to make it visible to `fetch_entries`
pub fn entry(
    title: &str,
    description: Option<&str>,
    content: &str,
    category_id: CategoryId,
    section_id: Option<SectionId>,
) -> Entry {
    let now = Utc::now();
    Entry {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: description.map(str::to_string),
        category_id,
        section_id,
        content_type: ContentType::Prompt,
        content: content.to_string(),
        content_format: ContentFormat::Plaintext,
        status: EntryStatus::Draft,
        is_favorite: false,
        rating: None,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn published(mut entry: Entry) -> Entry {
    entry.status = EntryStatus::Published;
    entry
}

/// Catalog source over fixed vectors, with one slice optionally failing
#[derive(Debug, Default)]
pub struct MemorySource {
    categories: Vec<Category>,
    sections: Vec<Section>,
    entries: Vec<Entry>,
    failing: Option<Slice>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_entries(mut self, entries: Vec<Entry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn failing(mut self, slice: Slice) -> Self {
        self.failing = Some(slice);
        self
    }

    fn check(&self, slice: Slice) -> Result<(), CatalogError> {
        match self.failing {
            Some(f) if f == slice => Err(CatalogError::load_failure(slice, "simulated outage")),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogSource for MemorySource {
    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.check(Slice::Categories)?;
        let mut out: Vec<_> = self.categories.iter().filter(|c| c.is_active).cloned().collect();
        out.sort_by_key(|c| c.order_index);
        Ok(out)
    }

    async fn fetch_sections(&self, category_id: CategoryId) -> Result<Vec<Section>, CatalogError> {
        self.check(Slice::Sections)?;
        let mut out: Vec<_> = self
            .sections
            .iter()
            .filter(|s| s.category_id == category_id && s.is_active)
            .cloned()
            .collect();
        out.sort_by_key(|s| s.order_index);
        Ok(out)
    }

    async fn fetch_entries(&self, limit: i32) -> Result<Vec<Entry>, CatalogError> {
        self.check(Slice::Entries)?;
        let mut out: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.status == EntryStatus::Published)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out.truncate(limit.max(0) as usize);
        Ok(out)
    }
}
