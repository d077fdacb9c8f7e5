use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use super::error::{CatalogError, Slice};
use super::model::{Category, CategoryId, Entry, Section};
use crate::database::{DatabaseManager, Repository};
use crate::filter::FilterData;
use crate::types::EntryStatus;

/// Read contract of the external data service backing the public catalog.
///
/// - `fetch_categories`: active categories, `order_index` ascending
/// - `fetch_sections`: active sections of one category, `order_index` ascending
/// - `fetch_entries`: published entries, newest first, at most `limit`
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError>;

    async fn fetch_sections(&self, category_id: CategoryId) -> Result<Vec<Section>, CatalogError>;

    async fn fetch_entries(&self, limit: i32) -> Result<Vec<Entry>, CatalogError>;
}

/// Postgres-backed source reading through the filter layer.
///
/// `shared()` resolves the process-wide pool on every read, so a database
/// that cannot be reached fails the read like any other query error.
#[derive(Clone, Default)]
pub struct PgCatalogSource {
    pool: Option<PgPool>,
}

impl PgCatalogSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Some(pool) }
    }

    pub fn shared() -> Self {
        Self { pool: None }
    }

    async fn pool(&self, slice: Slice) -> Result<PgPool, CatalogError> {
        match &self.pool {
            Some(pool) => Ok(pool.clone()),
            None => DatabaseManager::pool().await.map_err(|e| CatalogError::load_failure(slice, e)),
        }
    }
}

#[async_trait]
impl CatalogSource for PgCatalogSource {
    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Repository::<Category>::new("categories", self.pool(Slice::Categories).await?)
            .select_any(FilterData::where_(json!({ "is_active": true })).order_by("order_index asc"))
            .await
            .map_err(|e| CatalogError::load_failure(Slice::Categories, e))
    }

    async fn fetch_sections(&self, category_id: CategoryId) -> Result<Vec<Section>, CatalogError> {
        Repository::<Section>::new("sections", self.pool(Slice::Sections).await?)
            .select_any(
                FilterData::where_(json!({ "category_id": category_id, "is_active": true }))
                    .order_by("order_index asc"),
            )
            .await
            .map_err(|e| CatalogError::load_failure(Slice::Sections, e))
    }

    async fn fetch_entries(&self, limit: i32) -> Result<Vec<Entry>, CatalogError> {
        Repository::<Entry>::new("entries", self.pool(Slice::Entries).await?)
            .select_any(
                FilterData::eq("status", EntryStatus::Published.as_str())
                    .order_by("created_at desc")
                    .limit(limit),
            )
            .await
            .map_err(|e| CatalogError::load_failure(Slice::Entries, e))
    }
}

/// Source that reads the public JSON API of a running directory server
#[derive(Clone)]
pub struct HttpCatalogSource {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

impl HttpCatalogSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, slice: Slice, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::load_failure(slice, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::load_failure(slice, format!("GET {} returned {}", url, status)));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| CatalogError::load_failure(slice, format!("malformed response from {}: {}", url, e)))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.get(Slice::Categories, "/api/categories").await
    }

    async fn fetch_sections(&self, category_id: CategoryId) -> Result<Vec<Section>, CatalogError> {
        self.get(Slice::Sections, &format!("/api/categories/{}/sections", category_id)).await
    }

    async fn fetch_entries(&self, limit: i32) -> Result<Vec<Entry>, CatalogError> {
        self.get(Slice::Entries, &format!("/api/entries?limit={}", limit)).await
    }
}
