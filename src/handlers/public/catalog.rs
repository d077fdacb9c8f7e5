use axum::extract::{Path, Query};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::catalog::{
    CatalogBrowser, CatalogSource, Category, CategoryId, Entry, PgCatalogSource, Section, SectionId, Selection,
    TreeNodeView,
};
use crate::config;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// Requested limit, clamped to `1..=catalog.entries_limit`
fn entries_limit(requested: Option<i32>) -> i32 {
    let max = config::config().catalog.entries_limit.max(1);
    requested.unwrap_or(max).clamp(1, max)
}

/// GET /api/categories
pub async fn categories_get() -> ApiResult<Vec<Category>> {
    Ok(ApiResponse::success(PgCatalogSource::shared().fetch_categories().await?))
}

/// GET /api/categories/:id/sections
pub async fn sections_get(Path(category_id): Path<CategoryId>) -> ApiResult<Vec<Section>> {
    Ok(ApiResponse::success(PgCatalogSource::shared().fetch_sections(category_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    pub limit: Option<i32>,
}

/// GET /api/entries?limit=N
pub async fn entries_get(Query(query): Query<EntriesQuery>) -> ApiResult<Vec<Entry>> {
    let limit = entries_limit(query.limit);
    Ok(ApiResponse::success(PgCatalogSource::shared().fetch_entries(limit).await?))
}

/// `?category=` with nothing after it means no category
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<CategoryId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub section: Option<SectionId>,
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogView<'a> {
    pub tree: Vec<TreeNodeView<'a>>,
    pub selection: &'a Selection,
    pub entries: Vec<&'a Entry>,
    pub total: usize,
    /// Slices that failed to load and were served empty
    pub errors: Vec<String>,
}

/// GET /api/catalog?category=&section=&q=
///
/// One page load of the public directory: the tree, the selection it
/// implies and the entries visible under it. Load failures, an unreachable
/// database included, degrade to empty slices and are listed in `errors`.
pub async fn catalog_get(Query(query): Query<CatalogQuery>) -> ApiResult<serde_json::Value> {
    let data = catalog_view(&PgCatalogSource::shared(), query).await?;
    Ok(ApiResponse::success(data))
}

async fn catalog_view(source: &dyn CatalogSource, query: CatalogQuery) -> Result<serde_json::Value, ApiError> {
    let mut browser = CatalogBrowser::new();
    browser.load(source, entries_limit(None)).await;
    browser.focus(&Selection::from_params(query.category, query.section, query.q));

    let errors = browser
        .tree()
        .load_error()
        .into_iter()
        .chain(browser.entries_error())
        .map(|e| e.to_string())
        .collect();

    let entries = browser.visible_entries();
    let view = CatalogView {
        tree: browser.tree().views(),
        selection: browser.selection(),
        total: entries.len(),
        entries,
        errors,
    };

    // Serialize here so the view can borrow from the browser
    serde_json::to_value(&view).map_err(|e| {
        tracing::error!("Failed to serialize catalog view: {}", e);
        ApiError::internal_server_error("Failed to format response")
    })
}
