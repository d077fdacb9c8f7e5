use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Deserialize;

use crate::catalog::{CategoryId, Section, SectionId};
use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{SectionInput, TaxonomyService};

async fn service() -> Result<TaxonomyService, crate::error::ApiError> {
    Ok(TaxonomyService::new(DatabaseManager::pool().await?))
}

#[derive(Debug, Deserialize)]
pub struct SectionsQuery {
    pub category_id: Option<CategoryId>,
}

/// GET /api/admin/sections[?category_id=]
pub async fn list(Query(query): Query<SectionsQuery>) -> ApiResult<Vec<Section>> {
    Ok(ApiResponse::success(service().await?.list_sections(query.category_id).await?))
}

/// POST /api/admin/sections
pub async fn post(Json(input): Json<SectionInput>) -> ApiResult<Section> {
    Ok(ApiResponse::created(service().await?.create_section(input).await?))
}

/// PUT /api/admin/sections/:id
pub async fn put(Path(id): Path<SectionId>, Json(input): Json<SectionInput>) -> ApiResult<Section> {
    Ok(ApiResponse::success(service().await?.update_section(id, input).await?))
}

/// DELETE /api/admin/sections/:id
pub async fn delete(Path(id): Path<SectionId>) -> ApiResult<()> {
    service().await?.delete_section(id).await?;
    Ok(ApiResponse::no_content())
}
