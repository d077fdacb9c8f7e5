use axum::{extract::Path, Json};

use crate::catalog::{Category, CategoryId};
use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{CategoryInput, TaxonomyService};

async fn service() -> Result<TaxonomyService, crate::error::ApiError> {
    Ok(TaxonomyService::new(DatabaseManager::pool().await?))
}

/// GET /api/admin/categories
pub async fn list() -> ApiResult<Vec<Category>> {
    Ok(ApiResponse::success(service().await?.list_categories().await?))
}

/// GET /api/admin/categories/:id
pub async fn get(Path(id): Path<CategoryId>) -> ApiResult<Category> {
    Ok(ApiResponse::success(service().await?.get_category(id).await?))
}

/// POST /api/admin/categories
pub async fn post(Json(input): Json<CategoryInput>) -> ApiResult<Category> {
    Ok(ApiResponse::created(service().await?.create_category(input).await?))
}

/// PUT /api/admin/categories/:id
pub async fn put(Path(id): Path<CategoryId>, Json(input): Json<CategoryInput>) -> ApiResult<Category> {
    Ok(ApiResponse::success(service().await?.update_category(id, input).await?))
}

/// DELETE /api/admin/categories/:id
pub async fn delete(Path(id): Path<CategoryId>) -> ApiResult<()> {
    service().await?.delete_category(id).await?;
    Ok(ApiResponse::no_content())
}
