use axum::{extract::Path, Json};
use uuid::Uuid;

use crate::catalog::Tag;
use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{TagInput, TagService};

async fn service() -> Result<TagService, crate::error::ApiError> {
    Ok(TagService::new(DatabaseManager::pool().await?))
}

/// GET /api/admin/tags
pub async fn list() -> ApiResult<Vec<Tag>> {
    Ok(ApiResponse::success(service().await?.list().await?))
}

/// POST /api/admin/tags - slug and color are optional
pub async fn post(Json(input): Json<TagInput>) -> ApiResult<Tag> {
    Ok(ApiResponse::created(service().await?.create(input).await?))
}

/// PUT /api/admin/tags/:id
pub async fn put(Path(id): Path<Uuid>, Json(input): Json<TagInput>) -> ApiResult<Tag> {
    Ok(ApiResponse::success(service().await?.update(id, input).await?))
}

/// DELETE /api/admin/tags/:id
pub async fn delete(Path(id): Path<Uuid>) -> ApiResult<()> {
    service().await?.delete(id).await?;
    Ok(ApiResponse::no_content())
}
