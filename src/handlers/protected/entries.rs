use axum::{
    extract::{Extension, Path},
    Json,
};
use uuid::Uuid;

use crate::auth::Session;
use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{EntryDetail, EntryInput, EntryListItem, EntryService};

async fn service() -> Result<EntryService, crate::error::ApiError> {
    Ok(EntryService::new(DatabaseManager::pool().await?))
}

/// GET /api/admin/entries
pub async fn list() -> ApiResult<Vec<EntryListItem>> {
    Ok(ApiResponse::success(service().await?.list().await?))
}

/// GET /api/admin/entries/:id
pub async fn get(Path(id): Path<Uuid>) -> ApiResult<EntryDetail> {
    Ok(ApiResponse::success(service().await?.get(id).await?))
}

/// POST /api/admin/entries
pub async fn post(Extension(session): Extension<Session>, Json(input): Json<EntryInput>) -> ApiResult<EntryDetail> {
    Ok(ApiResponse::created(service().await?.create(input, session.user_id).await?))
}

/// PUT /api/admin/entries/:id - full replacement, tags included
pub async fn put(Path(id): Path<Uuid>, Json(input): Json<EntryInput>) -> ApiResult<EntryDetail> {
    Ok(ApiResponse::success(service().await?.update(id, input).await?))
}

/// DELETE /api/admin/entries/:id
pub async fn delete(Path(id): Path<Uuid>) -> ApiResult<()> {
    service().await?.delete(id).await?;
    Ok(ApiResponse::no_content())
}
