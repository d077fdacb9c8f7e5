use axum::{extract::Path, Json};

use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{LegalPage, LegalPageInput, LegalService};
use crate::types::LegalPageType;

/// GET /api/admin/legal
pub async fn list() -> ApiResult<Vec<LegalPage>> {
    let service = LegalService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.list().await?))
}

/// PUT /api/admin/legal/:page_type
pub async fn put(Path(page_type): Path<String>, Json(input): Json<LegalPageInput>) -> ApiResult<LegalPage> {
    let page_type: LegalPageType = page_type.parse()?;
    let service = LegalService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.update(page_type, input).await?))
}
