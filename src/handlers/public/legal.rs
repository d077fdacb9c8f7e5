use axum::extract::Path;

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{LegalPage, LegalService};
use crate::types::LegalPageType;

/// GET /api/legal/:page_type
pub async fn legal_get(Path(page_type): Path<String>) -> ApiResult<LegalPage> {
    let page_type: LegalPageType = page_type
        .parse()
        .map_err(|_| ApiError::not_found(format!("Legal page '{}' not found", page_type)))?;

    let service = LegalService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.get(page_type).await?))
}
