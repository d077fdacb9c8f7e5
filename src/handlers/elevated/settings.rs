use axum::Json;

use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{SettingsInput, SettingsService, SystemSettings};

/// GET /api/admin/settings
pub async fn get() -> ApiResult<SystemSettings> {
    let service = SettingsService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.get().await?))
}

/// PUT /api/admin/settings
pub async fn put(Json(input): Json<SettingsInput>) -> ApiResult<SystemSettings> {
    let service = SettingsService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.replace(input).await?))
}
