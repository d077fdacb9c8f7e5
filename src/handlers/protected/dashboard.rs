use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{DashboardService, DashboardSummary};

/// GET /api/admin/dashboard
pub async fn dashboard_get() -> ApiResult<DashboardSummary> {
    let service = DashboardService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.summary().await?))
}
