use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::Session;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{Profile, ProfileService};
use crate::types::UserRole;

#[derive(Debug, Deserialize)]
pub struct RoleChange {
    pub role: UserRole,
}

/// GET /api/admin/users
pub async fn list() -> ApiResult<Vec<Profile>> {
    let service = ProfileService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.list().await?))
}

/// PUT /api/admin/users/:id/role
pub async fn role_put(
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(change): Json<RoleChange>,
) -> ApiResult<Profile> {
    // superadmins cannot demote themselves
    if id == session.user_id && change.role != UserRole::SuperAdmin {
        return Err(ApiError::conflict("You cannot remove your own superadmin role"));
    }
    let service = ProfileService::new(DatabaseManager::pool().await?);
    Ok(ApiResponse::success(service.set_role(id, change.role).await?))
}
