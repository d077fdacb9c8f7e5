use axum::Extension;

use crate::auth::Session;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/auth/whoami
pub async fn whoami_get(Extension(session): Extension<Session>) -> ApiResult<Session> {
    Ok(ApiResponse::success(session))
}
