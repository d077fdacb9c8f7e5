use axum::{extract::Request, middleware::Next, response::Response};

use crate::auth::Session;
use crate::error::ApiError;

fn session(request: &Request) -> Result<&Session, ApiError> {
    request
        .extensions()
        .get::<Session>()
        .ok_or_else(|| ApiError::unauthorized("JWT authentication required"))
}

/// Content administration: admin or superadmin
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let s = session(&request)?;
    if !s.is_admin {
        tracing::warn!(user = %s.user_id, role = %s.role, "Admin route refused");
        return Err(ApiError::forbidden("Administrator role required"));
    }
    Ok(next.run(request).await)
}

/// Legal pages, users and settings: superadmin only
pub async fn require_super_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let s = session(&request)?;
    if !s.is_super_admin {
        tracing::warn!(user = %s.user_id, role = %s.role, "Superadmin route refused");
        return Err(ApiError::forbidden("Superadmin role required"));
    }
    Ok(next.run(request).await)
}
