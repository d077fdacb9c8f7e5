use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::{generate_jwt, Claims, Session};
use crate::config;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ProfileService;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: u64,
    pub session: Session,
}

/// POST /auth/login
///
/// Only admin and superadmin profiles receive a token; other roles get 403.
pub async fn login_post(Json(payload): Json<LoginRequest>) -> ApiResult<LoginResponse> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let profiles = ProfileService::new(DatabaseManager::pool().await?);
    let profile = profiles.authenticate(&payload.email, &payload.password).await?;

    let claims = Claims::new(profile.id, profile.email.clone(), profile.role);
    let token = generate_jwt(&claims)?;
    tracing::info!(user = %profile.id, role = %profile.role, "Signed in");

    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_in: config::config().security.jwt_expiry_hours * 3600,
        session: Session::from(claims),
    }))
}
