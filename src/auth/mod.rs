pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;
use crate::types::UserRole;

pub use password::{hash_password, verify_password};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: impl Into<String>, role: UserRole) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        Self {
            sub: user_id,
            email: email.into(),
            role,
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Who is calling an admin route. Built once per request from the token;
/// the capability flags are derived from the role at that point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub is_admin: bool,
    pub is_super_admin: bool,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            is_admin: claims.role.is_admin(),
            is_super_admin: claims.role.is_super_admin(),
        }
    }
}

pub fn generate_jwt(claims: &Claims) -> Result<String, AuthError> {
    encode_with_secret(claims, &config::config().security.jwt_secret)
}

pub fn validate_jwt(token: &str) -> Result<Claims, AuthError> {
    decode_with_secret(token, &config::config().security.jwt_secret)
}

fn encode_with_secret(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

fn decode_with_secret(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: UserRole) -> Claims {
        let now = Utc::now();
        Claims {
            sub: Uuid::new_v4(),
            email: "owner@fulmega.eu".into(),
            role,
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        }
    }

    #[test]
    fn tokens_round_trip_with_the_same_secret() {
        let c = claims(UserRole::Admin);
        let token = encode_with_secret(&c, "s3cret").unwrap();
        assert_eq!(decode_with_secret(&token, "s3cret").unwrap(), c);
    }

    #[test]
    fn tokens_signed_elsewhere_are_rejected() {
        let token = encode_with_secret(&claims(UserRole::Admin), "one").unwrap();
        assert!(matches!(decode_with_secret(&token, "two"), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let mut c = claims(UserRole::SuperAdmin);
        c.exp = (Utc::now() - Duration::hours(2)).timestamp();
        let token = encode_with_secret(&c, "s3cret").unwrap();
        assert!(decode_with_secret(&token, "s3cret").is_err());
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(encode_with_secret(&claims(UserRole::Admin), ""), Err(AuthError::MissingSecret)));
    }

    #[test]
    fn session_flags_come_from_role() {
        let admin = Session::from(claims(UserRole::Admin));
        assert!(admin.is_admin && !admin.is_super_admin);

        let root = Session::from(claims(UserRole::SuperAdmin));
        assert!(root.is_admin && root.is_super_admin);

        let viewer = Session::from(claims(UserRole::Viewer));
        assert!(!viewer.is_admin);
    }
}
