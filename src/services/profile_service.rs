use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use super::ServiceError;
use crate::auth::verify_password;
use crate::database::Repository;
use crate::filter::FilterData;
use crate::types::UserRole;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: Option<String>,
    #[sqlx(try_from = "String")]
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn repository(&self) -> Repository<Profile> {
        Repository::new("profiles", self.pool.clone())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, ServiceError> {
        Ok(self
            .repository()
            .select_one(FilterData::eq("email", email.trim().to_lowercase()))
            .await?)
    }

    /// Check credentials for a back-office sign-in. Only admin roles pass.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Profile, ServiceError> {
        let invalid = || ServiceError::Unauthorized("Invalid email or password".to_string());

        let profile = self.find_by_email(email).await?.ok_or_else(invalid)?;
        let matches = verify_password(password, &profile.password_hash).unwrap_or_else(|e| {
            warn!(profile = %profile.id, "Unreadable password hash: {}", e);
            false
        });
        if !matches {
            return Err(invalid());
        }
        if !profile.role.is_admin() {
            warn!(profile = %profile.id, role = %profile.role, "Sign-in refused for non-admin role");
            return Err(ServiceError::Forbidden("Only administrators can sign in".to_string()));
        }
        Ok(profile)
    }

    pub async fn list(&self) -> Result<Vec<Profile>, ServiceError> {
        Ok(self.repository().select_any(FilterData::default().order_by("email")).await?)
    }

    pub async fn set_role(&self, id: Uuid, role: UserRole) -> Result<Profile, ServiceError> {
        let profile = sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET role = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Profile {} not found", id)))?;

        info!(%id, role = %role, "Changed profile role");
        Ok(profile)
    }
}
