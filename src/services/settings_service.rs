use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use tracing::info;

use super::validation::FieldErrors;
use super::ServiceError;
use crate::types::Theme;

/// The singleton `system_config` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SystemSettings {
    pub site_name: String,
    pub site_description: String,
    pub allow_registration: bool,
    pub require_email_verification: bool,
    pub email_notifications: bool,
    pub system_alerts: bool,
    #[sqlx(try_from = "String")]
    pub theme: Theme,
    pub primary_color: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsInput {
    pub site_name: String,
    pub site_description: String,
    pub allow_registration: bool,
    pub require_email_verification: bool,
    pub email_notifications: bool,
    pub system_alerts: bool,
    pub theme: Theme,
    pub primary_color: String,
}

impl SettingsInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut errors = FieldErrors::new();
        errors.length("site_name", &self.site_name, 2, 100);
        errors.length("site_description", &self.site_description, 10, 500);
        errors.color("primary_color", &self.primary_color);
        errors.finish()
    }
}

const SELECT_SETTINGS: &str = r#"
    SELECT site_name, site_description, allow_registration, require_email_verification,
           email_notifications, system_alerts, theme, primary_color, updated_at
    FROM system_config WHERE id = 1
"#;

pub struct SettingsService {
    pool: PgPool,
}

impl SettingsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self) -> Result<SystemSettings, ServiceError> {
        sqlx::query_as::<_, SystemSettings>(SELECT_SETTINGS)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound("System settings have not been initialised".to_string()))
    }

    /// Replace the whole row; creates it when the seed is missing
    pub async fn replace(&self, input: SettingsInput) -> Result<SystemSettings, ServiceError> {
        input.validate()?;
        let settings = sqlx::query_as::<_, SystemSettings>(
            r#"
            INSERT INTO system_config
                (id, site_name, site_description, allow_registration, require_email_verification,
                 email_notifications, system_alerts, theme, primary_color, updated_at)
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8, now())
            ON CONFLICT (id) DO UPDATE SET
                site_name = EXCLUDED.site_name,
                site_description = EXCLUDED.site_description,
                allow_registration = EXCLUDED.allow_registration,
                require_email_verification = EXCLUDED.require_email_verification,
                email_notifications = EXCLUDED.email_notifications,
                system_alerts = EXCLUDED.system_alerts,
                theme = EXCLUDED.theme,
                primary_color = EXCLUDED.primary_color,
                updated_at = now()
            RETURNING site_name, site_description, allow_registration, require_email_verification,
                      email_notifications, system_alerts, theme, primary_color, updated_at
            "#,
        )
        .bind(&input.site_name)
        .bind(&input.site_description)
        .bind(input.allow_registration)
        .bind(input.require_email_verification)
        .bind(input.email_notifications)
        .bind(input.system_alerts)
        .bind(input.theme.as_str())
        .bind(&input.primary_color)
        .fetch_one(&self.pool)
        .await?;

        info!(site_name = %settings.site_name, "Updated system settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input() -> SettingsInput {
        serde_json::from_value(json!({
            "site_name": "Fulmega.eu",
            "site_description": "Directorio personal de prompts",
            "allow_registration": false,
            "require_email_verification": true,
            "email_notifications": true,
            "system_alerts": true,
            "theme": "dark",
            "primary_color": "#3B82F6",
        }))
        .unwrap()
    }

    #[test]
    fn valid_settings_pass() {
        let s = input();
        assert_eq!(s.theme, Theme::Dark);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn short_description_and_bad_color_fail() {
        let mut s = input();
        s.site_description = "too short".into();
        s.primary_color = "red".into();
        match s.validate() {
            Err(ServiceError::Validation { field_errors, .. }) => {
                assert!(field_errors.contains_key("site_description"));
                assert!(field_errors.contains_key("primary_color"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_theme_is_rejected_on_parse() {
        let mut raw = serde_json::to_value(json!({
            "site_name": "x", "site_description": "y", "allow_registration": false,
            "require_email_verification": false, "email_notifications": false,
            "system_alerts": false, "primary_color": "#000000",
        }))
        .unwrap();
        raw["theme"] = json!("sepia");
        assert!(serde_json::from_value::<SettingsInput>(raw).is_err());
    }
}
