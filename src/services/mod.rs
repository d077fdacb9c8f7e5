//! Back-office reads and writes over the directory tables.

pub mod dashboard_service;
pub mod entry_service;
pub mod legal_service;
pub mod profile_service;
pub mod settings_service;
pub mod tag_service;
pub mod taxonomy_service;
pub mod validation;

use std::collections::HashMap;
use thiserror::Error;

use crate::database::DatabaseError;

pub use dashboard_service::{DashboardService, DashboardSummary};
pub use entry_service::{EntryDetail, EntryInput, EntryListItem, EntryService};
pub use legal_service::{LegalPage, LegalPageInput, LegalService};
pub use profile_service::{Profile, ProfileService};
pub use settings_service::{SettingsInput, SettingsService, SystemSettings};
pub use tag_service::{TagInput, TagService};
pub use taxonomy_service::{CategoryInput, SectionInput, TaxonomyService};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: HashMap<String, String>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ServiceError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut field_errors = HashMap::new();
        field_errors.insert(field.to_string(), message.into());
        ServiceError::Validation { message: "Validation failed".to_string(), field_errors }
    }
}

// Postgres SQLSTATE codes the write paths care about
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            match db.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    return ServiceError::Conflict("A record with the same slug already exists".to_string())
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return ServiceError::Conflict("Referenced record is missing or still in use".to_string())
                }
                Some(CHECK_VIOLATION) => {
                    return ServiceError::Validation {
                        message: format!("Value rejected by constraint: {}", db.message()),
                        field_errors: HashMap::new(),
                    }
                }
                _ => {}
            }
        }
        ServiceError::Database(DatabaseError::Sqlx(err))
    }
}
