//! Shared enumerations used across the catalog, persistence and HTTP layers.
//!
//! These are stored as TEXT columns; `as_str` gives the stored form and
//! `TryFrom<String>` parses it back (used by `#[sqlx(try_from = "String")]`).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

macro_rules! text_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            pub fn all() -> &'static [$name] {
                &[$($name::$variant,)+]
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(UnknownVariant { kind: $kind, value: other.to_string() }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownVariant;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// What kind of catalog item an entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Prompt,
    Tool,
    Workflow,
    Resource,
}

text_enum!(ContentType, "content type", {
    Prompt => "prompt",
    Tool => "tool",
    Workflow => "workflow",
    Resource => "resource",
});

/// How the entry body should be rendered by a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Plaintext,
    Markdown,
    Html,
    Json,
    Code,
    Richtext,
}

text_enum!(ContentFormat, "content format", {
    Plaintext => "plaintext",
    Markdown => "markdown",
    Html => "html",
    Json => "json",
    Code => "code",
    Richtext => "richtext",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Draft,
    Published,
    Archived,
}

text_enum!(EntryStatus, "entry status", {
    Draft => "draft",
    Published => "published",
    Archived => "archived",
});

/// Back-office role of a profile. Only admins and superadmins may sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[serde(rename = "superadmin")]
    SuperAdmin,
    Admin,
    Viewer,
}

text_enum!(UserRole, "user role", {
    SuperAdmin => "superadmin",
    Admin => "admin",
    Viewer => "viewer",
});

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::SuperAdmin)
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, UserRole::SuperAdmin)
    }
}

/// The three legal pages the site publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalPageType {
    AvisoLegal,
    PoliticaPrivacidad,
    PoliticaCookies,
}

text_enum!(LegalPageType, "legal page type", {
    AvisoLegal => "aviso_legal",
    PoliticaPrivacidad => "politica_privacidad",
    PoliticaCookies => "politica_cookies",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

text_enum!(Theme, "theme", {
    Light => "light",
    Dark => "dark",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse_from_stored_text() {
        assert_eq!("superadmin".parse::<UserRole>().unwrap(), UserRole::SuperAdmin);
        assert_eq!(UserRole::try_from("viewer".to_string()).unwrap(), UserRole::Viewer);
        assert!("root".parse::<UserRole>().is_err());
    }

    #[test]
    fn role_capabilities() {
        assert!(UserRole::SuperAdmin.is_admin());
        assert!(UserRole::SuperAdmin.is_super_admin());
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Admin.is_super_admin());
        assert!(!UserRole::Viewer.is_admin());
    }

    #[test]
    fn serde_uses_stored_spelling() {
        assert_eq!(serde_json::to_value(UserRole::SuperAdmin).unwrap(), "superadmin");
        assert_eq!(serde_json::to_value(LegalPageType::PoliticaCookies).unwrap(), "politica_cookies");
        let status: EntryStatus = serde_json::from_value(serde_json::json!("published")).unwrap();
        assert_eq!(status, EntryStatus::Published);
    }

    #[test]
    fn unknown_variant_message_names_the_kind() {
        let err = "video".parse::<ContentType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown content type 'video'");
    }
}
