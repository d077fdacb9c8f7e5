//! Field rules shared by the admin forms.

use std::collections::HashMap;

use super::ServiceError;

pub const DEFAULT_COLOR: &str = "#3B82F6";

/// Collects per-field messages; the first message for a field wins
#[derive(Debug, Default)]
pub struct FieldErrors(HashMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let n = value.chars().count();
        if n < min {
            self.add(field, format!("Must be at least {} characters", min));
        } else if n > max {
            self.add(field, format!("Must be at most {} characters", max));
        }
    }

    pub fn max_length(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(v) = value {
            if v.chars().count() > max {
                self.add(field, format!("Must be at most {} characters", max));
            }
        }
    }

    pub fn not_blank(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "Must not be empty");
        }
    }

    pub fn color(&mut self, field: &str, value: &str) {
        if !is_hex_color(value) {
            self.add(field, "Must be a hex color (#RRGGBB)");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn finish(self) -> Result<(), ServiceError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation { message: "Validation failed".to_string(), field_errors: self.0 })
        }
    }
}

/// `#RRGGBB`, either case
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Lowercase, with each whitespace run replaced by a single `-`
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Treat `""` from a form the same as an absent value
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn colors() {
        assert!(is_hex_color("#3B82F6"));
        assert!(is_hex_color("#abcdef"));
        assert!(!is_hex_color("3B82F6"));
        assert!(!is_hex_color("#3B82F"));
        assert!(!is_hex_color("#GGGGGG"));
    }

    #[test]
    fn slugs_collapse_whitespace() {
        assert_eq!(slugify("Machine  Learning"), "machine-learning");
        assert_eq!(slugify("  Prompt\tTools "), "prompt-tools");
        assert_eq!(slugify("IA"), "ia");
    }

    #[test]
    fn lengths_count_characters() {
        let mut errors = FieldErrors::new();
        errors.length("name", "ñu", 2, 100);
        assert!(errors.is_empty());
        errors.length("name", "a", 2, 100);
        errors.length("name", &"x".repeat(101), 2, 100);
        assert_matches!(errors.finish(), Err(ServiceError::Validation { field_errors, .. }) => {
            assert_eq!(field_errors.len(), 1);
            assert_eq!(field_errors["name"], "Must be at least 2 characters");
        });
    }

    #[test]
    fn blank_form_values_become_none() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some("x".into())), Some("x".into()));
    }
}
