//! Field-level input validation. Handlers collect failures into a field ->
//! message map and reject the request with a single validation outcome.

use std::collections::HashMap;

use crate::error::ApiError;

#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: HashMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: &str) -> &mut Self {
        self.errors.insert(field.to_string(), message.to_string());
        self
    }

    pub fn require(&mut self, field: &str, value: Option<&str>, message: &str) -> &mut Self {
        match value {
            Some(v) if !v.trim().is_empty() => {}
            _ => {
                self.errors.insert(field.to_string(), message.to_string());
            }
        }
        self
    }

    pub fn require_email(&mut self, field: &str, value: Option<&str>, message: &str) -> &mut Self {
        if !value.map(is_email_shaped).unwrap_or(false) {
            self.errors.insert(field.to_string(), message.to_string());
        }
        self
    }

    pub fn require_min_len(
        &mut self,
        field: &str,
        value: Option<&str>,
        min: usize,
        message: &str,
    ) -> &mut Self {
        if value.map(|v| v.chars().count()).unwrap_or(0) < min {
            self.errors.insert(field.to_string(), message.to_string());
        }
        self
    }

    /// Reject the request if any field failed.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("invalid input", Some(self.errors)))
        }
    }
}

fn is_email_shaped(value: &str) -> bool {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        _ => false,
    }
}

/// Split a comma-separated skills string into trimmed, non-empty entries.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_empty_and_missing() {
        let mut fields = FieldErrors::new();
        fields.require("name", Some("  "), "Name is required");
        fields.require("status", None, "Status is required");
        fields.require("ok", Some("value"), "unused");
        let err = fields.into_result().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_email_shape() {
        assert!(is_email_shaped("a@x.com"));
        assert!(!is_email_shaped("ax.com"));
        assert!(!is_email_shaped("a@x"));
        assert!(!is_email_shaped("a@@x.com"));
        assert!(!is_email_shaped("@x.com"));
    }

    #[test]
    fn test_min_len_counts_chars() {
        let mut fields = FieldErrors::new();
        fields.require_min_len("password", Some("12345"), 6, "too short");
        assert!(fields.into_result().is_err());

        let mut fields = FieldErrors::new();
        fields.require_min_len("password", Some("123456"), 6, "too short");
        assert!(fields.into_result().is_ok());
    }

    #[test]
    fn test_split_skills_trims_and_drops_empties() {
        assert_eq!(
            split_skills("rust, sql ,,  axum"),
            vec!["rust".to_string(), "sql".to_string(), "axum".to_string()]
        );
    }
}
