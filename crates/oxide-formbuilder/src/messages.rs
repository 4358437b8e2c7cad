//! Human-readable error messages keyed by field and error code.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Message used when the catalog has no entry for a field and code.
pub const DEFAULT_ERROR_MESSAGE: &str = "Invalid field";

/// Maps field name → error code → message.
///
/// Each form owns its catalog, so independent forms can carry different
/// wording side by side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    messages: IndexMap<String, IndexMap<String, String>>,
    #[serde(skip)]
    fallback: Option<String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message for a field and code.
    pub fn set(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.messages
            .entry(field.into())
            .or_default()
            .insert(code.into(), message.into());
        self
    }

    /// Builder method to set a message.
    #[must_use]
    pub fn with(
        mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.set(field, code, message);
        self
    }

    /// Replaces the fallback message.
    #[must_use]
    pub fn with_fallback(mut self, message: impl Into<String>) -> Self {
        self.fallback = Some(message.into());
        self
    }

    /// Looks up the message for `field`/`code`, falling back to the default.
    pub fn message(&self, field: &str, code: &str) -> &str {
        self.messages
            .get(field)
            .and_then(|codes| codes.get(code))
            .or(self.fallback.as_ref())
            .map_or(DEFAULT_ERROR_MESSAGE, String::as_str)
    }
}

impl<F, C, M> FromIterator<(F, C, M)> for MessageCatalog
where
    F: Into<String>,
    C: Into<String>,
    M: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, C, M)>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for (field, code, message) in iter {
            catalog.set(field, code, message);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_specific_message() {
        let catalog = MessageCatalog::new().with("email", "required", "Email is required");
        assert_eq!(catalog.message("email", "required"), "Email is required");
    }

    #[test]
    fn test_fallback_for_unknown_field_or_code() {
        let catalog = MessageCatalog::new().with("email", "required", "Email is required");
        assert_eq!(catalog.message("email", "format"), DEFAULT_ERROR_MESSAGE);
        assert_eq!(catalog.message("name", "required"), "Invalid field");
    }

    #[test]
    fn test_custom_fallback() {
        let catalog = MessageCatalog::new().with_fallback("Campo inválido");
        assert_eq!(catalog.message("x", "y"), "Campo inválido");
    }

    #[test]
    fn test_deserialize_nested_map() {
        let catalog: MessageCatalog = serde_json::from_str(
            r#"{"password_confirmation": {"password_confirmation": "Please confirm"}}"#,
        )
        .unwrap();
        assert_eq!(
            catalog.message("password_confirmation", "password_confirmation"),
            "Please confirm"
        );
        assert_eq!(catalog.message("other", "required"), DEFAULT_ERROR_MESSAGE);
    }
}
