//! Explicit form validation.
//!
//! Instead of a declarative form layer, each form has a validator function
//! that checks every field and collects the full error list, so one round
//! trip reports everything that is wrong.

pub mod product;

pub use product::{MAX_FORM_CATEGORIES, ProductFormData, category_choices, fallback_categories};

use std::collections::BTreeMap;

use serde::Serialize;

/// Validation errors keyed by field name.
///
/// Serializes as a JSON object of `field -> [messages]`, matching the
/// envelope returned by the JSON endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Create an empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_owned()).or_default().push(message.into());
    }

    /// Whether any error has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded against one field.
    #[must_use]
    pub fn field(&self, name: &str) -> &[String] {
        self.0.get(name).map_or(&[], Vec::as_slice)
    }

    /// Iterate fields and their messages, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut errors = FieldErrors::new();
        assert!(errors.is_empty());

        errors.add("title", "Title must be at least 3 characters.");
        errors.add("title", "second message");
        errors.add("price", "Price must be greater than 0.");

        assert!(!errors.is_empty());
        assert_eq!(errors.field("title").len(), 2);
        assert_eq!(errors.field("missing"), &[] as &[String]);
        assert_eq!(errors.iter().count(), 2);
    }

    #[test]
    fn test_serializes_as_map() {
        let mut errors = FieldErrors::new();
        errors.add("username", "A user with that username already exists.");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "username": ["A user with that username already exists."]
            })
        );
    }
}
