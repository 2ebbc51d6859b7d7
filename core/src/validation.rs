//! Field-level validation errors carried by failure envelopes.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Field name used for messages that are not tied to a specific field
/// (the array form of `errors`).
pub const FORM_FIELD: &str = "";

/// Mapping from field name to its ordered list of messages.
///
/// Field order is alphabetical; message order is the order the backend sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrorSet {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the `errors` member of an envelope.
    ///
    /// Accepts `["msg", ...]` (filed under [`FORM_FIELD`]) and
    /// `{"field": ["msg", ...]}`. A dictionary entry holding a single string
    /// is accepted as a one-element list. Non-string and empty entries are
    /// skipped.
    pub fn from_envelope(raw: &Value) -> Self {
        let mut set = Self::new();
        match raw.get("errors") {
            Some(Value::Array(items)) => {
                for item in items {
                    if let Some(text) = non_empty_str(item) {
                        set.push(FORM_FIELD, text);
                    }
                }
            }
            Some(Value::Object(map)) => {
                for (field, messages) in map {
                    match messages {
                        Value::Array(items) => {
                            for item in items {
                                if let Some(text) = non_empty_str(item) {
                                    set.push(field, text);
                                }
                            }
                        }
                        other => {
                            if let Some(text) = non_empty_str(other) {
                                set.push(field, text);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
        set
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Single-line rendering used in notification descriptions.
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(field, messages)| {
                if field.is_empty() {
                    messages.join(", ")
                } else {
                    format!("{field}: {}", messages.join(", "))
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dictionary_errors_keep_message_order() {
        let set = ValidationErrorSet::from_envelope(&json!({
            "succeeded": false,
            "errors": {"appName": ["zorunlu", "en az 3 karakter"], "code": ["geçersiz"]}
        }));
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.field("appName").unwrap(),
            &["zorunlu".to_string(), "en az 3 karakter".to_string()]
        );
        assert_eq!(set.field("code").unwrap(), &["geçersiz".to_string()]);
    }

    #[test]
    fn array_errors_are_form_level() {
        let set = ValidationErrorSet::from_envelope(&json!({"errors": ["a", "", 3, "b"]}));
        assert_eq!(set.field(FORM_FIELD).unwrap(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn single_string_entry_is_accepted() {
        let set = ValidationErrorSet::from_envelope(&json!({"errors": {"email": "geçersiz"}}));
        assert_eq!(set.field("email").unwrap(), &["geçersiz".to_string()]);
    }

    #[test]
    fn missing_or_odd_errors_yield_empty_set() {
        assert!(ValidationErrorSet::from_envelope(&json!({})).is_empty());
        assert!(ValidationErrorSet::from_envelope(&json!({"errors": 12})).is_empty());
        assert!(ValidationErrorSet::from_envelope(&json!([1, 2])).is_empty());
    }

    #[test]
    fn summary_joins_fields() {
        let mut set = ValidationErrorSet::new();
        set.push("name", "zorunlu");
        set.push(FORM_FIELD, "kayıt reddedildi");
        assert_eq!(set.summary(), "kayıt reddedildi; name: zorunlu");
    }
}
