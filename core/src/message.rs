//! Human-readable message extraction from response bodies.
//!
//! Error bodies come in several dialects (ASP.NET problem details, OAuth
//! errors, the console's own envelope), so the lookup walks a fixed list of
//! keys and stops at the first non-empty string.

use serde_json::Value;

/// Keys searched for an error message, in priority order. `errors` and `data`
/// are handled after these.
const ERROR_MESSAGE_KEYS: &[&str] = &[
    "message",
    "Message",
    "detail",
    "error",
    "title",
    "error_description",
];

const SUCCESS_MESSAGE_KEYS: &[&str] = &["message", "Message"];

/// Nesting bound for `data` / object recursion. Observed backends nest at
/// most two levels.
pub const MAX_MESSAGE_DEPTH: usize = 4;

/// Resolves the message to show for a failed request.
pub fn error_message(body: &Value) -> Option<String> {
    find_error_message(body, 0)
}

/// Resolves the message to show after a successful write. Only explicit
/// message keys are considered so an entity's own `title` never becomes a
/// toast.
pub fn success_message(body: &Value) -> Option<String> {
    find_success_message(body, 0)
}

fn find_error_message(value: &Value, depth: usize) -> Option<String> {
    if depth > MAX_MESSAGE_DEPTH {
        return None;
    }
    match value {
        Value::String(s) => non_empty(s),
        Value::Object(map) => {
            for key in ERROR_MESSAGE_KEYS {
                if let Some(found) = map.get(*key).and_then(|v| find_error_message(v, depth + 1)) {
                    return Some(found);
                }
            }
            if let Some(found) = map.get("errors").and_then(first_error) {
                return Some(found);
            }
            map.get("data").and_then(|v| find_error_message(v, depth + 1))
        }
        _ => None,
    }
}

fn first_error(errors: &Value) -> Option<String> {
    match errors {
        Value::Array(items) => items.iter().find_map(|item| item.as_str().and_then(non_empty)),
        Value::Object(map) => map.values().find_map(|messages| match messages {
            Value::Array(items) => items.iter().find_map(|item| item.as_str().and_then(non_empty)),
            Value::String(s) => non_empty(s),
            _ => None,
        }),
        Value::String(s) => non_empty(s),
        _ => None,
    }
}

fn find_success_message(value: &Value, depth: usize) -> Option<String> {
    if depth > MAX_MESSAGE_DEPTH {
        return None;
    }
    let map = value.as_object()?;
    SUCCESS_MESSAGE_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str).and_then(non_empty))
        .or_else(|| map.get("data").and_then(|v| find_success_message(v, depth + 1)))
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_key_has_priority() {
        let body = json!({"title": "Bad Request", "detail": "ayrıntı", "message": "mesaj"});
        assert_eq!(error_message(&body).as_deref(), Some("mesaj"));
    }

    #[test]
    fn problem_details_use_detail_before_title() {
        let body = json!({"title": "Bad Request", "detail": "Lisans süresi dolmuş"});
        assert_eq!(error_message(&body).as_deref(), Some("Lisans süresi dolmuş"));
    }

    #[test]
    fn oauth_error_object_is_searched() {
        let body = json!({"error": {"error_description": "token expired"}});
        assert_eq!(error_message(&body).as_deref(), Some("token expired"));
        let body = json!({"error": "", "error_description": "invalid_grant"});
        assert_eq!(error_message(&body).as_deref(), Some("invalid_grant"));
    }

    #[test]
    fn errors_array_and_dictionary_are_searched() {
        assert_eq!(
            error_message(&json!({"errors": ["", "ilk hata"]})).as_deref(),
            Some("ilk hata")
        );
        assert_eq!(
            error_message(&json!({"message": " ", "errors": {"Name": ["Ad zorunludur"]}})).as_deref(),
            Some("Ad zorunludur")
        );
    }

    #[test]
    fn nested_data_is_searched_last() {
        let body = json!({"succeeded": false, "data": {"data": {"message": "derin"}}});
        assert_eq!(error_message(&body).as_deref(), Some("derin"));
    }

    #[test]
    fn recursion_is_bounded() {
        let mut body = json!({"message": "çok derin"});
        for _ in 0..10 {
            body = json!({ "data": body });
        }
        assert_eq!(error_message(&body), None);
        assert_eq!(success_message(&body), None);
    }

    #[test]
    fn success_message_ignores_entity_titles() {
        assert_eq!(success_message(&json!({"id": "1", "title": "Kasa"})), None);
        assert_eq!(
            success_message(&json!({"succeeded": true, "message": "Kaydedildi", "data": {}})).as_deref(),
            Some("Kaydedildi")
        );
        assert_eq!(
            success_message(&json!({"data": {"Message": "İç mesaj"}})).as_deref(),
            Some("İç mesaj")
        );
    }

    #[test]
    fn primitives_and_arrays_have_no_message() {
        assert_eq!(error_message(&json!(null)), None);
        assert_eq!(error_message(&json!([{"message": "x"}])), None);
        assert_eq!(success_message(&json!("text")), None);
    }
}
