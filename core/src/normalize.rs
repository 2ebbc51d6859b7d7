//! Response normalization: raw JSON body in, payload or error out.
//!
//! # Design
//! The backend answers in three styles: a bare array, a bare object, or an
//! envelope carrying `succeeded` / `isSuccess`, `message`, `errors` and `data`.
//! [`unwrap`] folds all of them into one payload value. It is pure and total:
//! the only error it produces is `RequestFailed` for an envelope whose flag is
//! falsy. The typed `decode_*` helpers sit on top and decide what to do with
//! shapes the caller did not expect.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::envelope::SuccessFlag;
use crate::error::ApiError;
use crate::validation::ValidationErrorSet;

/// Payload shape the caller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    List,
    Object,
}

/// Extracts the payload from `raw`.
///
/// 1. Arrays are returned unchanged, whatever their elements contain.
/// 2. Objects carrying a success flag are envelopes: a falsy flag fails with
///    the envelope's `message` (or `fallback`), a truthy one yields `data`
///    (`null` when absent). `data` is not unwrapped further.
/// 3. Other objects are the payload themselves.
/// 4. Anything else becomes `[]` for lists and is returned as-is otherwise.
pub fn unwrap(mut raw: Value, expect: Expect, fallback: &str) -> Result<Value, ApiError> {
    match raw {
        Value::Array(_) => Ok(raw),
        Value::Object(_) => match SuccessFlag::of(&raw).ok() {
            Some(true) => Ok(raw
                .as_object_mut()
                .and_then(|map| map.remove("data"))
                .unwrap_or(Value::Null)),
            Some(false) => Err(request_failed(&raw, fallback)),
            None => Ok(raw),
        },
        other => match expect {
            Expect::List => Ok(Value::Array(Vec::new())),
            Expect::Object => Ok(other),
        },
    }
}

/// Builds the `RequestFailed` error for a failure envelope.
pub fn request_failed(raw: &Value, fallback: &str) -> ApiError {
    let message = raw
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(fallback)
        .to_string();
    ApiError::RequestFailed {
        message,
        errors: ValidationErrorSet::from_envelope(raw),
    }
}

/// Unwraps a list response and decodes each element as `T`.
///
/// A payload that is not an array degrades to an empty list. Elements that do
/// not match `T` are reported as `MalformedResponse`.
pub fn decode_list<T: DeserializeOwned>(raw: Value, fallback: &str) -> Result<Vec<T>, ApiError> {
    let items = list_payload(raw, fallback)?;
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|e| ApiError::MalformedResponse(e.to_string())))
        .collect()
}

/// Unwraps a list response, keeping the elements as raw JSON.
pub fn list_payload(raw: Value, fallback: &str) -> Result<Vec<Value>, ApiError> {
    match unwrap(raw, Expect::List, fallback)? {
        Value::Array(items) => Ok(items),
        other => {
            warn!(kind = json_kind(&other), "list payload is not an array, using empty list");
            Ok(Vec::new())
        }
    }
}

/// Unwraps a single-entity response and decodes it as `T`.
pub fn decode_one<T: DeserializeOwned>(raw: Value, fallback: &str) -> Result<T, ApiError> {
    let payload = object_payload(raw, fallback)?;
    serde_json::from_value(payload).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

/// Unwraps a single-entity response, requiring an object payload.
pub fn object_payload(raw: Value, fallback: &str) -> Result<Value, ApiError> {
    match unwrap(raw, Expect::Object, fallback)? {
        payload @ Value::Object(_) => Ok(payload),
        other => Err(ApiError::MalformedResponse(format!(
            "expected an object, got {}",
            json_kind(&other)
        ))),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
