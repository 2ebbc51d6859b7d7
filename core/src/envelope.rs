//! Success-flag decoding for response envelopes.
//!
//! The backend marks envelopes with either `succeeded` (canonical) or the
//! older `isSuccess`. `succeeded` is authoritative whenever the key is
//! present, even when `isSuccess` disagrees.

use serde_json::Value;

pub const CANONICAL_FLAG: &str = "succeeded";
pub const LEGACY_FLAG: &str = "isSuccess";

/// Which success indicator an object carries, with its raw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SuccessFlag<'a> {
    Canonical(&'a Value),
    Legacy(&'a Value),
    Absent,
}

impl<'a> SuccessFlag<'a> {
    /// Classifies `raw`. Arrays and primitives are always `Absent`.
    pub fn of(raw: &'a Value) -> Self {
        let Value::Object(map) = raw else {
            return SuccessFlag::Absent;
        };
        if let Some(value) = map.get(CANONICAL_FLAG) {
            return SuccessFlag::Canonical(value);
        }
        match map.get(LEGACY_FLAG) {
            Some(value) => SuccessFlag::Legacy(value),
            None => SuccessFlag::Absent,
        }
    }

    pub fn is_envelope(&self) -> bool {
        !matches!(self, SuccessFlag::Absent)
    }

    /// `None` when no flag is present.
    pub fn ok(&self) -> Option<bool> {
        match self {
            SuccessFlag::Canonical(value) | SuccessFlag::Legacy(value) => Some(is_truthy(value)),
            SuccessFlag::Absent => None,
        }
    }
}

/// Resolves the success state of an envelope. Values without a flag count as
/// successful, matching how bare payloads are treated.
pub fn resolve_succeeded(raw: &Value) -> bool {
    SuccessFlag::of(raw).ok().unwrap_or(true)
}

/// Loose boolean coercion: `false`, `null`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
