//! Error types for the console API core.
//!
//! # Design
//! `RequestFailed` is an envelope that decoded fine but said "no". It is kept
//! apart from `Transport`, which covers the network and non-2xx statuses, so
//! callers can tell a rejected form from an unreachable backend. Both carry
//! the field errors the backend sent, for mapping onto form fields.

use crate::validation::ValidationErrorSet;

/// Errors returned by the resource client, normalizer and coordinator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Network failure (`status` is `None`) or a non-2xx response.
    #[error("{}", transport_display(.status, .message))]
    Transport {
        status: Option<u16>,
        message: String,
        errors: ValidationErrorSet,
    },

    /// The envelope explicitly signalled failure.
    #[error("{message}")]
    RequestFailed {
        message: String,
        errors: ValidationErrorSet,
    },

    /// The response did not match any recognized shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A request could not be built from the given arguments.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

fn transport_display(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("HTTP {status}: {message}"),
        None => message.to_string(),
    }
}

impl ApiError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        ApiError::Transport {
            status,
            message: message.into(),
            errors: ValidationErrorSet::new(),
        }
    }

    /// Human-readable message suitable for a notification title.
    pub fn message(&self) -> String {
        match self {
            ApiError::Transport { message, .. } | ApiError::RequestFailed { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    /// Field-level errors, empty when the failure had none.
    pub fn field_errors(&self) -> Option<&ValidationErrorSet> {
        match self {
            ApiError::Transport { errors, .. } | ApiError::RequestFailed { errors, .. } => {
                Some(errors).filter(|set| !set.is_empty())
            }
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
