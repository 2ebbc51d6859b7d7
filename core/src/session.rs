//! Session state handed to the transport.
//!
//! The transport asks a [`TokenProvider`] for the current token on every
//! request instead of reading process-wide storage, so tests can inject a
//! fixed token or none at all.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Source of the bearer token attached to outgoing requests.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Provider that never changes, e.g. a token from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        StaticToken(Some(token.into()))
    }

    pub fn none() -> Self {
        StaticToken(None)
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Profile of the signed-in operator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    profile: Option<UserProfile>,
}

/// In-memory session: token plus profile, replaced on sign-in and cleared on
/// sign-out. Shared behind an `Arc` between the transport and the caller.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, token: impl Into<String>, profile: UserProfile) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.token = Some(token.into());
        state.profile = Some(profile);
    }

    pub fn sign_out(&self) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        *state = SessionState::default();
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .profile
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }
}

impl TokenProvider for SessionStore {
    fn token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .token
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_token_returns_configured_value() {
        assert_eq!(StaticToken::new("abc").token().as_deref(), Some("abc"));
        assert_eq!(StaticToken::none().token(), None);
    }

    #[test]
    fn session_store_sign_in_and_out() {
        let session = SessionStore::new();
        assert!(!session.is_signed_in());

        session.sign_in(
            "jwt-token",
            UserProfile {
                user_name: "admin".to_string(),
                display_name: Some("Yönetici".to_string()),
                roles: vec!["Admin".to_string()],
            },
        );
        assert_eq!(session.token().as_deref(), Some("jwt-token"));
        assert_eq!(session.profile().unwrap().user_name, "admin");

        session.sign_out();
        assert_eq!(session.token(), None);
        assert!(session.profile().is_none());
    }
}
