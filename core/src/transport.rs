//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the I/O seam: everything above it works on plain request and
//! response data. `HttpTransport` is the reqwest-backed implementation. It
//! reports every HTTP status as data (no status is turned into an error here)
//! and fails only when no response arrived at all.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Method};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::TokenProvider;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the round-trip. `Err` means the request never got a response.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Adds `Authorization: Bearer <token>` when the provider has a token.
pub fn apply_token(request: &mut HttpRequest, provider: &dyn TokenProvider) {
    if let Some(token) = provider.token().filter(|t| !t.trim().is_empty()) {
        request.set_header("authorization", format!("Bearer {}", token.trim()));
    }
}

/// reqwest-backed transport.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpTransport {
    /// Builds a transport. `timeout` is applied only when given; otherwise
    /// reqwest's defaults hold.
    pub fn new(tokens: Arc<dyn TokenProvider>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(concat!("licensing-console/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::transport(None, format!("could not build http client: {e}")))?;
        Ok(Self { http, tokens })
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        apply_token(&mut request, self.tokens.as_ref());
        debug!(method = %request.method, path = %request.path, "sending request");

        let mut builder = self.http.request(to_method(request.method), &request.path);
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::InvalidRequest(format!("bad header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::InvalidRequest(format!("bad header value for {name}: {e}")))?;
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, path = %request.path, "request failed before a response arrived");
            let message = if e.is_timeout() {
                "İstek zaman aşımına uğradı".to_string()
            } else {
                format!("Sunucuya ulaşılamadı: {e}")
            };
            ApiError::transport(e.status().map(|s| s.as_u16()), message)
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.to_string(), v.to_string())))
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(Some(status), format!("response body could not be read: {e}")))?;
        debug!(status, path = %request.path, "received response");

        Ok(HttpResponse { status, headers, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionStore, StaticToken, UserProfile};

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: "http://localhost:3000/apps".to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn token_is_attached_as_bearer() {
        let mut req = request();
        apply_token(&mut req, &StaticToken::new("abc"));
        assert_eq!(req.header("Authorization"), Some("Bearer abc"));
    }

    #[test]
    fn missing_or_blank_token_leaves_request_untouched() {
        let mut req = request();
        apply_token(&mut req, &StaticToken::none());
        apply_token(&mut req, &StaticToken::new("  "));
        assert!(req.headers.is_empty());
    }

    #[test]
    fn session_changes_are_seen_per_request() {
        let session = SessionStore::new();
        let mut req = request();
        apply_token(&mut req, &session);
        assert!(req.header("authorization").is_none());

        session.sign_in("t1", UserProfile::default());
        apply_token(&mut req, &session);
        assert_eq!(req.header("authorization"), Some("Bearer t1"));
    }

    #[test]
    fn methods_map_to_reqwest() {
        assert_eq!(to_method(HttpMethod::Put), Method::PUT);
        assert_eq!(to_method(HttpMethod::Delete), Method::DELETE);
    }

    #[test]
    fn transport_builds_without_timeout() {
        assert!(HttpTransport::new(Arc::new(StaticToken::none()), None).is_ok());
    }
}
