//! Stateless request builder and response parser for one REST collection.
//!
//! # Design
//! `Resource` holds only the base URL, the collection name and its fallback
//! messages. Each operation is split into a `build_*` method producing an
//! `HttpRequest` and a `parse_*` method consuming an `HttpResponse`; the
//! caller runs the round-trip in between. The same type serves every
//! collection, so per-entity behavior lives in the `MessageCatalog` only.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::catalog::{FallbackMessages, Operation, ResourceName};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::message;
use crate::normalize::{self, Expect};
use crate::validation::ValidationErrorSet;

/// Kind of write performed by a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn operation(self) -> Operation {
        match self {
            MutationKind::Create => Operation::Create,
            MutationKind::Update => Operation::Update,
            MutationKind::Delete => Operation::Delete,
        }
    }

    pub fn method(self) -> HttpMethod {
        match self {
            MutationKind::Create => HttpMethod::Post,
            MutationKind::Update => HttpMethod::Put,
            MutationKind::Delete => HttpMethod::Delete,
        }
    }
}

/// Request builder and response parser for one collection.
#[derive(Debug, Clone)]
pub struct Resource {
    base_url: String,
    name: ResourceName,
    messages: FallbackMessages,
}

impl Resource {
    pub fn new(base_url: &str, name: ResourceName, messages: FallbackMessages) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            name,
            messages,
        }
    }

    pub fn name(&self) -> &ResourceName {
        &self.name
    }

    pub fn fallback(&self, operation: Operation) -> &str {
        self.messages.for_operation(operation)
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.name)
    }

    fn item_url(&self, id: &str) -> Result<String, ApiError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ApiError::InvalidRequest(format!("{} id must not be empty", self.name)));
        }
        if id.contains(['/', '?', '#']) || id == "." || id == ".." {
            return Err(ApiError::InvalidRequest(format!(
                "{} id must be a single path segment: {id:?}",
                self.name
            )));
        }
        Ok(format!("{}/{id}", self.collection_url()))
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            path: self.item_url(id)?,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_create<B: Serialize + ?Sized>(&self, body: &B) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.collection_url(), body)
    }

    pub fn build_update<B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, self.item_url(id)?, body)
    }

    pub fn build_delete(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id)?,
            headers: Vec::new(),
            body: None,
        })
    }

    /// Builds the request for a mutation. `id` is required for updates and
    /// deletes; `body` for creates and updates.
    pub fn build_mutation(
        &self,
        kind: MutationKind,
        id: Option<&str>,
        body: Option<&Value>,
    ) -> Result<HttpRequest, ApiError> {
        let request = match kind {
            MutationKind::Create => self.build_create(body.unwrap_or(&Value::Null))?,
            MutationKind::Update => self.build_update(self.require_id(id)?, body.unwrap_or(&Value::Null))?,
            MutationKind::Delete => self.build_delete(self.require_id(id)?)?,
        };
        debug!(resource = %self.name, method = %request.method, path = %request.path, "built mutation request");
        Ok(request)
    }

    fn require_id<'a>(&self, id: Option<&'a str>) -> Result<&'a str, ApiError> {
        id.ok_or_else(|| ApiError::InvalidRequest(format!("{} mutation requires an id", self.name)))
    }

    /// Parses a list response into raw JSON items.
    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Value>, ApiError> {
        let fallback = self.fallback(Operation::List);
        let raw = response_body(response, fallback)?;
        normalize::list_payload(raw, fallback)
    }

    /// Parses a single-entity response. The payload must be an object.
    pub fn parse_get(&self, response: HttpResponse) -> Result<Value, ApiError> {
        let fallback = self.fallback(Operation::Get);
        let raw = response_body(response, fallback)?;
        normalize::object_payload(raw, fallback)
    }

    /// Parses a mutation response, returning the normalized payload together
    /// with the raw body (kept for success-message extraction).
    pub fn parse_mutation(&self, kind: MutationKind, response: HttpResponse) -> Result<MutationOutcome, ApiError> {
        let fallback = self.fallback(kind.operation());
        let raw = response_body(response, fallback)?;
        let payload = normalize::unwrap(raw.clone(), Expect::Object, fallback)?;
        if !matches!(payload, Value::Null | Value::Object(_)) {
            debug!(resource = %self.name, kind = normalize::json_kind(&payload), "mutation payload is not an object");
            return Err(ApiError::MalformedResponse(fallback.to_string()));
        }
        Ok(MutationOutcome { payload, raw })
    }
}

/// Result of a successful mutation round-trip.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    /// Normalized payload (`null` for empty acknowledgements).
    pub payload: Value,
    /// Body as sent by the backend.
    pub raw: Value,
}

impl MutationOutcome {
    pub fn success_message(&self) -> Option<String> {
        message::success_message(&self.raw)
    }
}

fn json_request<B: Serialize + ?Sized>(method: HttpMethod, path: String, body: &B) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

/// Checks the status and decodes the body as JSON.
///
/// Non-2xx responses become `Transport` errors whose message is resolved from
/// the body when possible. An empty 2xx body decodes as `null`.
fn response_body(response: HttpResponse, fallback: &str) -> Result<Value, ApiError> {
    if !response.is_success() {
        return Err(status_error(response, fallback));
    }
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

/// Maps a non-success response to a `Transport` error.
fn status_error(response: HttpResponse, fallback: &str) -> ApiError {
    let parsed: Option<Value> = serde_json::from_str(&response.body).ok();
    let message = parsed
        .as_ref()
        .and_then(message::error_message)
        .unwrap_or_else(|| fallback.to_string());
    let errors = parsed
        .as_ref()
        .map(ValidationErrorSet::from_envelope)
        .unwrap_or_default();
    ApiError::Transport {
        status: Some(response.status),
        message,
        errors,
    }
}
