//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use console_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, MemoryQueryCache, Notification, Notifier, QueryCache,
    ResourceName, Transport,
};
use serde_json::Value;

/// Ordered record of side effects across collaborators.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: Vec::new(),
        body: body.to_string(),
    }
}

/// Replays canned responses in order and records every request it saw.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    log: Option<EventLog>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(log: EventLog) -> Self {
        Self {
            log: Some(log),
            ..Self::default()
        }
    }

    pub fn reply(self, status: u16, body: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(response(status, body)));
        self
    }

    pub fn fail(self, err: ApiError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, method: HttpMethod) -> usize {
        self.requests().iter().filter(|r| r.method == method).count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Some(log) = &self.log {
            log.lock().unwrap().push(format!("http {} {}", request.method, request.path));
        }
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport(None, "no scripted reply left")))
    }
}

/// Memory cache that also writes its invalidations to an event log.
pub struct LoggingCache {
    inner: MemoryQueryCache,
    log: EventLog,
}

impl LoggingCache {
    pub fn new(log: EventLog) -> Self {
        Self {
            inner: MemoryQueryCache::new(),
            log,
        }
    }
}

#[async_trait]
impl QueryCache for LoggingCache {
    async fn invalidate(&self, key: &ResourceName) {
        self.inner.invalidate(key).await;
        self.log.lock().unwrap().push(format!("invalidate {key}"));
    }

    async fn get_cached(&self, key: &ResourceName) -> Option<Vec<Value>> {
        self.inner.get_cached(key).await
    }

    async fn generation(&self, key: &ResourceName) -> u64 {
        self.inner.generation(key).await
    }

    async fn store(&self, key: &ResourceName, generation: u64, items: Vec<Value>) -> bool {
        self.inner.store(key, generation, items).await
    }
}

/// Notifier that writes to an event log.
pub struct LoggingNotifier {
    log: EventLog,
    received: Mutex<Vec<Notification>>,
}

impl LoggingNotifier {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<Notification> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn notify(&self, notification: Notification) {
        self.log
            .lock()
            .unwrap()
            .push(format!("notify {} {}", notification.kind, notification.title));
        self.received.lock().unwrap().push(notification);
    }
}
