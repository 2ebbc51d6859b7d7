//! Write path: perform the request, invalidate, notify.
//!
//! # Design
//! Each `mutate` call runs `Idle -> InFlight -> Success | Failure -> Idle` on
//! its own; nothing is shared between calls except the cache and notifier.
//! On success the cache is invalidated before the notification is emitted, so
//! anything reacting to the notification re-reads a fresh list. On failure
//! the cache is left alone and the error is returned after notifying.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, info_span, warn, Instrument};

use crate::cache::QueryCache;
use crate::catalog::{MessageCatalog, ResourceName};
use crate::error::ApiError;
use crate::notify::{Notification, Notifier};
use crate::resource::{MutationKind, MutationOutcome, Resource};
use crate::transport::Transport;

/// One write against a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub kind: MutationKind,
    pub resource: ResourceName,
    pub id: Option<String>,
    pub body: Option<Value>,
}

impl Mutation {
    pub fn create(resource: ResourceName, body: Value) -> Self {
        Self {
            kind: MutationKind::Create,
            resource,
            id: None,
            body: Some(body),
        }
    }

    pub fn update(resource: ResourceName, id: impl Into<String>, body: Value) -> Self {
        Self {
            kind: MutationKind::Update,
            resource,
            id: Some(id.into()),
            body: Some(body),
        }
    }

    pub fn delete(resource: ResourceName, id: impl Into<String>) -> Self {
        Self {
            kind: MutationKind::Delete,
            resource,
            id: Some(id.into()),
            body: None,
        }
    }
}

/// Caller overrides for the notifications of one mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationOptions {
    /// Shown instead of any message found in the response.
    pub success_message: Option<String>,
    /// Suppresses the success notification entirely.
    pub silent: bool,
}

impl MutationOptions {
    pub fn with_success_message(message: impl Into<String>) -> Self {
        Self {
            success_message: Some(message.into()),
            silent: false,
        }
    }
}

/// Runs mutations and keeps the cache and notifier in step with them.
///
/// The target collection comes from `Mutation::resource` alone: it names both
/// the URL segment written to and the cache key invalidated.
#[derive(Clone)]
pub struct MutationCoordinator {
    base_url: String,
    catalog: MessageCatalog,
    transport: Arc<dyn Transport>,
    cache: Arc<dyn QueryCache>,
    notifier: Arc<dyn Notifier>,
}

impl MutationCoordinator {
    pub fn new(
        base_url: &str,
        transport: Arc<dyn Transport>,
        cache: Arc<dyn QueryCache>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            catalog: MessageCatalog::default(),
            transport,
            cache,
            notifier,
        }
    }

    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub async fn mutate(&self, mutation: Mutation, options: &MutationOptions) -> Result<MutationOutcome, ApiError> {
        let span = info_span!(
            "mutation",
            resource = %mutation.resource,
            kind = ?mutation.kind,
            id = mutation.id.as_deref().unwrap_or(""),
        );
        async move {
            let resource = Resource::new(
                &self.base_url,
                mutation.resource.clone(),
                self.catalog.messages(&mutation.resource),
            );
            match self.run(&resource, &mutation).await {
                Ok(outcome) => {
                    self.cache.invalidate(resource.name()).await;
                    let message = if options.silent {
                        None
                    } else {
                        options.success_message.clone().or_else(|| outcome.success_message())
                    };
                    if let Some(message) = message {
                        self.notifier.notify(Notification::success(message)).await;
                    }
                    info!("mutation succeeded");
                    Ok(outcome)
                }
                Err(err) => {
                    warn!(error = %err, "mutation failed");
                    let description = err.field_errors().map(|errors| errors.summary());
                    self.notifier.notify(Notification::error(err.message(), description)).await;
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, resource: &Resource, mutation: &Mutation) -> Result<MutationOutcome, ApiError> {
        let request = resource.build_mutation(mutation.kind, mutation.id.as_deref(), mutation.body.as_ref())?;
        let response = self.transport.execute(request).await?;
        resource.parse_mutation(mutation.kind, response)
    }
}
