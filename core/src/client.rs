//! Async console client tying resources, transport, cache and notifier.
//!
//! # Design
//! `ConsoleClient` owns no entity data. Reads go through the query cache
//! (list reads only) and the transport; writes go through the
//! `MutationCoordinator`. Collaborators are injected as trait objects so the
//! same client runs against reqwest in production and scripted transports in
//! tests.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::cache::{MemoryQueryCache, QueryCache};
use crate::catalog::{MessageCatalog, ResourceName};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::mutation::{Mutation, MutationCoordinator, MutationOptions};
use crate::notify::{Notifier, TracingNotifier};
use crate::resource::{MutationOutcome, Resource};
use crate::session::TokenProvider;
use crate::transport::{HttpTransport, Transport};
use crate::types::Entity;

#[derive(Clone)]
pub struct ConsoleClient {
    base_url: String,
    catalog: MessageCatalog,
    transport: Arc<dyn Transport>,
    cache: Arc<dyn QueryCache>,
    coordinator: MutationCoordinator,
}

impl ConsoleClient {
    pub fn new(
        base_url: &str,
        transport: Arc<dyn Transport>,
        cache: Arc<dyn QueryCache>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            catalog: MessageCatalog::default(),
            coordinator: MutationCoordinator::new(base_url, transport.clone(), cache.clone(), notifier),
            transport,
            cache,
        }
    }

    /// Client over reqwest with an in-memory cache and tracing notifications.
    pub fn from_config(config: &ClientConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(tokens, config.timeout())?;
        Ok(Self::new(
            &config.base_url,
            Arc::new(transport),
            Arc::new(MemoryQueryCache::new()),
            Arc::new(TracingNotifier),
        ))
    }

    /// Replaces the fallback-message table.
    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.coordinator = self.coordinator.with_catalog(catalog.clone());
        self.catalog = catalog;
        self
    }

    /// Request builder/parser for `name`, carrying its fallback messages.
    pub fn resource(&self, name: &ResourceName) -> Resource {
        Resource::new(&self.base_url, name.clone(), self.catalog.messages(name))
    }

    /// Lists `name`, serving from the cache when an entry exists.
    #[instrument(skip(self), fields(resource = %name))]
    pub async fn list(&self, name: &ResourceName) -> Result<Vec<Value>, ApiError> {
        if let Some(items) = self.cache.get_cached(name).await {
            debug!(count = items.len(), "served list from cache");
            return Ok(items);
        }
        let generation = self.cache.generation(name).await;
        let resource = self.resource(name);
        let response = self.transport.execute(resource.build_list()).await?;
        let items = resource.parse_list(response)?;
        let cached = self.cache.store(name, generation, items.clone()).await;
        debug!(count = items.len(), cached, "fetched list");
        Ok(items)
    }

    #[instrument(skip(self), fields(resource = %name))]
    pub async fn get_by_id(&self, name: &ResourceName, id: &str) -> Result<Value, ApiError> {
        let resource = self.resource(name);
        let response = self.transport.execute(resource.build_get(id)?).await?;
        resource.parse_get(response)
    }

    pub async fn mutate(&self, mutation: Mutation, options: &MutationOptions) -> Result<MutationOutcome, ApiError> {
        self.coordinator.mutate(mutation, options).await
    }

    pub async fn list_entities<T: Entity>(&self) -> Result<Vec<T>, ApiError> {
        self.list(&T::RESOURCE)
            .await?
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(|e| ApiError::MalformedResponse(e.to_string())))
            .collect()
    }

    pub async fn get_entity<T: Entity>(&self, id: &str) -> Result<T, ApiError> {
        let payload = self.get_by_id(&T::RESOURCE, id).await?;
        serde_json::from_value(payload).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }

    /// Creates `entity` and returns the stored record. An acknowledgement
    /// without a body yields the submitted entity back.
    pub async fn create_entity<T: Entity + Clone>(&self, entity: &T, options: &MutationOptions) -> Result<T, ApiError> {
        let body = to_body(entity)?;
        let outcome = self.mutate(Mutation::create(T::RESOURCE, body), options).await?;
        entity_or(outcome, entity)
    }

    /// Updates the record identified by `entity.id()`.
    pub async fn update_entity<T: Entity + Clone>(&self, entity: &T, options: &MutationOptions) -> Result<T, ApiError> {
        let body = to_body(entity)?;
        let outcome = self
            .mutate(Mutation::update(T::RESOURCE, entity.id(), body), options)
            .await?;
        entity_or(outcome, entity)
    }

    pub async fn delete_entity<T: Entity>(&self, id: &str, options: &MutationOptions) -> Result<(), ApiError> {
        self.mutate(Mutation::delete(T::RESOURCE, id), options).await?;
        Ok(())
    }
}

fn to_body<T: Entity>(entity: &T) -> Result<Value, ApiError> {
    serde_json::to_value(entity).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn entity_or<T: Entity + Clone>(outcome: MutationOutcome, submitted: &T) -> Result<T, ApiError> {
    if outcome.payload.is_null() {
        return Ok(submitted.clone());
    }
    serde_json::from_value(outcome.payload).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}
