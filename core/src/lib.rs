//! Client core for the licensing console's REST backend.
//!
//! # Overview
//! Decodes the backend's inconsistent responses (bare arrays, bare objects,
//! `succeeded` / `isSuccess` envelopes) into payloads or errors, and runs
//! writes with cache invalidation and user notifications.
//!
//! # Design
//! - `normalize` is pure: raw JSON in, payload or `RequestFailed` out.
//! - `Resource` builds requests and parses responses for any collection; it
//!   never touches the network (host-does-IO).
//! - `Transport`, `QueryCache`, `Notifier` and `TokenProvider` are injected
//!   trait objects, so nothing reads ambient global state.
//! - `MutationCoordinator` invalidates before it notifies.

pub mod cache;
pub mod catalog;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod logging;
pub mod message;
pub mod mutation;
pub mod normalize;
pub mod notify;
pub mod resource;
pub mod session;
pub mod transport;
pub mod types;
pub mod validation;

pub use cache::{MemoryQueryCache, QueryCache};
pub use catalog::{FallbackMessages, MessageCatalog, Operation, ResourceName};
pub use client::ConsoleClient;
pub use config::ClientConfig;
pub use envelope::{resolve_succeeded, SuccessFlag};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mutation::{Mutation, MutationCoordinator, MutationOptions};
pub use normalize::{unwrap, Expect};
pub use notify::{Notification, NotificationKind, Notifier, RecordingNotifier, TracingNotifier};
pub use resource::{MutationKind, MutationOutcome, Resource};
pub use session::{SessionStore, StaticToken, TokenProvider, UserProfile};
pub use transport::{HttpTransport, Transport};
pub use types::{App, Authorization, Dealer, Entity, License, Program, User};
pub use validation::ValidationErrorSet;
