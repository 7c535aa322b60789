//! Generic resource data-access layer for the exam portal.
//!
//! # Overview
//! Two collaborating pieces form the core: `ResourceClient` translates CRUD
//! intents against a named endpoint into HTTP requests and back into typed
//! data or errors, and `ResourceStore` wraps it with an in-memory collection
//! per endpoint — rows, loading/error flags and a selected-item slot — that
//! it reconciles from server responses.
//!
//! # Design
//! - The transport is an injected trait object, never a hidden global; tests
//!   swap in scripted transports, production uses `UreqTransport`.
//! - The client is stateless and split into `build_*`/`parse_*` halves, so
//!   request construction and response interpretation are unit-testable
//!   without any network.
//! - Write payloads are typed per concrete resource via the `Resource`
//!   trait's `Create`/`Update` associated types.
//! - Concurrent store operations are serialized by outcome, not by queueing:
//!   a response that lost the invocation race is discarded instead of
//!   overwriting newer state.

pub mod client;
pub mod error;
pub mod http;
pub mod model;
pub mod resource;
pub mod store;

pub use client::ResourceClient;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, UreqTransport};
pub use resource::Resource;
pub use store::{CancelToken, CollectionState, ResourceStore};
