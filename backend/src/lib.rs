//! Shopping-list checkout backend.
//!
//! Aggregates the ingredients of every recipe in a user's cart into one
//! shopping list and places it with an external grocery fulfilment service.
//! The [`fulfilment_mock`] module implements that service's wire contract for
//! local runs and integration tests.

pub mod doc;
pub mod domain;
pub mod fulfilment_mock;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
