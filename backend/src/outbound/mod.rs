//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **grocery**: reqwest client for the grocery fulfilment service
//! - **memory**: in-memory cart store seeded from JSON fixtures
//!
//! Adapters are thin translators between domain types and their transport
//! representation. They contain no business logic.

pub mod grocery;
pub mod memory;
