//! In-memory outbound adapters.
//!
//! The catalogue database is outside this service; these adapters let the
//! checkout backend run standalone from a JSON fixture.

mod cart_fixture;
mod cart_repository;

pub use cart_fixture::{CartFixture, CartFixtureError};
pub use cart_repository::InMemoryCartRepository;
