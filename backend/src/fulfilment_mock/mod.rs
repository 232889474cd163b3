//! Stand-in grocery fulfilment service.
//!
//! Accepts `POST /api/shopping-cart`, validates that the body is JSON with an
//! `items` field and answers with a freshly minted order identifier echoing
//! the submitted items. Nothing is persisted.

mod handler;
mod server;

pub use handler::{MAX_BODY_BYTES, ProtocolError, SHOPPING_CART_ROUTE, configure};
pub use server::build_server;
