//! Grocery fulfilment outbound adapters.
//!
//! This module provides the reqwest implementation of the
//! `GroceryFulfilment` port.

mod dto;
mod http_client;

pub use http_client::{GroceryClientBuildError, GroceryHttpClient, SHOPPING_CART_PATH};
