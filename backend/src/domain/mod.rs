//! Domain primitives, services and ports for the checkout pipeline.
//!
//! Purpose: keep cart reading, shopping list aggregation and order submission
//! free of transport concerns. Adapters in `inbound` and `outbound` translate
//! between these types and HTTP.
//!
//! Public surface:
//! - `aggregate_ingredients`: pure shopping list aggregation.
//! - `CheckoutService`: orchestrates one checkout through the ports.
//! - `RetryingGroceryFulfilment`: opt-in bounded retry decorator.
//! - `Error` / `ErrorCode`: transport-agnostic error payload.

mod cart;
pub mod checkout_service;
pub mod error;
pub mod fulfilment_retry;
pub mod ports;
mod shopping_list;
mod trace_id;

pub use self::cart::{CartEntry, RecipeId, RecipeIngredientLine, UserId};
pub use self::checkout_service::CheckoutService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::fulfilment_retry::{
    BackoffJitter, RandomJitter, RetryPolicy, RetrySleeper, RetryingGroceryFulfilment,
    TokioSleeper,
};
pub use self::shopping_list::{AggregatedItem, aggregate_ingredients};
pub use self::trace_id::TraceId;
