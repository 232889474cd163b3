//! Driven port for submitting shopping lists to the grocery fulfilment service.
//!
//! Adapters collapse every transport outcome into either a [`PlacedOrder`] or
//! exactly one [`GroceryFulfilmentError`] variant. The error's display text is
//! the caller-facing failure reason.

use async_trait::async_trait;
use uuid::Uuid;

use super::define_port_error;
use crate::domain::AggregatedItem;

/// Order confirmation returned by the fulfilment service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// Identifier minted by the fulfilment service.
    pub order_id: String,
    /// Human-readable confirmation message.
    pub message: String,
    /// Items echoed back by the service.
    pub items: Vec<AggregatedItem>,
}

define_port_error! {
    /// Failure classes for one order submission.
    pub enum GroceryFulfilmentError {
        /// The request never produced a response (refused, DNS, reset on send).
        Transport { message: String } =>
            "transport error: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "transport error: timed out: {message}",
        /// The service answered but its body could not be read in full.
        Interrupted { message: String } =>
            "transport error: response interrupted: {message}",
        /// The service answered with a non-2xx status.
        Status { status: u16, message: String } =>
            "transport error: {message}",
        /// The service answered 2xx with a body that does not parse.
        MalformedResponse { message: String } =>
            "malformed response",
    }
}

impl GroceryFulfilmentError {
    /// Return whether a fresh attempt could plausibly succeed.
    ///
    /// Only failures that happened before the service produced an answer
    /// qualify; status, interrupted-body and decoding failures are final.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }

    /// Caller-facing failure reason.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// Outcome of one order submission.
pub type CheckoutResult = Result<PlacedOrder, GroceryFulfilmentError>;

/// Port for placing grocery orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroceryFulfilment: Send + Sync {
    /// Submit `items` as one order.
    ///
    /// Implementations issue at most one outbound request per call unless
    /// they are explicitly retrying decorators.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use checkout_backend::domain::AggregatedItem;
    /// use checkout_backend::domain::ports::{FixtureGroceryFulfilment, GroceryFulfilment};
    ///
    /// let order = FixtureGroceryFulfilment
    ///     .place_order(&[AggregatedItem::new("Bread", 2, "pcs")])
    ///     .await?;
    /// assert_eq!(order.items.len(), 1);
    /// # Ok::<(), checkout_backend::domain::ports::GroceryFulfilmentError>(())
    /// ```
    async fn place_order(&self, items: &[AggregatedItem]) -> CheckoutResult;
}

/// Fixture implementation that accepts every order and echoes its items.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureGroceryFulfilment;

#[async_trait]
impl GroceryFulfilment for FixtureGroceryFulfilment {
    async fn place_order(&self, items: &[AggregatedItem]) -> CheckoutResult {
        Ok(PlacedOrder {
            order_id: Uuid::new_v4().to_string(),
            message: "Shopping list created successfully".to_owned(),
            items: items.to_vec(),
        })
    }
}
