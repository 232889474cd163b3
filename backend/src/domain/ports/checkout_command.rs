//! Driving port for checking out a user's cart.

use async_trait::async_trait;
use serde_json::json;

use super::{CartRepositoryError, GroceryFulfilmentError};
use crate::domain::{AggregatedItem, Error, UserId};

/// Confirmation handed back to callers after a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfirmation {
    /// Identifier minted by the fulfilment service.
    pub order_id: String,
    /// Confirmation message from the fulfilment service.
    pub message: String,
    /// Items the fulfilment service accepted.
    pub items: Vec<AggregatedItem>,
}

/// Reasons a checkout can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    /// The user has nothing in their cart; no order was attempted.
    #[error("shopping cart is empty")]
    EmptyCart,
    /// The cart store could not be read.
    #[error(transparent)]
    CartUnavailable(#[from] CartRepositoryError),
    /// The fulfilment service rejected or failed the order.
    #[error(transparent)]
    Fulfilment(#[from] GroceryFulfilmentError),
}

impl From<CheckoutError> for Error {
    fn from(value: CheckoutError) -> Self {
        match value {
            CheckoutError::EmptyCart => Error::invalid_request("shopping cart is empty")
                .with_details(json!({ "code": "empty_cart" })),
            CheckoutError::CartUnavailable(err) => Error::service_unavailable(err.to_string()),
            CheckoutError::Fulfilment(err) => {
                let retryable = err.is_retryable();
                Error::bad_gateway(err.reason()).with_details(json!({
                    "code": "fulfilment_failed",
                    "retryable": retryable,
                }))
            }
        }
    }
}

/// Use-case port invoked by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckoutCommand: Send + Sync {
    /// Aggregate the cart of `user_id` and submit it as one order.
    ///
    /// The cart is left untouched; calling this twice places two orders.
    async fn checkout(&self, user_id: &UserId) -> Result<CheckoutConfirmation, CheckoutError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn empty_cart_maps_to_invalid_request() {
        let error = Error::from(CheckoutError::EmptyCart);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "shopping cart is empty");
        assert_eq!(error.details(), Some(&json!({ "code": "empty_cart" })));
    }

    #[rstest]
    fn fulfilment_failure_keeps_reason() {
        let error = Error::from(CheckoutError::from(GroceryFulfilmentError::malformed_response(
            "trailing characters",
        )));
        assert_eq!(error.code(), ErrorCode::BadGateway);
        assert_eq!(error.message(), "malformed response");
    }

    #[rstest]
    fn cart_failure_maps_to_service_unavailable() {
        let error = Error::from(CheckoutError::from(CartRepositoryError::connection("down")));
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
