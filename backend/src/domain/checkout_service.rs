//! Checkout orchestration.
//!
//! Reads a user's cart, folds every recipe's ingredients into one shopping
//! list and submits it through the grocery fulfilment port. The cart is never
//! modified here and there is no idempotency key, so repeated calls place
//! repeated orders.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    CartRepository, CheckoutCommand, CheckoutConfirmation, CheckoutError, GroceryFulfilment,
};
use crate::domain::{AggregatedItem, CartEntry, UserId, aggregate_ingredients};

/// Checkout service implementing the [`CheckoutCommand`] driving port.
#[derive(Clone)]
pub struct CheckoutService<C, G> {
    carts: Arc<C>,
    fulfilment: Arc<G>,
}

impl<C, G> CheckoutService<C, G> {
    /// Create a new service over the given cart store and fulfilment client.
    pub fn new(carts: Arc<C>, fulfilment: Arc<G>) -> Self {
        Self { carts, fulfilment }
    }
}

impl<C, G> CheckoutService<C, G>
where
    C: CartRepository,
    G: GroceryFulfilment,
{
    async fn collect_items(
        &self,
        entries: &[CartEntry],
    ) -> Result<Vec<AggregatedItem>, CheckoutError> {
        let mut lines = Vec::new();
        for entry in entries {
            lines.extend(self.carts.list_recipe_ingredients(entry.recipe_id).await?);
        }
        Ok(aggregate_ingredients(lines))
    }
}

#[async_trait]
impl<C, G> CheckoutCommand for CheckoutService<C, G>
where
    C: CartRepository,
    G: GroceryFulfilment,
{
    async fn checkout(&self, user_id: &UserId) -> Result<CheckoutConfirmation, CheckoutError> {
        let entries = self.carts.list_cart_entries(user_id).await?;
        if entries.is_empty() {
            info!(%user_id, "checkout refused: cart is empty");
            return Err(CheckoutError::EmptyCart);
        }

        let items = self.collect_items(&entries).await?;
        info!(
            %user_id,
            recipes = entries.len(),
            items = items.len(),
            "submitting shopping list"
        );

        match self.fulfilment.place_order(&items).await {
            Ok(order) => {
                info!(%user_id, order_id = %order.order_id, "checkout placed order");
                Ok(CheckoutConfirmation {
                    order_id: order.order_id,
                    message: order.message,
                    items: order.items,
                })
            }
            Err(error) => {
                warn!(%user_id, %error, "checkout failed at fulfilment");
                Err(CheckoutError::Fulfilment(error))
            }
        }
    }
}

#[cfg(test)]
#[path = "checkout_service_tests.rs"]
mod tests;
