//! Driven port for reading carts and recipe ingredients.
//!
//! The catalogue that owns carts and recipes is an external collaborator;
//! checkout only needs these two read-only queries.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{CartEntry, RecipeId, RecipeIngredientLine, UserId};

define_port_error! {
    /// Errors raised by cart store adapters.
    pub enum CartRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "cart store connection failed: {message}",
        /// The store answered but the query failed.
        Query { message: String } =>
            "cart store query failed: {message}",
    }
}

/// Read-only access to carts and the ingredients of their recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// List every cart entry owned by `user_id`, in the order they were added.
    async fn list_cart_entries(&self, user_id: &UserId)
    -> Result<Vec<CartEntry>, CartRepositoryError>;

    /// List the ingredient lines of `recipe_id`.
    ///
    /// Unknown recipes yield an empty list.
    async fn list_recipe_ingredients(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<RecipeIngredientLine>, CartRepositoryError>;
}
