//! Thread-safe in-memory cart store.
//!
//! Stands in for the catalogue database when running the checkout backend on
//! its own. Cart entries keep insertion order; a user holds each recipe at
//! most once. Every write is a single insert or push, so a poisoned lock
//! still guards consistent state and both readers and writers recover it.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{CartFixture, CartFixtureError};
use crate::domain::ports::{CartRepository, CartRepositoryError};
use crate::domain::{CartEntry, RecipeId, RecipeIngredientLine, UserId};

#[derive(Debug, Default)]
struct CartState {
    recipes: HashMap<RecipeId, Vec<RecipeIngredientLine>>,
    entries: Vec<CartEntry>,
}

/// In-memory implementation of [`CartRepository`].
#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
    state: RwLock<CartState>,
}

impl InMemoryCartRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store seeded from a validated fixture.
    ///
    /// # Errors
    ///
    /// Returns [`CartFixtureError::UnknownRecipe`] if a cart entry references
    /// a recipe the fixture does not define.
    pub fn from_fixture(fixture: CartFixture) -> Result<Self, CartFixtureError> {
        let store = Self::new();
        for (recipe_id, lines) in fixture.recipes {
            store.upsert_recipe(recipe_id, lines);
        }
        for entry in fixture.carts {
            if store.add_to_cart(entry.user_id, entry.recipe_id).is_none() {
                return Err(CartFixtureError::UnknownRecipe {
                    user_id: entry.user_id,
                    recipe_id: entry.recipe_id,
                });
            }
        }
        Ok(store)
    }

    /// Insert or replace a recipe's ingredient lines.
    pub fn upsert_recipe(&self, recipe_id: RecipeId, lines: Vec<RecipeIngredientLine>) {
        let mut state = self.write();
        state.recipes.insert(recipe_id, lines);
    }

    /// Put `recipe_id` in the cart of `user_id`.
    ///
    /// Returns `None` when the recipe is unknown, `Some(false)` when it was
    /// already in the cart and `Some(true)` when it was added.
    pub fn add_to_cart(&self, user_id: UserId, recipe_id: RecipeId) -> Option<bool> {
        let mut state = self.write();
        if !state.recipes.contains_key(&recipe_id) {
            return None;
        }
        let entry = CartEntry { user_id, recipe_id };
        if state.entries.contains(&entry) {
            return Some(false);
        }
        state.entries.push(entry);
        Some(true)
    }

    fn read(&self) -> RwLockReadGuard<'_, CartState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CartState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn list_cart_entries(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CartEntry>, CartRepositoryError> {
        let state = self.read();
        Ok(state
            .entries
            .iter()
            .filter(|entry| entry.user_id == *user_id)
            .copied()
            .collect())
    }

    async fn list_recipe_ingredients(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<RecipeIngredientLine>, CartRepositoryError> {
        let state = self.read();
        Ok(state.recipes.get(&recipe_id).cloned().unwrap_or_default())
    }
}
