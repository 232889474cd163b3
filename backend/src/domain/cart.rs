//! Cart primitives read by the checkout pipeline.
//!
//! Carts and recipes are owned by the surrounding catalogue; checkout only
//! reads them, so these types are plain immutable values.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`uuid::Error`] when `id` is not a UUID.
    pub fn new(id: impl AsRef<str>) -> Result<Self, uuid::Error> {
        Uuid::parse_str(id.as_ref()).map(Self)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recipe identifier assigned by the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(u64);

impl RecipeId {
    /// Wrap a raw catalogue identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw catalogue identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recipe a user has put in their cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartEntry {
    /// Owner of the cart.
    pub user_id: UserId,
    /// Recipe awaiting checkout.
    pub recipe_id: RecipeId,
}

/// One ingredient requirement of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredientLine {
    /// Ingredient name as stored in the catalogue.
    pub name: String,
    /// Measurement unit, e.g. `g` or `pcs`.
    pub measurement_unit: String,
    /// Amount required by the recipe.
    pub amount: u32,
}

impl RecipeIngredientLine {
    /// Build a line from borrowed parts.
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>, amount: u32) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        }
    }
}
