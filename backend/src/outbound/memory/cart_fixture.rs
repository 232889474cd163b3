//! JSON cart fixture parsing.
//!
//! Fixtures seed the in-memory cart store for local runs:
//!
//! ```json
//! {
//!   "recipes": [
//!     { "id": 1, "ingredients": [{ "name": "Milk", "measurementUnit": "l", "amount": 1 }] }
//!   ],
//!   "carts": [{ "userId": "11111111-1111-1111-1111-111111111111", "recipeId": 1 }]
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{CartEntry, RecipeId, RecipeIngredientLine, UserId};

/// Errors raised while loading a cart fixture.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartFixtureError {
    /// The fixture file could not be read.
    #[error("failed to read cart fixture at {path}: {message}")]
    Io {
        /// Fixture location.
        path: PathBuf,
        /// Underlying I/O failure.
        message: String,
    },
    /// The fixture is not valid JSON of the expected shape.
    #[error("failed to parse cart fixture: {message}")]
    Parse {
        /// Decoder failure.
        message: String,
    },
    /// Two recipes share an identifier.
    #[error("recipe {recipe_id} is defined more than once")]
    DuplicateRecipe {
        /// Repeated identifier.
        recipe_id: RecipeId,
    },
    /// A cart references a recipe the fixture does not define.
    #[error("cart entry for user {user_id} references unknown recipe {recipe_id}")]
    UnknownRecipe {
        /// Cart owner.
        user_id: UserId,
        /// Missing recipe.
        recipe_id: RecipeId,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawCartFixture {
    #[serde(default)]
    recipes: Vec<RawRecipe>,
    #[serde(default)]
    carts: Vec<RawCartEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecipe {
    id: RecipeId,
    #[serde(default)]
    ingredients: Vec<RawIngredient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIngredient {
    name: String,
    measurement_unit: String,
    amount: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCartEntry {
    user_id: UserId,
    recipe_id: RecipeId,
}

/// Validated fixture contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartFixture {
    /// Recipes with their ingredient lines, in file order.
    pub recipes: Vec<(RecipeId, Vec<RecipeIngredientLine>)>,
    /// Cart entries, in file order.
    pub carts: Vec<CartEntry>,
}

impl CartFixture {
    /// Parse and validate a fixture from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CartFixtureError`] when the JSON is malformed, a recipe id
    /// repeats, or a cart entry names an undefined recipe.
    pub fn from_json(json: &str) -> Result<Self, CartFixtureError> {
        let raw: RawCartFixture =
            serde_json::from_str(json).map_err(|e| CartFixtureError::Parse {
                message: e.to_string(),
            })?;
        Self::from_raw(raw)
    }

    /// Load a fixture from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CartFixtureError`] if the file cannot be read or validated.
    pub fn from_file(path: &Path) -> Result<Self, CartFixtureError> {
        let contents = fs::read_to_string(path).map_err(|e| CartFixtureError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&contents)
    }

    fn from_raw(raw: RawCartFixture) -> Result<Self, CartFixtureError> {
        let mut known = HashSet::new();
        let mut recipes = Vec::with_capacity(raw.recipes.len());
        for recipe in raw.recipes {
            if !known.insert(recipe.id) {
                return Err(CartFixtureError::DuplicateRecipe {
                    recipe_id: recipe.id,
                });
            }
            let lines = recipe
                .ingredients
                .into_iter()
                .map(|ingredient| RecipeIngredientLine {
                    name: ingredient.name,
                    measurement_unit: ingredient.measurement_unit,
                    amount: ingredient.amount,
                })
                .collect();
            recipes.push((recipe.id, lines));
        }

        let carts = raw
            .carts
            .into_iter()
            .map(|entry| {
                if known.contains(&entry.recipe_id) {
                    Ok(CartEntry {
                        user_id: entry.user_id,
                        recipe_id: entry.recipe_id,
                    })
                } else {
                    Err(CartFixtureError::UnknownRecipe {
                        user_id: entry.user_id,
                        recipe_id: entry.recipe_id,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { recipes, carts })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use rstest::rstest;

    const USER: &str = "11111111-1111-1111-1111-111111111111";

    #[rstest]
    fn parses_recipes_and_carts_in_file_order() {
        let json = format!(
            r#"{{
                "recipes": [
                    {{ "id": 2, "ingredients": [{{ "name": "Eggs", "measurementUnit": "pc", "amount": 12 }}] }},
                    {{ "id": 1, "ingredients": [] }}
                ],
                "carts": [{{ "userId": "{USER}", "recipeId": 2 }}]
            }}"#
        );

        let fixture = CartFixture::from_json(&json).expect("fixture parses");

        assert_eq!(fixture.recipes.len(), 2);
        assert_eq!(fixture.recipes[0].0, RecipeId::new(2));
        assert_eq!(
            fixture.recipes[0].1,
            vec![RecipeIngredientLine::new("Eggs", "pc", 12)]
        );
        assert_eq!(fixture.carts[0].recipe_id, RecipeId::new(2));
    }

    #[rstest]
    fn rejects_cart_entries_for_unknown_recipes() {
        let json = format!(r#"{{ "recipes": [], "carts": [{{ "userId": "{USER}", "recipeId": 9 }}] }}"#);
        let error = CartFixture::from_json(&json).expect_err("unknown recipe");
        assert!(matches!(error, CartFixtureError::UnknownRecipe { .. }));
    }

    #[rstest]
    fn rejects_duplicate_recipe_ids() {
        let json = r#"{ "recipes": [{ "id": 1 }, { "id": 1 }] }"#;
        let error = CartFixture::from_json(json).expect_err("duplicate recipe");
        assert_eq!(
            error,
            CartFixtureError::DuplicateRecipe {
                recipe_id: RecipeId::new(1)
            }
        );
    }

    #[rstest]
    #[case::not_json("recipes")]
    #[case::negative_amount(r#"{ "recipes": [{ "id": 1, "ingredients": [{ "name": "Salt", "measurementUnit": "g", "amount": -1 }] }] }"#)]
    #[case::bad_user(r#"{ "recipes": [{ "id": 1 }], "carts": [{ "userId": "bob", "recipeId": 1 }] }"#)]
    fn rejects_malformed_documents(#[case] json: &str) {
        let error = CartFixture::from_json(json).expect_err("malformed");
        assert!(matches!(error, CartFixtureError::Parse { .. }));
    }

    #[rstest]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "recipes": [{{ "id": 5 }}] }}"#).expect("write fixture");

        let fixture = CartFixture::from_file(file.path()).expect("fixture loads");
        assert_eq!(fixture.recipes, vec![(RecipeId::new(5), Vec::new())]);
    }

    #[rstest]
    fn missing_file_reports_its_path() {
        let error = CartFixture::from_file(Path::new("/nonexistent/cart.json"))
            .expect_err("missing file");
        assert!(matches!(error, CartFixtureError::Io { ref path, .. } if path == Path::new("/nonexistent/cart.json")));
    }
}
