//! Shopping list aggregation.
//!
//! Folds the ingredient lines of every recipe in a cart into one purchase
//! list. Names are grouped exactly as written: `"Milk"` and `"milk"` stay
//! separate, and no unit conversion happens. A name seen again with another
//! unit is added into the bucket opened by its first occurrence, keeping that
//! first unit.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::RecipeIngredientLine;

/// One deduplicated purchase line.
///
/// Also the wire shape of an entry in the fulfilment request's `items` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedItem {
    /// Ingredient name.
    pub name: String,
    /// Summed quantity.
    pub quantity: u32,
    /// Unit of the first contributing line.
    pub unit: String,
}

impl AggregatedItem {
    /// Build an item from borrowed parts.
    pub fn new(name: impl Into<String>, quantity: u32, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// Aggregate ingredient lines into a deduplicated shopping list.
///
/// Output order is the order in which each name was first seen.
///
/// # Examples
/// ```
/// use checkout_backend::domain::{AggregatedItem, RecipeIngredientLine, aggregate_ingredients};
///
/// let items = aggregate_ingredients([
///     RecipeIngredientLine::new("Milk", "l", 1),
///     RecipeIngredientLine::new("Eggs", "pc", 12),
///     RecipeIngredientLine::new("Milk", "l", 2),
/// ]);
/// assert_eq!(
///     items,
///     vec![AggregatedItem::new("Milk", 3, "l"), AggregatedItem::new("Eggs", 12, "pc")]
/// );
/// ```
pub fn aggregate_ingredients<I>(lines: I) -> Vec<AggregatedItem>
where
    I: IntoIterator<Item = RecipeIngredientLine>,
{
    let mut items: Vec<AggregatedItem> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for line in lines {
        match positions.get(&line.name).and_then(|&at| items.get_mut(at)) {
            Some(item) => item.quantity = item.quantity.saturating_add(line.amount),
            None => {
                positions.insert(line.name.clone(), items.len());
                items.push(AggregatedItem {
                    name: line.name,
                    quantity: line.amount,
                    unit: line.measurement_unit,
                });
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    //! Aggregation ordering, summing and the unit-merging quirk.

    use super::*;
    use rstest::rstest;

    fn line(name: &str, unit: &str, amount: u32) -> RecipeIngredientLine {
        RecipeIngredientLine::new(name, unit, amount)
    }

    #[rstest]
    fn sums_duplicates_in_first_seen_order() {
        let items = aggregate_ingredients(vec![
            line("Milk", "l", 1),
            line("Eggs", "pc", 12),
            line("Milk", "l", 2),
        ]);

        assert_eq!(
            items,
            vec![
                AggregatedItem::new("Milk", 3, "l"),
                AggregatedItem::new("Eggs", 12, "pc"),
            ]
        );
    }

    #[rstest]
    fn empty_input_yields_empty_list() {
        assert!(aggregate_ingredients(Vec::new()).is_empty());
    }

    #[rstest]
    fn grouping_is_case_sensitive() {
        let items = aggregate_ingredients(vec![line("Milk", "l", 1), line("milk", "l", 1)]);
        assert_eq!(items.len(), 2);
    }

    #[rstest]
    fn mixed_units_merge_into_first_unit() {
        let items = aggregate_ingredients(vec![line("Flour", "g", 500), line("Flour", "kg", 1)]);
        assert_eq!(items, vec![AggregatedItem::new("Flour", 501, "g")]);
    }

    #[rstest]
    fn quantities_saturate_instead_of_wrapping() {
        let items = aggregate_ingredients(vec![line("Salt", "g", u32::MAX), line("Salt", "g", 5)]);
        assert_eq!(items, vec![AggregatedItem::new("Salt", u32::MAX, "g")]);
    }

    #[rstest]
    fn same_input_gives_same_output() {
        let input = vec![
            line("Bread", "pcs", 1),
            line("Butter", "g", 20),
            line("Bread", "pcs", 1),
        ];
        assert_eq!(
            aggregate_ingredients(input.clone()),
            aggregate_ingredients(input)
        );
    }
}
