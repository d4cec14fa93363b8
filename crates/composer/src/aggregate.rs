//! Counting, grouping and pricing
//!
//! Prices are summed as [`Decimal`], never through floating point.

use burgerfy_common::{Category, Ingredient, IngredientId, PLACEHOLDER_BURGER_NAME};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::selection::Burger;

/// How many times one ingredient appears
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientCount {
    pub ingredient: Ingredient,
    pub count: u32,
}

/// Ingredient id to occurrence count
///
/// A reporting helper: repeats are counted, not rejected.
pub fn count_ingredients<'a>(
    ingredients: impl IntoIterator<Item = &'a Ingredient>,
) -> BTreeMap<IngredientId, IngredientCount> {
    let mut counts: BTreeMap<IngredientId, IngredientCount> = BTreeMap::new();

    for ingredient in ingredients {
        counts
            .entry(ingredient.id)
            .and_modify(|c| c.count += 1)
            .or_insert_with(|| IngredientCount {
                ingredient: ingredient.clone(),
                count: 1,
            });
    }

    counts
}

/// Catalog entries per category, in catalog order
pub fn group_by_category<'a>(
    catalog: impl IntoIterator<Item = &'a Ingredient>,
) -> BTreeMap<Category, Vec<Ingredient>> {
    let mut groups: BTreeMap<Category, Vec<Ingredient>> = BTreeMap::new();

    for ingredient in catalog {
        groups
            .entry(ingredient.category)
            .or_default()
            .push(ingredient.clone());
    }

    groups
}

/// Sum of unit price times count
pub fn price_of<'a>(ingredients: impl IntoIterator<Item = &'a Ingredient>) -> Decimal {
    count_ingredients(ingredients)
        .values()
        .map(|c| c.ingredient.price * Decimal::from(c.count))
        .sum()
}

/// Total price of everything on the burger, bun included
pub fn calculate_price(burger: &Burger) -> Decimal {
    price_of(burger.ingredients())
}

/// US-dollar amount with two decimals, e.g. `$1,234.50`
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}${}.{cents}", group_thousands(whole))
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);

    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// Name a burger is saved under: the placeholder when blank, else as typed
pub fn finalize_name(name: &str) -> String {
    if name.trim().is_empty() {
        PLACEHOLDER_BURGER_NAME.to_string()
    } else {
        name.to_string()
    }
}
