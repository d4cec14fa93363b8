//! Selections and the burger in progress

use burgerfy_common::{BurgerIngredientRef, Ingredient, IngredientId, NewBurger};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::aggregate::finalize_name;

/// Identifies one pick of an ingredient. Two picks of the same ingredient get
/// different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionId(Uuid);

impl SelectionId {
    /// Mint a fresh id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SelectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One ingredient picked into the burger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedIngredient {
    pub selection_id: SelectionId,
    pub ingredient: Ingredient,
}

impl SelectedIngredient {
    pub fn new(selection_id: SelectionId, ingredient: Ingredient) -> Self {
        Self {
            selection_id,
            ingredient,
        }
    }
}

/// The burger being built
///
/// The bun lives in its own slot; at most one bun is active. Fillings keep
/// insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Burger {
    pub name: String,
    bun: Option<SelectedIngredient>,
    fillings: Vec<SelectedIngredient>,
}

impl Burger {
    /// Empty-named burger holding `bun`, if any
    pub fn with_bun(bun: Option<&Ingredient>) -> Self {
        Self {
            name: String::new(),
            bun: bun.map(|b| SelectedIngredient::new(SelectionId::new(), b.clone())),
            fillings: Vec::new(),
        }
    }

    pub fn bun(&self) -> Option<&SelectedIngredient> {
        self.bun.as_ref()
    }

    pub fn fillings(&self) -> &[SelectedIngredient] {
        &self.fillings
    }

    /// Bun first, then fillings in insertion order
    pub fn selections(&self) -> impl Iterator<Item = &SelectedIngredient> {
        self.bun.iter().chain(self.fillings.iter())
    }

    pub fn ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.selections().map(|s| &s.ingredient)
    }

    pub fn len(&self) -> usize {
        self.fillings.len() + usize::from(self.bun.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.bun.is_none() && self.fillings.is_empty()
    }

    /// Whether a filling already references `id`
    pub fn has_filling(&self, id: IngredientId) -> bool {
        self.fillings.iter().any(|s| s.ingredient.id == id)
    }

    pub(crate) fn set_bun(&mut self, selection: SelectedIngredient) {
        self.bun = Some(selection);
    }

    pub(crate) fn push_filling(&mut self, selection: SelectedIngredient) {
        self.fillings.push(selection);
    }

    /// Drop the filling with `selection_id`. The bun slot is never touched.
    pub(crate) fn remove_filling(&mut self, selection_id: SelectionId) -> bool {
        let before = self.fillings.len();
        self.fillings.retain(|s| s.selection_id != selection_id);
        self.fillings.len() != before
    }

    /// Payload for saving, with the name finalized
    pub fn to_new_burger(&self) -> NewBurger {
        NewBurger {
            name: finalize_name(&self.name),
            ingredients: self.ingredients().map(BurgerIngredientRef::from).collect(),
        }
    }
}
