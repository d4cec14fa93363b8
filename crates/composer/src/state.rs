//! Selection state machine
//!
//! Every change to the burger in progress goes through [`transition`], a pure
//! function from the current state and one [`Operation`] to the next state.
//! None of the operations can fail: unknown selection ids and duplicate
//! fillings are ignored.

use burgerfy_common::{Ingredient, PersistedBurger};

use crate::selection::{Burger, SelectedIngredient, SelectionId};

/// Everything that can happen to the burger in progress
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Pick an ingredient. A bun replaces the current bun; a filling that is
    /// already on the burger is ignored.
    Add {
        ingredient: Ingredient,
        selection_id: SelectionId,
    },

    /// Drop a filling by selection id. The bun can only be replaced.
    Remove(SelectionId),

    /// Back to the default bun, no name, nothing saved
    Reset,

    SetName(String),

    /// Replace the catalog. Selections are left alone.
    SetCatalog(Vec<Ingredient>),

    /// Record the burger returned by a save
    Saved(PersistedBurger),
}

impl Operation {
    /// `Add` with a freshly minted selection id
    pub fn add(ingredient: Ingredient) -> Self {
        Operation::Add {
            ingredient,
            selection_id: SelectionId::new(),
        }
    }
}

/// Catalog plus the burger being built
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComposerState {
    catalog: Vec<Ingredient>,
    burger: Burger,
    saved: Option<PersistedBurger>,

    /// Advanced by every reset; see [`crate::ticket`]
    pub(crate) epoch: u64,
}

impl ComposerState {
    /// Start a burger on the first bun of `catalog`
    pub fn new(catalog: Vec<Ingredient>) -> Self {
        let burger = Burger::with_bun(default_bun(&catalog));

        Self {
            catalog,
            burger,
            saved: None,
            epoch: 0,
        }
    }

    pub fn catalog(&self) -> &[Ingredient] {
        &self.catalog
    }

    pub fn burger(&self) -> &Burger {
        &self.burger
    }

    /// The last saved burger, cleared on reset
    pub fn saved(&self) -> Option<&PersistedBurger> {
        self.saved.as_ref()
    }

    pub fn default_bun(&self) -> Option<&Ingredient> {
        default_bun(&self.catalog)
    }

    /// Apply `operation` in place
    pub fn apply(&mut self, operation: Operation) {
        *self = transition(std::mem::take(self), operation);
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.apply(Operation::add(ingredient));
    }

    pub fn remove_ingredient(&mut self, selection_id: SelectionId) {
        self.apply(Operation::Remove(selection_id));
    }

    pub fn reset_burger(&mut self) {
        self.apply(Operation::Reset);
    }

    pub fn set_burger_name(&mut self, name: impl Into<String>) {
        self.apply(Operation::SetName(name.into()));
    }

    pub fn set_ingredients(&mut self, catalog: Vec<Ingredient>) {
        self.apply(Operation::SetCatalog(catalog));
    }

    /// Seat the default bun on a burger nobody has touched yet
    pub(crate) fn seat_default_bun(&mut self) {
        if self.burger.is_empty() && self.burger.name.is_empty() {
            self.burger = Burger::with_bun(default_bun(&self.catalog));
        }
    }
}

/// Next state after `operation`
pub fn transition(mut state: ComposerState, operation: Operation) -> ComposerState {
    match operation {
        Operation::Add {
            ingredient,
            selection_id,
        } => {
            if ingredient.is_bun() {
                state
                    .burger
                    .set_bun(SelectedIngredient::new(selection_id, ingredient));
            } else if !state.burger.has_filling(ingredient.id) {
                state
                    .burger
                    .push_filling(SelectedIngredient::new(selection_id, ingredient));
            }
        }
        Operation::Remove(selection_id) => {
            state.burger.remove_filling(selection_id);
        }
        Operation::Reset => {
            state.burger = Burger::with_bun(default_bun(&state.catalog));
            state.saved = None;
            state.epoch += 1;
        }
        Operation::SetName(name) => {
            state.burger.name = name;
        }
        Operation::SetCatalog(catalog) => {
            state.catalog = catalog;
        }
        Operation::Saved(burger) => {
            state.saved = Some(burger);
        }
    }

    state
}

fn default_bun(catalog: &[Ingredient]) -> Option<&Ingredient> {
    catalog.iter().find(|i| i.is_bun())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{calculate_price, count_ingredients};
    use crate::fixtures::{beef, brioche, catalog, cheddar, chicken, ketchup, sesame};
    use burgerfy_common::{Category, NewBurger};
    use rust_decimal::Decimal;

    fn names(state: &ComposerState) -> Vec<String> {
        state.burger().ingredients().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_initial_state_has_default_bun() {
        let state = ComposerState::new(catalog());

        assert_eq!(names(&state), ["Brioche Bun"]);
        assert_eq!(state.burger().name, "");
        assert!(state.saved().is_none());
    }

    #[test]
    fn test_empty_catalog_starts_without_bun() {
        let state = ComposerState::new(Vec::new());
        assert!(state.burger().is_empty());
    }

    #[test]
    fn test_second_bun_replaces_first() {
        for (first, second) in [(brioche(), sesame()), (sesame(), brioche())] {
            let mut state = ComposerState::new(catalog());
            state.add_ingredient(first);
            state.add_ingredient(second.clone());

            let buns: Vec<_> = state
                .burger()
                .ingredients()
                .filter(|i| i.category == Category::Bun)
                .collect();
            assert_eq!(buns.len(), 1);
            assert_eq!(buns[0].id, second.id);
        }
    }

    #[test]
    fn test_duplicate_filling_is_ignored() {
        let mut state = ComposerState::new(catalog());
        state.add_ingredient(beef());
        state.add_ingredient(beef());
        assert_eq!(state.burger().fillings().len(), 1);

        state.add_ingredient(chicken());
        assert_eq!(state.burger().fillings().len(), 2);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut state = ComposerState::new(catalog());
        state.add_ingredient(beef());
        state.add_ingredient(cheddar());
        state.add_ingredient(ketchup());

        let cheddar_id = state.burger().fillings()[1].selection_id;
        state.remove_ingredient(cheddar_id);

        assert_eq!(names(&state), ["Brioche Bun", "Beef Patty", "Ketchup"]);
    }

    #[test]
    fn test_remove_bun_is_noop() {
        let mut state = ComposerState::new(catalog());
        state.add_ingredient(beef());
        let before = state.clone();

        let bun_id = state.burger().bun().unwrap().selection_id;
        state.remove_ingredient(bun_id);

        assert_eq!(state, before);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut state = ComposerState::new(catalog());
        state.add_ingredient(beef());
        let before = state.clone();

        state.remove_ingredient(SelectionId::new());

        assert_eq!(state, before);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut state = ComposerState::new(catalog());
        state.add_ingredient(sesame());
        state.add_ingredient(beef());
        state.set_burger_name("Big One");
        state.apply(Operation::Saved(burgerfy_common::PersistedBurger::new(
            1,
            NewBurger {
                name: "Big One".to_string(),
                ingredients: Vec::new(),
            },
            None,
        )));

        state.reset_burger();

        assert_eq!(names(&state), ["Brioche Bun"]);
        assert_eq!(state.burger().name, "");
        assert!(state.saved().is_none());

        let counts = count_ingredients(state.burger().ingredients());
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[&1].count, 1);
    }

    #[test]
    fn test_set_catalog_leaves_selections() {
        let mut state = ComposerState::new(catalog());
        state.add_ingredient(beef());
        let burger = state.burger().clone();

        state.set_ingredients(vec![sesame()]);

        assert_eq!(state.burger(), &burger);
        assert_eq!(state.default_bun().unwrap().id, 2);
    }

    #[test]
    fn test_transition_is_pure() {
        let state = ComposerState::new(catalog());
        let operation = Operation::add(beef());

        let a = transition(state.clone(), operation.clone());
        let b = transition(state, operation);

        assert_eq!(a, b);
    }

    #[test]
    fn test_scenario_brioche_beef_cheddar() {
        let mut state = ComposerState::new(vec![brioche(), beef(), cheddar()]);
        assert_eq!(names(&state), ["Brioche Bun"]);

        state.add_ingredient(beef());
        assert_eq!(names(&state), ["Brioche Bun", "Beef Patty"]);

        state.add_ingredient(cheddar());
        assert_eq!(names(&state), ["Brioche Bun", "Beef Patty", "Cheddar"]);
        assert_eq!(calculate_price(state.burger()), Decimal::new(450, 2));

        state.reset_burger();
        assert_eq!(names(&state), ["Brioche Bun"]);
        assert_eq!(calculate_price(state.burger()), Decimal::ZERO);
    }
}
