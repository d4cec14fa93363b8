//! Stack Composer
//!
//! Turns a set of selected ingredients into an ordered, sized burger stack and
//! keeps the burger in progress consistent while the user edits it.
//!
//! ## Pieces
//!
//! - [`state`]: the selection state machine. A closed [`Operation`] enum and a
//!   pure [`transition`] function.
//! - [`layout`]: bottom bun, fillings, top bun. Produces a [`RenderPlan`].
//! - [`aggregate`]: counting, grouping, pricing and name finalization.
//! - [`ticket`]: guards state against catalog or save responses that arrive
//!   after the burger was reset.
//!
//! The bun is a singleton slot on [`Burger`]. The top bun is never stored; the
//! layout derives it from the bun selection.

pub mod aggregate;
pub mod layout;
pub mod selection;
pub mod state;
pub mod ticket;

#[cfg(test)]
mod fixtures;

pub use aggregate::{
    calculate_price, count_ingredients, finalize_name, format_price, group_by_category,
    price_of, IngredientCount,
};
pub use layout::{compose, Layer, LayerRole, RenderOptions, RenderPlan, Rounding, Size, ViewMode};
pub use selection::{Burger, SelectedIngredient, SelectionId};
pub use state::{transition, ComposerState, Operation};
pub use ticket::{Delivery, Ticket};
