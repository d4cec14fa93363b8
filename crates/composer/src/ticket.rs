//! Late responses
//!
//! A catalog load or a save can still be in flight when the user resets the
//! burger. Each request takes a [`Ticket`] when it is sent; the response is
//! only applied if no reset happened in between.

use burgerfy_common::{Ingredient, PersistedBurger};
use tracing::debug;

use crate::state::{ComposerState, Operation};

/// Snapshot of the state's reset counter at request time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
}

/// What happened to a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Applied,

    /// A reset happened after the request was sent; the response was dropped
    Stale,
}

impl ComposerState {
    /// Ticket for a request about to be sent
    pub fn ticket(&self) -> Ticket {
        Ticket { epoch: self.epoch }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.epoch == self.epoch
    }

    /// Install a loaded catalog. A burger nobody has touched yet gets the
    /// default bun of the new catalog.
    pub fn deliver_catalog(&mut self, ticket: Ticket, catalog: Vec<Ingredient>) -> Delivery {
        if !self.is_current(ticket) {
            debug!("Dropping stale catalog response ({} entries)", catalog.len());
            return Delivery::Stale;
        }

        self.apply(Operation::SetCatalog(catalog));
        self.seat_default_bun();

        Delivery::Applied
    }

    /// Record a saved burger
    pub fn deliver_saved(&mut self, ticket: Ticket, burger: PersistedBurger) -> Delivery {
        if !self.is_current(ticket) {
            debug!("Dropping stale save response for burger {}", burger.id);
            return Delivery::Stale;
        }

        self.apply(Operation::Saved(burger));

        Delivery::Applied
    }
}
