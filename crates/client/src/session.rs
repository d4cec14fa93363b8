//! Builder session
//!
//! Owns one [`ComposerState`] and runs the catalog load and the save against
//! the API. Request failures become [`Notice`]s; they never reach the caller
//! as errors. Every request takes a ticket when it is sent, so a response that
//! arrives after a reset is dropped.

use anyhow::Result;
use burgerfy_common::{Ingredient, PersistedBurger, PublicUser};
use burgerfy_composer::{
    calculate_price, format_price, ComposerState, Delivery, RenderOptions, RenderPlan, SelectionId,
    Ticket,
};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::api_client::{ApiClient, Registration};
use crate::notice::{Notice, NoticeKind};

pub struct BuilderSession {
    client: ApiClient,
    state: ComposerState,
    user: Option<PublicUser>,
    notices: Vec<Notice>,
}

impl BuilderSession {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: ComposerState::default(),
            user: None,
            notices: Vec::new(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn state(&self) -> &ComposerState {
        &self.state
    }

    pub fn user(&self) -> Option<&PublicUser> {
        self.user.as_ref()
    }

    /// Notices not yet shown
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.state.add_ingredient(ingredient);
    }

    pub fn remove_ingredient(&mut self, selection_id: SelectionId) {
        self.state.remove_ingredient(selection_id);
    }

    /// Start over. Responses to requests sent before this are ignored.
    pub fn reset_burger(&mut self) {
        self.state.reset_burger();
    }

    pub fn set_burger_name(&mut self, name: impl Into<String>) {
        self.state.set_burger_name(name);
    }

    pub fn price(&self) -> Decimal {
        calculate_price(self.state.burger())
    }

    pub fn formatted_price(&self) -> String {
        format_price(self.price())
    }

    pub fn render(&self, options: RenderOptions) -> RenderPlan {
        self.state.burger().render(options)
    }

    /// Fetch the catalog. On failure a retryable notice is queued and the
    /// current catalog, empty before the first successful load, is kept.
    pub async fn load_catalog(&mut self) -> Delivery {
        let ticket = self.state.ticket();
        let result = self.client.load_catalog().await;
        self.finish_catalog_load(ticket, result)
    }

    /// Apply the outcome of a catalog request sent under `ticket`
    pub fn finish_catalog_load(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Ingredient>>,
    ) -> Delivery {
        let catalog = match result {
            Ok(catalog) => {
                info!("Loaded catalog with {} ingredients", catalog.len());
                catalog
            }
            Err(e) => {
                warn!("Failed to load catalog: {:#}", e);
                if self.state.is_current(ticket) {
                    self.notices
                        .push(Notice::from_error(NoticeKind::CatalogUnavailable, &e));
                }
                // A failed retry keeps whatever an earlier load delivered
                self.state.catalog().to_vec()
            }
        };

        self.state.deliver_catalog(ticket, catalog)
    }

    /// Save the current burger once. On failure the burger stays as it is
    /// and a notice is queued.
    pub async fn save(&mut self) -> Option<PersistedBurger> {
        let ticket = self.state.ticket();
        let burger = self.state.burger().to_new_burger();
        let result = self.client.save_burger(&burger).await;
        self.finish_save(ticket, result)
    }

    /// Apply the outcome of a save sent under `ticket`
    pub fn finish_save(
        &mut self,
        ticket: Ticket,
        result: Result<PersistedBurger>,
    ) -> Option<PersistedBurger> {
        match result {
            Ok(saved) => match self.state.deliver_saved(ticket, saved.clone()) {
                Delivery::Applied => {
                    info!("Saved burger {} as '{}'", saved.id, saved.name);
                    Some(saved)
                }
                Delivery::Stale => None,
            },
            Err(e) => {
                warn!("Failed to save burger: {:#}", e);
                if self.state.is_current(ticket) {
                    self.notices.push(Notice::from_error(NoticeKind::SaveFailed, &e));
                }
                None
            }
        }
    }

    /// Restore the logged-in user, if the server still knows the session
    pub async fn restore_user(&mut self) -> Option<&PublicUser> {
        match self.client.load_user().await {
            Ok(user) => self.user = user,
            Err(e) => {
                // Treated like being logged out
                warn!("Failed to load user: {:#}", e);
                self.user = None;
            }
        }
        self.user.as_ref()
    }

    pub async fn register(&mut self, registration: &Registration) -> bool {
        let result = self.client.register(registration).await;
        self.finish_auth(result)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        let result = self.client.login(email, password).await;
        self.finish_auth(result)
    }

    pub async fn logout(&mut self) {
        if let Err(e) = self.client.logout().await {
            warn!("Logout request failed: {:#}", e);
        }
        self.user = None;
    }

    /// Burgers saved by the logged-in user; empty when logged out
    pub async fn my_burgers(&self) -> Vec<PersistedBurger> {
        if self.user.is_none() {
            return Vec::new();
        }

        match self.client.my_burgers().await {
            Ok(burgers) => burgers,
            Err(e) => {
                warn!("Failed to load saved burgers: {:#}", e);
                Vec::new()
            }
        }
    }

    fn finish_auth(&mut self, result: Result<PublicUser>) -> bool {
        match result {
            Ok(user) => {
                info!("Logged in as {}", user.email);
                self.user = Some(user);
                true
            }
            Err(e) => {
                self.notices.push(Notice::from_error(NoticeKind::AuthFailed, &e));
                false
            }
        }
    }
}
