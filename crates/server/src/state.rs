use std::sync::Arc;
use edutech_core::{Config, TicketService, TicketStore};

use crate::api::links::LinkBuilder;

/// Shared application state
pub struct AppState {
    config: Config,
    service: TicketService,
    links: LinkBuilder,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn TicketStore>) -> Self {
        let service =
            TicketService::new(store).with_default_status(config.tickets.default_status.clone());
        let links = LinkBuilder::new(config.api.base_url.clone());
        Self {
            config,
            service,
            links,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &TicketService {
        &self.service
    }

    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    /// Whether responses carry `_links`.
    pub fn hypermedia(&self) -> bool {
        self.config.api.hypermedia
    }
}
