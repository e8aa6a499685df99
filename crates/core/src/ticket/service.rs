//! Ticket business rules on top of a [`TicketStore`].

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::{status, Ticket, TicketError, TicketStore};
use crate::metrics::{
    record_store_error, TICKETS_CREATED_TOTAL, TICKETS_DELETED_TOTAL, TICKETS_UPDATED_TOTAL,
};

/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Longest accepted status token, in characters.
pub const MAX_STATUS_LEN: usize = 50;

/// Ticket service: applies creation defaults and delegates to the store.
pub struct TicketService {
    store: Arc<dyn TicketStore>,
    default_status: String,
}

impl TicketService {
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self {
            store,
            default_status: status::OPEN.to_string(),
        }
    }

    /// Status assigned to new tickets submitted without one.
    pub fn with_default_status(mut self, default_status: impl Into<String>) -> Self {
        self.default_status = default_status.into();
        self
    }

    pub fn default_status(&self) -> &str {
        &self.default_status
    }

    pub fn list_all(&self) -> Result<Vec<Ticket>, TicketError> {
        debug!("Listing all tickets");
        self.store
            .list_all()
            .inspect_err(|_| record_store_error("list"))
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Ticket>, TicketError> {
        debug!(ticket_id = id, "Fetching ticket");
        self.store.get(id).inspect_err(|_| record_store_error("get"))
    }

    /// Persist a ticket.
    ///
    /// A ticket with `id == 0` is new: `created_at` is set to now and an empty
    /// status becomes the default status. Any other ticket is persisted as
    /// given, updating the stored record if one exists and inserting it under
    /// its own id otherwise.
    pub fn save(&self, mut ticket: Ticket) -> Result<Ticket, TicketError> {
        if ticket.title.trim().is_empty() {
            return Err(TicketError::Validation(
                "titulo must not be empty".to_string(),
            ));
        }
        if ticket.title.chars().count() > MAX_TITLE_LEN {
            return Err(TicketError::Validation(format!(
                "titulo must be at most {} characters",
                MAX_TITLE_LEN
            )));
        }

        let is_new = ticket.is_new();
        if is_new {
            ticket.created_at = Utc::now();
            if ticket.status.trim().is_empty() {
                ticket.status = self.default_status.clone();
            }
        }

        if ticket.status.trim().is_empty() {
            return Err(TicketError::Validation(
                "estado must not be empty".to_string(),
            ));
        }
        if ticket.status.chars().count() > MAX_STATUS_LEN {
            return Err(TicketError::Validation(format!(
                "estado must be at most {} characters",
                MAX_STATUS_LEN
            )));
        }

        let exists = !is_new && self.get_by_id(ticket.id)?.is_some();

        if exists {
            let updated = self
                .store
                .update(ticket)
                .inspect_err(|_| record_store_error("update"))?;
            TICKETS_UPDATED_TOTAL.inc();
            info!(ticket_id = updated.id, status = %updated.status, "Ticket updated");
            Ok(updated)
        } else {
            let created = self
                .store
                .insert(ticket)
                .inspect_err(|_| record_store_error("insert"))?;
            TICKETS_CREATED_TOTAL.inc();
            info!(
                ticket_id = created.id,
                customer_id = created.customer_id,
                status = %created.status,
                "Ticket created"
            );
            Ok(created)
        }
    }

    /// Delete a ticket. Missing ids are ignored; returns whether a ticket
    /// was removed.
    pub fn delete(&self, id: i64) -> Result<bool, TicketError> {
        let removed = self
            .store
            .delete(id)
            .inspect_err(|_| record_store_error("delete"))?;
        if removed {
            TICKETS_DELETED_TOTAL.inc();
            info!(ticket_id = id, "Ticket deleted");
        } else {
            debug!(ticket_id = id, "Delete of missing ticket ignored");
        }
        Ok(removed)
    }

    pub fn list_by_customer(&self, customer_id: i64) -> Result<Vec<Ticket>, TicketError> {
        debug!(customer_id, "Listing tickets by customer");
        self.store
            .find_by_customer_id(customer_id)
            .inspect_err(|_| record_store_error("list"))
    }

    /// Tickets with exactly this status. Callers normalize the token first.
    pub fn list_by_status(&self, status: &str) -> Result<Vec<Ticket>, TicketError> {
        debug!(status, "Listing tickets by status");
        self.store
            .find_by_status(status)
            .inspect_err(|_| record_store_error("list"))
    }

    /// Ticket counts per status, without loading the tickets.
    pub fn count_by_status(&self) -> Result<Vec<(String, i64)>, TicketError> {
        self.store
            .count_by_status()
            .inspect_err(|_| record_store_error("count"))
    }
}
