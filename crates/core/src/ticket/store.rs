//! Ticket storage trait and error type.

use thiserror::Error;

use crate::ticket::Ticket;

/// Error type for ticket operations.
#[derive(Debug, Error)]
pub enum TicketError {
    /// Ticket not found.
    #[error("Ticket not found: {0}")]
    NotFound(i64),
    /// Ticket failed validation before reaching the store.
    #[error("Invalid ticket: {0}")]
    Validation(String),
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for TicketError {
    fn from(err: rusqlite::Error) -> Self {
        TicketError::Database(err.to_string())
    }
}

/// Trait for ticket storage backends.
///
/// Every method is a single atomic operation against the backend; there is
/// no cross-call transaction. Callers that need read-then-act semantics
/// (e.g. "update only if it exists") check with [`TicketStore::get`] first.
pub trait TicketStore: Send + Sync {
    /// Persist a ticket. An `id` of 0 gets a fresh store-assigned id; a
    /// nonzero id is stored as given.
    fn insert(&self, ticket: Ticket) -> Result<Ticket, TicketError>;

    /// Get a ticket by ID.
    fn get(&self, id: i64) -> Result<Option<Ticket>, TicketError>;

    /// All tickets, ordered by id.
    fn list_all(&self) -> Result<Vec<Ticket>, TicketError>;

    /// Replace title, description, status and customer of an existing ticket.
    ///
    /// `created_at` is never written. If no ticket has this id the call is a
    /// no-op and the given ticket is returned unchanged.
    fn update(&self, ticket: Ticket) -> Result<Ticket, TicketError>;

    /// Delete a ticket. Returns whether a record was removed; deleting a
    /// missing id is a no-op returning `false`.
    fn delete(&self, id: i64) -> Result<bool, TicketError>;

    /// Tickets owned by a customer.
    fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Ticket>, TicketError>;

    /// Tickets whose status equals `status` exactly (case-sensitive).
    fn find_by_status(&self, status: &str) -> Result<Vec<Ticket>, TicketError>;

    /// Number of tickets per stored status, ordered by status.
    fn count_by_status(&self) -> Result<Vec<(String, i64)>, TicketError>;
}
