//! Testing utilities and mock implementations.
//!
//! This module provides an in-memory [`TicketStore`](crate::TicketStore)
//! with failure injection, so service and HTTP tests can exercise storage
//! error paths without a real database.
//!
//! # Example
//!
//! ```rust,ignore
//! use edutech_core::testing::{fixtures, MockTicketStore};
//!
//! let store = MockTicketStore::new();
//! store.seed(fixtures::ticket(1, "Problema con la plataforma", 100));
//!
//! // Make every following call fail with a database error
//! store.set_fail(true);
//! ```

mod mock_ticket_store;

pub use mock_ticket_store::MockTicketStore;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{TimeZone, Utc};

    use crate::ticket::{status, Ticket};

    /// A persisted-looking open ticket with a fixed creation time.
    pub fn ticket(id: i64, title: &str, customer_id: i64) -> Ticket {
        Ticket {
            id,
            title: title.to_string(),
            description: Some(format!("Detalle: {}", title)),
            status: status::OPEN.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
            customer_id,
        }
    }

    /// Same as [`ticket`] with a specific status.
    pub fn ticket_with_status(id: i64, title: &str, customer_id: i64, status: &str) -> Ticket {
        Ticket {
            status: status.to_string(),
            ..ticket(id, title, customer_id)
        }
    }
}
