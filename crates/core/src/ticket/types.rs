//! Core ticket data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recognized lifecycle status tokens.
///
/// The status set is open-ended: any uppercase token is accepted and stored
/// verbatim. These are the values the support team works with.
pub mod status {
    /// Ticket is waiting for an agent. Default for new tickets.
    pub const OPEN: &str = "ABIERTA";
    /// An agent is working on the ticket.
    pub const IN_PROGRESS: &str = "EN_PROCESO";
    /// Ticket is resolved.
    pub const CLOSED: &str = "CERRADA";

    /// Canonical stored form of a client-supplied status token.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_uppercase()
    }
}

/// A customer support ticket.
///
/// Field names on the wire follow the support API contract
/// (`titulo`, `descripcion`, `estado`, `fechacreacion`, `clienteid`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Store-assigned identifier. `0` means the ticket has not been persisted.
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "estado")]
    pub status: String,
    /// Set once when the ticket is first saved; never overwritten afterwards.
    #[serde(rename = "fechacreacion")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "clienteid")]
    pub customer_id: i64,
}

impl Ticket {
    /// Create an unsaved ticket. Status is left empty so the service applies
    /// its default on save.
    pub fn new(title: impl Into<String>, customer_id: i64) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: None,
            status: String::new(),
            created_at: Utc::now(),
            customer_id,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Whether the ticket has never been persisted.
    ///
    /// Detected solely by `id == 0`, so a client-supplied id of zero is
    /// treated as a new ticket.
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}
