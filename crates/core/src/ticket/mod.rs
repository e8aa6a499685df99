//! Support tickets: data type, storage and business rules.

mod service;
mod sqlite_store;
mod store;
mod types;

pub use service::{TicketService, MAX_STATUS_LEN, MAX_TITLE_LEN};
pub use sqlite_store::SqliteTicketStore;
pub use store::{TicketError, TicketStore};
pub use types::{status, Ticket};
