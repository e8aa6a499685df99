pub mod config;
pub mod metrics;
pub mod testing;
pub mod ticket;

pub use config::{
    load_config, load_config_from_str, validate_config, ApiConfig, Config, ConfigError,
    DatabaseConfig, ServerConfig, TicketsConfig,
};
pub use ticket::{
    status, SqliteTicketStore, Ticket, TicketError, TicketService, TicketStore,
};
