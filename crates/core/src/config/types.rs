use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::ticket::status;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub tickets: TicketsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout applied at the transport boundary.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("edutech.db")
}

/// HTTP representation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Attach HAL-style `_links` to responses. When off, tickets are
    /// returned as bare JSON objects and collections as bare arrays.
    #[serde(default = "default_hypermedia")]
    pub hypermedia: bool,
    /// Absolute origin prefixed to every link (e.g. "http://localhost:8080").
    /// Links are relative paths when unset.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            hypermedia: default_hypermedia(),
            base_url: None,
        }
    }
}

fn default_hypermedia() -> bool {
    true
}

/// Ticket business rules
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TicketsConfig {
    /// Status assigned to new tickets submitted without one.
    #[serde(default = "default_status")]
    pub default_status: String,
}

impl Default for TicketsConfig {
    fn default() -> Self {
        Self {
            default_status: default_status(),
        }
    }
}

fn default_status() -> String {
    status::OPEN.to_string()
}
