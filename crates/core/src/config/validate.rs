use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port and request timeout are not 0
/// - Default ticket status is a non-empty uppercase token
/// - API base URL (if set) is an http(s) origin without a trailing slash
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.server.request_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "server.request_timeout_secs cannot be 0".to_string(),
        ));
    }

    // Ticket rules
    let default_status = &config.tickets.default_status;
    if default_status.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "tickets.default_status cannot be empty".to_string(),
        ));
    }
    if *default_status != default_status.trim().to_uppercase() {
        return Err(ConfigError::ValidationError(format!(
            "tickets.default_status must be uppercase without surrounding whitespace, got {:?}",
            default_status
        )));
    }

    // API links
    if let Some(ref base_url) = config.api.base_url {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "api.base_url must start with http:// or https://, got {:?}",
                base_url
            )));
        }
        if base_url.ends_with('/') {
            return Err(ConfigError::ValidationError(
                "api.base_url must not end with '/'".to_string(),
            ));
        }
    }

    Ok(())
}
