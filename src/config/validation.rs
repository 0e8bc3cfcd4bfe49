//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Check addresses parse before the listener tries to bind
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("backend.host must not be empty")]
    EmptyBackendHost,

    #[error("backend.port must not be 0")]
    InvalidBackendPort,

    #[error("timeouts.backend_request_ms must be greater than 0")]
    ZeroBackendTimeout,

    #[error("timeouts.request_secs must be greater than 0")]
    ZeroRequestTimeout,

    #[error("observability.log_level `{0}` is not one of trace/debug/info/warn/error")]
    InvalidLogLevel(String),
}

/// Check a deserialized configuration for semantic problems.
///
/// Collects every error rather than stopping at the first, so an
/// operator can fix a broken config file in one pass.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.backend.host.is_empty() {
        errors.push(ValidationError::EmptyBackendHost);
    }
    if config.backend.port == 0 {
        errors.push(ValidationError::InvalidBackendPort);
    }

    if config.timeouts.backend_request_ms == 0 {
        errors.push(ValidationError::ZeroBackendTimeout);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.backend.host = String::new();
        config.backend.port = 0;
        config.timeouts.backend_request_ms = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::EmptyBackendHost));
        assert!(errors.contains(&ValidationError::InvalidBackendPort));
        assert!(errors.contains(&ValidationError::ZeroBackendTimeout));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut config = GatewayConfig::default();
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidLogLevel("loud".into())]);
    }
}
