//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ReceiverConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ReceiverConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Listener bind address does not parse as a socket address.
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    /// Metrics bind address does not parse as a socket address.
    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),

    /// Request timeout must be greater than zero.
    #[error("request timeout must be nonzero")]
    ZeroRequestTimeout,

    /// Log level is not one of trace/debug/info/warn/error.
    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ReceiverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config
        .observability
        .log_level
        .parse::<tracing::Level>()
        .is_err()
    {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    // The metrics address only matters when the exporter is enabled.
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
