//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, listener addresses and the origin authority parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: RewriterConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use axum::http::uri::Authority;

use thiserror::Error;

use crate::config::schema::RewriterConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("index.scheme must be \"http\" or \"https\", got \"{0}\"")]
    UnsupportedScheme(String),

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("{field} is not a valid socket address: \"{value}\"")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} is not a valid host:port authority: \"{value}\"")]
    InvalidAuthority { field: &'static str, value: String },

    #[error("index.authority_override must not be empty")]
    EmptyAuthority,
}

pub fn validate_config(config: &RewriterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !matches!(config.index.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::UnsupportedScheme(config.index.scheme.clone()));
    }
    if config.index.authority_override.as_deref().is_some_and(str::is_empty) {
        errors.push(ValidationError::EmptyAuthority);
    }

    if config.index.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "index.timeout_secs" });
    }
    if config.emulator.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "emulator.request_timeout_secs" });
    }

    // Listeners need an IP; the origin may be a hostname.
    let addresses = [
        ("emulator.bind_address", &config.emulator.bind_address),
        ("observability.metrics_address", &config.observability.metrics_address),
    ];
    for (field, value) in addresses {
        if value.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field,
                value: value.clone(),
            });
        }
    }

    if config.emulator.origin_address.parse::<Authority>().is_err() {
        errors.push(ValidationError::InvalidAuthority {
            field: "emulator.origin_address",
            value: config.emulator.origin_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
