//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files. Every
//! section has defaults that reproduce the production edge behavior, so an
//! empty file is a valid config.

use serde::{Deserialize, Serialize};

/// Root configuration for the rewriter and its local emulator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RewriterConfig {
    /// Index document lookups.
    pub index: IndexConfig,

    /// Local edge emulator.
    pub emulator: EmulatorConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// How index documents are fetched.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexConfig {
    /// URL scheme for index lookups ("https" or "http").
    pub scheme: String,

    /// Fixed host:port for index lookups instead of the viewer's Host header.
    pub authority_override: Option<String>,

    /// Total time allowed per index request, in seconds.
    pub timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            authority_override: None,
            timeout_secs: 5,
        }
    }
}

/// Local edge emulator settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmulatorConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Origin that pass-through requests are forwarded to.
    pub origin_address: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            origin_address: "127.0.0.1:9000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log filter when RUST_LOG is unset.
    pub log_level: String,

    /// Enable the Prometheus endpoint (emulator only).
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "cf_url_rewriter=info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
