//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - RUST_LOG wins over the configured filter
//! - Lambda output drops timestamps and colors; CloudWatch stamps each line

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Lambda@Edge, shipped to CloudWatch Logs.
    CloudWatch,
    /// A terminal (CLI, emulator).
    Terminal,
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(default_filter: &str, target: LogTarget) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let fmt = tracing_subscriber::fmt::layer().with_target(false);
    let result = match target {
        LogTarget::CloudWatch => tracing_subscriber::registry()
            .with(filter)
            .with(fmt.without_time().with_ansi(false))
            .try_init(),
        LogTarget::Terminal => tracing_subscriber::registry()
            .with(filter)
            .with(fmt)
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}
