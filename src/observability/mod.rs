//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! rewriter, fetcher, emulator
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → CloudWatch Logs (Lambda@Edge)
//!     → stdout + Prometheus scrape (emulator)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogTarget};
