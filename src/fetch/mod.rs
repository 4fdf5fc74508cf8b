//! Index lookup subsystem.
//!
//! # Data Flow
//! ```text
//! index URL (scheme + viewer host + index path)
//!     → https.rs (GET, read whole body, parse JSON)
//!     → index.rs (extract usable `latest`)
//!     → rewriter decides redirect or fallback
//! ```
//!
//! # Design Decisions
//! - Fetched fresh per request, never cached
//! - No retries; the narrow→broad fallback is the only second attempt
//! - Non-2xx bodies are still parsed; only parse success matters

pub mod error;
pub mod https;
pub mod index;

use async_trait::async_trait;
use serde_json::Value;

pub use error::{FetchError, FetchResult};
pub use https::HttpsJsonFetcher;
pub use index::VersionIndex;

/// Fetches a JSON document by absolute URL.
#[async_trait]
pub trait IndexFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> FetchResult<Value>;
}
