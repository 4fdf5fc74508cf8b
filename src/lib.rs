//! CloudFront viewer-request URL rewriter for CI build artifacts.
//!
//! Requests under `/ci/dbc/` are served from the artifact bucket with the
//! routing prefix stripped; `/latest/` paths redirect to the build named by the
//! published index documents; everything else is a 404.

pub mod config;
pub mod edge;
pub mod fetch;
pub mod http;
pub mod observability;
pub mod rewrite;

pub use config::RewriterConfig;
pub use edge::{handle_event, read_event, CloudFrontRequest, CloudFrontRequestEvent, EdgeResult};
pub use fetch::{HttpsJsonFetcher, IndexFetcher};
pub use http::EdgeServer;
pub use rewrite::{EdgeRewriter, RewriteDecision};
