//! Viewer-request rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! CloudFrontRequest (uri, host header)
//!     → path.rs (shape checks: artifact tree? /latest/ segment?)
//!     → rewriter.rs (pass-through, or narrow → broad index lookup)
//!     → decision.rs (RewriteDecision → CloudFront request/response)
//! ```
//!
//! # Design Decisions
//! - Exactly one decision per request, returned by value
//! - No state survives between requests

pub mod decision;
pub mod path;
pub mod rewriter;

pub use decision::RewriteDecision;
pub use rewriter::{EdgeRewriter, IndexScope};
