//! Local edge emulator subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → request.rs (HTTP request → CloudFront request record)
//!     → EdgeRewriter (same code path as Lambda@Edge)
//!     → response.rs (synthesized response → HTTP)
//!       or origin fetch with the rewritten path
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{EdgeServer, EmulatorError};
