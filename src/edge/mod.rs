//! Lambda@Edge integration.
//!
//! # Data Flow
//! ```text
//! Lambda runtime (viewer-request trigger)
//!     → event.rs (deserialize CloudFrontRequestEvent)
//!     → handler.rs (first record → EdgeRewriter)
//!     → EdgeResult (request to continue, or synthesized response)
//! ```

pub mod event;
pub mod handler;

pub use event::{CloudFrontRequest, CloudFrontRequestEvent, CloudFrontResponse, EdgeResult};
pub use handler::{handle_event, read_event, EventFileError};
