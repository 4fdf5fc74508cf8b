//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), or defaults
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RewriterConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Defaults match the deployed edge function. Lambda@Edge has no env vars
//!   and no bundled files, so the Lambda entry runs on defaults alone; files
//!   are for the CLI and the emulator
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{EmulatorConfig, IndexConfig, ObservabilityConfig, RewriterConfig};
pub use validation::ValidationError;
