//! Parsing and validation of `vexpr.toml` configuration files.
//!
//! The file tunes the evaluator's resource guards and the CLI's default
//! output format. Every section and key is optional.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, load_config_or_default, CONFIG_FILE_NAME};
pub use types::*;
