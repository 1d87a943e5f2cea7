//! Errors that stop a command before any expression is evaluated.

use std::path::PathBuf;

use vexpr_config::ConfigError;

/// A failure of the CLI itself, as opposed to an invalid expression.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The configuration file could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An input file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Results could not be serialized.
    #[error("cannot write JSON output: {0}")]
    Json(#[from] serde_json::Error),
}
