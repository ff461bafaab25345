//! Error type for CLI commands.

use std::path::PathBuf;

use thiserror::Error;
use trackline_core::normalize::NormalizeError;
use trackline_core::timeline::StepTableError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The order payload could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Input path (`-` for stdin).
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The order payload could not be normalized.
    #[error("Invalid order payload: {0}")]
    Normalize(#[from] NormalizeError),

    /// The canonical step table failed validation.
    #[error("Invalid step table: {0}")]
    Steps(#[from] StepTableError),

    /// JSON output could not be produced.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

/// Result type alias for `CliError`.
pub type Result<T> = std::result::Result<T, CliError>;
