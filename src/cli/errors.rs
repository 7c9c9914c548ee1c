//! CLI error types.

use thiserror::Error;

use crate::ingest::LoaderError;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Errors aborting a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Seed load failed at startup.
    #[error("seed load failed: {0}")]
    Seed(#[from] LoaderError),

    /// Runtime or server I/O failure.
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
