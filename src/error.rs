//! Application-level error types.
//!
//! The engine reports through [`crate::collector::Error`]; this module adds
//! the errors that only the command line front end can raise.

use thiserror::Error;

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for the release_collector binary
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Release engine errors
    #[error("{0}")]
    Collector(#[from] crate::collector::Error),

    /// Generic errors from anyhow
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}
