//! Error types for release collection.
//!
//! The first group of variants is the release taxonomy: configuration and
//! precondition failures stop a run, build-tool and packaging failures only
//! stop the target that raised them. The remaining variants carry the
//! underlying IO, archive and pattern errors.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for collector operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while collecting a release
#[derive(Error, Debug)]
pub enum Error {
    /// Unsupported or missing project definition, or invalid configuration
    #[error("{0}")]
    Configuration(String),

    /// The release folder is not in a state we can publish into
    #[error("{0}")]
    Precondition(String),

    /// The build tool reported a failure
    #[error("{0}")]
    BuildTool(String),

    /// Nothing usable was left in the publish output
    #[error("{0}")]
    Packaging(String),

    /// The run was cancelled before all targets were processed
    #[error("Release cancelled after {completed} of {total} targets")]
    Cancelled {
        /// Targets processed before cancellation
        completed: usize,
        /// Targets planned for the run
        total: usize,
    },

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// IO errors with the operation and path that failed
    #[error("Failed {context} ({}): {source}", path.display())]
    Fs {
        /// What was being done
        context: String,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Archive creation errors
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Invalid ignored-extension pattern
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Directory traversal errors
    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// External command could not be started or awaited
    #[error("Failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command that failed
        command: String,
        /// Underlying error
        error: std::io::Error,
    },

    /// Anything else
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Whether this error aborts the whole run rather than a single target.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_) | Error::Precondition(_) | Error::Cancelled { .. }
        )
    }
}

/// Extension for attaching filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wraps an IO error with the operation being performed and its path.
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::collector::Error::GenericError(format!($($arg)*)))
    };
}
