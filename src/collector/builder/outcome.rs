//! Results of a release run.

use super::step::Target;
use crate::collector::version::ReleaseFolder;
use std::path::PathBuf;

/// A file written to the release folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasedArtifact {
    /// Path of the renamed file or archive
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256
    pub checksum: String,
}

/// Result of publishing one target.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Target that was published
    pub target: Target,
    /// Artifact name without extension
    pub output_name: String,
    /// Artifact, when the target succeeded
    pub artifact: Option<ReleasedArtifact>,
    /// Error detail, when the target failed
    pub error: Option<String>,
}

impl StepOutcome {
    /// Whether the target produced an artifact.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct ReleaseSummary {
    /// Folder the release was written to
    pub folder: ReleaseFolder,
    /// Absolute release directory
    pub release_dir: PathBuf,
    /// One entry per target, in publish order
    pub outcomes: Vec<StepOutcome>,
}

impl ReleaseSummary {
    /// Number of targets that produced an artifact.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of targets that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Whether every target succeeded.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Artifacts in publish order.
    pub fn artifacts(&self) -> impl Iterator<Item = &ReleasedArtifact> {
        self.outcomes.iter().filter_map(|o| o.artifact.as_ref())
    }
}
