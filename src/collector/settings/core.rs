//! Core Config struct and implementations.

use super::{CompressionLevel, SelfContainedMode};
use crate::collector::Result;

/// Default runtime identifiers to publish for.
pub const DEFAULT_PLATFORMS: &[&str] = &["linux-x64", "linux-arm", "linux-arm64", "win-x64", "win-arm64"];

/// Default extensions stripped from publish output.
pub const DEFAULT_IGNORED_EXTENSIONS: &[&str] = &["pdb", "json", "config"];

/// Release configuration.
///
/// Read-only to the collector; constructed via [`ConfigBuilder`].
///
/// # Examples
///
/// ```
/// use release_collector::collector::{ConfigBuilder, SelfContainedMode};
///
/// # fn example() -> release_collector::collector::Result<()> {
/// let config = ConfigBuilder::new()
///     .platforms(["linux-x64", "win-x64"])
///     .ignored_extensions(["pdb"])
///     .self_contained(SelfContainedMode::Disabled)
///     .build()?;
/// assert_eq!(config.ignored_patterns(), ["*.pdb"]);
/// # Ok(())
/// # }
/// ```
///
/// [`ConfigBuilder`]: super::ConfigBuilder
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Runtime identifiers, in publish order.
    platforms: Vec<String>,

    /// Glob patterns matched against top-level output file names.
    ignored_patterns: Vec<String>,

    self_contained: SelfContainedMode,

    /// Nest archive entries under a folder named after the output directory.
    archive_subfolder: bool,

    compression: CompressionLevel,
}

impl Config {
    /// Returns the runtime identifiers.
    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    /// Returns the ignored-file glob patterns.
    pub fn ignored_patterns(&self) -> &[String] {
        &self.ignored_patterns
    }

    /// Returns the self-contained mode.
    pub fn self_contained(&self) -> SelfContainedMode {
        self.self_contained
    }

    /// Returns whether archives nest their entries in a subfolder.
    pub fn archive_subfolder(&self) -> bool {
        self.archive_subfolder
    }

    /// Returns the archive compression level.
    pub fn compression(&self) -> CompressionLevel {
        self.compression
    }

    /// Creates a new Config instance (used by ConfigBuilder).
    pub(super) fn new(
        platforms: Vec<String>,
        ignored_patterns: Vec<String>,
        self_contained: SelfContainedMode,
        archive_subfolder: bool,
        compression: CompressionLevel,
    ) -> Self {
        Self {
            platforms,
            ignored_patterns,
            self_contained,
            archive_subfolder,
            compression,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platforms: DEFAULT_PLATFORMS.iter().map(|s| s.to_string()).collect(),
            ignored_patterns: DEFAULT_IGNORED_EXTENSIONS
                .iter()
                .map(|s| super::extension_pattern(s))
                .collect(),
            self_contained: SelfContainedMode::default(),
            archive_subfolder: false,
            compression: CompressionLevel::default(),
        }
    }
}

/// Supplies the configuration for a run.
pub trait ConfigProvider {
    /// Returns the configuration to publish with.
    fn config(&self) -> Result<Config>;
}

impl ConfigProvider for Config {
    fn config(&self) -> Result<Config> {
        Ok(self.clone())
    }
}
