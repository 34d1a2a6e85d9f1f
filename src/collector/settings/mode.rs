//! Self-contained and compression modes.

use serde::Deserialize;
use std::fmt;

/// Whether self-contained builds are produced next to framework-dependent ones.
///
/// Trimmed builds are much smaller but can break reflection-heavy code and
/// take considerably longer to publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelfContainedMode {
    /// Framework-dependent builds only
    Disabled,
    /// Also publish self-contained builds
    #[default]
    Enabled,
    /// Also publish trimmed self-contained builds
    EnabledTrimmed,
}

/// ZIP compression level for multi-file outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompressionLevel {
    /// Store entries without compression
    NoCompression,
    /// Deflate, favouring speed
    #[default]
    Fastest,
    /// Deflate with the default level
    Optimal,
    /// Deflate, favouring size
    SmallestSize,
}

impl CompressionLevel {
    /// Compression method and level handed to the ZIP writer.
    pub fn zip_options(self) -> (zip::CompressionMethod, Option<i64>) {
        match self {
            CompressionLevel::NoCompression => (zip::CompressionMethod::Stored, None),
            CompressionLevel::Fastest => (zip::CompressionMethod::Deflated, Some(1)),
            CompressionLevel::Optimal => (zip::CompressionMethod::Deflated, None),
            CompressionLevel::SmallestSize => (zip::CompressionMethod::Deflated, Some(9)),
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompressionLevel::NoCompression => "no-compression",
            CompressionLevel::Fastest => "fastest",
            CompressionLevel::Optimal => "optimal",
            CompressionLevel::SmallestSize => "smallest-size",
        };
        f.write_str(s)
    }
}
