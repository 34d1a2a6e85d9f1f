//! Release folder resolution.
//!
//! Releases land in `bin/<folder>` below the project directory. The folder is
//! the highest `v<major>.<minor>...` directory that already exists, or the
//! shared [`LATEST_FOLDER`] when there is none.

use crate::collector::{Result, error::ErrorExt};
use std::fmt;
use std::path::Path;

/// Folder used when no version folder exists yet.
pub const LATEST_FOLDER: &str = "latest";

/// Dot-separated numeric version parsed from a folder name.
///
/// Ordering compares components left to right; when one version is a prefix
/// of the other, the longer one is later (`1.0 < 1.0.1`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseVersion(Vec<u16>);

impl ReleaseVersion {
    /// Parses a folder name such as `v1.2.3`.
    ///
    /// Returns `None` for anything that is not a `v` followed by one or more
    /// dot-separated integers in `0..=65535`.
    pub fn parse_folder_name(name: &str) -> Option<Self> {
        let rest = name.strip_prefix('v')?;
        rest.split('.')
            .map(|part| part.parse::<u16>().ok())
            .collect::<Option<Vec<_>>>()
            .map(ReleaseVersion)
    }

    /// Numeric components.
    pub fn components(&self) -> &[u16] {
        &self.0
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u16::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Destination folder name for the next release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseFolder {
    /// An existing `v...` folder
    Version {
        /// Folder name as found on disk
        name: String,
        /// Parsed version
        version: ReleaseVersion,
    },
    /// No version folder exists
    Latest,
}

impl ReleaseFolder {
    /// Folder name below the build root.
    pub fn name(&self) -> &str {
        match self {
            ReleaseFolder::Version { name, .. } => name,
            ReleaseFolder::Latest => LATEST_FOLDER,
        }
    }

    /// Whether this is the shared fallback folder.
    pub fn is_latest(&self) -> bool {
        matches!(self, ReleaseFolder::Latest)
    }

    /// Suffix for artifact names: `-v1.2` for version folders, empty otherwise.
    pub fn version_suffix(&self) -> String {
        match self {
            ReleaseFolder::Version { name, .. } => format!("-{}", name),
            ReleaseFolder::Latest => String::new(),
        }
    }
}

/// Picks the highest version from a set of folder names.
///
/// Names are visited in sorted order so ties between equal versions
/// (`v1.0` and `v01.0`) always resolve to the same folder.
pub fn select_release_folder<I, S>(names: I) -> ReleaseFolder
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names: Vec<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
    names.sort();

    let mut best: Option<(String, ReleaseVersion)> = None;
    for name in names {
        let Some(version) = ReleaseVersion::parse_folder_name(&name) else {
            log::debug!("Ignoring non-version folder: {}", name);
            continue;
        };
        let later = match &best {
            Some((_, current)) => version > *current,
            None => true,
        };
        if later {
            best = Some((name, version));
        }
    }

    match best {
        Some((name, version)) => ReleaseFolder::Version { name, version },
        None => ReleaseFolder::Latest,
    }
}

/// Scans the immediate subdirectories of `build_root` for version folders.
///
/// A missing build root resolves to [`ReleaseFolder::Latest`].
pub async fn resolve_release_folder(build_root: &Path) -> Result<ReleaseFolder> {
    if !tokio::fs::try_exists(build_root)
        .await
        .fs_context("checking build root", build_root)?
    {
        log::debug!("Build root {} does not exist yet", build_root.display());
        return Ok(ReleaseFolder::Latest);
    }

    let mut entries = tokio::fs::read_dir(build_root)
        .await
        .fs_context("reading build root", build_root)?;

    let mut names = Vec::new();
    let mut has_latest = false;
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading build root", build_root)?
    {
        let file_type = entry
            .file_type()
            .await
            .fs_context("inspecting build root entry", entry.path())?;
        if !file_type.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == LATEST_FOLDER {
            has_latest = true;
        }
        names.push(name);
    }

    let folder = select_release_folder(&names);
    if has_latest && !folder.is_latest() {
        log::warn!(
            "Both '{}' and '{}' exist in {}; releasing into '{}'",
            LATEST_FOLDER,
            folder.name(),
            build_root.display(),
            folder.name()
        );
    }
    Ok(folder)
}
