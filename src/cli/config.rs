//! Config file loading.
//!
//! Settings come from, in order of precedence: command line flags, the
//! file given with `--config`, `release-collector.toml` next to the project,
//! and `<config dir>/release-collector/config.toml`.

use super::Args;
use crate::collector::{CompressionLevel, Config, ConfigBuilder, SelfContainedMode};
use crate::error::Result;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Per-project config file name.
pub const PROJECT_CONFIG_FILE: &str = "release-collector.toml";

/// A list given either as a TOML array or a single delimited string.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ListValue {
    /// `"linux-x64, win-x64"`
    Joined(String),
    /// `["linux-x64", "win-x64"]`
    Items(Vec<String>),
}

impl ListValue {
    fn items(&self) -> Vec<String> {
        match self {
            ListValue::Joined(s) => vec![s.clone()],
            ListValue::Items(items) => items.clone(),
        }
    }
}

/// Contents of a config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    /// Runtime identifiers
    pub platforms: Option<ListValue>,
    /// Extensions dropped from publish output
    pub ignored_extensions: Option<ListValue>,
    /// Self-contained mode
    pub self_contained: Option<SelfContainedMode>,
    /// Nest archive entries in a subfolder
    pub archive_subfolder: Option<bool>,
    /// Archive compression
    pub compression: Option<CompressionLevel>,
}

impl ConfigFile {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Ok(toml::from_str(&text)?)
    }
}

/// Picks the config file to use, if any.
pub fn locate_config(explicit: Option<&Path>, project_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let project_config = project_dir.join(PROJECT_CONFIG_FILE);
    if project_config.is_file() {
        return Some(project_config);
    }

    dirs::config_dir()
        .map(|dir| dir.join("release-collector").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Builds the run's [`Config`] from the config file and command line flags.
pub fn resolve_config(args: &Args, project_dir: &Path) -> Result<Config> {
    let file = match locate_config(args.config.as_deref(), project_dir) {
        Some(path) => {
            log::debug!("Loading config from {}", path.display());
            ConfigFile::load(&path)?
        }
        None => {
            log::debug!("No config file found, using defaults");
            ConfigFile::default()
        }
    };

    let mut builder = ConfigBuilder::new();

    if let Some(platforms) = &args.platforms {
        builder = builder.platforms([platforms]);
    } else if let Some(platforms) = &file.platforms {
        builder = builder.platforms(platforms.items());
    }

    if let Some(exts) = &args.ignored_extensions {
        builder = builder.ignored_extensions([exts]);
    } else if let Some(exts) = &file.ignored_extensions {
        builder = builder.ignored_extensions(exts.items());
    }

    if let Some(mode) = args.self_contained.map(SelfContainedMode::from).or(file.self_contained) {
        builder = builder.self_contained(mode);
    }
    if let Some(nested) = args.archive_subfolder.or(file.archive_subfolder) {
        builder = builder.archive_subfolder(nested);
    }
    if let Some(level) = args.compression.map(CompressionLevel::from).or(file.compression) {
        builder = builder.compression(level);
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn file_values_and_flag_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(PROJECT_CONFIG_FILE),
            r#"
platforms = ["linux-x64", "osx-arm64"]
ignored-extensions = "pdb;xml"
self-contained = "disabled"
compression = "optimal"
"#,
        )
        .unwrap();

        let args = Args::try_parse_from(["release_collector", "--compression", "no-compression"]).unwrap();
        let config = resolve_config(&args, tmp.path()).unwrap();

        assert_eq!(config.platforms(), ["linux-x64", "osx-arm64"]);
        assert_eq!(config.ignored_patterns(), ["*.pdb", "*.xml"]);
        assert_eq!(config.self_contained(), SelfContainedMode::Disabled);
        assert_eq!(config.compression(), CompressionLevel::NoCompression);
        assert!(!config.archive_subfolder());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("custom.toml");
        std::fs::write(&path, "systems = \"linux-x64\"\n").unwrap();
        assert!(ConfigFile::load(&path).is_err());
    }

    #[test]
    fn missing_explicit_config_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.toml");
        let args = Args::try_parse_from([
            "release_collector",
            "--config",
            missing.to_str().unwrap(),
        ])
        .unwrap();
        let err = resolve_config(&args, tmp.path()).unwrap_err();
        assert!(err.to_string().contains("reading config file"));
    }
}
