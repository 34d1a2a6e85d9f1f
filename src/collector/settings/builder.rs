//! Builder for constructing Config.

use super::{CompressionLevel, Config, SelfContainedMode, extension_pattern, split_list};
use crate::collector::{Error, Result};

/// Builder for constructing [`Config`].
///
/// Unset fields fall back to [`Config::default`]. `build` normalises the
/// lists and validates every ignored pattern.
#[derive(Default, Debug, Clone)]
pub struct ConfigBuilder {
    platforms: Option<Vec<String>>,
    ignored_extensions: Option<Vec<String>>,
    self_contained: Option<SelfContainedMode>,
    archive_subfolder: Option<bool>,
    compression: Option<CompressionLevel>,
}

impl ConfigBuilder {
    /// Creates a new config builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the runtime identifiers to publish for.
    ///
    /// Each entry may itself hold several identifiers separated by commas,
    /// semicolons or whitespace.
    pub fn platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.platforms = Some(platforms.into_iter().flat_map(|s| split_list(s.as_ref())).collect());
        self
    }

    /// Sets the extensions (or glob patterns) removed from publish output.
    pub fn ignored_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignored_extensions =
            Some(extensions.into_iter().flat_map(|s| split_list(s.as_ref())).collect());
        self
    }

    /// Sets the self-contained mode.
    pub fn self_contained(mut self, mode: SelfContainedMode) -> Self {
        self.self_contained = Some(mode);
        self
    }

    /// Sets whether archive entries are nested in a subfolder.
    pub fn archive_subfolder(mut self, nested: bool) -> Self {
        self.archive_subfolder = Some(nested);
        self
    }

    /// Sets the archive compression level.
    pub fn compression(mut self, level: CompressionLevel) -> Self {
        self.compression = Some(level);
        self
    }

    /// Builds the [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if no platform is left after splitting
    /// or an ignored pattern is not a valid glob.
    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();

        let platforms = self
            .platforms
            .unwrap_or_else(|| defaults.platforms().to_vec());
        if platforms.is_empty() {
            return Err(Error::Configuration(
                "At least one platform identifier is required".to_string(),
            ));
        }

        let ignored_patterns = match self.ignored_extensions {
            Some(exts) => exts.iter().map(|e| extension_pattern(e)).collect(),
            None => defaults.ignored_patterns().to_vec(),
        };
        for pattern in &ignored_patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                Error::Configuration(format!("Invalid ignored extension '{}': {}", pattern, e))
            })?;
        }

        Ok(Config::new(
            platforms,
            ignored_patterns,
            self.self_contained.unwrap_or(defaults.self_contained()),
            self.archive_subfolder.unwrap_or(defaults.archive_subfolder()),
            self.compression.unwrap_or(defaults.compression()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config_default() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ignored_patterns(), ["*.pdb", "*.json", "*.config"]);
        assert_eq!(config.self_contained(), SelfContainedMode::Enabled);
        assert_eq!(config.compression(), CompressionLevel::Fastest);
        assert!(!config.archive_subfolder());
    }

    #[test]
    fn separated_lists_are_split_and_trimmed() {
        let config = ConfigBuilder::new()
            .platforms(["linux-x64, win-x64;osx-arm64", "  "])
            .ignored_extensions([".xml pdb", "*.dbg"])
            .build()
            .unwrap();
        assert_eq!(config.platforms(), ["linux-x64", "win-x64", "osx-arm64"]);
        assert_eq!(config.ignored_patterns(), ["*.xml", "*.pdb", "*.dbg"]);
    }

    #[test]
    fn blank_platform_list_is_rejected() {
        let err = ConfigBuilder::new().platforms([" ;, "]).build().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn invalid_pattern_is_configuration_error() {
        let err = ConfigBuilder::new()
            .ignored_extensions(["[abc"])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
