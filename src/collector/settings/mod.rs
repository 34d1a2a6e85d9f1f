//! Configuration for release collection.
//!
//! Holds the platforms to publish for, the files to drop from publish
//! output, and how multi-file outputs are archived.

mod builder;
mod core;
mod mode;

pub use builder::ConfigBuilder;
pub use self::core::{Config, ConfigProvider, DEFAULT_IGNORED_EXTENSIONS, DEFAULT_PLATFORMS};
pub use mode::{CompressionLevel, SelfContainedMode};

/// Splits a user-supplied list on commas, semicolons and whitespace.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Turns an extension into a file-name glob.
///
/// `pdb` and `.pdb` both become `*.pdb`; values that already contain glob
/// metacharacters are used as-is.
pub fn extension_pattern(extension: &str) -> String {
    if extension.contains(['*', '?', '[']) {
        extension.to_string()
    } else if extension.starts_with('.') {
        format!("*{}", extension)
    } else {
        format!("*.{}", extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_patterns() {
        assert_eq!(extension_pattern("pdb"), "*.pdb");
        assert_eq!(extension_pattern(".pdb"), "*.pdb");
        assert_eq!(extension_pattern("*.deps.json"), "*.deps.json");
        assert_eq!(extension_pattern("web.?onfig"), "web.?onfig");
    }

    #[test]
    fn split_list_drops_empty_entries() {
        assert_eq!(split_list(" a,,b ; c\td "), ["a", "b", "c", "d"]);
        assert!(split_list(" ,; ").is_empty());
    }
}
