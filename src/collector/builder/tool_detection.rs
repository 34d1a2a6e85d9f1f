//! External tool detection.
//!
//! Locates the `dotnet` CLI before any target is published, so a missing
//! SDK fails the run once instead of failing every target.

use crate::collector::{Error, Result};
use std::path::PathBuf;

/// Finds `dotnet` on PATH.
pub fn find_dotnet() -> Result<PathBuf> {
    match which::which("dotnet") {
        Ok(path) => {
            log::debug!("Found dotnet at: {}", path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("dotnet not found in PATH: {}", e);
            Err(Error::Configuration(format!(
                "The dotnet CLI was not found in PATH ({}). Install the .NET SDK or pass --dotnet.",
                e
            )))
        }
    }
}
