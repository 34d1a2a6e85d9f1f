//! Multi-platform release collection for .NET projects.
//!
//! This library publishes one project for every configured runtime
//! identifier and build mode through the `dotnet` CLI, then collects the
//! results into a single versioned folder:
//! - `bin/<highest v-folder>/` when a version folder exists (it must be empty)
//! - `bin/latest/` otherwise
//!
//! Single-file outputs are renamed to `{project}-{version}_{rid}-{fd|sc}{ext}`;
//! multi-file outputs are zipped under the same name.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod collector;
pub mod error;
pub mod project;

// Re-export commonly used types
pub use collector::{Config, ReleaseOrchestrator, ReleaseSummary};
pub use error::{CliError, ReleaseError, Result};
