//! Release collection engine.
//!
//! Publishes a .NET project once per (platform, build mode) target and
//! collects the outputs into `bin/<version>/`:
//!
//! - [`version`] picks the release folder
//! - [`builder`] sequences the targets and drives `dotnet publish`
//! - [`packager`] turns each publish output into one file or one `.zip`
//!
//! Host concerns (config storage, status display, dialogs) stay outside and
//! reach the engine through [`ConfigProvider`], [`ProgressReporter`],
//! [`ErrorReporter`] and [`crate::project::ProjectDescriptor`].

pub mod builder;
pub mod error;
pub mod packager;
pub mod report;
pub mod settings;
pub mod utils;
pub mod version;

pub use builder::{
    BuildMode, BuildStep, DotnetRunner, ProcessOutput, ProcessRunner, ReleaseOrchestrator,
    ReleaseSummary, ReleasedArtifact, StepOutcome, Target,
};
pub use error::{Error, ErrorExt, Result};
pub use packager::ArtifactPackager;
pub use report::{ErrorReporter, LogReporter, ProgressReporter};
pub use settings::{CompressionLevel, Config, ConfigBuilder, ConfigProvider, SelfContainedMode};
pub use version::{LATEST_FOLDER, ReleaseFolder, ReleaseVersion, resolve_release_folder};
