//! Release orchestration and the publish pipeline.
//!
//! This module provides the [`ReleaseOrchestrator`] that publishes one
//! project for every configured platform and collects the results.
//!
//! # Overview
//!
//! The orchestrator:
//! 1. Resolves the release folder below `bin/`
//! 2. Checks that a version folder is still empty
//! 3. Plans one [`Target`] per platform and build mode
//! 4. Runs `dotnet publish` for each target through a [`ProcessRunner`]
//! 5. Packages each successful output and records its checksum
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`ReleaseOrchestrator`] struct
//! - [`outcome`] - Per-target outcomes and the run summary
//! - [`process`] - Build tool execution
//! - [`step`] - Targets and publish argument construction
//! - [`tool_detection`] - Locating the `dotnet` CLI

mod checksum;
mod orchestrator;
mod outcome;
mod process;
mod step;
mod tool_detection;

pub use checksum::calculate_sha256;
pub use orchestrator::{BUILD_ROOT, FAILURE_MARKER, ReleaseOrchestrator};
pub use outcome::{ReleaseSummary, ReleasedArtifact, StepOutcome};
pub use process::{DotnetRunner, ProcessOutput, ProcessRunner};
pub use step::{BuildMode, BuildStep, Target, plan_targets};
pub use tool_detection::find_dotnet;
