//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap. Every release
//! setting can also come from a config file; flags given here win.

use crate::collector::{CompressionLevel, SelfContainedMode};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Publishes a .NET project for several runtimes and collects the artifacts
#[derive(Parser, Debug)]
#[command(
    name = "release_collector",
    version,
    about = "Publishes a .NET project for several runtimes and collects the artifacts",
    long_about = "Runs `dotnet publish` once per runtime identifier and build mode, then collects the results into bin/<version>/.

The release folder is the highest existing bin/v<major>.<minor>... folder, which must be empty,
or bin/latest when no version folder exists. Single-file outputs are renamed; anything else is zipped.

Usage:
  release_collector
  release_collector --project src/App/App.csproj --platforms linux-x64,win-x64
  release_collector --self-contained enabled-trimmed --compression smallest-size

Exit code 0 = every target published, 3 = some targets failed, 1 = nothing was published."
)]
pub struct Args {
    /// Project file to publish (defaults to the only *.csproj in the current directory)
    #[arg(short = 'p', long, value_name = "CSPROJ")]
    pub project: Option<PathBuf>,

    /// Config file (defaults to release-collector.toml next to the project)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Runtime identifiers, separated by commas, semicolons or spaces
    #[arg(long, value_name = "RIDS", env = "RELEASE_COLLECTOR_PLATFORMS")]
    pub platforms: Option<String>,

    /// File extensions to drop from publish output, e.g. "pdb,json"
    #[arg(long, value_name = "EXTS")]
    pub ignored_extensions: Option<String>,

    /// Also publish self-contained builds
    #[arg(long, value_enum, value_name = "MODE")]
    pub self_contained: Option<SelfContainedArg>,

    /// Put archived files in a subfolder inside the .zip
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    pub archive_subfolder: Option<bool>,

    /// Compression for multi-file outputs
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub compression: Option<CompressionArg>,

    /// Path to the dotnet executable (defaults to dotnet on PATH)
    #[arg(long, value_name = "PATH", env = "RELEASE_COLLECTOR_DOTNET")]
    pub dotnet: Option<PathBuf>,

    /// Print artifact sizes and checksums
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// `--self-contained` values
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfContainedArg {
    /// Framework-dependent builds only
    Disabled,
    /// Framework-dependent and self-contained builds
    Enabled,
    /// Framework-dependent and trimmed self-contained builds
    EnabledTrimmed,
}

impl From<SelfContainedArg> for SelfContainedMode {
    fn from(arg: SelfContainedArg) -> Self {
        match arg {
            SelfContainedArg::Disabled => SelfContainedMode::Disabled,
            SelfContainedArg::Enabled => SelfContainedMode::Enabled,
            SelfContainedArg::EnabledTrimmed => SelfContainedMode::EnabledTrimmed,
        }
    }
}

/// `--compression` values
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionArg {
    /// Store without compression
    NoCompression,
    /// Fast deflate
    Fastest,
    /// Default deflate
    Optimal,
    /// Strongest deflate
    SmallestSize,
}

impl From<CompressionArg> for CompressionLevel {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::NoCompression => CompressionLevel::NoCompression,
            CompressionArg::Fastest => CompressionLevel::Fastest,
            CompressionArg::Optimal => CompressionLevel::Optimal,
            CompressionArg::SmallestSize => CompressionLevel::SmallestSize,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Some(platforms) = &self.platforms {
            if crate::collector::settings::split_list(platforms).is_empty() {
                return Err("--platforms needs at least one runtime identifier".to_string());
            }
        }

        if let Some(project) = &self.project {
            if project.as_os_str().is_empty() {
                return Err("--project cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);
        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}
