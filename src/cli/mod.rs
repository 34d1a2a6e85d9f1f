//! Command line interface for release_collector.
//!
//! Loads the project and its config, wires the terminal reporters and the
//! real `dotnet` runner into a [`ReleaseOrchestrator`], and maps the run's
//! outcome to an exit code.

mod args;
pub mod config;
mod output;
mod reporter;

pub use args::{Args, CompressionArg, RuntimeConfig, SelfContainedArg};
pub use output::OutputManager;
pub use reporter::TerminalReporter;

use crate::collector::{DotnetRunner, ReleaseOrchestrator, ReleaseSummary};
use crate::error::{CliError, Result};
use crate::project::{DotnetProject, ProjectDescriptor, find_project_file};
use path_absolutize::Absolutize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Exit code when every target was published.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when the run stopped on a fatal error.
pub const EXIT_FATAL: i32 = 1;
/// Exit code when some targets failed.
pub const EXIT_PARTIAL: i32 = 3;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(args).await
}

/// Runs a release for already-parsed arguments.
pub async fn execute(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;
    let runtime_config = RuntimeConfig::from(&args);

    let project_path = match &args.project {
        Some(path) => path.absolutize()?.into_owned(),
        None => find_project_file(&std::env::current_dir()?)?,
    };
    let project = DotnetProject::load(&project_path)?;
    log::debug!("Loaded {} project {}", project.kind(), project.project_file().display());
    let config = config::resolve_config(&args, project.project_dir())?;
    log::debug!(
        "Platforms: {}; compression: {}",
        config.platforms().join(", "),
        config.compression()
    );

    let runner = match &args.dotnet {
        Some(path) => DotnetRunner::new(path.clone()),
        None => DotnetRunner::detect()?,
    };
    log::debug!("Using {}", runner.program().display());

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, stopping after cleanup");
            ctrl_c.cancel();
        }
    });

    let reporter = Arc::new(TerminalReporter::new(runtime_config.output().clone()));
    let orchestrator =
        ReleaseOrchestrator::new(runner, reporter.clone(), reporter).with_cancellation(cancel);

    // Fatal errors have already been reported by the orchestrator.
    let exit_code = match orchestrator.run(&project, &config).await {
        Ok(summary) => {
            print_summary(&runtime_config, &summary)?;
            if summary.is_success() {
                EXIT_SUCCESS
            } else {
                EXIT_PARTIAL
            }
        }
        Err(e) => {
            log::debug!("Release of {} failed: {:?}", project.name(), e);
            EXIT_FATAL
        }
    };

    Ok(exit_code)
}

fn print_summary(runtime_config: &RuntimeConfig, summary: &ReleaseSummary) -> std::io::Result<()> {
    let output = runtime_config.output();
    output.section(&format!("Release folder: {}", summary.release_dir.display()))?;
    for outcome in &summary.outcomes {
        match (&outcome.artifact, &outcome.error) {
            (Some(artifact), _) => {
                output.success(&artifact.path.display().to_string())?;
                output.verbose(&format!("    {} bytes, sha256 {}", artifact.size, artifact.checksum))?;
            }
            (None, Some(error)) => {
                let first_line = error.lines().next().unwrap_or_default();
                output.warn(&format!("{} failed: {}", outcome.output_name, first_line))?;
            }
            (None, None) => {}
        }
    }
    output.indent(&format!(
        "{} of {} targets published",
        summary.succeeded(),
        summary.outcomes.len()
    ))
}
