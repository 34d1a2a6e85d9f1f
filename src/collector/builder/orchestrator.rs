//! Release orchestration.
//!
//! This module provides the [`ReleaseOrchestrator`] that resolves the release
//! folder, publishes every target in turn, and packages each result.

use std::path::Path;
use std::sync::Arc;

use path_absolutize::Absolutize;
use tokio_util::sync::CancellationToken;

use crate::collector::{
    ArtifactPackager, Error, ErrorReporter, ProgressReporter, Result,
    error::ErrorExt,
    settings::ConfigProvider,
    utils::fs,
    version::resolve_release_folder,
};
use crate::project::{ProjectDescriptor, ProjectKind};

use super::{
    checksum::calculate_sha256,
    outcome::{ReleaseSummary, ReleasedArtifact, StepOutcome},
    process::{ProcessOutput, ProcessRunner},
    step::{BuildStep, plan_targets},
};

/// Substring in the tool's output that marks a failed publish.
pub const FAILURE_MARKER: &str = "error";

/// Directory below the project holding all release folders.
pub const BUILD_ROOT: &str = "bin";

/// Main release orchestrator.
///
/// Constructed per run with its collaborators. Targets are published one at
/// a time: concurrent `dotnet publish` calls on one project contend for the
/// same `obj/` directory and lock files.
///
/// A failing target is reported and skipped; only configuration,
/// precondition and cancellation errors end the run.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use release_collector::collector::{Config, DotnetRunner, LogReporter, ReleaseOrchestrator};
/// use release_collector::project::DotnetProject;
///
/// # async fn example() -> release_collector::collector::Result<()> {
/// let project = DotnetProject::load("App/App.csproj".as_ref())?;
/// let orchestrator = ReleaseOrchestrator::new(
///     DotnetRunner::detect()?,
///     Arc::new(LogReporter),
///     Arc::new(LogReporter),
/// );
/// let summary = orchestrator.run(&project, &Config::default()).await?;
/// println!("{} artifacts in {}", summary.succeeded(), summary.release_dir.display());
/// # Ok(())
/// # }
/// ```
pub struct ReleaseOrchestrator<R> {
    runner: R,
    progress: Arc<dyn ProgressReporter>,
    errors: Arc<dyn ErrorReporter>,
    cancel: CancellationToken,
}

impl<R: ProcessRunner> ReleaseOrchestrator<R> {
    /// Creates an orchestrator with its collaborators.
    pub fn new(
        runner: R,
        progress: Arc<dyn ProgressReporter>,
        errors: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            runner,
            progress,
            errors,
            cancel: CancellationToken::new(),
        }
    }

    /// Uses `cancel` to stop the run between targets and abort a running publish.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that cancels this orchestrator's run.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Publishes every configured target of `project`.
    ///
    /// Fatal errors are reported once through the error reporter and
    /// returned. Per-target failures are reported as they happen and recorded
    /// in the returned [`ReleaseSummary`].
    pub async fn run(
        &self,
        project: &dyn ProjectDescriptor,
        config: &dyn ConfigProvider,
    ) -> Result<ReleaseSummary> {
        match self.try_run(project, config).await {
            Ok(summary) => {
                if summary.is_success() {
                    self.progress
                        .report(&format!("Successfully published {}!", project.name()));
                } else {
                    self.progress.report(&format!(
                        "Published {} with {} failed target(s).",
                        project.name(),
                        summary.failed()
                    ));
                }
                Ok(summary)
            }
            Err(e) => {
                self.errors.report(
                    "Error!",
                    &format!("An error occurred while publishing {}:\n{}", project.name(), e),
                );
                self.progress
                    .report(&format!("An error occurred while publishing {}!", project.name()));
                Err(e)
            }
        }
    }

    async fn try_run(
        &self,
        project: &dyn ProjectDescriptor,
        config: &dyn ConfigProvider,
    ) -> Result<ReleaseSummary> {
        let config = config.config()?;

        let kind = project.kind();
        if !kind.is_publishable() {
            let reason = match kind {
                ProjectKind::Library => "Libraries are not supported!",
                _ => "Unsupported project type.",
            };
            return Err(Error::Configuration(reason.to_string()));
        }

        let project_file = project
            .project_file()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "Invalid project file path: {}",
                    project.project_file().display()
                ))
            })?;

        self.progress.report(&format!("Publishing {}...", project.name()));

        // `-o` paths must not depend on the tool's working directory.
        let project_dir = project.project_dir().absolutize()?.into_owned();
        let build_root = project_dir.join(BUILD_ROOT);
        let folder = resolve_release_folder(&build_root).await?;
        let release_dir = build_root.join(folder.name());
        log::info!("Releasing {} into {}", project.name(), release_dir.display());

        if !folder.is_latest() && fs::has_entries(&release_dir).await? {
            return Err(Error::Precondition(format!(
                "The folder with the highest version number ({}) isn't empty! \
                 You probably forgot to create a folder for the next version.",
                folder.name()
            )));
        }
        fs::create_dir_all(&release_dir, true).await?;

        let packager = ArtifactPackager::new(&release_dir, &config)?;
        let version_suffix = folder.version_suffix();
        let targets = plan_targets(&config);
        let total = targets.len();
        let mut outcomes = Vec::with_capacity(total);

        for (completed, target) in targets.into_iter().enumerate() {
            if self.cancel.is_cancelled() {
                return Err(Error::Cancelled { completed, total });
            }

            let step = BuildStep::new(
                target,
                project.name(),
                &project_file,
                &version_suffix,
                &release_dir,
            );
            self.progress
                .report(&format!("Publishing: {}", step.output_name));

            match self.publish_target(&project_dir, &step, &packager).await {
                Ok(artifact) => {
                    log::info!(
                        "Created {} ({} bytes, sha256 {})",
                        artifact.path.display(),
                        artifact.size,
                        artifact.checksum
                    );
                    outcomes.push(StepOutcome {
                        target: step.target,
                        output_name: step.output_name,
                        artifact: Some(artifact),
                        error: None,
                    });
                }
                Err(e) if self.cancel.is_cancelled() => {
                    log::warn!("{} ({}) failed during cancellation: {}", step.output_name, step.target, e);
                    return Err(Error::Cancelled { completed, total });
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    log::warn!("{} ({}) failed: {}", step.output_name, step.target, e);
                    self.errors.report(
                        "Error!",
                        &format!(
                            "An error occurred while trying to publish {} ({}):\n{}",
                            step.output_name, step.target, e
                        ),
                    );
                    outcomes.push(StepOutcome {
                        target: step.target,
                        output_name: step.output_name,
                        artifact: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        Ok(ReleaseSummary {
            folder,
            release_dir,
            outcomes,
        })
    }

    /// Runs the build tool for one step and packages its output.
    ///
    /// The step's output directory is gone when this returns, whatever the outcome.
    async fn publish_target(
        &self,
        project_dir: &Path,
        step: &BuildStep,
        packager: &ArtifactPackager,
    ) -> Result<ReleasedArtifact> {
        fs::remove_dir_all(&step.output_dir).await?;
        log::debug!("dotnet {}", step.command_line());

        let built = match self
            .runner
            .run(project_dir, &step.args, &self.cancel)
            .await
        {
            Ok(output) => check_output(&output),
            Err(e) => Err(e),
        };
        if let Err(e) = built {
            if let Err(cleanup) = fs::remove_dir_all(&step.output_dir).await {
                log::warn!("Failed to clean up {}: {}", step.output_dir.display(), cleanup);
            }
            return Err(e);
        }

        let path = packager.package(&step.output_dir, &step.output_name).await?;
        let size = tokio::fs::metadata(&path)
            .await
            .fs_context("reading artifact metadata", &path)?
            .len();
        let checksum = calculate_sha256(&path).await?;

        Ok(ReleasedArtifact {
            path,
            size,
            checksum,
        })
    }
}

/// Fails when the tool's output mentions an error or it exited unsuccessfully.
fn check_output(output: &ProcessOutput) -> Result<()> {
    if output.stdout.contains(FAILURE_MARKER) {
        let lines: Vec<&str> = output
            .stdout
            .lines()
            .filter(|l| l.contains(FAILURE_MARKER))
            .take(5)
            .map(str::trim)
            .collect();
        return Err(Error::BuildTool(format!(
            "Error in dotnet output:\n{}",
            lines.join("\n")
        )));
    }
    if !output.success {
        return Err(Error::BuildTool(match output.code {
            Some(code) => format!("dotnet exited with code {}", code),
            None => "dotnet was terminated by a signal".to_string(),
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(success: bool, stdout: &str) -> ProcessOutput {
        ProcessOutput {
            success,
            code: Some(if success { 0 } else { 1 }),
            stdout: stdout.to_string(),
        }
    }

    #[test]
    fn marker_is_case_sensitive() {
        assert!(check_output(&output(true, "Build succeeded.\n    0 Error(s)\n")).is_ok());
        let err = check_output(&output(true, "Program.cs(3,1): error CS1002: ; expected\n")).unwrap_err();
        assert!(matches!(err, Error::BuildTool(_)));
        assert!(err.to_string().contains("CS1002"));
    }

    #[test]
    fn non_zero_exit_fails() {
        let err = check_output(&output(false, "Restore failed.")).unwrap_err();
        assert_eq!(err.to_string(), "dotnet exited with code 1");
    }
}
