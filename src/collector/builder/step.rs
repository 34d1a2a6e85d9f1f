//! Publish targets and the `dotnet publish` argument grammar.

use crate::collector::settings::{Config, SelfContainedMode};
use std::fmt;
use std::path::{Path, PathBuf};

/// How a target bundles the .NET runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildMode {
    /// Requires the runtime to be installed on the target machine
    FrameworkDependent,
    /// Bundles the runtime
    SelfContained,
    /// Bundles a trimmed runtime
    SelfContainedTrimmed,
}

impl BuildMode {
    /// Short tag used in artifact names.
    pub fn tag(self) -> &'static str {
        match self {
            BuildMode::FrameworkDependent => "fd",
            BuildMode::SelfContained | BuildMode::SelfContainedTrimmed => "sc",
        }
    }

    /// Mode-specific publish arguments for `platform`.
    pub fn publish_args(self, platform: &str) -> Vec<String> {
        let mut args = vec![
            "-r".to_string(),
            platform.to_string(),
            "-p:PublishSingleFile=true".to_string(),
        ];
        match self {
            BuildMode::FrameworkDependent => {
                args.push("-p:IncludeAllContentForSelfExtract=true".to_string());
                args.push("--self-contained".to_string());
                args.push("false".to_string());
            }
            BuildMode::SelfContained => {
                args.push("--self-contained".to_string());
                args.push("true".to_string());
            }
            BuildMode::SelfContainedTrimmed => {
                args.push("-p:PublishTrimmed=true".to_string());
                args.push("--self-contained".to_string());
                args.push("true".to_string());
            }
        }
        args
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BuildMode::FrameworkDependent => "framework-dependent",
            BuildMode::SelfContained => "self-contained",
            BuildMode::SelfContainedTrimmed => "self-contained (trimmed)",
        };
        f.write_str(s)
    }
}

/// One (platform, mode) pair, published by one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    /// Runtime identifier such as `linux-x64`
    pub platform: String,
    /// Build mode
    pub mode: BuildMode,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.platform, self.mode)
    }
}

/// Expands the configured platforms into targets, in publish order.
///
/// Every platform gets a framework-dependent target, followed by a
/// self-contained one unless the mode is disabled.
pub fn plan_targets(config: &Config) -> Vec<Target> {
    let sc_mode = match config.self_contained() {
        SelfContainedMode::Disabled => None,
        SelfContainedMode::Enabled => Some(BuildMode::SelfContained),
        SelfContainedMode::EnabledTrimmed => Some(BuildMode::SelfContainedTrimmed),
    };

    config
        .platforms()
        .iter()
        .flat_map(|platform| {
            std::iter::once(BuildMode::FrameworkDependent)
                .chain(sc_mode)
                .map(|mode| Target {
                    platform: platform.clone(),
                    mode,
                })
        })
        .collect()
}

/// Everything needed to publish a single target.
#[derive(Debug, Clone)]
pub struct BuildStep {
    /// Target being published
    pub target: Target,
    /// Artifact name without extension, e.g. `Sample-v1.2_linux-x64-fd`
    pub output_name: String,
    /// Temporary publish directory inside the release folder
    pub output_dir: PathBuf,
    /// Arguments passed to `dotnet`
    pub args: Vec<String>,
}

impl BuildStep {
    /// Creates the step for `target`.
    ///
    /// `project_file` is the project file name relative to the working
    /// directory; `version_suffix` is empty for the `latest` folder.
    pub fn new(
        target: Target,
        project_name: &str,
        project_file: &str,
        version_suffix: &str,
        release_dir: &Path,
    ) -> Self {
        let output_name = format!(
            "{}{}_{}-{}",
            project_name,
            version_suffix,
            target.platform,
            target.mode.tag()
        );
        let output_dir = release_dir.join(format!("{}-bin", output_name));

        let mut args = vec![
            "publish".to_string(),
            project_file.to_string(),
            "-o".to_string(),
            output_dir.display().to_string(),
            "--configuration".to_string(),
            "Release".to_string(),
        ];
        args.extend(target.mode.publish_args(&target.platform));

        Self {
            target,
            output_name,
            output_dir,
            args,
        }
    }

    /// Arguments joined with spaces, as shown in logs.
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::settings::ConfigBuilder;

    fn target(platform: &str, mode: BuildMode) -> Target {
        Target {
            platform: platform.to_string(),
            mode,
        }
    }

    #[test]
    fn framework_dependent_arguments() {
        let step = BuildStep::new(
            target("linux-x64", BuildMode::FrameworkDependent),
            "Sample",
            "Sample.csproj",
            "",
            Path::new("/work/bin/latest"),
        );
        assert_eq!(step.output_name, "Sample_linux-x64-fd");
        assert_eq!(
            step.command_line(),
            "publish Sample.csproj -o /work/bin/latest/Sample_linux-x64-fd-bin --configuration Release \
             -r linux-x64 -p:PublishSingleFile=true -p:IncludeAllContentForSelfExtract=true --self-contained false"
        );
    }

    #[test]
    fn self_contained_arguments() {
        let step = BuildStep::new(
            target("win-x64", BuildMode::SelfContained),
            "Sample",
            "Sample.csproj",
            "-v1.2",
            Path::new("/work/bin/v1.2"),
        );
        assert_eq!(step.output_name, "Sample-v1.2_win-x64-sc");
        assert_eq!(
            step.command_line(),
            "publish Sample.csproj -o /work/bin/v1.2/Sample-v1.2_win-x64-sc-bin --configuration Release \
             -r win-x64 -p:PublishSingleFile=true --self-contained true"
        );
    }

    #[test]
    fn trimmed_arguments() {
        let args = BuildMode::SelfContainedTrimmed.publish_args("linux-arm64");
        assert_eq!(
            args.join(" "),
            "-r linux-arm64 -p:PublishSingleFile=true -p:PublishTrimmed=true --self-contained true"
        );
        assert_eq!(BuildMode::SelfContainedTrimmed.tag(), "sc");
    }

    #[test]
    fn targets_follow_platform_order() {
        let config = ConfigBuilder::new()
            .platforms(["linux-x64", "win-x64"])
            .self_contained(SelfContainedMode::EnabledTrimmed)
            .build()
            .unwrap();
        let targets = plan_targets(&config);
        assert_eq!(
            targets,
            vec![
                target("linux-x64", BuildMode::FrameworkDependent),
                target("linux-x64", BuildMode::SelfContainedTrimmed),
                target("win-x64", BuildMode::FrameworkDependent),
                target("win-x64", BuildMode::SelfContainedTrimmed),
            ]
        );
    }

    #[test]
    fn disabled_mode_only_framework_dependent() {
        let config = ConfigBuilder::new()
            .platforms(["linux-x64", "win-x64"])
            .self_contained(SelfContainedMode::Disabled)
            .build()
            .unwrap();
        let targets = plan_targets(&config);
        assert_eq!(targets.len(), 2);
        assert!(targets.iter().all(|t| t.mode == BuildMode::FrameworkDependent));
    }
}
