//! Project discovery and classification from a single .csproj file.

use crate::collector::{Error, Result, error::ErrorExt};
use path_absolutize::Absolutize;
use std::fmt;
use std::path::{Path, PathBuf};

/// What kind of output a project produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    /// Web/service project (`Microsoft.NET.Sdk.Web`)
    Service,
    /// Console application (`<OutputType>Exe</OutputType>`)
    Executable,
    /// Class library; cannot be published as a release
    Library,
    /// Any other SDK
    Unsupported,
}

impl ProjectKind {
    /// Classifies project file contents.
    pub fn classify(manifest: &str) -> Self {
        if manifest.contains("\"Microsoft.NET.Sdk.Web\"") {
            ProjectKind::Service
        } else if manifest.contains("\"Microsoft.NET.Sdk\"") {
            if manifest.contains("<OutputType>Exe</OutputType>") {
                ProjectKind::Executable
            } else {
                ProjectKind::Library
            }
        } else {
            ProjectKind::Unsupported
        }
    }

    /// Whether releases can be published for this kind.
    pub fn is_publishable(self) -> bool {
        matches!(self, ProjectKind::Service | ProjectKind::Executable)
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectKind::Service => "service",
            ProjectKind::Executable => "executable",
            ProjectKind::Library => "library",
            ProjectKind::Unsupported => "unsupported",
        };
        f.write_str(s)
    }
}

/// Describes the project being released.
pub trait ProjectDescriptor: Send + Sync {
    /// Full path to the project file.
    fn project_file(&self) -> &Path;

    /// Directory containing the project file; the build tool's working directory.
    fn project_dir(&self) -> &Path;

    /// Display name, used as the artifact name prefix.
    fn name(&self) -> &str;

    /// Project classification.
    fn kind(&self) -> ProjectKind;
}

/// A .NET project loaded from disk.
#[derive(Debug, Clone)]
pub struct DotnetProject {
    project_file: PathBuf,
    project_dir: PathBuf,
    name: String,
    kind: ProjectKind,
}

impl DotnetProject {
    /// Reads and classifies the project file at `path`.
    ///
    /// Relative paths are resolved against the current directory, so the
    /// stored paths stay valid once the build tool runs elsewhere.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if the file does not exist or has no usable name.
    pub fn load(path: &Path) -> Result<Self> {
        let absolute = path.absolutize()?;
        let path: &Path = &absolute;
        if !path.is_file() {
            return Err(Error::Configuration(format!(
                "No project file found for the project (looked for: {})!",
                path.display()
            )));
        }

        let manifest = std::fs::read_to_string(path).fs_context("reading project file", path)?;
        let kind = ProjectKind::classify(&manifest);

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| Error::Configuration(format!("Invalid project path: {}", path.display())))?;
        let project_dir = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::Configuration(format!("Invalid project path: {}", path.display())))?;

        log::debug!("Loaded {} project {} from {}", kind, name, path.display());

        Ok(Self {
            project_file: path.to_path_buf(),
            project_dir,
            name,
            kind,
        })
    }
}

impl ProjectDescriptor for DotnetProject {
    fn project_file(&self) -> &Path {
        &self.project_file
    }

    fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ProjectKind {
        self.kind
    }
}

/// Finds the single `*.csproj` in `dir`.
///
/// # Errors
///
/// [`Error::Configuration`] when there is no project file or more than one.
pub fn find_project_file(dir: &Path) -> Result<PathBuf> {
    let pattern = format!("{}/*.csproj", glob::Pattern::escape(&dir.to_string_lossy()));
    let mut found = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) => found.push(path),
            Err(e) => log::debug!("Skipping unreadable path: {}", e),
        }
    }

    match found.len() {
        0 => Err(Error::Configuration(format!(
            "Select a project first! No .csproj found in {}",
            dir.display()
        ))),
        1 => Ok(found.remove(0)),
        _ => Err(Error::Configuration(format!(
            "Please only select one project at a time! Found {} .csproj files in {}",
            found.len(),
            dir.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_sdks() {
        assert_eq!(
            ProjectKind::classify(r#"<Project Sdk="Microsoft.NET.Sdk.Web"></Project>"#),
            ProjectKind::Service
        );
        assert_eq!(
            ProjectKind::classify(
                r#"<Project Sdk="Microsoft.NET.Sdk"><PropertyGroup><OutputType>Exe</OutputType></PropertyGroup></Project>"#
            ),
            ProjectKind::Executable
        );
        assert_eq!(
            ProjectKind::classify(r#"<Project Sdk="Microsoft.NET.Sdk"></Project>"#),
            ProjectKind::Library
        );
        assert_eq!(
            ProjectKind::classify(r#"<Project Sdk="Microsoft.NET.Sdk.Razor"></Project>"#),
            ProjectKind::Unsupported
        );
    }

    #[test]
    fn load_resolves_relative_paths() {
        let project = DotnetProject::load(Path::new("tests/fixtures/Sample.csproj")).unwrap();
        assert!(project.project_file().is_absolute());
        assert!(project.project_dir().is_absolute());
        assert!(project.project_dir().ends_with("tests/fixtures"));
        assert_eq!(project.name(), "Sample");
    }

    #[test]
    fn load_reads_name_and_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("Sample.csproj");
        std::fs::write(
            &path,
            r#"<Project Sdk="Microsoft.NET.Sdk"><PropertyGroup><OutputType>Exe</OutputType></PropertyGroup></Project>"#,
        )
        .unwrap();

        let project = DotnetProject::load(&path).unwrap();
        assert_eq!(project.name(), "Sample");
        assert_eq!(project.project_dir(), tmp.path());
        assert_eq!(project.kind(), ProjectKind::Executable);
    }

    #[test]
    fn missing_file_is_configuration_error() {
        let err = DotnetProject::load(Path::new("/nonexistent/App.csproj")).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn find_project_file_requires_exactly_one() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(find_project_file(tmp.path()).is_err());

        std::fs::write(tmp.path().join("A.csproj"), "").unwrap();
        assert_eq!(find_project_file(tmp.path()).unwrap(), tmp.path().join("A.csproj"));

        std::fs::write(tmp.path().join("B.csproj"), "").unwrap();
        assert!(find_project_file(tmp.path()).is_err());
    }
}
