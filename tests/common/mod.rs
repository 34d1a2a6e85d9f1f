//! Shared helpers for release_collector integration tests

#![allow(dead_code)]

use release_collector::collector::{
    ErrorReporter, ProcessOutput, ProcessRunner, ProgressReporter, Result,
};
use release_collector::project::DotnetProject;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

pub const SAMPLE_CSPROJ: &str = include_str!("../fixtures/Sample.csproj");
pub const LIBRARY_CSPROJ: &str = include_str!("../fixtures/Library.csproj");
pub const WEB_CSPROJ: &str = include_str!("../fixtures/Web.csproj");

/// What the fake build tool does for one invocation.
#[derive(Debug, Clone)]
pub struct Script {
    pub stdout: String,
    pub success: bool,
    /// Files written into the `-o` directory, relative paths
    pub files: Vec<(String, Vec<u8>)>,
    /// Cancel the run's token while "building"
    pub cancel: bool,
}

impl Script {
    /// Successful publish producing `files`.
    pub fn ok(files: &[&str]) -> Self {
        Self {
            stdout: "  Restore complete.\n  Build succeeded.\n    0 Warning(s)\n    0 Error(s)\n".to_string(),
            success: true,
            files: files
                .iter()
                .map(|f| (f.to_string(), format!("contents of {}", f).into_bytes()))
                .collect(),
            cancel: false,
        }
    }

    /// Publish whose output contains the failure marker.
    pub fn compile_error() -> Self {
        Self {
            stdout: "Program.cs(3,1): error CS1002: ; expected\n".to_string(),
            success: false,
            files: Vec::new(),
            cancel: false,
        }
    }

    pub fn exit_code_only(success: bool) -> Self {
        Self {
            stdout: "Something went sideways.\n".to_string(),
            success,
            files: vec![("Sample".to_string(), b"bin".to_vec())],
            cancel: false,
        }
    }

    pub fn cancelling(mut self) -> Self {
        self.cancel = true;
        self
    }
}

/// Scripted stand-in for the dotnet CLI.
///
/// Records every argument list; plays queued scripts in order, then the default.
pub struct FakeRunner {
    pub calls: Arc<Mutex<Vec<Vec<String>>>>,
    pub working_dirs: Arc<Mutex<Vec<PathBuf>>>,
    scripts: Mutex<VecDeque<Script>>,
    default: Script,
}

impl FakeRunner {
    pub fn new(default: Script) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            working_dirs: Arc::new(Mutex::new(Vec::new())),
            scripts: Mutex::new(VecDeque::new()),
            default,
        }
    }

    pub fn then(self, script: Script) -> Self {
        self.scripts.lock().unwrap().push_back(script);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|a| a.join(" ")).collect()
    }
}

/// Value following `-o` in a publish argument list.
pub fn output_dir(args: &[String]) -> PathBuf {
    let pos = args.iter().position(|a| a == "-o").expect("-o argument");
    PathBuf::from(&args[pos + 1])
}

impl ProcessRunner for FakeRunner {
    async fn run(
        &self,
        working_dir: &Path,
        args: &[String],
        cancel: &CancellationToken,
    ) -> Result<ProcessOutput> {
        self.calls.lock().unwrap().push(args.to_vec());
        self.working_dirs.lock().unwrap().push(working_dir.to_path_buf());
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default.clone());

        // Like the real tool, a relative `-o` lands below the working directory.
        let out = working_dir.join(output_dir(args));
        for (name, contents) in &script.files {
            let path = out.join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, contents).unwrap();
        }
        if script.cancel {
            cancel.cancel();
        }

        Ok(ProcessOutput {
            success: script.success,
            code: Some(if script.success { 0 } else { 1 }),
            stdout: script.stdout,
        })
    }
}

/// Collects everything reported during a run.
#[derive(Default)]
pub struct RecordingReporter {
    pub progress: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<(String, String)>>,
}

impl RecordingReporter {
    pub fn progress_lines(&self) -> Vec<String> {
        self.progress.lock().unwrap().clone()
    }

    pub fn error_texts(&self) -> Vec<String> {
        self.errors.lock().unwrap().iter().map(|(_, t)| t.clone()).collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, text: &str) {
        self.progress.lock().unwrap().push(text.to_string());
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, title: &str, text: &str) {
        self.errors
            .lock()
            .unwrap()
            .push((title.to_string(), text.to_string()));
    }
}

/// Writes a project file into `dir` and loads it.
pub fn write_project(dir: &Path, name: &str, contents: &str) -> DotnetProject {
    let path = dir.join(format!("{}.csproj", name));
    std::fs::write(&path, contents).unwrap();
    DotnetProject::load(&path).unwrap()
}

pub fn sample_project(dir: &Path) -> DotnetProject {
    write_project(dir, "Sample", SAMPLE_CSPROJ)
}

/// Sorted names of the entries directly inside `dir`.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Sorted entry names of a ZIP archive.
pub fn zip_entries(path: &Path) -> Vec<String> {
    let file = std::fs::File::open(path).unwrap();
    let archive = zip::ZipArchive::new(file).unwrap();
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    names
}
