//! Turns a publish output directory into a single release artifact.
//!
//! After ignored files are removed, a lone remaining file is moved into the
//! release folder under the artifact name; anything more is zipped. The
//! publish directory is deleted afterwards either way.

use crate::collector::{
    Error, Result,
    error::ErrorExt,
    settings::{CompressionLevel, Config},
    utils::fs,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use zip::{ZipWriter, write::SimpleFileOptions};

/// Packages publish output into the release folder.
#[derive(Debug, Clone)]
pub struct ArtifactPackager {
    release_dir: PathBuf,
    ignored: Vec<glob::Pattern>,
    archive_subfolder: bool,
    compression: CompressionLevel,
}

impl ArtifactPackager {
    /// Creates a packager writing into `release_dir`.
    pub fn new(release_dir: &Path, config: &Config) -> Result<Self> {
        let ignored = config
            .ignored_patterns()
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            release_dir: release_dir.to_path_buf(),
            ignored,
            archive_subfolder: config.archive_subfolder(),
            compression: config.compression(),
        })
    }

    /// Packages `build_dir` as `output_name` and returns the artifact path.
    ///
    /// `build_dir` is removed whether or not packaging succeeds.
    ///
    /// # Errors
    ///
    /// [`Error::Packaging`] if no files remain after filtering; IO and ZIP
    /// errors otherwise.
    pub async fn package(&self, build_dir: &Path, output_name: &str) -> Result<PathBuf> {
        let packager = self.clone();
        let dir = build_dir.to_path_buf();
        let name = output_name.to_string();

        let result = tokio::task::spawn_blocking(move || packager.package_blocking(&dir, &name))
            .await
            .map_err(|e| Error::GenericError(format!("Packaging task panicked: {}", e)))
            .and_then(|r| r);

        if let Err(e) = fs::remove_dir_all(build_dir).await {
            log::warn!("Failed to clean up {}: {}", build_dir.display(), e);
        }

        result
    }

    fn package_blocking(&self, build_dir: &Path, output_name: &str) -> Result<PathBuf> {
        if !build_dir.is_dir() {
            return Err(Error::Packaging(format!(
                "No output directory was created at {}.",
                build_dir.display()
            )));
        }

        let removed = self.remove_ignored(build_dir)?;
        log::debug!("Removed {} ignored files from {}", removed, build_dir.display());

        let OutputListing { files, empty_dirs } = list_output(build_dir)?;
        match files.as_slice() {
            [] => Err(Error::Packaging(format!(
                "No files found in {}.",
                build_dir.display()
            ))),
            [single] => {
                let extension = single
                    .extension()
                    .map(|e| format!(".{}", e.to_string_lossy()))
                    .unwrap_or_default();
                let dest = self
                    .release_dir
                    .join(format!("{}{}", output_name, extension));
                log::debug!("Moving {} -> {}", single.display(), dest.display());
                fs::move_file(single, &dest)?;
                Ok(dest)
            }
            _ => {
                let dest = self.release_dir.join(format!("{}.zip", output_name));
                log::debug!("Archiving {} files into {}", files.len(), dest.display());
                if let Err(e) = self.write_archive(build_dir, &files, &empty_dirs, &dest) {
                    let _ = std::fs::remove_file(&dest);
                    return Err(e);
                }
                Ok(dest)
            }
        }
    }

    /// Deletes top-level files whose names match an ignored pattern.
    fn remove_ignored(&self, build_dir: &Path) -> Result<usize> {
        let options = glob::MatchOptions {
            case_sensitive: !cfg!(windows),
            ..Default::default()
        };
        let mut removed = 0;
        for entry in std::fs::read_dir(build_dir).fs_context("reading publish output", build_dir)? {
            let entry = entry.fs_context("reading publish output", build_dir)?;
            let is_file = entry
                .file_type()
                .fs_context("inspecting publish output", entry.path())?
                .is_file();
            if !is_file {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if self.ignored.iter().any(|p| p.matches_with(&name, options)) {
                std::fs::remove_file(entry.path()).fs_context("removing ignored file", entry.path())?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn write_archive(
        &self,
        build_dir: &Path,
        files: &[PathBuf],
        empty_dirs: &[PathBuf],
        dest: &Path,
    ) -> Result<()> {
        let (method, level) = self.compression.zip_options();

        let prefix = match (self.archive_subfolder, build_dir.file_name()) {
            (true, Some(name)) => format!("{}/", name.to_string_lossy()),
            _ => String::new(),
        };

        let archive = File::create(dest).fs_context("creating archive", dest)?;
        let mut zip = ZipWriter::new(archive);

        for file in files {
            let entry_name = entry_name(build_dir, file)?;

            #[allow(unused_mut)]
            let mut options = SimpleFileOptions::default()
                .compression_method(method)
                .compression_level(level);
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let mode = std::fs::metadata(file)
                    .fs_context("reading file permissions", file)?
                    .permissions()
                    .mode();
                options = options.unix_permissions(mode);
            }

            zip.start_file(format!("{}{}", prefix, entry_name), options)?;
            let mut source = File::open(file).fs_context("opening file for archiving", file)?;
            std::io::copy(&mut source, &mut zip).fs_context("writing archive entry", file)?;
        }

        for dir in empty_dirs {
            let entry_name = entry_name(build_dir, dir)?;
            let options = SimpleFileOptions::default().compression_method(method);
            zip.add_directory(format!("{}{}/", prefix, entry_name), options)?;
        }

        zip.finish()?;
        Ok(())
    }
}

/// Archive entry name of `path` relative to `build_dir`, `/`-separated.
fn entry_name(build_dir: &Path, path: &Path) -> Result<String> {
    let Ok(relative) = path.strip_prefix(build_dir) else {
        crate::bail!("{} is outside {}", path.display(), build_dir.display());
    };
    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

/// What is left in a publish directory after filtering.
struct OutputListing {
    /// Regular files, in walk order
    files: Vec<PathBuf>,
    /// Subdirectories without any entries
    empty_dirs: Vec<PathBuf>,
}

/// Lists every regular file and empty subdirectory below `dir`, in a stable order.
fn list_output(dir: &Path) -> Result<OutputListing> {
    let mut files = Vec::new();
    let mut empty_dirs = Vec::new();
    for entry in walkdir::WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        } else if entry.file_type().is_dir() {
            let mut children = std::fs::read_dir(entry.path())
                .fs_context("reading publish output", entry.path())?;
            if children.next().is_none() {
                empty_dirs.push(entry.into_path());
            }
        }
    }
    Ok(OutputListing { files, empty_dirs })
}
