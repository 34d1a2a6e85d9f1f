//! File system utilities for release collection.
//!
//! Idempotent directory creation and removal, plus a file move that works
//! across filesystems.

use crate::collector::{Result, error::ErrorExt};
use std::{
    io::{self},
    path::Path,
};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Returns whether `path` exists and contains at least one entry.
pub async fn has_entries(path: &Path) -> Result<bool> {
    let mut entries = match fs::read_dir(path).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e).fs_context("reading directory", path),
    };
    Ok(entries
        .next_entry()
        .await
        .fs_context("reading directory", path)?
        .is_some())
}

/// Moves a file, falling back to copy and delete when a rename is not possible.
///
/// Blocking; call from `spawn_blocking`.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(dest_dir) = to.parent() {
        std::fs::create_dir_all(dest_dir).fs_context("creating destination directory", dest_dir)?;
    }
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::debug!(
                "rename {} -> {} failed ({}), copying instead",
                from.display(),
                to.display(),
                e
            );
            std::fs::copy(from, to).fs_context("copying artifact", to)?;
            std::fs::remove_file(from).fs_context("removing moved file", from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_dir_all_with_erase_empties_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("release");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("old.zip"), b"x").unwrap();

        create_dir_all(&dir, true).await.unwrap();

        assert!(dir.is_dir());
        assert!(!has_entries(&dir).await.unwrap());
    }

    #[tokio::test]
    async fn missing_paths_are_fine() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing");
        remove_dir_all(&missing).await.unwrap();
        assert!(!has_entries(&missing).await.unwrap());
    }

    #[test]
    fn move_file_creates_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let from = tmp.path().join("a.bin");
        std::fs::write(&from, b"data").unwrap();
        let to = tmp.path().join("out").join("b.bin");

        move_file(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(std::fs::read(&to).unwrap(), b"data");
    }
}
