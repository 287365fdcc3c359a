//! Local filesystem adapter using std::fs.
//!
//! The interesting method is [`Filesystem::locked_rewrite`]: an exclusive
//! advisory lock is taken on the target and held across the whole
//! read-modify-write, and the new content is written to a temporary file in
//! the same directory and renamed over the target. An interrupted rewrite
//! therefore never leaves a half-written file, and two concurrent
//! invocations against the same file serialise on the lock.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read as _, Write as _};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::warn;

use bundlegen_core::{application::ports::Filesystem, error::BundlegenResult};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> BundlegenResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn read_to_string(&self, path: &Path) -> BundlegenResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> BundlegenResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> BundlegenResult<()> {
        fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename file"))
    }

    fn locked_rewrite(
        &self,
        path: &Path,
        edit: &mut dyn FnMut(&str) -> BundlegenResult<String>,
    ) -> BundlegenResult<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| map_io_error(path, e, "open file"))?;

        fs2::FileExt::lock_exclusive(&file).map_err(|e| map_io_error(path, e, "lock file"))?;

        let result = rewrite_under_lock(&mut file, path, edit);

        // Dropping the handle would also release the lock; the explicit
        // unlock keeps the release visible on every exit path.
        if let Err(e) = fs2::FileExt::unlock(&file) {
            warn!(path = %path.display(), error = %e, "failed to release file lock");
        }

        result
    }
}

/// The read-modify-write itself, run while the caller holds the lock.
fn rewrite_under_lock(
    file: &mut File,
    path: &Path,
    edit: &mut dyn FnMut(&str) -> BundlegenResult<String>,
) -> BundlegenResult<()> {
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| map_io_error(path, e, "read file"))?;

    let next = edit(&content)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp =
        NamedTempFile::new_in(dir).map_err(|e| map_io_error(path, e, "create temporary file"))?;
    tmp.write_all(next.as_bytes())
        .map_err(|e| map_io_error(path, e, "write temporary file"))?;
    tmp.persist(path)
        .map_err(|e| map_io_error(path, e.error, "replace file"))?;

    Ok(())
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> bundlegen_core::error::BundlegenError {
    use bundlegen_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bundlegen_core::application::ApplicationError;
    use bundlegen_core::domain::{InsertOutcome, insert_before_marker};
    use bundlegen_core::error::BundlegenError;

    #[test]
    fn locked_rewrite_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("bootstrap.php");
        fs::write(&target, "a\nb\n);\n").unwrap();

        let fs_adapter = LocalFilesystem::new();
        fs_adapter
            .locked_rewrite(&target, &mut |content| {
                let (next, _) = insert_before_marker(content, ");", "c\n");
                Ok(next)
            })
            .unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "a\nb\nc\n);\n");
    }

    #[test]
    fn locked_rewrite_is_idempotent_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("bootstrap.php");
        fs::write(&target, "a\n);\n").unwrap();

        let fs_adapter = LocalFilesystem::new();
        let mut edit = |content: &str| {
            let (next, _) = insert_before_marker(content, ");", "c\n");
            Ok(next)
        };
        fs_adapter.locked_rewrite(&target, &mut edit).unwrap();
        fs_adapter.locked_rewrite(&target, &mut edit).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "a\nc\n);\n");
    }

    #[test]
    fn locked_rewrite_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nope.php");

        let err = LocalFilesystem::new()
            .locked_rewrite(&target, &mut |c| Ok(c.to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            BundlegenError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn edit_error_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("bootstrap.php");
        fs::write(&target, "original\n").unwrap();

        let result = LocalFilesystem::new().locked_rewrite(&target, &mut |content| {
            let (_, outcome) = insert_before_marker(content, ");", "c\n");
            assert_eq!(outcome, InsertOutcome::MarkerNotFound);
            Err(ApplicationError::MarkerNotFound {
                path: target.clone(),
                marker: ");".into(),
            }
            .into())
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&target).unwrap(), "original\n");
    }

    #[test]
    fn rename_moves_file() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("Bundle.php");
        let to = dir.path().join("AcmeDemoBundle.php");
        fs::write(&from, "x").unwrap();

        LocalFilesystem::new().rename(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "x");
    }
}
