//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use bundlegen_core::application::ports::Filesystem;
use bundlegen_core::error::BundlegenResult;

/// In-memory filesystem for testing.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.files.keys().cloned().collect()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.files.clear();
        inner.directories.clear();
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error() -> bundlegen_core::error::BundlegenError {
    bundlegen_core::application::ApplicationError::StoreLockError.into()
}

fn not_found(path: &Path) -> bundlegen_core::error::BundlegenError {
    bundlegen_core::application::ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "file not found".into(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> BundlegenResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> BundlegenResult<String> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        inner.files.get(path).cloned().ok_or_else(|| not_found(path))
    }

    fn write_file(&self, path: &Path, content: &str) -> BundlegenResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> BundlegenResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        let content = inner.files.remove(from).ok_or_else(|| not_found(from))?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn locked_rewrite(
        &self,
        path: &Path,
        edit: &mut dyn FnMut(&str) -> BundlegenResult<String>,
    ) -> BundlegenResult<()> {
        // The write guard doubles as the exclusive lock: it is held across
        // the whole read-modify-write, like the advisory lock in
        // `LocalFilesystem`.
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        let content = inner.files.get(path).cloned().ok_or_else(|| not_found(path))?;
        let next = edit(&content)?;
        inner.files.insert(path.to_path_buf(), next);
        Ok(())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips() {
        let fs = MemoryFilesystem::new();
        fs.write_file(Path::new("a/b.txt"), "hello").unwrap();
        assert_eq!(fs.read_file(Path::new("a/b.txt")).as_deref(), Some("hello"));
        assert_eq!(fs.read_to_string(Path::new("a/b.txt")).unwrap(), "hello");
    }

    #[test]
    fn create_dir_all_registers_every_ancestor() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("src/Acme/DemoBundle")).unwrap();
        assert!(fs.exists(Path::new("src")));
        assert!(fs.exists(Path::new("src/Acme")));
        assert!(fs.exists(Path::new("src/Acme/DemoBundle")));
    }

    #[test]
    fn rename_moves_content() {
        let fs = MemoryFilesystem::new();
        fs.write_file(Path::new("Bundle.php"), "x").unwrap();
        fs.rename(Path::new("Bundle.php"), Path::new("AcmeBundle.php"))
            .unwrap();
        assert!(!fs.exists(Path::new("Bundle.php")));
        assert_eq!(fs.read_file(Path::new("AcmeBundle.php")).as_deref(), Some("x"));
    }

    #[test]
    fn rename_missing_source_is_an_error() {
        let fs = MemoryFilesystem::new();
        assert!(fs.rename(Path::new("a"), Path::new("b")).is_err());
    }

    #[test]
    fn locked_rewrite_edits_in_place() {
        let fs = MemoryFilesystem::new();
        fs.write_file(Path::new("f"), "old").unwrap();
        fs.locked_rewrite(Path::new("f"), &mut |c| Ok(format!("{c}-new")))
            .unwrap();
        assert_eq!(fs.read_file(Path::new("f")).as_deref(), Some("old-new"));
    }

    #[test]
    fn locked_rewrite_missing_file_is_an_error() {
        let fs = MemoryFilesystem::new();
        assert!(fs.locked_rewrite(Path::new("f"), &mut |c| Ok(c.into())).is_err());
    }

    #[test]
    fn clear_empties_everything() {
        let fs = MemoryFilesystem::new();
        fs.write_file(Path::new("f"), "x").unwrap();
        fs.create_dir_all(Path::new("d")).unwrap();
        fs.clear();
        assert!(fs.list_files().is_empty());
        assert!(!fs.exists(Path::new("d")));
    }
}
