//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `bundlegen-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{ConfigNode, RenderContext};
use crate::error::BundlegenResult;

/// One file of a bundle skeleton, path relative to the bundle root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonFile {
    pub path: PathBuf,
    pub content: String,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `bundlegen_adapters::filesystem::LocalFilesystem` (production)
/// - `bundlegen_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> BundlegenResult<()>;

    /// Read an entire file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> BundlegenResult<String>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> BundlegenResult<()>;

    /// Rename a file.
    fn rename(&self, from: &Path, to: &Path) -> BundlegenResult<()>;

    /// Rewrite `path` through `edit` as one exclusive read-modify-write.
    ///
    /// The implementation must hold the file exclusively for the whole
    /// sequence and must never leave a half-written target behind, even if
    /// interrupted mid-write. An error from `edit` aborts the rewrite and
    /// leaves the file untouched.
    fn locked_rewrite(
        &self,
        path: &Path,
        edit: &mut dyn FnMut(&str) -> BundlegenResult<String>,
    ) -> BundlegenResult<()>;
}

/// Port for skeleton content.
///
/// Implemented by:
/// - `bundlegen_adapters::skeleton::BuiltinSkeleton` (embedded default)
/// - `bundlegen_adapters::skeleton::DirSkeletonStore` (user-provided dir)
pub trait SkeletonStore: Send + Sync {
    /// All skeleton files, unrendered.
    fn files(&self) -> BundlegenResult<Vec<SkeletonFile>>;

    /// Sample entity-mapping document seeded into new bundles.
    fn entity_mapping_sample(&self) -> String;
}

/// Port for placeholder rendering.
///
/// Implemented by `bundlegen_adapters::renderer::PlaceholderRenderer`.
pub trait TemplateRenderer: Send + Sync {
    /// Substitute the context's variables into `template`.
    fn render(&self, template: &str, ctx: &RenderContext) -> BundlegenResult<String>;
}

/// Port for structured configuration files.
///
/// Implemented by `bundlegen_adapters::yaml::YamlConfigStore`.
pub trait ConfigStore: Send + Sync {
    /// Load a document. The file must exist.
    fn load(&self, path: &Path) -> BundlegenResult<ConfigNode>;

    /// Load a document, treating a missing file as an empty mapping.
    fn load_or_empty(&self, path: &Path) -> BundlegenResult<ConfigNode>;

    /// Serialise and write a document, replacing the file.
    fn save(&self, path: &Path, root: &ConfigNode) -> BundlegenResult<()>;
}
