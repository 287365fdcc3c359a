//! Infrastructure adapters for bundlegen.
//!
//! This crate implements the ports defined in
//! `bundlegen_core::application::ports`. It contains all external
//! dependencies and I/O operations.

pub mod filesystem;
pub mod renderer;
pub mod skeleton;
pub mod yaml;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::PlaceholderRenderer;
pub use skeleton::{BuiltinSkeleton, DirSkeletonStore};
pub use yaml::YamlConfigStore;
