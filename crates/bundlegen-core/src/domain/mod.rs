//! Core domain layer for bundlegen.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! All I/O, templating, and configuration parsing concerns are handled via
//! ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror
//! - **Immutable values**: All domain objects are Clone + PartialEq

pub mod bundle;
pub mod config_tree;
pub mod error;
pub mod merge;

// Re-exports for convenience
pub use bundle::{BundleName, Namespace, RenderContext};
pub use config_tree::{ConfigNode, ConfigScalar};
pub use error::{DomainError, ErrorCategory};
pub use merge::{InsertOutcome, insert_before_marker};
