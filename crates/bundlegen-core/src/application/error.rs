//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Destination bundle directory already exists.
    #[error("bundle already exists at {}", path.display())]
    TargetExists { path: PathBuf },

    /// The insertion marker never occurred in the target file.
    #[error("marker `{marker}` not found in {}", path.display())]
    MarkerNotFound { path: PathBuf, marker: String },

    /// No `mappings` mapping anywhere in the ORM configuration.
    #[error("no 'mappings' section found in {}", path.display())]
    MappingsNotFound { path: PathBuf },

    /// A configuration file could not be parsed, serialised, or had an
    /// unexpected shape.
    #[error("configuration error in {}: {reason}", path.display())]
    ConfigError { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// Skeleton rendering failed.
    #[error("rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("store lock error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TargetExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different namespace or remove the existing bundle".into(),
            ],
            Self::MarkerNotFound { path, marker } => vec![
                format!(
                    "Could not find the `{marker}` anchor line in {}",
                    path.display()
                ),
                "Check that the file follows the expected bootstrap layout".into(),
                "Registration lines are inserted immediately before that anchor".into(),
            ],
            Self::MappingsNotFound { path } => vec![
                format!("{} has no 'mappings' section", path.display()),
                "Add a doctrine/orm 'mappings:' section to the application config".into(),
            ],
            Self::ConfigError { path, .. } => vec![
                format!("Failed to process: {}", path.display()),
                "Check that the file is valid YAML".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::StoreLockError => vec![
                "The target file is locked by another process".into(),
                "Try again in a moment".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TargetExists { .. } => ErrorCategory::Validation,
            Self::MarkerNotFound { .. } | Self::MappingsNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. }
            | Self::FilesystemError { .. }
            | Self::RenderingFailed { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
