use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("invalid bundle name '{name}': {reason}")]
    InvalidBundleName { name: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidNamespace { reason, .. } => vec![
                format!("Namespace problem: {reason}"),
                "A namespace looks like Vendor\\BlogBundle (forward slashes also work)".into(),
                "Quote the argument so the shell keeps the backslash: \"Acme\\BlogBundle\"".into(),
            ],
            Self::InvalidBundleName { reason, .. } => vec![
                format!("Bundle name problem: {reason}"),
                "A bundle name looks like VendorBlogBundle and must end with 'Bundle'".into(),
                "Omit the argument to derive it from the namespace".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidNamespace { .. } | Self::InvalidBundleName { .. } => {
                ErrorCategory::Validation
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
