//! Bundle identity: namespace and bundle name value objects.
//!
//! # Design
//!
//! These are validate-on-construction newtypes: once you hold a
//! [`Namespace`] or [`BundleName`], every invariant below is guaranteed.
//! All parsing goes through `FromStr`/constructors; there is no way to
//! build an unvalidated value.
//!
//! Invariants (from the source framework's conventions):
//!
//! - a namespace ends in `Bundle`, uses `\` separators (`/` is accepted on
//!   input and normalised), contains only `[A-Za-z0-9_\-]` in segments, and
//!   has at least one separator (a vendor segment is mandatory);
//! - a bundle name ends in `Bundle`; when not given explicitly it is the
//!   concatenation of the namespace segments.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::error::DomainError;

// ── Namespace ─────────────────────────────────────────────────────────────────

/// A validated bundle namespace such as `Vendor\BlogBundle`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// The namespace with `\` separators, as it appears in generated code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `\`-separated segments, vendor first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('\\')
    }

    /// The vendor segment (first component).
    pub fn vendor(&self) -> &str {
        // Validation guarantees at least one separator, so the first
        // segment always exists and is non-empty.
        self.0.split('\\').next().unwrap_or_default()
    }

    /// Directory path relative to the source root: `Vendor/BlogBundle`.
    pub fn relative_dir(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Namespace {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Forward slashes are accepted on the command line where a literal
        // backslash is awkward to type.
        let normalized = s.replace('/', "\\");

        if !normalized.ends_with("Bundle") {
            return Err(DomainError::InvalidNamespace {
                namespace: s.to_string(),
                reason: "must end with 'Bundle'".into(),
            });
        }

        if normalized
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '\\' | '-')))
        {
            return Err(DomainError::InvalidNamespace {
                namespace: s.to_string(),
                reason: "contains invalid characters".into(),
            });
        }

        if !normalized.contains('\\') {
            return Err(DomainError::InvalidNamespace {
                namespace: s.to_string(),
                reason: format!(
                    "must contain a vendor segment (e.g. \"VendorName\\{normalized}\" \
                     instead of simply \"{normalized}\")"
                ),
            });
        }

        if normalized.split('\\').any(str::is_empty) {
            return Err(DomainError::InvalidNamespace {
                namespace: s.to_string(),
                reason: "contains an empty segment".into(),
            });
        }

        Ok(Self(normalized))
    }
}

// ── BundleName ────────────────────────────────────────────────────────────────

/// A validated bundle name such as `VendorBlogBundle`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BundleName(String);

impl BundleName {
    /// Parse an explicitly supplied bundle name.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if !name.ends_with("Bundle") {
            return Err(DomainError::InvalidBundleName {
                name,
                reason: "must end with 'Bundle'".into(),
            });
        }
        if name
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-')))
        {
            return Err(DomainError::InvalidBundleName {
                name,
                reason: "contains invalid characters".into(),
            });
        }
        Ok(Self(name))
    }

    /// Default name for a namespace: its segments concatenated
    /// (`Vendor\BlogBundle` → `VendorBlogBundle`).
    pub fn derived_from(namespace: &Namespace) -> Self {
        Self(namespace.segments().collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form, used as the routing key prefix.
    pub fn lowercase(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for BundleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── RenderContext ─────────────────────────────────────────────────────────────

/// Variables available to skeleton rendering: `namespace` and `bundle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    namespace: String,
    bundle: String,
}

impl RenderContext {
    pub fn new(namespace: &Namespace, bundle: &BundleName) -> Self {
        Self {
            namespace: namespace.as_str().to_string(),
            bundle: bundle.as_str().to_string(),
        }
    }

    /// `(name, value)` pairs, in substitution order.
    pub fn vars(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("namespace", self.namespace.as_str()),
            ("bundle", self.bundle.as_str()),
        ]
        .into_iter()
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
