//! Scaffold planning, the pure half of the plan/apply split.
//!
//! [`ScaffoldPlan::build`] computes every intended file operation up front
//! from validated inputs, without touching the filesystem. The executor in
//! `BundleService` then applies the steps sequentially, so a partial
//! failure is easy to reason about and `--dry-run` can print exactly what
//! would happen.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{BundleName, ConfigNode, Namespace};

/// Marker line closing the bundle list in the kernel bootstrap.
pub const KERNEL_MARKER: &str = ");";
/// Marker line closing the namespace map in the autoload configuration.
pub const AUTOLOAD_MARKER: &str = "));";

// ── AppPaths ──────────────────────────────────────────────────────────────────

/// Locations of the application files the scaffold touches.
///
/// Defaults follow the Symfony2-era layout; every path can be overridden
/// through the CLI configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub src_dir: PathBuf,
    pub kernel_file: PathBuf,
    pub autoload_file: PathBuf,
    pub config_file: PathBuf,
    pub routing_file: PathBuf,
}

impl Default for AppPaths {
    fn default() -> Self {
        Self {
            src_dir: "src".into(),
            kernel_file: "app/AppKernel.php".into(),
            autoload_file: "app/autoload.php".into(),
            config_file: "app/config/config.yml".into(),
            routing_file: "app/config/routing.yml".into(),
        }
    }
}

impl AppPaths {
    /// The same paths, resolved against an application root directory.
    pub fn rooted_at(&self, root: &Path) -> Self {
        Self {
            src_dir: root.join(&self.src_dir),
            kernel_file: root.join(&self.kernel_file),
            autoload_file: root.join(&self.autoload_file),
            config_file: root.join(&self.config_file),
            routing_file: root.join(&self.routing_file),
        }
    }
}

// ── Plan steps ────────────────────────────────────────────────────────────────

/// A routing entry to merge into a routing configuration file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoutingEntry {
    /// `resource: "@XyzBundle/Resources/config/routing.yml"`
    Resource { resource: String },
    /// `pattern: /xyz` + `defaults: { _controller: "XyzBundle:Default:index" }`
    Controller { pattern: String, controller: String },
}

impl RoutingEntry {
    /// The config subtree this entry expands to.
    pub fn to_node(&self) -> ConfigNode {
        match self {
            Self::Resource { resource } => {
                ConfigNode::Mapping(vec![("resource".into(), ConfigNode::string(resource))])
            }
            Self::Controller {
                pattern,
                controller,
            } => ConfigNode::Mapping(vec![
                ("pattern".into(), ConfigNode::string(pattern)),
                (
                    "defaults".into(),
                    ConfigNode::Mapping(vec![(
                        "_controller".into(),
                        ConfigNode::string(controller),
                    )]),
                ),
            ]),
        }
    }
}

/// One intended file operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum PlanStep {
    /// Materialise the rendered skeleton under `dest`.
    MirrorSkeleton { dest: PathBuf },
    /// Rename a generated file (the bundle class takes the bundle's name).
    RenameFile { from: PathBuf, to: PathBuf },
    CreateDir { path: PathBuf },
    /// Idempotent marker-based line insertion.
    InsertLine {
        file: PathBuf,
        marker: String,
        line: String,
    },
    /// Register the bundle under the first `mappings` mapping in `file`.
    MergeOrmMappings { file: PathBuf, bundle: String },
    /// Add `key: entry` to a routing file unless the key exists.
    MergeRouting {
        file: PathBuf,
        key: String,
        entry: RoutingEntry,
        create_if_missing: bool,
    },
    /// Write the sample entity-mapping file unless it already exists.
    SeedOrmSample { path: PathBuf },
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MirrorSkeleton { dest } => {
                write!(f, "materialise bundle skeleton in {}", dest.display())
            }
            Self::RenameFile { from, to } => {
                write!(f, "rename {} -> {}", from.display(), to.display())
            }
            Self::CreateDir { path } => write!(f, "create directory {}", path.display()),
            Self::InsertLine { file, marker, line } => write!(
                f,
                "insert `{}` before `{}` in {}",
                line.trim(),
                marker,
                file.display()
            ),
            Self::MergeOrmMappings { file, bundle } => write!(
                f,
                "register {} under the ORM mappings in {}",
                bundle,
                file.display()
            ),
            Self::MergeRouting { file, key, .. } => {
                write!(f, "add routing key '{}' to {}", key, file.display())
            }
            Self::SeedOrmSample { path } => {
                write!(f, "seed sample entity mapping at {}", path.display())
            }
        }
    }
}

// ── ScaffoldPlan ──────────────────────────────────────────────────────────────

/// The full ordered list of operations for one `init` invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaffoldPlan {
    /// Where the bundle will live: `<src_dir>/<Vendor>/<...>/<XyzBundle>`.
    pub bundle_dir: PathBuf,
    pub steps: Vec<PlanStep>,
}

impl ScaffoldPlan {
    /// Compute the plan. Pure: no I/O, no existence checks.
    pub fn build(namespace: &Namespace, bundle: &BundleName, paths: &AppPaths) -> Self {
        let bundle_dir = paths.src_dir.join(namespace.relative_dir());
        let lowercase = bundle.lowercase();

        let steps = vec![
            PlanStep::MirrorSkeleton {
                dest: bundle_dir.clone(),
            },
            PlanStep::RenameFile {
                from: bundle_dir.join("Bundle.php"),
                to: bundle_dir.join(format!("{bundle}.php")),
            },
            PlanStep::CreateDir {
                path: bundle_dir.join("Entity"),
            },
            PlanStep::MergeOrmMappings {
                file: paths.config_file.clone(),
                bundle: bundle.as_str().to_string(),
            },
            PlanStep::InsertLine {
                file: paths.kernel_file.clone(),
                marker: KERNEL_MARKER.to_string(),
                line: kernel_registration_line(namespace, bundle),
            },
            PlanStep::InsertLine {
                file: paths.autoload_file.clone(),
                marker: AUTOLOAD_MARKER.to_string(),
                line: autoload_registration_line(namespace),
            },
            PlanStep::MergeRouting {
                file: paths.routing_file.clone(),
                key: lowercase.clone(),
                entry: RoutingEntry::Resource {
                    resource: format!("@{bundle}/Resources/config/routing.yml"),
                },
                create_if_missing: true,
            },
            PlanStep::MergeRouting {
                file: bundle_dir.join("Resources/config/routing.yml"),
                key: format!("{lowercase}_default"),
                entry: RoutingEntry::Controller {
                    pattern: format!("/{lowercase}"),
                    controller: format!("{bundle}:Default:index"),
                },
                create_if_missing: false,
            },
            PlanStep::SeedOrmSample {
                path: bundle_dir.join("Resources/config/doctrine/mapping.orm.yml"),
            },
        ];

        Self { bundle_dir, steps }
    }
}

/// Bundle registration line for the kernel bootstrap.
fn kernel_registration_line(namespace: &Namespace, bundle: &BundleName) -> String {
    format!("            new {namespace}\\{bundle}(),\n")
}

/// Namespace registration line for the autoload configuration.
fn autoload_registration_line(namespace: &Namespace) -> String {
    format!(
        "    '{}'             => __DIR__.'/../src',\n",
        namespace.vendor()
    )
}

// ── tests ─────────────────────────────────────────────────────────────────────
