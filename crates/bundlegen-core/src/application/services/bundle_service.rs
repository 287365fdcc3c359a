//! Bundle Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Refuse if the bundle directory already exists
//! 2. Build the scaffold plan (pure)
//! 3. Apply the plan steps sequentially through the driven ports
//!
//! It implements the driving port (incoming) and uses driven ports
//! (outgoing). Validation of namespace and bundle name happens earlier, at
//! construction of the domain values; by the time this service runs, its
//! inputs are known-good.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        plan::{AppPaths, PlanStep, RoutingEntry, ScaffoldPlan},
        ports::{ConfigStore, Filesystem, SkeletonStore, TemplateRenderer},
    },
    domain::{BundleName, ConfigNode, InsertOutcome, Namespace, RenderContext, insert_before_marker},
    error::BundlegenResult,
};

/// What a completed scaffold did, for display purposes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Root of the generated bundle.
    pub bundle_dir: PathBuf,
    /// Files written under the bundle directory.
    pub files_created: Vec<PathBuf>,
    /// Pre-existing application files that were edited.
    pub files_patched: Vec<PathBuf>,
}

/// Main scaffolding service.
///
/// Orchestrates skeleton rendering, file patching, and config merging.
pub struct BundleService {
    skeleton: Box<dyn SkeletonStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    configs: Box<dyn ConfigStore>,
}

impl BundleService {
    /// Create a new bundle service with the given adapters.
    pub fn new(
        skeleton: Box<dyn SkeletonStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        configs: Box<dyn ConfigStore>,
    ) -> Self {
        Self {
            skeleton,
            renderer,
            filesystem,
            configs,
        }
    }

    /// Scaffold a new bundle into the application tree.
    ///
    /// This is the main use case. The target-exists check runs before any
    /// step so a refused invocation has no side effects at all; afterwards
    /// steps apply in plan order and the first failure aborts.
    #[instrument(skip_all, fields(namespace = %namespace, bundle = %bundle))]
    pub fn generate(
        &self,
        namespace: &Namespace,
        bundle: &BundleName,
        paths: &AppPaths,
    ) -> BundlegenResult<ScaffoldReport> {
        let plan = ScaffoldPlan::build(namespace, bundle, paths);

        if self.filesystem.exists(&plan.bundle_dir) {
            return Err(ApplicationError::TargetExists {
                path: plan.bundle_dir,
            }
            .into());
        }

        info!(
            bundle_dir = %plan.bundle_dir.display(),
            steps = plan.steps.len(),
            "Scaffold started"
        );

        let ctx = RenderContext::new(namespace, bundle);
        let mut report = ScaffoldReport {
            bundle_dir: plan.bundle_dir.clone(),
            ..ScaffoldReport::default()
        };

        for step in &plan.steps {
            debug!(%step, "Applying");
            self.apply_step(step, &ctx, &mut report)?;
        }

        info!("Scaffold completed successfully");
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Step execution
    // -------------------------------------------------------------------------

    fn apply_step(
        &self,
        step: &PlanStep,
        ctx: &RenderContext,
        report: &mut ScaffoldReport,
    ) -> BundlegenResult<()> {
        match step {
            PlanStep::MirrorSkeleton { dest } => self.mirror_skeleton(dest, ctx, report),
            PlanStep::RenameFile { from, to } => {
                self.filesystem.rename(from, to)?;
                if let Some(created) = report
                    .files_created
                    .iter_mut()
                    .find(|p| p.as_path() == from.as_path())
                {
                    *created = to.clone();
                }
                Ok(())
            }
            PlanStep::CreateDir { path } => self.filesystem.create_dir_all(path),
            PlanStep::InsertLine { file, marker, line } => {
                self.insert_line(file, marker, line)?;
                report.files_patched.push(file.clone());
                Ok(())
            }
            PlanStep::MergeOrmMappings { file, bundle } => {
                self.merge_orm_mappings(file, bundle)?;
                report.files_patched.push(file.clone());
                Ok(())
            }
            PlanStep::MergeRouting {
                file,
                key,
                entry,
                create_if_missing,
            } => {
                self.merge_routing(file, key, entry, *create_if_missing)?;
                report.files_patched.push(file.clone());
                Ok(())
            }
            PlanStep::SeedOrmSample { path } => {
                if !self.filesystem.exists(path) {
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }
                    let sample = self
                        .renderer
                        .render(&self.skeleton.entity_mapping_sample(), ctx)?;
                    self.filesystem.write_file(path, &sample)?;
                    report.files_created.push(path.clone());
                }
                Ok(())
            }
        }
    }

    /// Render every skeleton file (contents and relative path) and write it
    /// under `dest`.
    fn mirror_skeleton(
        &self,
        dest: &Path,
        ctx: &RenderContext,
        report: &mut ScaffoldReport,
    ) -> BundlegenResult<()> {
        self.filesystem.create_dir_all(dest)?;

        for file in self.skeleton.files()? {
            let rel = self
                .renderer
                .render(&file.path.to_string_lossy(), ctx)?;
            let content = self.renderer.render(&file.content, ctx)?;
            let path = dest.join(rel);

            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &content)?;
            report.files_created.push(path);
        }

        Ok(())
    }

    /// Idempotent marker-based insertion into an existing file.
    fn insert_line(&self, file: &Path, marker: &str, line: &str) -> BundlegenResult<()> {
        self.filesystem.locked_rewrite(file, &mut |content| {
            let (next, outcome) = insert_before_marker(content, marker, line);
            match outcome {
                InsertOutcome::Inserted => Ok(next),
                InsertOutcome::AlreadyPresent => {
                    debug!(file = %file.display(), "line already present, nothing to insert");
                    Ok(next)
                }
                InsertOutcome::MarkerNotFound => Err(ApplicationError::MarkerNotFound {
                    path: file.to_path_buf(),
                    marker: marker.to_string(),
                }
                .into()),
            }
        })
    }

    /// Add the bundle under the first `mappings` mapping in the ORM config.
    fn merge_orm_mappings(&self, file: &Path, bundle: &str) -> BundlegenResult<()> {
        let mut root = self.configs.load(file)?;

        let node = root
            .find_key_mut("mappings")
            .ok_or_else(|| ApplicationError::MappingsNotFound {
                path: file.to_path_buf(),
            })?;

        match node {
            ConfigNode::Mapping(_) | ConfigNode::Null => {
                if !node.contains_key(bundle) {
                    node.insert(bundle, ConfigNode::Null);
                }
            }
            _ => {
                return Err(ApplicationError::ConfigError {
                    path: file.to_path_buf(),
                    reason: "'mappings' is not a mapping".into(),
                }
                .into());
            }
        }

        self.configs.save(file, &root)
    }

    /// Add `key: entry` to a routing file unless the key already exists.
    fn merge_routing(
        &self,
        file: &Path,
        key: &str,
        entry: &RoutingEntry,
        create_if_missing: bool,
    ) -> BundlegenResult<()> {
        let mut root = if create_if_missing {
            self.configs.load_or_empty(file)?
        } else {
            self.configs.load(file)?
        };

        if !root.contains_key(key) {
            root.insert(key, entry.to_node());
        }

        self.configs.save(file, &root)
    }
}
