//! Bundle skeleton sources.
//!
//! [`BuiltinSkeleton`] is the embedded default shipped with the binary;
//! [`DirSkeletonStore`] loads a user-provided skeleton directory instead
//! (`bundlegen init --skeleton DIR`). Both hand out unrendered files;
//! `{{ namespace }}` and `{{ bundle }}` placeholders are substituted by the
//! renderer during the mirror step.

use std::fs;
use std::path::PathBuf;

use tracing::debug;
use walkdir::WalkDir;

use bundlegen_core::{
    application::{
        ApplicationError,
        ports::{SkeletonFile, SkeletonStore},
    },
    error::BundlegenResult,
};

// ── built-in skeleton content ─────────────────────────────────────────────────

const BUNDLE_CLASS: &str = r#"<?php

namespace {{ namespace }};

use Symfony\Component\HttpKernel\Bundle\Bundle;

class {{ bundle }} extends Bundle
{
}
"#;

const DEFAULT_CONTROLLER: &str = r#"<?php

namespace {{ namespace }}\Controller;

use Symfony\Bundle\FrameworkBundle\Controller\Controller;

class DefaultController extends Controller
{
    public function indexAction()
    {
        return $this->render('{{ bundle }}:Default:index.html.twig');
    }
}
"#;

const INDEX_VIEW: &str = "<h1>Welcome to the {{ bundle }} bundle!</h1>\n";

/// Seed for new bundles' entity definitions, written once per bundle unless
/// the file already exists.
const ORM_SAMPLE: &str = r#"{{ namespace }}\Entity\User:
  type: entity
  table: cms_users
  id:
    id:
      type: integer
      generator:
        strategy: AUTO
  fields:
    name:
      type: string
      length: 50
  oneToOne:
    address:
      targetEntity: Address
      joinColumn:
        name: address_id
        referencedColumnName: id
  oneToMany:
    phonenumbers:
      targetEntity: Phonenumber
      mappedBy: user
      cascade: ["persist", "merge"]
  manyToMany:
    groups:
      targetEntity: Group
      joinTable:
        name: cms_users_groups
        joinColumns:
          user_id:
            referencedColumnName: id
        inverseJoinColumns:
          group_id:
            referencedColumnName: id
  lifecycleCallbacks:
    prePersist: [ doStuffOnPrePersist, doOtherStuffOnPrePersistToo ]
    postPersist: [ doStuffOnPostPersist ]
"#;

// ── BuiltinSkeleton ───────────────────────────────────────────────────────────

/// The skeleton embedded in the binary.
///
/// `Bundle.php` keeps its generic name here; the plan renames it to
/// `<BundleName>.php` right after the mirror step.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSkeleton;

impl BuiltinSkeleton {
    pub fn new() -> Self {
        Self
    }
}

impl SkeletonStore for BuiltinSkeleton {
    fn files(&self) -> BundlegenResult<Vec<SkeletonFile>> {
        Ok(vec![
            SkeletonFile {
                path: "Bundle.php".into(),
                content: BUNDLE_CLASS.into(),
            },
            SkeletonFile {
                path: "Controller/DefaultController.php".into(),
                content: DEFAULT_CONTROLLER.into(),
            },
            SkeletonFile {
                path: "Resources/config/routing.yml".into(),
                content: String::new(),
            },
            SkeletonFile {
                path: "Resources/views/Default/index.html.twig".into(),
                content: INDEX_VIEW.into(),
            },
        ])
    }

    fn entity_mapping_sample(&self) -> String {
        ORM_SAMPLE.into()
    }
}

// ── DirSkeletonStore ──────────────────────────────────────────────────────────

/// Skeleton loaded from a directory on disk.
pub struct DirSkeletonStore {
    root: PathBuf,
}

impl DirSkeletonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SkeletonStore for DirSkeletonStore {
    fn files(&self) -> BundlegenResult<Vec<SkeletonFile>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: self.root.clone(),
                reason: format!("Failed to walk skeleton directory: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|e| ApplicationError::FilesystemError {
                    path: entry.path().to_path_buf(),
                    reason: format!("Skeleton file outside its root: {e}"),
                })?
                .to_path_buf();
            let content =
                fs::read_to_string(entry.path()).map_err(|e| ApplicationError::FilesystemError {
                    path: entry.path().to_path_buf(),
                    reason: format!("Failed to read skeleton file: {e}"),
                })?;

            debug!(file = %rel.display(), "Loaded skeleton file");
            files.push(SkeletonFile { path: rel, content });
        }

        Ok(files)
    }

    fn entity_mapping_sample(&self) -> String {
        // Custom skeletons still get the stock sample; entity definitions
        // are application data, not skeleton structure.
        ORM_SAMPLE.into()
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
