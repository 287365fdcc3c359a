//! Integration tests for bundlegen-core.
//!
//! `BundleService` is exercised end-to-end against in-file fake ports, so
//! these tests cover orchestration order and error propagation without any
//! real I/O. Adapter behaviour (locking, atomic replace, YAML) is covered
//! in `bundlegen-adapters`.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use bundlegen_core::application::ApplicationError;
use bundlegen_core::prelude::*;

// ── fake filesystem ───────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct FsInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

#[derive(Debug, Clone, Default)]
struct FakeFs {
    inner: Arc<RwLock<FsInner>>,
}

impl FakeFs {
    fn new() -> Self {
        Self::default()
    }

    fn seed_file(&self, path: &str, content: &str) {
        let mut inner = self.inner.write().unwrap();
        inner.files.insert(PathBuf::from(path), content.to_string());
    }

    fn seed_dir(&self, path: &str) {
        let mut inner = self.inner.write().unwrap();
        inner.directories.insert(PathBuf::from(path));
    }

    fn read(&self, path: &str) -> Option<String> {
        let inner = self.inner.read().unwrap();
        inner.files.get(Path::new(path)).cloned()
    }
}

fn missing(path: &Path) -> BundlegenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "file not found".into(),
    }
    .into()
}

impl Filesystem for FakeFs {
    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> BundlegenResult<()> {
        let mut inner = self.inner.write().unwrap();
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> BundlegenResult<String> {
        let inner = self.inner.read().unwrap();
        inner.files.get(path).cloned().ok_or_else(|| missing(path))
    }

    fn write_file(&self, path: &Path, content: &str) -> BundlegenResult<()> {
        let mut inner = self.inner.write().unwrap();
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> BundlegenResult<()> {
        let mut inner = self.inner.write().unwrap();
        let content = inner.files.remove(from).ok_or_else(|| missing(from))?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn locked_rewrite(
        &self,
        path: &Path,
        edit: &mut dyn FnMut(&str) -> BundlegenResult<String>,
    ) -> BundlegenResult<()> {
        // The write guard is held across the whole read-modify-write,
        // mirroring the exclusivity the production adapter provides.
        let mut inner = self.inner.write().unwrap();
        let content = inner.files.get(path).cloned().ok_or_else(|| missing(path))?;
        let next = edit(&content)?;
        inner.files.insert(path.to_path_buf(), next);
        Ok(())
    }
}

// ── fake skeleton + renderer ──────────────────────────────────────────────────

struct FakeSkeleton;

impl SkeletonStore for FakeSkeleton {
    fn files(&self) -> BundlegenResult<Vec<SkeletonFile>> {
        Ok(vec![
            SkeletonFile {
                path: "Bundle.php".into(),
                content: "<?php // {{ namespace }} / {{ bundle }}\n".into(),
            },
            SkeletonFile {
                path: "Resources/config/routing.yml".into(),
                content: String::new(),
            },
        ])
    }

    fn entity_mapping_sample(&self) -> String {
        "{{ namespace }}\\Entity\\User:\n  type: entity\n".into()
    }
}

struct FakeRenderer;

impl TemplateRenderer for FakeRenderer {
    fn render(&self, template: &str, ctx: &RenderContext) -> BundlegenResult<String> {
        let mut out = template.to_string();
        for (name, value) in ctx.vars() {
            out = out.replace(&format!("{{{{ {name} }}}}"), value);
        }
        Ok(out)
    }
}

// ── fake config store ─────────────────────────────────────────────────────────
//
// Documents saved through the store land in `docs`; loads fall back to the
// fake filesystem so files the skeleton wrote (the bundle's routing.yml)
// are visible, the way the YAML adapter sees real files on disk.

#[derive(Clone)]
struct FakeConfigStore {
    fs: FakeFs,
    docs: Arc<RwLock<HashMap<PathBuf, ConfigNode>>>,
}

impl FakeConfigStore {
    fn new(fs: FakeFs) -> Self {
        Self {
            fs,
            docs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn seed(&self, path: &str, node: ConfigNode) {
        self.docs.write().unwrap().insert(PathBuf::from(path), node);
    }

    fn doc(&self, path: &str) -> Option<ConfigNode> {
        self.docs.read().unwrap().get(Path::new(path)).cloned()
    }
}

impl ConfigStore for FakeConfigStore {
    fn load(&self, path: &Path) -> BundlegenResult<ConfigNode> {
        if let Some(node) = self.docs.read().unwrap().get(path) {
            return Ok(node.clone());
        }
        let raw = self.fs.read_to_string(path)?;
        assert!(
            raw.trim().is_empty(),
            "fake store cannot parse non-empty document: {path:?}"
        );
        Ok(ConfigNode::Null)
    }

    fn load_or_empty(&self, path: &Path) -> BundlegenResult<ConfigNode> {
        if !self.fs.exists(path) && !self.docs.read().unwrap().contains_key(path) {
            return Ok(ConfigNode::empty_mapping());
        }
        self.load(path)
    }

    fn save(&self, path: &Path, root: &ConfigNode) -> BundlegenResult<()> {
        self.docs
            .write()
            .unwrap()
            .insert(path.to_path_buf(), root.clone());
        Ok(())
    }
}

// ── fixtures ──────────────────────────────────────────────────────────────────

const KERNEL: &str = "<?php\n$bundles = array(\n    new FrameworkBundle(),\n);\n";
const AUTOLOAD: &str = "<?php\n$loader->registerNamespaces(array(\n    'Symfony' => 'vendor',\n));\n";

fn orm_config() -> ConfigNode {
    ConfigNode::Mapping(vec![(
        "doctrine".into(),
        ConfigNode::Mapping(vec![(
            "orm".into(),
            ConfigNode::Mapping(vec![("mappings".into(), ConfigNode::Null)]),
        )]),
    )])
}

fn service_with(fs: &FakeFs, configs: &FakeConfigStore) -> BundleService {
    BundleService::new(
        Box::new(FakeSkeleton),
        Box::new(FakeRenderer),
        Box::new(fs.clone()),
        Box::new(configs.clone()),
    )
}

fn seeded_world() -> (FakeFs, FakeConfigStore) {
    let fs = FakeFs::new();
    fs.seed_file("app/AppKernel.php", KERNEL);
    fs.seed_file("app/autoload.php", AUTOLOAD);
    let configs = FakeConfigStore::new(fs.clone());
    configs.seed("app/config/config.yml", orm_config());
    (fs, configs)
}

fn identity() -> (Namespace, BundleName) {
    let ns: Namespace = "Acme\\DemoBundle".parse().unwrap();
    let bundle = BundleName::derived_from(&ns);
    (ns, bundle)
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[test]
fn full_scaffold_workflow() {
    let (fs, configs) = seeded_world();
    let service = service_with(&fs, &configs);
    let (ns, bundle) = identity();

    let report = service.generate(&ns, &bundle, &AppPaths::default()).unwrap();

    assert_eq!(report.bundle_dir, PathBuf::from("src/Acme/DemoBundle"));

    // Skeleton rendered and bundle class renamed.
    let class = fs.read("src/Acme/DemoBundle/AcmeDemoBundle.php").unwrap();
    assert!(class.contains("Acme\\DemoBundle / AcmeDemoBundle"));
    assert!(fs.read("src/Acme/DemoBundle/Bundle.php").is_none());

    // Kernel and autoload patched before their markers.
    let kernel = fs.read("app/AppKernel.php").unwrap();
    assert!(kernel.contains("new Acme\\DemoBundle\\AcmeDemoBundle(),"));
    assert!(kernel.find("AcmeDemoBundle").unwrap() < kernel.find(");").unwrap());

    let autoload = fs.read("app/autoload.php").unwrap();
    assert!(autoload.contains("'Acme'"));

    // ORM mappings gained the bundle.
    let mut config = configs.doc("app/config/config.yml").unwrap();
    let mappings = config.find_key_mut("mappings").unwrap();
    assert!(mappings.contains_key("AcmeDemoBundle"));

    // Application routing created from nothing; bundle routing got a default.
    let routing = configs.doc("app/config/routing.yml").unwrap();
    assert!(routing.contains_key("acmedemobundle"));

    let bundle_routing = configs
        .doc("src/Acme/DemoBundle/Resources/config/routing.yml")
        .unwrap();
    assert!(bundle_routing.contains_key("acmedemobundle_default"));

    // Sample entity mapping rendered with the real namespace.
    let sample = fs
        .read("src/Acme/DemoBundle/Resources/config/doctrine/mapping.orm.yml")
        .unwrap();
    assert!(sample.starts_with("Acme\\DemoBundle\\Entity\\User:"));

    assert!(report.files_patched.contains(&PathBuf::from("app/AppKernel.php")));
}

#[test]
fn refuses_existing_bundle_directory() {
    let (fs, configs) = seeded_world();
    fs.seed_dir("src/Acme/DemoBundle");
    let service = service_with(&fs, &configs);
    let (ns, bundle) = identity();

    let err = service
        .generate(&ns, &bundle, &AppPaths::default())
        .unwrap_err();
    assert!(matches!(
        err,
        BundlegenError::Application(ApplicationError::TargetExists { .. })
    ));

    // Fail-fast: nothing was touched.
    assert_eq!(fs.read("app/AppKernel.php").unwrap(), KERNEL);
}

#[test]
fn missing_kernel_marker_is_an_explicit_error() {
    let (fs, configs) = seeded_world();
    fs.seed_file("app/AppKernel.php", "<?php\n// no closing marker here\n");
    let service = service_with(&fs, &configs);
    let (ns, bundle) = identity();

    let err = service
        .generate(&ns, &bundle, &AppPaths::default())
        .unwrap_err();
    match err {
        BundlegenError::Application(ApplicationError::MarkerNotFound { marker, .. }) => {
            assert_eq!(marker, ");");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn pre_registered_bundle_is_not_duplicated() {
    let (fs, configs) = seeded_world();
    // The registration line is already there, with different indentation.
    fs.seed_file(
        "app/AppKernel.php",
        "<?php\n$bundles = array(\n  new Acme\\DemoBundle\\AcmeDemoBundle(),\n);\n",
    );
    let service = service_with(&fs, &configs);
    let (ns, bundle) = identity();

    service.generate(&ns, &bundle, &AppPaths::default()).unwrap();

    let kernel = fs.read("app/AppKernel.php").unwrap();
    assert_eq!(kernel.matches("AcmeDemoBundle(),").count(), 1);
}

#[test]
fn missing_config_file_aborts_before_kernel_patch() {
    let fs = FakeFs::new();
    fs.seed_file("app/AppKernel.php", KERNEL);
    fs.seed_file("app/autoload.php", AUTOLOAD);
    let configs = FakeConfigStore::new(fs.clone()); // no config.yml seeded
    let service = service_with(&fs, &configs);
    let (ns, bundle) = identity();

    let err = service
        .generate(&ns, &bundle, &AppPaths::default())
        .unwrap_err();
    assert!(matches!(
        err,
        BundlegenError::Application(ApplicationError::FilesystemError { .. })
    ));

    // The ORM merge runs before the kernel insertion, so the kernel must
    // still be pristine.
    assert_eq!(fs.read("app/AppKernel.php").unwrap(), KERNEL);
}

#[test]
fn config_without_mappings_section_is_reported() {
    let (fs, configs) = seeded_world();
    configs.seed(
        "app/config/config.yml",
        ConfigNode::Mapping(vec![("framework".into(), ConfigNode::Null)]),
    );
    let service = service_with(&fs, &configs);
    let (ns, bundle) = identity();

    let err = service
        .generate(&ns, &bundle, &AppPaths::default())
        .unwrap_err();
    assert!(matches!(
        err,
        BundlegenError::Application(ApplicationError::MappingsNotFound { .. })
    ));
}
