//! YAML configuration store.
//!
//! Converts between on-disk YAML documents and the core's [`ConfigNode`]
//! tree. The core never sees `serde_yaml` types; everything crossing the
//! port boundary is a `ConfigNode`.
//!
//! Mapping order is preserved in both directions, so a rewritten file keeps
//! its keys where the author put them.

use std::fs;
use std::io;
use std::path::Path;

use serde_yaml::Value;

use bundlegen_core::{
    application::{ApplicationError, ports::ConfigStore},
    domain::{ConfigNode, ConfigScalar},
    error::BundlegenResult,
};

/// Production config store reading and writing YAML files.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlConfigStore;

impl YamlConfigStore {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self, path: &Path) -> BundlegenResult<ConfigNode> {
        let raw = fs::read_to_string(path).map_err(|e| read_error(path, e))?;
        parse(path, &raw)
    }

    fn load_or_empty(&self, path: &Path) -> BundlegenResult<ConfigNode> {
        if !path.exists() {
            return Ok(ConfigNode::empty_mapping());
        }
        self.load(path)
    }

    fn save(&self, path: &Path, root: &ConfigNode) -> BundlegenResult<()> {
        let value = value_from_node(root);
        let rendered =
            serde_yaml::to_string(&value).map_err(|e| ApplicationError::ConfigError {
                path: path.to_path_buf(),
                reason: format!("Failed to serialise YAML: {e}"),
            })?;
        fs::write(path, rendered).map_err(|e| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: format!("Failed to write file: {e}"),
            }
            .into()
        })
    }
}

fn read_error(path: &Path, e: io::Error) -> bundlegen_core::error::BundlegenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to read file: {e}"),
    }
    .into()
}

fn parse(path: &Path, raw: &str) -> BundlegenResult<ConfigNode> {
    // serde_yaml rejects a fully empty document; treat it (and
    // comment-only files) the way YAML semantics do: as null.
    if raw.trim().is_empty() {
        return Ok(ConfigNode::Null);
    }
    let value: Value = serde_yaml::from_str(raw).map_err(|e| ApplicationError::ConfigError {
        path: path.to_path_buf(),
        reason: format!("Failed to parse YAML: {e}"),
    })?;
    Ok(node_from_value(value))
}

// ── Value ⇄ ConfigNode ────────────────────────────────────────────────────────

fn node_from_value(value: Value) -> ConfigNode {
    match value {
        Value::Null => ConfigNode::Null,
        Value::Bool(b) => ConfigNode::Scalar(ConfigScalar::Bool(b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ConfigNode::Scalar(ConfigScalar::Int(i))
            } else {
                ConfigNode::Scalar(ConfigScalar::Float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        Value::String(s) => ConfigNode::Scalar(ConfigScalar::Str(s)),
        Value::Sequence(items) => {
            ConfigNode::Sequence(items.into_iter().map(node_from_value).collect())
        }
        Value::Mapping(mapping) => ConfigNode::Mapping(
            mapping
                .into_iter()
                .map(|(k, v)| (key_string(k), node_from_value(v)))
                .collect(),
        ),
        Value::Tagged(tagged) => node_from_value(tagged.value),
    }
}

fn key_string(key: Value) -> String {
    match key {
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "~".to_string(),
        other => format!("{other:?}"),
    }
}

fn value_from_node(node: &ConfigNode) -> Value {
    match node {
        ConfigNode::Null => Value::Null,
        ConfigNode::Scalar(ConfigScalar::Bool(b)) => Value::Bool(*b),
        ConfigNode::Scalar(ConfigScalar::Int(i)) => Value::Number((*i).into()),
        ConfigNode::Scalar(ConfigScalar::Float(x)) => Value::Number((*x).into()),
        ConfigNode::Scalar(ConfigScalar::Str(s)) => Value::String(s.clone()),
        ConfigNode::Sequence(items) => Value::Sequence(items.iter().map(value_from_node).collect()),
        ConfigNode::Mapping(entries) => Value::Mapping(
            entries
                .iter()
                .map(|(k, v)| (Value::String(k.clone()), value_from_node(v)))
                .collect(),
        ),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const DOCTRINE: &str = "doctrine:
  orm:
    auto_generate_proxy_classes: true
    mappings:
      ExistingBundle: ~
framework:
  secret: s3cr3t
";

    fn write_temp(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_nested_mappings() {
        let (_dir, path) = write_temp(DOCTRINE);
        let mut root = YamlConfigStore::new().load(&path).unwrap();
        let mappings = root.find_key_mut("mappings").expect("mappings node");
        assert!(mappings.contains_key("ExistingBundle"));
    }

    #[test]
    fn empty_document_loads_as_null() {
        let (_dir, path) = write_temp("");
        assert_eq!(YamlConfigStore::new().load(&path).unwrap(), ConfigNode::Null);
    }

    #[test]
    fn comment_only_document_loads_as_null() {
        let (_dir, path) = write_temp("# nothing here yet\n");
        assert_eq!(YamlConfigStore::new().load(&path).unwrap(), ConfigNode::Null);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(YamlConfigStore::new().load(&dir.path().join("nope.yml")).is_err());
    }

    #[test]
    fn load_or_empty_missing_file_is_an_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let root = YamlConfigStore::new()
            .load_or_empty(&dir.path().join("nope.yml"))
            .unwrap();
        assert_eq!(root, ConfigNode::empty_mapping());
    }

    #[test]
    fn invalid_yaml_is_a_config_error() {
        let (_dir, path) = write_temp("foo: [unclosed\n");
        let err = YamlConfigStore::new().load(&path).unwrap_err();
        assert!(err.to_string().contains("configuration error"));
    }

    #[test]
    fn save_then_load_round_trips_with_key_order() {
        let (_dir, path) = write_temp(DOCTRINE);
        let store = YamlConfigStore::new();

        let mut root = store.load(&path).unwrap();
        root.find_key_mut("mappings")
            .unwrap()
            .insert("AcmeDemoBundle", ConfigNode::Null);
        store.save(&path, &root).unwrap();

        let reloaded = store.load(&path).unwrap();
        assert_eq!(reloaded, root);

        // Existing keys keep their positions; the new bundle comes last.
        let raw = fs::read_to_string(&path).unwrap();
        let doctrine_at = raw.find("doctrine:").unwrap();
        let framework_at = raw.find("framework:").unwrap();
        assert!(doctrine_at < framework_at);
        assert!(raw.find("ExistingBundle").unwrap() < raw.find("AcmeDemoBundle").unwrap());
    }

    #[test]
    fn scalar_types_survive_a_round_trip() {
        let (_dir, path) = write_temp("port: 8080\nratio: 0.5\nenabled: true\nname: app\n");
        let store = YamlConfigStore::new();
        let root = store.load(&path).unwrap();
        store.save(&path, &root).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("port: 8080"));
        assert!(raw.contains("enabled: true"));
        assert!(!raw.contains("'8080'"), "numbers must not become strings");
    }
}
