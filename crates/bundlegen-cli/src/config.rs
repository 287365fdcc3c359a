//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it — it receives the
//! already-resolved [`AppPaths`].
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Config file (`--config FILE`, else the default location)
//! 3. Built-in defaults (always present)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use bundlegen_core::application::AppPaths;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Locations of the application files the scaffold touches.
    pub paths: PathsConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub src_dir: PathBuf,
    pub kernel_file: PathBuf,
    pub autoload_file: PathBuf,
    pub config_file: PathBuf,
    pub routing_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let defaults = AppPaths::default();
        Self {
            src_dir: defaults.src_dir,
            kernel_file: defaults.kernel_file,
            autoload_file: defaults.autoload_file,
            config_file: defaults.config_file,
            routing_file: defaults.routing_file,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// An explicitly passed `--config` file must exist and parse; the
    /// default location is optional and silently skipped when absent.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        match config_file {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.bundlegen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "bundlegen", "bundlegen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".bundlegen.toml"))
    }

    /// The core-layer paths this configuration describes.
    pub fn app_paths(&self) -> AppPaths {
        AppPaths {
            src_dir: self.paths.src_dir.clone(),
            kernel_file: self.paths.kernel_file.clone(),
            autoload_file: self.paths.autoload_file.clone(),
            config_file: self.paths.config_file.clone(),
            routing_file: self.paths.routing_file.clone(),
        }
    }
}
