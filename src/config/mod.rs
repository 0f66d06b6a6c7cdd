//! Configuration management for act
//!
//! Settings are layered with figment: the embedded `default-config.toml`,
//! then `act.toml` in the project root, then an explicit `--config` file,
//! then `ACT_*` environment variables (`__` separates nested keys, so
//! `ACT_BUILD__JOBS=all` sets `build.jobs`).
//!
//! The merged [`ActConfig`] is read once at startup and turned into an
//! [`ActContext`] (tool paths, platform, CPU count) plus a validated
//! [`BuildConfig`] record. Nothing mutates either afterwards.

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod context;
mod record;

pub use context::{ActContext, ResolvedTools};
pub use record::{Action, BuildConfig, BuildOptions, Compiler, Mode, Target, TestScope, Threads};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Project configuration file looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "act.toml";

/// Fully merged configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActConfig {
    /// External executables
    pub tools: ToolsConfig,

    /// Default build options, overridden field by field from the CLI
    pub build: BuildOptions,

    /// Source tree layout
    pub layout: LayoutConfig,

    /// Guideline check settings
    pub guideline: GuidelineConfig,
}

/// External tool commands. Each value is looked up in PATH when not absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    pub cmake: String,
    pub make: String,
    pub msbuild: String,
    pub python: String,
    pub clang_format: String,

    /// Documentation linter command; empty disables the check
    #[serde(default)]
    pub doc_linter: String,
}

/// Where things live, relative to `root`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub root: PathBuf,

    /// Include root: generated `#include` paths are relative to it
    pub sources: String,

    /// Native library sources (header/translation-unit pairs)
    pub library: String,

    /// Test-suite headers
    pub testunits: String,

    /// Build directory; each mode gets its own subdirectory
    pub build: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidelineConfig {
    /// TOML file describing declared module dependencies
    pub dependency_graph: String,
}

impl LayoutConfig {
    pub fn sources_dir(&self) -> PathBuf {
        self.root.join(&self.sources)
    }

    pub fn library_dir(&self) -> PathBuf {
        self.root.join(&self.library)
    }

    pub fn testunits_dir(&self) -> PathBuf {
        self.root.join(&self.testunits)
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root.join(&self.build)
    }

    /// Same layout rooted somewhere else
    pub fn rooted_at<P: AsRef<Path>>(&self, root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..self.clone()
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            sources: "src".to_string(),
            library: "src/agrum".to_string(),
            testunits: "src/testunits".to_string(),
            build: "build".to_string(),
        }
    }
}

impl ActConfig {
    /// Load configuration from the current directory
    pub fn load(custom_config: Option<&str>) -> Result<Self> {
        Self::load_from(Path::new("."), custom_config)
    }

    /// Load configuration using `base` to find the project config file
    pub fn load_from(base: &Path, custom_config: Option<&str>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting from {}", base.display());

        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .merge(Toml::file(base.join(PROJECT_CONFIG_FILE)));

        if let Some(custom_path) = custom_config {
            figment = figment.merge(Toml::file(custom_path));
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed("ACT_").split("__"));

        let mut config: ActConfig = figment
            .extract()
            .context("Failed to load act configuration")?;

        if config.layout.root.is_relative() {
            config.layout.root = base.join(&config.layout.root);
        }

        Ok(config)
    }

    /// Path of the module dependency graph file
    pub fn dependency_graph_path(&self) -> PathBuf {
        self.layout.root.join(&self.guideline.dependency_graph)
    }
}
