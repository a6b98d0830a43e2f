//! Configuration
//!
//! Layered configuration: built-in defaults, the global config file, the
//! workspace config file, then `YARNSPACE_*` environment variables.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod workspace;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use workspace::storage_paths::CacheConfig;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder substituted with the workspace name in `commands_args`.
pub const WORKSPACE_PLACEHOLDER: &str = "{workspace}";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YarnspaceConfig {
    #[serde(default)]
    pub tool: ToolConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the package manager is invoked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Executable name or path
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_version_args")]
    pub version_args: Vec<String>,

    #[serde(default = "default_workspaces_args")]
    pub workspaces_args: Vec<String>,

    /// Per-workspace command listing; `{workspace}` is replaced by the name
    #[serde(default = "default_commands_args")]
    pub commands_args: Vec<String>,
}

fn default_program() -> String {
    "yarn".to_string()
}

fn default_version_args() -> Vec<String> {
    vec!["--version".to_string()]
}

fn default_workspaces_args() -> Vec<String> {
    ["workspaces", "info", "--json"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_commands_args() -> Vec<String> {
    ["workspace", WORKSPACE_PLACEHOLDER, "run", "--json"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            version_args: default_version_args(),
            workspaces_args: default_workspaces_args(),
            commands_args: default_commands_args(),
        }
    }
}

impl ToolConfig {
    /// Arguments for listing the commands of `workspace`.
    pub fn commands_args_for(&self, workspace: &str) -> Vec<String> {
        self.commands_args
            .iter()
            .map(|arg| arg.replace(WORKSPACE_PLACEHOLDER, workspace))
            .collect()
    }
}

/// Location of the root project manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Manifest path (relative to workspace root)
    #[serde(default = "default_manifest_path")]
    pub path: PathBuf,
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from("package.json")
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: default_manifest_path(),
        }
    }
}

impl ManifestConfig {
    pub fn resolve_path(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(&self.path)
    }
}
