//! CacheConfig and path resolution for the selection cache.

use crate::config::xdg;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cache configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache database path (relative to workspace root). None keeps the cache
    /// out of the repository, under the XDG data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl CacheConfig {
    /// Resolve the cache database location for a workspace root.
    pub fn resolve_path(&self, workspace_root: &Path) -> Result<PathBuf, ApiError> {
        match &self.path {
            Some(path) if !path.as_os_str().is_empty() => Ok(workspace_root.join(path)),
            _ => Ok(xdg::workspace_data_dir(workspace_root)?.join("cache")),
        }
    }
}
