//! Workspace Registry: discovers workspaces once and remembers them.

use crate::error::DiscoveryError;
use crate::gateway::WorkspaceGateway;
use crate::types::{WorkspaceInfo, WorkspaceName};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error};

/// Memoized view of the workspaces the package manager reports.
///
/// A successful discovery is kept for the registry's lifetime and never
/// re-fetched. A failed discovery is not remembered.
pub struct WorkspaceRegistry {
    gateway: Arc<dyn WorkspaceGateway>,
    cached: RwLock<Option<Arc<WorkspaceInfo>>>,
}

impl WorkspaceRegistry {
    pub fn new(gateway: Arc<dyn WorkspaceGateway>) -> Self {
        Self {
            gateway,
            cached: RwLock::new(None),
        }
    }

    /// Discover workspaces, or return the memoized result.
    pub fn load(&self) -> Result<Arc<WorkspaceInfo>, DiscoveryError> {
        if let Some(info) = self.cached.read().as_ref() {
            debug!(count = info.len(), "workspace info served from memory");
            return Ok(Arc::clone(info));
        }
        let info = Arc::new(self.gateway.list_workspaces()?);
        debug!(count = info.len(), "workspace info discovered");
        *self.cached.write() = Some(Arc::clone(&info));
        Ok(info)
    }

    /// Like [`load`](Self::load), with failures logged and mapped to `None`.
    ///
    /// `None` means "no workspaces discoverable", which callers must not
    /// confuse with an empty workspace set.
    pub fn workspaces(&self) -> Option<Arc<WorkspaceInfo>> {
        match self.load() {
            Ok(info) => Some(info),
            Err(e) => {
                error!(error = %e, "Cannot find workspaces");
                None
            }
        }
    }

    /// Workspace names in discovery order; empty when discovery fails.
    pub fn names(&self) -> Vec<WorkspaceName> {
        self.workspaces()
            .map(|info| info.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.workspaces()
            .map(|info| info.contains_key(name))
            .unwrap_or(false)
    }
}
