//! Command Catalog: runnable commands per workspace.

use crate::gateway::WorkspaceGateway;
use crate::types::CommandCatalog;
use crate::workspace::registry::WorkspaceRegistry;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Per-workspace memo of command catalogs.
///
/// Only non-empty catalogs are remembered; an empty result is fetched again on
/// the next call.
pub struct CommandCatalogCache {
    gateway: Arc<dyn WorkspaceGateway>,
    cached: RwLock<HashMap<String, CommandCatalog>>,
}

impl CommandCatalogCache {
    pub fn new(gateway: Arc<dyn WorkspaceGateway>) -> Self {
        Self {
            gateway,
            cached: RwLock::new(HashMap::new()),
        }
    }

    /// Commands of `workspace`; empty for names the registry does not know.
    pub fn commands(&self, registry: &WorkspaceRegistry, workspace: &str) -> CommandCatalog {
        if let Some(commands) = self.cached.read().get(workspace) {
            return commands.clone();
        }
        if !registry.contains(workspace) {
            debug!(workspace, "not a known workspace, skipping command listing");
            return Vec::new();
        }
        let commands = self.gateway.list_commands(workspace);
        if !commands.is_empty() {
            self.cached
                .write()
                .insert(workspace.to_string(), commands.clone());
        }
        commands
    }

    /// Drop the memoized catalog of `workspace`. Returns whether one existed.
    pub fn forget(&self, workspace: &str) -> bool {
        self.cached.write().remove(workspace).is_some()
    }
}
