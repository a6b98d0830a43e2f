//! Selection Manager: the persisted workspace choice.

use crate::cache::{get_typed, CacheEntry, CacheStore};
use crate::error::ApiError;
use crate::types::CommandCatalog;
use crate::workspace::catalog::CommandCatalogCache;
use crate::workspace::registry::WorkspaceRegistry;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Cache key holding the selected workspace name
pub const SELECTED_WORKSPACE_KEY: &str = "workspace";
/// Cache key holding the selected workspace's command catalog
pub const SELECTED_COMMANDS_KEY: &str = "workspace.commands";

pub struct SelectionManager {
    store: Arc<dyn CacheStore>,
}

impl SelectionManager {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Persist `workspace` and its catalog as one batch. Nothing is written
    /// when the workspace cannot be selected.
    pub fn select(
        &self,
        registry: &WorkspaceRegistry,
        catalog: &CommandCatalogCache,
        workspace: &str,
    ) -> Result<CommandCatalog, ApiError> {
        let names = registry.names();
        if names.is_empty() {
            return Err(ApiError::NoWorkspacesFound);
        }
        if !names.iter().any(|name| name == workspace) {
            return Err(ApiError::UnknownWorkspace(workspace.to_string()));
        }

        let commands = catalog.commands(registry, workspace);
        self.store.save(&[
            CacheEntry::new(SELECTED_WORKSPACE_KEY, json!(workspace)),
            CacheEntry::new(SELECTED_COMMANDS_KEY, json!(commands)),
        ])?;
        info!(workspace, commands = commands.len(), "workspace selected");
        Ok(commands)
    }

    pub fn selected_workspace(&self) -> Result<Option<String>, ApiError> {
        Ok(get_typed(self.store.as_ref(), SELECTED_WORKSPACE_KEY)?)
    }

    pub fn selected_commands(&self) -> Result<Option<CommandCatalog>, ApiError> {
        Ok(get_typed(self.store.as_ref(), SELECTED_COMMANDS_KEY)?)
    }

    /// Whether `command` is in the persisted catalog. No selection means no
    /// valid commands.
    pub fn is_valid_command(&self, command: &str) -> Result<bool, ApiError> {
        Ok(self
            .selected_commands()?
            .unwrap_or_default()
            .iter()
            .any(|c| c == command))
    }
}
