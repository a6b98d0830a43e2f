//! Inspector: one session's worth of workspace state.
//!
//! Owns the registry, catalog memo, manifest reader, and selection manager so
//! every memoized value is scoped to an explicit object rather than the
//! process. Construct one per run, or one per test.

use crate::cache::CacheStore;
use crate::error::ApiError;
use crate::gateway::WorkspaceGateway;
use crate::manifest::{ManifestReader, RootManifest};
use crate::types::{CommandCatalog, DependencyTree, WorkspaceInfo, WorkspaceName};
use crate::workspace::catalog::CommandCatalogCache;
use crate::workspace::format::render_tree;
use crate::workspace::registry::WorkspaceRegistry;
use crate::workspace::selection::SelectionManager;
use crate::workspace::tree::DependencyTreeBuilder;
use std::path::PathBuf;
use std::sync::Arc;

pub struct Inspector {
    gateway: Arc<dyn WorkspaceGateway>,
    registry: WorkspaceRegistry,
    catalog: CommandCatalogCache,
    manifest: ManifestReader,
    selection: SelectionManager,
}

impl Inspector {
    pub fn new(
        gateway: Arc<dyn WorkspaceGateway>,
        store: Arc<dyn CacheStore>,
        manifest_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry: WorkspaceRegistry::new(Arc::clone(&gateway)),
            catalog: CommandCatalogCache::new(Arc::clone(&gateway)),
            manifest: ManifestReader::new(manifest_path),
            selection: SelectionManager::new(store),
            gateway,
        }
    }

    /// Fails when the tool is missing or no workspaces can be discovered.
    pub fn check(&self) -> Result<(), ApiError> {
        if !self.gateway.is_installed() {
            return Err(ApiError::ToolNotInstalled(self.gateway.program().to_string()));
        }
        if self.registry.names().is_empty() {
            return Err(ApiError::NoWorkspacesFound);
        }
        Ok(())
    }

    /// Memoized workspace info; `None` when discovery failed.
    pub fn workspaces(&self) -> Option<Arc<WorkspaceInfo>> {
        self.registry.workspaces()
    }

    pub fn workspace_names(&self) -> Vec<WorkspaceName> {
        self.registry.names()
    }

    pub fn workspace_commands(&self, workspace: &str) -> CommandCatalog {
        self.catalog.commands(&self.registry, workspace)
    }

    /// Drop one memoized command catalog so the next lookup asks the tool again.
    pub fn forget_workspace_commands(&self, workspace: &str) -> bool {
        self.catalog.forget(workspace)
    }

    pub fn selected_workspace(&self) -> Result<Option<String>, ApiError> {
        self.selection.selected_workspace()
    }

    pub fn selected_workspace_commands(&self) -> Result<Option<CommandCatalog>, ApiError> {
        self.selection.selected_commands()
    }

    pub fn set_selected_workspace(&self, workspace: &str) -> Result<CommandCatalog, ApiError> {
        self.selection
            .select(&self.registry, &self.catalog, workspace)
    }

    pub fn is_valid_workspace_command(&self, command: &str) -> Result<bool, ApiError> {
        self.selection.is_valid_command(command)
    }

    pub fn root_manifest(&self) -> Arc<RootManifest> {
        self.manifest.root_manifest()
    }

    /// Inverted dependency tree; `None` when there is nothing to show.
    pub fn dependency_tree(&self) -> Result<Option<DependencyTree>, ApiError> {
        let workspaces = match self.registry.workspaces() {
            Some(info) => info,
            None => return Ok(None),
        };
        let root = self.manifest.root_manifest();
        DependencyTreeBuilder::new(&workspaces, &root).build()
    }

    /// Rendered dependency tree; `None` means nothing should be printed.
    pub fn show_info(&self) -> Result<Option<String>, ApiError> {
        Ok(self.dependency_tree()?.map(|tree| render_tree(&tree)))
    }
}
