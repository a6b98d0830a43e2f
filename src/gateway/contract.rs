use crate::error::DiscoveryError;
use crate::types::{CommandCatalog, WorkspaceInfo};

/// Narrow interface to the workspace-aware package manager.
pub trait WorkspaceGateway: Send + Sync {
    /// Program name, used in user-facing messages.
    fn program(&self) -> &str;

    /// Whether the tool answers a version check. Never errors.
    fn is_installed(&self) -> bool;

    fn list_workspaces(&self) -> Result<WorkspaceInfo, DiscoveryError>;

    /// Runnable commands of one workspace; any failure yields an empty catalog.
    fn list_commands(&self, workspace: &str) -> CommandCatalog;
}
