//! Shared fixtures: a scripted gateway and inspector builders.

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use yarnspace::cache::MemoryCacheStore;
use yarnspace::error::DiscoveryError;
use yarnspace::gateway::{parse_command_listing, parse_workspace_listing, WorkspaceGateway};
use yarnspace::types::{CommandCatalog, WorkspaceInfo};
use yarnspace::workspace::Inspector;

/// Gateway replaying canned tool output through the real parsers.
pub struct ScriptedGateway {
    installed: bool,
    listing: Option<String>,
    command_outputs: Mutex<HashMap<String, VecDeque<String>>>,
    workspace_calls: AtomicUsize,
    command_calls: AtomicUsize,
}

impl ScriptedGateway {
    /// Gateway whose workspace listing is `workspaces` wrapped in the enveloped shape.
    pub fn with_workspaces(workspaces: serde_json::Value) -> Self {
        let listing = serde_json::json!({ "type": "log", "data": workspaces.to_string() });
        Self {
            installed: true,
            listing: Some(listing.to_string()),
            command_outputs: Mutex::new(HashMap::new()),
            workspace_calls: AtomicUsize::new(0),
            command_calls: AtomicUsize::new(0),
        }
    }

    /// Gateway whose workspace listing always fails.
    pub fn broken() -> Self {
        Self {
            installed: true,
            listing: None,
            command_outputs: Mutex::new(HashMap::new()),
            workspace_calls: AtomicUsize::new(0),
            command_calls: AtomicUsize::new(0),
        }
    }

    pub fn not_installed(mut self) -> Self {
        self.installed = false;
        self
    }

    /// Queue raw command-listing output lines for one call on `workspace`.
    pub fn queue_commands(self, workspace: &str, lines: &[String]) -> Self {
        self.command_outputs
            .lock()
            .entry(workspace.to_string())
            .or_default()
            .push_back(lines.join("\n"));
        self
    }

    pub fn workspace_calls(&self) -> usize {
        self.workspace_calls.load(Ordering::SeqCst)
    }

    pub fn command_calls(&self) -> usize {
        self.command_calls.load(Ordering::SeqCst)
    }
}

impl WorkspaceGateway for ScriptedGateway {
    fn program(&self) -> &str {
        "yarn"
    }

    fn is_installed(&self) -> bool {
        self.installed
    }

    fn list_workspaces(&self) -> Result<WorkspaceInfo, DiscoveryError> {
        self.workspace_calls.fetch_add(1, Ordering::SeqCst);
        match &self.listing {
            Some(output) => parse_workspace_listing(output),
            None => Err(DiscoveryError::NonZeroExit {
                program: "yarn".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "error This command can only be run inside a workspace".to_string(),
            }),
        }
    }

    fn list_commands(&self, workspace: &str) -> CommandCatalog {
        self.command_calls.fetch_add(1, Ordering::SeqCst);
        let output = self
            .command_outputs
            .lock()
            .get_mut(workspace)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_default();
        parse_command_listing(&output)
    }
}

/// A `possibleCommands` record as the tool prints it.
pub fn possible_commands(items: &[&str]) -> String {
    serde_json::json!({
        "type": "list",
        "data": { "type": "possibleCommands", "items": items }
    })
    .to_string()
}

pub struct Harness {
    pub gateway: Arc<ScriptedGateway>,
    pub store: Arc<MemoryCacheStore>,
    pub inspector: Inspector,
}

/// Inspector over `gateway`, an in-memory cache, and the manifest at `manifest_path`.
pub fn harness(gateway: ScriptedGateway, manifest_path: &Path) -> Harness {
    let gateway = Arc::new(gateway);
    let store = Arc::new(MemoryCacheStore::new());
    let inspector = Inspector::new(gateway.clone(), store.clone(), manifest_path);
    Harness {
        gateway,
        store,
        inspector,
    }
}
