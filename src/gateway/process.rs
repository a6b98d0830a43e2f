//! Subprocess-backed gateway.

use crate::config::ToolConfig;
use crate::error::DiscoveryError;
use crate::gateway::parse::{parse_command_listing, parse_workspace_listing};
use crate::gateway::WorkspaceGateway;
use crate::types::{CommandCatalog, WorkspaceInfo};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Runs the configured package manager in the workspace root.
pub struct ProcessGateway {
    tool: ToolConfig,
    cwd: PathBuf,
}

impl ProcessGateway {
    pub fn new(tool: ToolConfig, cwd: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            cwd: cwd.into(),
        }
    }

    fn run(&self, args: &[String]) -> Result<String, DiscoveryError> {
        debug!(program = %self.tool.program, ?args, "running package manager");
        let out = Command::new(&self.tool.program)
            .args(args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| DiscoveryError::Spawn {
                program: self.tool.program.clone(),
                source,
            })?;
        if !out.status.success() {
            return Err(DiscoveryError::NonZeroExit {
                program: self.tool.program.clone(),
                status: out.status.to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
    }
}

impl WorkspaceGateway for ProcessGateway {
    fn program(&self) -> &str {
        &self.tool.program
    }

    fn is_installed(&self) -> bool {
        match self.run(&self.tool.version_args) {
            Ok(version) => {
                debug!(program = %self.tool.program, %version, "package manager found");
                true
            }
            Err(e) => {
                debug!(error = %e, "version check failed");
                false
            }
        }
    }

    fn list_workspaces(&self) -> Result<WorkspaceInfo, DiscoveryError> {
        let output = self.run(&self.tool.workspaces_args)?;
        parse_workspace_listing(&output)
    }

    fn list_commands(&self, workspace: &str) -> CommandCatalog {
        match self.run(&self.tool.commands_args_for(workspace)) {
            Ok(output) => parse_command_listing(&output),
            Err(e) => {
                warn!(workspace, error = %e, "failed to list workspace commands");
                Vec::new()
            }
        }
    }
}
