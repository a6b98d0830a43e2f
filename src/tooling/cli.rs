//! CLI Tooling
//!
//! Command-line interface for workspace inspection. Each command renders its
//! result as a string; the binary prints it.

use crate::cache::{CacheStore, LazySledCacheStore};
use crate::config::{ConfigLoader, YarnspaceConfig};
use crate::error::ApiError;
use crate::gateway::{ProcessGateway, WorkspaceGateway};
use crate::logging::LoggingConfig;
use crate::workspace::format::{
    format_commands_text, format_discovery_failed_text, format_section_heading,
    format_selection_text, format_workspace_list_text,
};
use crate::workspace::Inspector;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Yarnspace CLI - inspect monorepo workspaces
#[derive(Parser)]
#[command(name = "yarnspace")]
#[command(about = "Inspect monorepo workspaces, their commands, and their dependency tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where the root package.json lives)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level to stderr)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply logging flags on top of the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if self.verbose {
            config.level = "debug".to_string();
            if config.output == "file" {
                config.output = "file+stderr".to_string();
            }
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify the package manager is installed and workspaces are discoverable
    Check,
    /// List discovered workspaces
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List runnable commands of a workspace
    Commands {
        /// Workspace name
        workspace: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Select a workspace and cache its commands
    Select {
        /// Workspace name (prompted for when omitted on a terminal)
        workspace: Option<String>,
    },
    /// Show the selected workspace and its cached commands
    Selected {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Check whether a command is valid for the selected workspace
    Validate {
        /// Command name
        command: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the workspace dependency tree
    Info {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// CLI context: configuration plus the inspector session.
pub struct CliContext {
    workspace_root: PathBuf,
    config: YarnspaceConfig,
    inspector: Inspector,
}

impl CliContext {
    /// Load configuration and wire the subprocess gateway. The cache database
    /// is opened by the first command that touches the selection.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };

        let cache_path = config.cache.resolve_path(&workspace_root)?;
        let store: Arc<dyn CacheStore> = Arc::new(LazySledCacheStore::new(cache_path));
        let gateway: Arc<dyn WorkspaceGateway> =
            Arc::new(ProcessGateway::new(config.tool.clone(), workspace_root.clone()));

        Ok(Self::with_parts(workspace_root, config, gateway, store))
    }

    /// Build a context from explicit collaborators.
    pub fn with_parts(
        workspace_root: PathBuf,
        config: YarnspaceConfig,
        gateway: Arc<dyn WorkspaceGateway>,
        store: Arc<dyn CacheStore>,
    ) -> Self {
        let manifest_path = config.manifest.resolve_path(&workspace_root);
        Self {
            inspector: Inspector::new(gateway, store, manifest_path),
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &YarnspaceConfig {
        &self.config
    }

    pub fn inspector(&self) -> &Inspector {
        &self.inspector
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Check => {
                self.inspector.check()?;
                let count = self.inspector.workspace_names().len();
                Ok(format!(
                    "{} is installed; {} workspace(s) found in {}",
                    self.config.tool.program,
                    count,
                    self.workspace_root.display()
                ))
            }
            Commands::List { format } => match (self.inspector.workspaces(), format.as_str()) {
                (Some(info), "json") => to_json(&*info),
                (Some(info), _) => Ok(format_workspace_list_text(&info)),
                (None, "json") => to_json(&serde_json::Value::Null),
                (None, _) => Ok(format_discovery_failed_text(&self.config.tool.program)),
            },
            Commands::Commands { workspace, format } => {
                let commands = self.inspector.workspace_commands(workspace);
                if format == "json" {
                    to_json(&json!({ "workspace": workspace, "commands": commands }))
                } else {
                    Ok(format_commands_text(workspace, &commands))
                }
            }
            Commands::Select { workspace } => {
                let workspace = match workspace {
                    Some(name) => name.clone(),
                    None => self.prompt_for_workspace()?,
                };
                let commands = self.inspector.set_selected_workspace(&workspace)?;
                Ok(format!(
                    "Selected workspace {} ({} command(s) cached)",
                    workspace,
                    commands.len()
                ))
            }
            Commands::Selected { format } => {
                let workspace = self.inspector.selected_workspace()?;
                let commands = self.inspector.selected_workspace_commands()?;
                if format == "json" {
                    to_json(&json!({ "workspace": workspace, "commands": commands }))
                } else {
                    Ok(format_selection_text(
                        workspace.as_deref(),
                        commands.as_deref(),
                    ))
                }
            }
            Commands::Validate { command, format } => {
                let valid = self.inspector.is_valid_workspace_command(command)?;
                if format == "json" {
                    to_json(&json!({ "command": command, "valid": valid }))
                } else if valid {
                    Ok(format!("{} is a valid command", command))
                } else {
                    Ok(format!(
                        "{} is not a command of the selected workspace",
                        command
                    ))
                }
            }
            Commands::Info { format } => {
                if format == "json" {
                    to_json(&self.inspector.dependency_tree()?)
                } else {
                    match self.inspector.show_info()? {
                        Some(tree) => Ok(format!(
                            "{}\n\n{}",
                            format_section_heading("Dependency tree"),
                            tree.trim_end()
                        )),
                        None => Ok(String::new()),
                    }
                }
            }
            Commands::Config => toml::to_string_pretty(&self.config)
                .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e))),
        }
    }

    /// Interactive workspace picker
    fn prompt_for_workspace(&self) -> Result<String, ApiError> {
        if !std::io::stdin().is_terminal() {
            return Err(ApiError::ConfigError(
                "Workspace name required when not running in a terminal".to_string(),
            ));
        }
        let names = self.inspector.workspace_names();
        if names.is_empty() {
            return Err(ApiError::NoWorkspacesFound);
        }

        use dialoguer::Select;
        let index = Select::new()
            .with_prompt("Workspace")
            .items(&names)
            .default(0)
            .interact()
            .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;
        Ok(names[index].clone())
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize output: {}", e)))
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Check => "check",
        Commands::List { .. } => "list",
        Commands::Commands { .. } => "commands",
        Commands::Select { .. } => "select",
        Commands::Selected { .. } => "selected",
        Commands::Validate { .. } => "validate",
        Commands::Info { .. } => "info",
        Commands::Config => "config",
    }
}
