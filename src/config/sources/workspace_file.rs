//! Workspace config file: <workspace root>/yarnspace.toml

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::Path;

pub const FILE_NAME: &str = "yarnspace.toml";

/// Add the workspace config file as an optional source.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workspace_root.join(FILE_NAME);
    Ok(builder.add_source(File::from(path).required(false)))
}
