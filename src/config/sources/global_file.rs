//! Global config file: $XDG_CONFIG_HOME/yarnspace/config.toml

use crate::config::xdg;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::PathBuf;

/// Path of the global config file, if a config home can be determined.
pub fn path() -> Option<PathBuf> {
    xdg::config_home()
        .ok()
        .map(|home| home.join("yarnspace").join("config.toml"))
}

/// Add the global config file as an optional source.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match path() {
        Some(path) => Ok(builder.add_source(File::from(path).required(false))),
        None => Ok(builder),
    }
}
