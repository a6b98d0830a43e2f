//! Merge policy: every layer starts from the serialized defaults.

use crate::config::YarnspaceConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with `YarnspaceConfig::default()` as the lowest layer.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&YarnspaceConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}
