//! Base layer of the merge: built-in defaults.

use crate::config::ReleaseConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Start a builder seeded with `ReleaseConfig::default()`.
pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&ReleaseConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}
