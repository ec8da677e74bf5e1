//! MergeService: orchestrates sources, applies merge policy, deserializes to ReleaseConfig.

use crate::config::sources::{environment, workspace_file};
use crate::config::ReleaseConfig;
use config::{ConfigError, File};
use std::path::Path;
use tracing::debug;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from the workspace and environment.
    /// Precedence: defaults (lowest) -> workspace file -> environment (highest).
    pub fn load(workspace_root: &Path) -> Result<ReleaseConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        let config: ReleaseConfig = config.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Loaded settings");
        Ok(config)
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ReleaseConfig, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path));
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        let config: ReleaseConfig = config.try_deserialize()?;
        debug!(file = %path.display(), "Loaded settings");
        Ok(config)
    }
}
