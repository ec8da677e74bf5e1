//! Tool settings
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional `theme-release.toml` in the workspace root, then
//! `THEME_RELEASE__*` environment variables.

mod facade;
pub mod merge;
pub mod sources;
pub mod workspace;

pub use facade::ConfigLoader;
pub use workspace::file_paths::FilesConfig;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Name of the optional settings file looked up in the workspace root.
pub const WORKSPACE_CONFIG_FILE: &str = "theme-release.toml";

/// Top-level tool settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseConfig {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub publisher: PublisherConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// External publishing tool invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Executable to run
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the `--themeId=<id>` flag
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Number of discrete progress steps rendered before the tool runs
    #[serde(default = "default_progress_steps")]
    pub progress_steps: u64,

    /// Render the progress bar at all
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

fn default_program() -> String {
    "zcli".to_string()
}

fn default_args() -> Vec<String> {
    vec!["themes:update".to_string()]
}

fn default_progress_steps() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            progress_steps: default_progress_steps(),
            show_progress: default_true(),
        }
    }
}
