//! FilesConfig and resolve_paths for the workspace files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

fn default_manifest_file() -> PathBuf {
    PathBuf::from("manifest.json")
}

/// Workspace file names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Path to the `THEME_ID=` record (relative to workspace root)
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Path to the JSON manifest (relative to workspace root)
    #[serde(default = "default_manifest_file")]
    pub manifest_file: PathBuf,
}

impl FilesConfig {
    /// Resolve both files against the workspace root.
    ///
    /// Absolute paths are kept as they are.
    pub fn resolve_paths(&self, workspace_root: &Path) -> (PathBuf, PathBuf) {
        (
            workspace_root.join(&self.env_file),
            workspace_root.join(&self.manifest_file),
        )
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
            manifest_file: default_manifest_file(),
        }
    }
}
