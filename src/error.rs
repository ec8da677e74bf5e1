//! Error types for the theme release workflow.
//!
//! Every stage reports its first failure as a [`ReleaseError`]; the
//! orchestrator stops on it and the CLI prints it as a single line.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("failed to read {}", .path.display())]
    ConfigReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("THEME_ID not found in {}", .path.display())]
    ConfigKeyMissing { path: PathBuf },

    #[error("failed to read theme ID from input: {0}")]
    PromptFailure(String),

    #[error("{} does not exist in {}", file_name(.path), parent_dir(.path))]
    ManifestNotFound { path: PathBuf },

    #[error("failed to read {}", file_name(.path))]
    ManifestReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", file_name(.path))]
    ManifestParseFailure {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to find or parse version in {}", file_name(.path))]
    VersionFieldMissing { path: PathBuf },

    #[error("version format is not correct: {version:?}. Expected format: major.minor.patch")]
    VersionFormatInvalid { version: String },

    #[error("failed to parse patch number {patch:?}: {reason}")]
    PatchNotNumeric { patch: String, reason: String },

    #[error("failed to serialize updated {}", file_name(.path))]
    ManifestSerializeFailure {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write updated {}", file_name(.path))]
    ManifestWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("theme ID resolution ended without reporting a result")]
    ResolutionAborted,

    #[error("settings error: {0}")]
    SettingsError(String),

    #[error("runtime error: {0}")]
    RuntimeError(String),
}

impl From<config::ConfigError> for ReleaseError {
    fn from(err: config::ConfigError) -> Self {
        ReleaseError::SettingsError(err.to_string())
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn parent_dir(path: &std::path::Path) -> String {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
        _ => "the current directory".to_string(),
    }
}
