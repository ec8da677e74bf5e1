//! Release workflow
//!
//! Linear state machine:
//!
//! ```text
//! Start -> LocateManifest -> AwaitConfigResolution -> BumpVersion -> Done
//! ```
//!
//! The theme ID is resolved on a background worker (which also publishes the
//! theme) while the main flow waits on its one-shot result. Any error stops
//! the run at the stage that produced it. Files already written are not
//! rolled back.

use crate::config::FilesConfig;
use crate::env_store::{self, EnvStore, ThemeIdPrompt};
use crate::error::ReleaseError;
use crate::manifest;
use crate::publisher::Publisher;
use crate::types::{ThemeId, VersionBump};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Workflow stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Start,
    LocateManifest,
    AwaitConfigResolution,
    BumpVersion,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::LocateManifest => "locate-manifest",
            Stage::AwaitConfigResolution => "await-config-resolution",
            Stage::BumpVersion => "bump-version",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Explicit file locations for one run.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    workspace_root: PathBuf,
    env_file: PathBuf,
    manifest_file: PathBuf,
}

impl WorkflowConfig {
    pub fn new(workspace_root: impl Into<PathBuf>, files: &FilesConfig) -> Self {
        let workspace_root = workspace_root.into();
        let (env_file, manifest_file) = files.resolve_paths(&workspace_root);
        Self {
            workspace_root,
            env_file,
            manifest_file,
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_file
    }

    pub fn env_path(&self) -> &Path {
        &self.env_file
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub theme_id: ThemeId,
    pub bump: VersionBump,
}

/// Error tagged with the stage it stopped the run at.
#[derive(Debug)]
pub struct StageError {
    pub stage: Stage,
    pub error: ReleaseError,
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for StageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<StageError> for ReleaseError {
    fn from(err: StageError) -> Self {
        err.error
    }
}

pub struct Workflow {
    config: WorkflowConfig,
    publisher: Arc<dyn Publisher>,
    stage: Stage,
}

impl Workflow {
    pub fn new(config: WorkflowConfig, publisher: Arc<dyn Publisher>) -> Self {
        Self {
            config,
            publisher,
            stage: Stage::Start,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn enter(&mut self, stage: Stage) {
        debug!(from = %self.stage, to = %stage, "Workflow transition");
        self.stage = stage;
    }

    fn fail(&self, error: ReleaseError) -> StageError {
        error!(stage = %self.stage, error = %error, "Workflow halted");
        StageError {
            stage: self.stage,
            error,
        }
    }

    /// Run the whole workflow. Must be awaited inside a Tokio runtime.
    pub async fn run(&mut self, prompt: Box<dyn ThemeIdPrompt>) -> Result<RunReport, StageError> {
        info!(workspace = %self.config.workspace_root.display(), "Starting release");
        self.enter(Stage::LocateManifest);
        let manifest_path = self.config.manifest_file.clone();
        if !manifest::manifest_exists(&manifest_path) {
            return Err(self.fail(ReleaseError::ManifestNotFound {
                path: manifest_path,
            }));
        }

        self.enter(Stage::AwaitConfigResolution);
        let rx = env_store::spawn_resolution(
            EnvStore::new(&self.config.env_file),
            prompt,
            Arc::clone(&self.publisher),
        );
        let theme_id = match env_store::await_resolution(rx).await {
            Ok(theme_id) => theme_id,
            Err(e) => return Err(self.fail(e)),
        };
        info!(theme_id = %theme_id, "Theme ID resolved");

        self.enter(Stage::BumpVersion);
        let bump = match manifest::bump_manifest_version(&manifest_path) {
            Ok(bump) => bump,
            Err(e) => return Err(self.fail(e)),
        };

        self.enter(Stage::Done);
        Ok(RunReport { theme_id, bump })
    }
}

/// Build a current-thread runtime with the blocking pool needed for resolution
/// and drive `run` to completion.
pub fn run_blocking(
    workflow: &mut Workflow,
    prompt: Box<dyn ThemeIdPrompt>,
) -> Result<RunReport, ReleaseError> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(ReleaseError::RuntimeError(
            "Cannot run the workflow from within an async runtime; await Workflow::run instead"
                .to_string(),
        ));
    }
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|e| ReleaseError::RuntimeError(format!("Failed to create runtime: {}", e)))?;
    rt.block_on(workflow.run(prompt)).map_err(ReleaseError::from)
}
