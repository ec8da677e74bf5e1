//! Publisher invocation
//!
//! Runs the external theme-publishing tool for a resolved [`ThemeId`]. Publishing
//! is best-effort: a failed launch or a non-zero exit is reported and logged but
//! never turned into a [`ReleaseError`](crate::error::ReleaseError).

use crate::config::PublisherConfig;
use crate::output::Output;
use crate::types::ThemeId;
use std::process::Command;
use tracing::{info, warn};

/// What happened when the publishing tool was run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    Failed(String),
}

impl PublishOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, PublishOutcome::Published)
    }
}

/// Seam between theme ID resolution and the external tool.
pub trait Publisher: Send + Sync {
    fn publish(&self, theme_id: &ThemeId) -> PublishOutcome;
}

/// Publisher backed by an external command, `zcli themes:update` by default.
#[derive(Debug, Clone)]
pub struct CommandPublisher {
    program: String,
    args: Vec<String>,
    progress_steps: u64,
    show_progress: bool,
}

impl CommandPublisher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            progress_steps: 0,
            show_progress: false,
        }
    }

    pub fn from_config(config: &PublisherConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            progress_steps: config.progress_steps,
            show_progress: config.show_progress,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Full argument list passed to the program for `theme_id`.
    pub fn command_args(&self, theme_id: &ThemeId) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(format!("--themeId={}", theme_id));
        args
    }

    fn render_progress(&self) {
        let progress = Output::progress(self.progress_steps, "Updating theme", self.show_progress);
        for _ in 0..self.progress_steps {
            progress.inc(1);
        }
        progress.finish();
    }
}

impl Publisher for CommandPublisher {
    fn publish(&self, theme_id: &ThemeId) -> PublishOutcome {
        Output::status(format!("Updating theme with ID: {}", theme_id));
        self.render_progress();

        let args = self.command_args(theme_id);
        info!(program = %self.program, ?args, "Running publisher");

        // stdout/stderr are inherited so the tool's output streams live.
        let outcome = match Command::new(&self.program).args(&args).status() {
            Ok(status) if status.success() => PublishOutcome::Published,
            Ok(status) => PublishOutcome::Failed(status.to_string()),
            Err(e) => PublishOutcome::Failed(e.to_string()),
        };

        match &outcome {
            PublishOutcome::Published => info!(theme_id = %theme_id, "Theme published"),
            PublishOutcome::Failed(reason) => {
                warn!(theme_id = %theme_id, reason = %reason, "Publisher failed");
                Output::status(format!("Failed to update theme: {}", reason));
            }
        }
        outcome
    }
}
