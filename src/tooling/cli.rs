//! CLI Tooling
//!
//! Command-line interface for the release workflow. All file paths are
//! resolved against the explicit `--workspace` root.

use crate::config::{ConfigLoader, ReleaseConfig};
use crate::env_store::{self, ThemeIdPrompt};
use crate::error::ReleaseError;
use crate::logging::{self, LogOverrides};
use crate::manifest;
use crate::orchestrator::{self, Workflow, WorkflowConfig};
use crate::publisher::{CommandPublisher, Publisher};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Theme Release - publish a theme and bump its manifest version
#[derive(Parser)]
#[command(name = "theme-release")]
#[command(version, about = "Publish a theme and bump its manifest patch version")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Workspace root directory holding the theme ID record and manifest
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides theme-release.toml lookup)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Command to run; no subcommand means a full release.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Release)
    }

    /// Logging flags as overrides; `--log-level` wins over `--verbose`.
    pub fn log_overrides(&self) -> LogOverrides {
        let level = match (&self.log_level, self.verbose) {
            (Some(level), _) => Some(level.clone()),
            (None, true) => Some("debug".to_string()),
            (None, false) => None,
        };
        LogOverrides {
            level,
            format: self.log_format.clone(),
            output: self.log_output.clone(),
            file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Resolve the theme ID, publish the theme and bump the patch version (default)
    Release,
    /// Bump the manifest patch version only
    Bump,
    /// Inspect tool settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Show the effective settings
    Show {
        /// Output format (text, json or toml)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Effective settings as printed by `config show --format json`.
#[derive(Serialize)]
struct SettingsView<'a> {
    workspace: &'a Path,
    env_file: &'a Path,
    manifest_file: &'a Path,
    settings: &'a ReleaseConfig,
}

/// CLI context for executing commands
pub struct CliContext {
    workspace_root: PathBuf,
    config: ReleaseConfig,
}

impl CliContext {
    /// Create a new CLI context, loading settings for the workspace.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ReleaseError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(&path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: ReleaseConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &ReleaseConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Initialise tracing from the settings plus CLI overrides. The default
    /// log file lives under a directory derived from the workspace root.
    pub fn init_logging(&self, cli: &Cli) -> Result<(), ReleaseError> {
        logging::init_logging(
            Some(&self.config.logging),
            &cli.log_overrides(),
            Some(&self.workspace_root),
        )
    }

    fn workflow_config(&self) -> WorkflowConfig {
        WorkflowConfig::new(&self.workspace_root, &self.config.files)
    }

    /// Execute a command, prompting on standard input if a theme ID is needed.
    pub fn execute(&self, command: &Commands) -> Result<String, ReleaseError> {
        self.execute_with_prompt(command, env_store::stdin_prompt())
    }

    /// Execute a command with an explicit theme ID prompt.
    pub fn execute_with_prompt(
        &self,
        command: &Commands,
        prompt: Box<dyn ThemeIdPrompt>,
    ) -> Result<String, ReleaseError> {
        match command {
            Commands::Release => self.handle_release(prompt),
            Commands::Bump => self.handle_bump(),
            Commands::Config {
                command: ConfigCommands::Show { format },
            } => self.handle_config_show(format),
        }
    }

    fn handle_release(&self, prompt: Box<dyn ThemeIdPrompt>) -> Result<String, ReleaseError> {
        let publisher: Arc<dyn Publisher> =
            Arc::new(CommandPublisher::from_config(&self.config.publisher));
        let mut workflow = Workflow::new(self.workflow_config(), publisher);
        let report = orchestrator::run_blocking(&mut workflow, prompt)?;
        info!(
            theme_id = %report.theme_id,
            version = %report.bump.new_version,
            "Release finished"
        );
        Ok("Theme successfully updated.".to_string())
    }

    fn handle_bump(&self) -> Result<String, ReleaseError> {
        let workflow_config = self.workflow_config();
        let manifest_path = workflow_config.manifest_path();
        if !manifest::manifest_exists(manifest_path) {
            return Err(ReleaseError::ManifestNotFound {
                path: manifest_path.to_path_buf(),
            });
        }
        let bump = manifest::bump_manifest_version(manifest_path)?;
        Ok(format!("Version bumped to {}.", bump.new_version))
    }

    fn handle_config_show(&self, format: &str) -> Result<String, ReleaseError> {
        let workflow_config = self.workflow_config();
        match format {
            "json" => {
                let view = SettingsView {
                    workspace: workflow_config.workspace_root(),
                    env_file: workflow_config.env_path(),
                    manifest_file: workflow_config.manifest_path(),
                    settings: &self.config,
                };
                serde_json::to_string_pretty(&view).map_err(|e| {
                    ReleaseError::SettingsError(format!("Failed to render settings: {}", e))
                })
            }
            "toml" => toml::to_string_pretty(&self.config).map_err(|e| {
                ReleaseError::SettingsError(format!("Failed to render settings: {}", e))
            }),
            "text" => {
                let publisher = &self.config.publisher;
                let mut command = vec![publisher.program.clone()];
                command.extend(publisher.args.iter().cloned());
                command.push("--themeId=<id>".to_string());
                let lines = [
                    format!("Workspace:      {}", workflow_config.workspace_root().display()),
                    format!("Theme ID file:  {}", workflow_config.env_path().display()),
                    format!("Manifest:       {}", workflow_config.manifest_path().display()),
                    format!("Publisher:      {}", command.join(" ")),
                    format!(
                        "Progress:       {} steps ({})",
                        publisher.progress_steps,
                        if publisher.show_progress { "shown" } else { "hidden" }
                    ),
                    format!(
                        "Logging:        {} {} -> {}",
                        self.config.logging.level,
                        self.config.logging.format,
                        self.config.logging.output
                    ),
                ];
                Ok(lines.join("\n"))
            }
            other => Err(ReleaseError::SettingsError(format!(
                "Invalid format: {} (must be 'text', 'json' or 'toml')",
                other
            ))),
        }
    }
}
