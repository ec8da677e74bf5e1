//! Theme ID record store
//!
//! The record is a flat `KEY=VALUE` file (`.env` by default) of which only the
//! `THEME_ID` key is read. When the file is missing the user is asked for an ID
//! once and the file is created with exactly `THEME_ID=<id>\n`.
//!
//! Every resolution path that yields an ID also runs the [`Publisher`] with it,
//! so publishing happens on each run, not only the first.

use crate::error::ReleaseError;
use crate::output::Output;
use crate::publisher::Publisher;
use crate::types::ThemeId;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Line prefix of the theme ID record.
pub const THEME_ID_PREFIX: &str = "THEME_ID=";

/// Source of a freshly entered theme ID.
pub trait ThemeIdPrompt: Send {
    fn ask_theme_id(&mut self) -> Result<String, ReleaseError>;
}

/// Reads a single line from any buffered reader.
///
/// The line terminator is stripped; nothing else is validated, so an empty
/// line (or end of input) yields an empty ID.
pub struct LinePrompt<R> {
    reader: R,
}

impl<R: BufRead + Send> LinePrompt<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead + Send> ThemeIdPrompt for LinePrompt<R> {
    fn ask_theme_id(&mut self) -> Result<String, ReleaseError> {
        println!("Please enter the theme ID:");
        let _ = io::stdout().flush();

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|e| ReleaseError::PromptFailure(e.to_string()))?;
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(trimmed.to_string())
    }
}

/// Interactive terminal prompt.
pub struct TerminalPrompt;

impl ThemeIdPrompt for TerminalPrompt {
    fn ask_theme_id(&mut self) -> Result<String, ReleaseError> {
        use dialoguer::Input;

        Input::<String>::new()
            .with_prompt("Please enter the theme ID")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ReleaseError::PromptFailure(e.to_string()))
    }
}

/// Prompt reading from the process standard input.
pub fn stdin_prompt() -> Box<dyn ThemeIdPrompt> {
    if io::stdin().is_terminal() {
        Box::new(TerminalPrompt)
    } else {
        Box::new(LinePrompt::new(BufReader::new(io::stdin())))
    }
}

/// Find the first `THEME_ID=` line and return its value.
pub fn parse_theme_id(content: &str) -> Option<ThemeId> {
    content.split('\n').find_map(|line| {
        line.strip_prefix(THEME_ID_PREFIX)
            .map(|value| ThemeId::new(value.strip_suffix('\r').unwrap_or(value)))
    })
}

/// The theme ID record file.
#[derive(Debug, Clone)]
pub struct EnvStore {
    path: PathBuf,
}

impl EnvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Only a definite "not found" counts as absent. Any other stat error
    /// falls through to the read, which then reports it.
    pub fn exists(&self) -> bool {
        match std::fs::metadata(&self.path) {
            Ok(_) => true,
            Err(e) => e.kind() != io::ErrorKind::NotFound,
        }
    }

    /// Read the stored theme ID.
    pub fn read_theme_id(&self) -> Result<ThemeId, ReleaseError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| ReleaseError::ConfigReadFailure {
                path: self.path.clone(),
                source: e,
            })?;
        parse_theme_id(&content).ok_or_else(|| ReleaseError::ConfigKeyMissing {
            path: self.path.clone(),
        })
    }

    /// Create (or overwrite) the record with a single `THEME_ID=` line.
    pub fn write_theme_id(&self, theme_id: &ThemeId) -> io::Result<()> {
        std::fs::write(&self.path, format!("{}{}\n", THEME_ID_PREFIX, theme_id))
    }

    fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Ask for a new ID and persist it.
    ///
    /// A failed write is only a warning: the ID has been obtained and the run
    /// goes on with it.
    fn create_with_prompt(&self, prompt: &mut dyn ThemeIdPrompt) -> Result<ThemeId, ReleaseError> {
        let theme_id = ThemeId::new(prompt.ask_theme_id()?);
        match self.write_theme_id(&theme_id) {
            Ok(()) => {
                info!(path = %self.path.display(), "Created theme ID record");
                Output::status(format!("{} created with ID: {}", self.display_name(), theme_id));
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to write theme ID record");
                Output::warning(format!("Could not write {}: {}", self.display_name(), e));
            }
        }
        Ok(theme_id)
    }
}

/// Resolve the theme ID and publish the theme with it.
///
/// The prompt is used only when the record file is absent.
pub fn resolve(
    store: &EnvStore,
    prompt: &mut dyn ThemeIdPrompt,
    publisher: &dyn Publisher,
) -> Result<ThemeId, ReleaseError> {
    let theme_id = if store.exists() {
        debug!(path = %store.path().display(), "Reading theme ID record");
        store.read_theme_id()?
    } else {
        debug!(path = %store.path().display(), "Theme ID record missing, prompting");
        store.create_with_prompt(prompt)?
    };

    let outcome = publisher.publish(&theme_id);
    debug!(theme_id = %theme_id, ?outcome, "Publisher finished");
    Ok(theme_id)
}

/// Run [`resolve`] on a blocking worker and hand back its single result.
///
/// The worker sends exactly once. If it dies first the sender is dropped and
/// the receiver sees a closed channel, which [`await_resolution`] maps to
/// [`ReleaseError::ResolutionAborted`].
///
/// Must be called from within a Tokio runtime.
pub fn spawn_resolution(
    store: EnvStore,
    mut prompt: Box<dyn ThemeIdPrompt>,
    publisher: Arc<dyn Publisher>,
) -> oneshot::Receiver<Result<ThemeId, ReleaseError>> {
    let (tx, rx) = oneshot::channel();
    tokio::task::spawn_blocking(move || {
        let result = resolve(&store, prompt.as_mut(), publisher.as_ref());
        if tx.send(result).is_err() {
            debug!("Resolution result dropped: receiver gone");
        }
    });
    rx
}

/// Wait for the one signal from [`spawn_resolution`].
pub async fn await_resolution(
    rx: oneshot::Receiver<Result<ThemeId, ReleaseError>>,
) -> Result<ThemeId, ReleaseError> {
    rx.await.unwrap_or(Err(ReleaseError::ResolutionAborted))
}
