use parking_lot::Mutex;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use theme_release::env_store::{LinePrompt, ThemeIdPrompt};
use theme_release::publisher::{PublishOutcome, Publisher};
use theme_release::ThemeId;

/// Publisher that records the IDs it was asked to publish.
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn published(&self) -> Vec<String> {
        self.published.lock().clone()
    }
}

impl Publisher for RecordingPublisher {
    fn publish(&self, theme_id: &ThemeId) -> PublishOutcome {
        self.published.lock().push(theme_id.to_string());
        if self.fail {
            PublishOutcome::Failed("exit status: 1".to_string())
        } else {
            PublishOutcome::Published
        }
    }
}

/// Prompt that counts how often it is asked.
pub struct CountingPrompt {
    answer: String,
    pub asked: Arc<Mutex<usize>>,
}

impl CountingPrompt {
    pub fn new(answer: &str) -> (Self, Arc<Mutex<usize>>) {
        let asked = Arc::new(Mutex::new(0));
        (
            Self {
                answer: answer.to_string(),
                asked: Arc::clone(&asked),
            },
            asked,
        )
    }
}

impl ThemeIdPrompt for CountingPrompt {
    fn ask_theme_id(&mut self) -> Result<String, theme_release::ReleaseError> {
        *self.asked.lock() += 1;
        Ok(self.answer.clone())
    }
}

pub fn line_prompt(input: &'static str) -> Box<dyn ThemeIdPrompt> {
    Box::new(LinePrompt::new(Cursor::new(input)))
}

pub fn write_file(root: &Path, name: &str, content: &str) -> PathBuf {
    let path = root.join(name);
    fs::write(&path, content).unwrap();
    path
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
