//! Terminal output helpers.
//!
//! Status lines go to stdout, the fatal error line to stderr. The progress bar
//! shown before publishing is cosmetic and has no timing meaning.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::borrow::Cow;

pub struct Output;

impl Output {
    /// Plain status line, e.g. `Updating theme with ID: abc123`.
    pub fn status(msg: impl AsRef<str>) {
        println!("{}", msg.as_ref());
    }

    /// Final success line with a green checkmark.
    pub fn success(msg: impl AsRef<str>) {
        println!("{} {}", "✓".green().bold(), msg.as_ref());
    }

    /// Non-fatal problem, printed to stdout so it stays in the run transcript.
    pub fn warning(msg: impl AsRef<str>) {
        println!("{} {}", "⚠".yellow(), msg.as_ref());
    }

    /// The one line printed for a fatal failure.
    pub fn error(msg: impl AsRef<str>) {
        eprintln!("{} {}", "✗".red().bold(), msg.as_ref().red());
    }

    /// Progress bar with `total` steps. Hidden bars accept updates but draw nothing.
    pub fn progress(total: u64, msg: impl Into<Cow<'static, str>>, visible: bool) -> Progress {
        let pb = if visible {
            ProgressBar::new(total)
        } else {
            ProgressBar::hidden()
        };
        // Template is a literal; fall back to the default style rather than fail.
        if let Ok(style) = ProgressStyle::default_bar().template("{msg} {bar:40.cyan/blue} {pos}/{len}") {
            pb.set_style(style.progress_chars("█▓░"));
        }
        pb.set_message(msg);
        Progress(pb)
    }
}

/// A progress bar created via `Output::progress()`.
pub struct Progress(ProgressBar);

impl Progress {
    pub fn inc(&self, delta: u64) {
        self.0.inc(delta);
    }

    pub fn position(&self) -> u64 {
        self.0.position()
    }

    pub fn finish(self) {
        self.0.finish();
    }
}
