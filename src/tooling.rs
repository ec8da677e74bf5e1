//! Tooling & Integration Layer
//!
//! Command-line surface over the release workflow.

pub mod cli;

pub use cli::{Cli, CliContext, Commands, ConfigCommands};
