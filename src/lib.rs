//! Theme Release: publish a theme and bump its manifest version
//!
//! Resolves the theme ID from a `.env` record (asking for it once when the
//! record is missing), runs the external publishing tool with it, and then
//! increments the patch component of the `version` field in `manifest.json`.

pub mod config;
pub mod env_store;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod publisher;
pub mod tooling;
pub mod types;

pub use error::ReleaseError;
pub use orchestrator::{RunReport, Stage, Workflow, WorkflowConfig};
pub use types::{ThemeId, VersionBump};
