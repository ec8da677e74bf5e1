//! Manifest version bumping
//!
//! The manifest is handled as a generic JSON object so that every key other
//! than `version` survives the rewrite untouched. Only the patch component of
//! a `MAJOR.MINOR.PATCH` version is interpreted; major and minor are copied as
//! text.

use crate::error::ReleaseError;
use crate::output::Output;
use crate::types::VersionBump;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::info;

/// Key holding the semantic version string.
pub const VERSION_KEY: &str = "version";

/// Whether a manifest is present at `path`.
///
/// Only a not-found stat counts as absent. Other stat failures, and a
/// directory at `path`, are left for the read to report.
pub fn manifest_exists(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != std::io::ErrorKind::NotFound,
    }
}

/// Increment the patch component of `version`.
///
/// `"1.2.3"` becomes `"1.2.4"`; `"01.x.9"` becomes `"01.x.10"`.
pub fn bump_patch(version: &str) -> Result<String, ReleaseError> {
    let parts: Vec<&str> = version.split('.').collect();
    let [major, minor, patch] = parts.as_slice() else {
        return Err(ReleaseError::VersionFormatInvalid {
            version: version.to_string(),
        });
    };

    let number: u64 = patch.parse().map_err(|e: std::num::ParseIntError| {
        ReleaseError::PatchNotNumeric {
            patch: patch.to_string(),
            reason: e.to_string(),
        }
    })?;
    let next = number
        .checked_add(1)
        .ok_or_else(|| ReleaseError::PatchNotNumeric {
            patch: patch.to_string(),
            reason: "patch number overflows when incremented".to_string(),
        })?;

    Ok(format!("{}.{}.{}", major, minor, next))
}

/// Bump the patch version in the in-memory document.
///
/// Returns the old and new version; the document is left unchanged on error.
pub fn bump_document(
    document: &mut Map<String, Value>,
    path: &Path,
) -> Result<VersionBump, ReleaseError> {
    let old_version = match document.get(VERSION_KEY) {
        Some(Value::String(version)) => version.clone(),
        _ => {
            return Err(ReleaseError::VersionFieldMissing {
                path: path.to_path_buf(),
            })
        }
    };

    let new_version = bump_patch(&old_version)?;
    document.insert(VERSION_KEY.to_string(), Value::String(new_version.clone()));

    Ok(VersionBump {
        old_version,
        new_version,
    })
}

/// Read the manifest at `path`, bump its patch version and write it back.
///
/// The rewritten file is pretty-printed with two-space indentation. Key order
/// follows serde_json's map ordering, not the original file.
pub fn bump_manifest_version(path: &Path) -> Result<VersionBump, ReleaseError> {
    let bytes = std::fs::read(path).map_err(|e| ReleaseError::ManifestReadFailure {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut document: Map<String, Value> =
        serde_json::from_slice(&bytes).map_err(|e| ReleaseError::ManifestParseFailure {
            path: path.to_path_buf(),
            source: e,
        })?;

    let bump = bump_document(&mut document, path)?;

    let updated =
        serde_json::to_vec_pretty(&document).map_err(|e| ReleaseError::ManifestSerializeFailure {
            path: path.to_path_buf(),
            source: e,
        })?;

    std::fs::write(path, updated).map_err(|e| ReleaseError::ManifestWriteFailure {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(
        path = %path.display(),
        old = %bump.old_version,
        new = %bump.new_version,
        "Manifest version bumped"
    );
    Output::status(format!(
        "Updating version: from {} to {}",
        bump.old_version, bump.new_version
    ));
    Ok(bump)
}
