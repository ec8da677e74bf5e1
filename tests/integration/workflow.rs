use std::fs;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use theme_release::config::FilesConfig;
use theme_release::{ReleaseError, Stage, ThemeId, Workflow, WorkflowConfig};

use crate::support::{line_prompt, read_json, write_file, CountingPrompt, RecordingPublisher};

fn workflow(root: &std::path::Path, publisher: Arc<RecordingPublisher>) -> Workflow {
    Workflow::new(WorkflowConfig::new(root, &FilesConfig::default()), publisher)
}

#[tokio::test]
async fn existing_record_publishes_and_bumps_without_prompting() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), ".env", "THEME_ID=abc123\n");
    let manifest = write_file(
        temp.path(),
        "manifest.json",
        r#"{"name":"x","version":"2.0.9","author":{"name":"a"}}"#,
    );
    let publisher = Arc::new(RecordingPublisher::default());
    let (prompt, asked) = CountingPrompt::new("unused");

    let report = workflow(temp.path(), publisher.clone())
        .run(Box::new(prompt))
        .await
        .unwrap();

    assert_eq!(report.theme_id, ThemeId::new("abc123"));
    assert_eq!(report.bump.old_version, "2.0.9");
    assert_eq!(report.bump.new_version, "2.0.10");
    assert_eq!(*asked.lock(), 0);
    assert_eq!(publisher.published(), vec!["abc123".to_string()]);
    assert_eq!(
        read_json(&manifest),
        json!({"name": "x", "version": "2.0.10", "author": {"name": "a"}})
    );
}

#[tokio::test]
async fn missing_record_prompts_once_and_persists() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "manifest.json", r#"{"version":"1.2.3"}"#);
    let publisher = Arc::new(RecordingPublisher::default());
    let (prompt, asked) = CountingPrompt::new("entered-id");

    let report = workflow(temp.path(), publisher.clone())
        .run(Box::new(prompt))
        .await
        .unwrap();

    assert_eq!(*asked.lock(), 1);
    assert_eq!(report.theme_id, ThemeId::new("entered-id"));
    assert_eq!(
        fs::read_to_string(temp.path().join(".env")).unwrap(),
        "THEME_ID=entered-id\n"
    );
    assert_eq!(publisher.published(), vec!["entered-id".to_string()]);
}

#[tokio::test]
async fn second_run_reuses_record_and_bumps_again() {
    let temp = TempDir::new().unwrap();
    let manifest = write_file(temp.path(), "manifest.json", r#"{"version":"1.2.3"}"#);
    let publisher = Arc::new(RecordingPublisher::default());

    workflow(temp.path(), publisher.clone())
        .run(line_prompt("theme-1\n"))
        .await
        .unwrap();
    let (prompt, asked) = CountingPrompt::new("other");
    workflow(temp.path(), publisher.clone())
        .run(Box::new(prompt))
        .await
        .unwrap();

    assert_eq!(*asked.lock(), 0);
    assert_eq!(
        publisher.published(),
        vec!["theme-1".to_string(), "theme-1".to_string()]
    );
    assert_eq!(read_json(&manifest), json!({"version": "1.2.5"}));
}

#[tokio::test]
async fn record_without_key_halts_before_manifest() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), ".env", "OTHER=1\n");
    let original = r#"{"version":"1.2.3"}"#;
    let manifest = write_file(temp.path(), "manifest.json", original);
    let publisher = Arc::new(RecordingPublisher::default());

    let err = workflow(temp.path(), publisher.clone())
        .run(line_prompt(""))
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::AwaitConfigResolution);
    assert!(matches!(err.error, ReleaseError::ConfigKeyMissing { .. }));
    assert!(publisher.published().is_empty());
    assert_eq!(fs::read_to_string(&manifest).unwrap(), original);
}

#[tokio::test]
async fn publisher_failure_does_not_block_bump() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), ".env", "THEME_ID=abc\n");
    let manifest = write_file(temp.path(), "manifest.json", r#"{"version":"0.0.1"}"#);
    let publisher = Arc::new(RecordingPublisher::failing());

    let report = workflow(temp.path(), publisher.clone())
        .run(line_prompt(""))
        .await
        .unwrap();

    assert_eq!(report.bump.new_version, "0.0.2");
    assert_eq!(read_json(&manifest), json!({"version": "0.0.2"}));
}

#[tokio::test]
async fn missing_manifest_halts_without_touching_record() {
    let temp = TempDir::new().unwrap();
    let publisher = Arc::new(RecordingPublisher::default());
    let (prompt, asked) = CountingPrompt::new("id");

    let err = workflow(temp.path(), publisher.clone())
        .run(Box::new(prompt))
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::LocateManifest);
    assert!(matches!(err.error, ReleaseError::ManifestNotFound { .. }));
    assert_eq!(*asked.lock(), 0);
    assert!(!temp.path().join(".env").exists());
    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn bad_version_fails_after_publishing() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), ".env", "THEME_ID=abc\n");
    write_file(temp.path(), "manifest.json", r#"{"version":"1.2.a"}"#);
    let publisher = Arc::new(RecordingPublisher::default());

    let err = workflow(temp.path(), publisher.clone())
        .run(line_prompt(""))
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::BumpVersion);
    assert!(matches!(err.error, ReleaseError::PatchNotNumeric { .. }));
    // Publishing happened during resolution and is not undone.
    assert_eq!(publisher.published(), vec!["abc".to_string()]);
}

#[tokio::test]
async fn custom_file_names_are_resolved_against_root() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("theme")).unwrap();
    write_file(temp.path(), "theme.env", "THEME_ID=custom\n");
    let manifest = write_file(temp.path(), "theme/manifest.json", r#"{"version":"3.1.4"}"#);
    let files = FilesConfig {
        env_file: "theme.env".into(),
        manifest_file: "theme/manifest.json".into(),
    };
    let publisher = Arc::new(RecordingPublisher::default());

    let report = Workflow::new(WorkflowConfig::new(temp.path(), &files), publisher.clone())
        .run(line_prompt(""))
        .await
        .unwrap();

    assert_eq!(report.theme_id, ThemeId::new("custom"));
    assert_eq!(read_json(&manifest), json!({"version": "3.1.5"}));
}
