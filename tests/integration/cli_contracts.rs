use std::fs;

use clap::{CommandFactory, Parser};
use tempfile::TempDir;
use theme_release::tooling::cli::{Cli, CliContext, Commands, ConfigCommands};
use theme_release::ReleaseError;

use crate::support::{line_prompt, read_json, write_file};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["theme-release"],
        vec!["theme-release", "release"],
        vec!["theme-release", "bump"],
        vec!["theme-release", "--workspace", "/tmp/theme", "release"],
        vec!["theme-release", "--config", "ci.toml", "--verbose"],
        vec!["theme-release", "--log-level", "debug", "--log-format", "json"],
        vec!["theme-release", "config", "show"],
        vec!["theme-release", "config", "show", "--format", "json"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_unknown_command() {
    assert!(Cli::try_parse_from(["theme-release", "publish"]).is_err());
    assert!(Cli::try_parse_from(["theme-release", "config"]).is_err());
}

#[test]
fn help_lists_commands() {
    let mut command = <Cli as CommandFactory>::command();
    let mut output = Vec::new();
    command.write_long_help(&mut output).unwrap();
    let output = String::from_utf8(output).unwrap();

    for token in ["release", "bump", "config", "--workspace", "--log-level"] {
        assert!(output.contains(token), "help missing {token}");
    }
}

#[test]
fn config_show_reads_workspace_settings() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "theme-release.toml",
        "[publisher]\nprogram = \"zcli-next\"\nargs = [\"themes:update\", \"--verbose\"]\n",
    );

    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = ctx
        .execute(&Commands::Config {
            command: ConfigCommands::Show {
                format: "json".to_string(),
            },
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["settings"]["publisher"]["program"], "zcli-next");
    assert_eq!(
        parsed["settings"]["publisher"]["args"],
        serde_json::json!(["themes:update", "--verbose"])
    );
    assert!(parsed["manifest_file"]
        .as_str()
        .unwrap()
        .ends_with("manifest.json"));
}

#[test]
fn invalid_settings_file_is_settings_error() {
    let temp = TempDir::new().unwrap();
    let path = write_file(temp.path(), "broken.toml", "[publisher\nprogram = ");

    let result = CliContext::new(temp.path().to_path_buf(), Some(path));
    assert!(matches!(result, Err(ReleaseError::SettingsError(_))));
}

#[test]
fn bump_command_only_touches_manifest() {
    let temp = TempDir::new().unwrap();
    let manifest = write_file(temp.path(), "manifest.json", r#"{"version":"9.9.9","x":[1]}"#);

    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = ctx.execute(&Commands::Bump).unwrap();

    assert_eq!(output, "Version bumped to 9.9.10.");
    assert_eq!(
        read_json(&manifest),
        serde_json::json!({"version": "9.9.10", "x": [1]})
    );
    assert!(!temp.path().join(".env").exists());
}

#[test]
fn bump_command_without_manifest_fails() {
    let temp = TempDir::new().unwrap();
    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    assert!(matches!(
        ctx.execute(&Commands::Bump),
        Err(ReleaseError::ManifestNotFound { .. })
    ));
}

#[test]
fn bump_command_on_directory_manifest_is_read_failure() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("manifest.json")).unwrap();
    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    assert!(matches!(
        ctx.execute(&Commands::Bump),
        Err(ReleaseError::ManifestReadFailure { .. })
    ));
}

#[cfg(unix)]
#[test]
fn release_command_runs_configured_publisher() {
    let temp = TempDir::new().unwrap();
    let record = temp.path().join("published.txt");
    let script = format!("printf '%s' \"$1\" > '{}'", record.display());
    let settings = format!(
        "[publisher]\nprogram = \"sh\"\nargs = [\"-c\", {script:?}, \"sh\"]\nshow_progress = false\n"
    );
    write_file(temp.path(), "theme-release.toml", &settings);
    let manifest = write_file(temp.path(), "manifest.json", r#"{"version":"1.0.0"}"#);

    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = ctx
        .execute_with_prompt(&Commands::Release, line_prompt("cli-theme\n"))
        .unwrap();

    assert_eq!(output, "Theme successfully updated.");
    assert_eq!(fs::read_to_string(&record).unwrap(), "--themeId=cli-theme");
    assert_eq!(
        fs::read_to_string(temp.path().join(".env")).unwrap(),
        "THEME_ID=cli-theme\n"
    );
    assert_eq!(read_json(&manifest), serde_json::json!({"version": "1.0.1"}));
}
