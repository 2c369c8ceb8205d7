use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

const RELEASES_MANIFEST: &str = r#"
slug = "releases"
title = "Release Tracking"
type = "release"
version = "1.0.0"
release_doc = "<code>{webhook_url}</code>"

[[config]]
name = "api_key"
type = "secret"

[[config]]
name = "repo"
"#;

const HIDDEN_MANIFEST: &str = r#"{"slug": "internal-audit", "title": "Internal Audit", "hidden": true}"#;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directory");
    }
    fs::write(path, contents).expect("Failed to write file");
}

/// A working directory with settings and two plugin manifests
fn hub_dir() -> TempDir {
    let dir = tempdir().expect("Failed to create temp directory");
    write(dir.path(), "pluginhub.toml", "base_url = \"https://hub.example.com\"\n");
    write(dir.path(), "plugins/releases/manifest.toml", RELEASES_MANIFEST);
    write(dir.path(), "plugins/internal-audit.json", HIDDEN_MANIFEST);
    dir
}

fn pluginhub(dir: &TempDir) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("pluginhub")?;
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn test_ping_command() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("pluginhub")?;
    cmd.arg("--ping");
    cmd.assert().success().stdout(predicate::str::contains("pong"));
    Ok(())
}

#[test]
fn test_no_args_prints_hint() -> Result<(), Box<dyn std::error::Error>> {
    let dir = hub_dir();
    pluginhub(&dir)?
        .assert()
        .success()
        .stdout(predicate::str::contains("No command specified"))
        .stdout(predicate::str::contains("pong").not());
    Ok(())
}

#[test]
fn test_plugin_list_hides_hidden_plugins() -> Result<(), Box<dyn std::error::Error>> {
    let dir = hub_dir();
    pluginhub(&dir)?
        .args(["plugin", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("releases\tRelease Tracking\t1.0.0\tavailable"))
        .stdout(predicate::str::contains("internal-audit").not());
    Ok(())
}

#[test]
fn test_plugin_list_with_empty_plugins_dir() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    pluginhub(&dir)?
        .args(["plugin", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plugins registered."));
    Ok(())
}

#[test]
fn test_plugin_show_outputs_view_model() -> Result<(), Box<dyn std::error::Error>> {
    let dir = hub_dir();
    let output = pluginhub(&dir)?
        .args(["plugin", "show", "releases"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(value["id"], "releases");
    assert_eq!(value["type"], "release");
    assert!(value.get("enabled").is_none());
    assert!(value.get("config").is_none());
    Ok(())
}

#[test]
fn test_enable_then_show_with_config() -> Result<(), Box<dyn std::error::Error>> {
    let dir = hub_dir();
    pluginhub(&dir)?
        .args(["plugin", "enable", "releases", "--project", "backend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plugin 'releases' enabled for project 'backend'."));
    assert!(dir.path().join("options/projects/backend.json").is_file());

    let output = pluginhub(&dir)?
        .args(["plugin", "show", "releases", "--project", "backend", "--with-config"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(value["enabled"], true);
    assert_eq!(value["config"][0]["label"], "Api Key");
    assert_eq!(value["config"][0]["hasSavedValue"], false);
    assert!(value["config"][0].get("value").is_none());
    assert_eq!(value["config"][1]["value"], serde_json::Value::Null);

    pluginhub(&dir)?
        .args(["plugin", "list", "--project", "backend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("releases\tRelease Tracking\t1.0.0\tenabled"));
    Ok(())
}

#[test]
fn test_plugin_show_unknown_plugin_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = hub_dir();
    pluginhub(&dir)?
        .args(["plugin", "show", "missing"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("missing"));
    Ok(())
}

#[test]
fn test_enable_rejects_project_outside_options_dir() -> Result<(), Box<dyn std::error::Error>> {
    let dir = hub_dir();
    pluginhub(&dir)?
        .args(["plugin", "enable", "releases", "--project", "../../x"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid option scope"));
    assert!(!dir.path().join("x.json").exists());
    Ok(())
}

#[test]
fn test_event_types() -> Result<(), Box<dyn std::error::Error>> {
    let dir = hub_dir();
    pluginhub(&dir)?
        .args(["event", "types"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inbox.inbox_out"));
    Ok(())
}

#[test]
fn test_event_validate() -> Result<(), Box<dyn std::error::Error>> {
    let dir = hub_dir();
    let payload = r#"{"default_user_id": 1, "organization_id": 2, "group_id": "g-9", "action": "archived", "inbox_in_ts": 1700000000}"#;
    let output = pluginhub(&dir)?
        .args(["event", "validate", "inbox.inbox_out", payload])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(value["type"], "inbox.inbox_out");
    assert_eq!(value["data"]["action"], "archived");
    assert_eq!(value["data"]["user_id"], serde_json::Value::Null);
    Ok(())
}

#[test]
fn test_event_validate_missing_attribute_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = hub_dir();
    pluginhub(&dir)?
        .args(["event", "validate", "inbox.inbox_out", r#"{"action": "archived"}"#])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}
