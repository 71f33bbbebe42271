//! Integration tests for the bup CLI
//!
//! These tests drive the built binary against a temp config file through
//! the `BUP_CONFIG` environment variable. Only network-free commands are
//! exercised here; the upload path is covered by the scheduler tests in
//! bup-core against adapter doubles.

use std::path::Path;
use std::process::{Command, Output};

use bup_core::{Profile, ProfileFile};
use tempfile::TempDir;

fn run(args: &[&str], config_path: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bup"))
        .args(args)
        .env("BUP_CONFIG", config_path)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to execute bup")
}

fn seed(config_path: &Path, current: &str, profiles: &[Profile]) {
    let file = ProfileFile {
        current: current.to_string(),
        config: profiles.to_vec(),
    };
    std::fs::write(config_path, serde_json::to_string_pretty(&file).unwrap()).unwrap();
}

fn load(config_path: &Path) -> ProfileFile {
    serde_json::from_str(&std::fs::read_to_string(config_path).unwrap()).unwrap()
}

fn sample(name: &str) -> Profile {
    let mut p = Profile::new(
        name,
        "assets",
        "https://s3.example.com",
        "AKIAEXAMPLE",
        "supersecretkey",
    );
    p.prefix = "img".to_string();
    p
}

#[test]
fn test_ls_empty_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("buprc.json");

    let output = run(&["ls"], &config);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No profiles configured"));
}

#[test]
fn test_ls_json_lists_profiles() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("buprc.json");
    seed(&config, "p1", &[sample("p1"), sample("p2")]);

    let output = run(&["--json", "ls"], &config);
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("ls --json emits valid JSON");
    assert_eq!(parsed["current"], "p1");
    assert_eq!(parsed["profiles"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["profiles"][0]["current"], true);
    assert_eq!(parsed["profiles"][1]["current"], false);
}

#[test]
fn test_use_sets_current() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("buprc.json");
    seed(&config, "", &[sample("p1")]);

    let output = run(&["use", "p1"], &config);
    assert!(output.status.success());
    assert_eq!(load(&config).current, "p1");
}

#[test]
fn test_use_unknown_keeps_current_and_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("buprc.json");
    seed(&config, "p1", &[sample("p1")]);

    let output = run(&["use", "missing"], &config);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not found"));
    assert_eq!(load(&config).current, "p1");
}

#[test]
fn test_remove_clears_current() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("buprc.json");
    seed(&config, "p1", &[sample("p1"), sample("p2")]);

    let output = run(&["remove", "p1"], &config);
    assert!(output.status.success());

    let file = load(&config);
    assert_eq!(file.current, "");
    assert_eq!(file.config.len(), 1);
    assert_eq!(file.config[0].name, "p2");
}

#[test]
fn test_show_masks_secret_key() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("buprc.json");
    seed(&config, "", &[sample("p1")]);

    let output = run(&["show", "p1"], &config);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("assets"));
    assert!(!stdout.contains("supersecretkey"));
}

#[test]
fn test_show_unknown_profile() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("buprc.json");

    let output = run(&["show", "missing"], &config);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_config_edits_profile() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("buprc.json");
    seed(&config, "", &[sample("p1")]);

    let output = run(&["config", "p1", "--prefix", "static", "--host", "https://cdn.example.com"], &config);
    assert!(output.status.success());

    let file = load(&config);
    assert_eq!(file.config[0].prefix, "static");
    assert_eq!(file.config[0].host, "https://cdn.example.com");
    // untouched fields survive the edit
    assert_eq!(file.config[0].bucket, "assets");
}

#[test]
fn test_config_without_flags_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("buprc.json");
    seed(&config, "", &[sample("p1")]);

    let output = run(&["config", "p1"], &config);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_putfolder_missing_dir_is_preflight_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("buprc.json");
    seed(&config, "p1", &[sample("p1")]);

    let output = run(&["putfolder", "/definitely/not/here"], &config);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
}

#[test]
fn test_put_without_profile_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("buprc.json");

    let output = run(&["put", "a.png"], &config);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("buprc.json");

    let output = run(&["completions", "bash"], &config);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("bup"));
}
