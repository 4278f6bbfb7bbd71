//! Integration tests for the config subcommands (CLI)

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use tubesift::Config;

use crate::helpers::{run_tubesift, temp_fixture};

fn tubesift(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tubesift").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("TUBESIFT_LOG")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Show / Path
// ============================================================================

#[test]
fn config_show_prints_defaults() {
    let (stdout, stderr, exit_code) = run_tubesift(&["config", "show"]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    let config: Config = toml::from_str(&stdout).unwrap();
    assert_eq!(config, Config::default());
    assert!(stdout.contains("[transcript]"));
    assert!(stdout.contains("mode = \"smart\""));
    assert!(stdout.contains("[filter.thresholds]"));
}

#[test]
fn config_show_reflects_file() {
    let dir = TempDir::new().unwrap();
    let path = temp_fixture(&dir, "config.toml", "[transcript]\nmax_segments = 7\n");

    tubesift(&dir)
        .args(["--config", path.to_str().unwrap(), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_segments = 7"));
}

#[test]
fn config_path_honors_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");

    tubesift(&dir)
        .args(["--config", path.to_str().unwrap(), "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn config_show_rejects_broken_override() {
    let dir = TempDir::new().unwrap();
    let path = temp_fixture(&dir, "config.toml", "[transcript\n");

    tubesift(&dir)
        .args(["--config", path.to_str().unwrap(), "config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load config"));
}

// ============================================================================
// Init
// ============================================================================

#[test]
fn config_init_writes_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    tubesift(&dir)
        .args(["--config", path.to_str().unwrap(), "config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = temp_fixture(&dir, "config.toml", "[transcript]\nmax_segments = 7\n");

    tubesift(&dir)
        .args(["--config", path.to_str().unwrap(), "config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    tubesift(&dir)
        .args(["--config", path.to_str().unwrap(), "config", "init", "--force"])
        .assert()
        .success();
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

// ============================================================================
// Logging
// ============================================================================

#[test]
fn verbose_flag_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    let captions = temp_fixture(
        &dir,
        "a.srt",
        "1\n00:00:01,000 --> 00:00:02,000\nhello\n",
    );

    tubesift(&dir)
        .args(["-vv", "transcript", captions.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0:01] hello"))
        .stderr(predicate::str::contains("extracted transcript segments"));
}
