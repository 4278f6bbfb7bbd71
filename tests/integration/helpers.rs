//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Directory holding the checked-in fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Read a fixture file to a string.
pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

/// Write `content` to `name` inside `dir` and return the path.
pub fn temp_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write temp fixture");
    path
}

/// Run the tubesift binary with an isolated config home.
///
/// Returns stdout, stderr and the exit code.
pub fn run_tubesift(args: &[&str]) -> (String, String, i32) {
    let config_home = TempDir::new().expect("Failed to create config home");
    let output = Command::new(env!("CARGO_BIN_EXE_tubesift"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("TUBESIFT_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute tubesift");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}
