//! Common test helpers shared across integration tests

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not all helpers are used by every test file

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Path of the compiled wrapper binary
pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_dev_appserver_wrapper"))
}

/// Helper to create a temporary directory for tests
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Helper to create a `dev_appserver.py` stub in a directory
pub fn create_dev_appserver(dir: &Path) -> PathBuf {
    let path = dir.join("dev_appserver.py");
    fs::write(&path, "# dev_appserver stub\n").unwrap();
    path
}

/// Helper to write an executable script (Unix only)
#[cfg(unix)]
pub fn create_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Join directories into a `PATH` value
pub fn path_of(dirs: &[&Path]) -> OsString {
    std::env::join_paths(dirs).unwrap()
}

/// Helper to create a Command with an empty environment
/// so the host's PATH and overrides never leak into a test
pub fn wrapper_command(binary: &Path) -> Command {
    let mut cmd = Command::new(binary);
    cmd.env_clear();
    cmd
}

/// Parse the JSON plan printed on a dry run
pub fn parse_plan(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("dry run did not print JSON")
}
