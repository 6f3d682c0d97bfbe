//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers isolated from the user's configuration
//! - Fixture helpers for building symlink trees

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak the caller's settings into tests.
const ISOLATED_VARS: &[&str] = &[
    "LINKCHASE_CONFIG",
    "LINKCHASE_LOG_MODE",
    "LINKCHASE_OUTPUT_FORMAT",
    "LINKCHASE_SHOW_CHAIN",
    "LINKCHASE_EXPAND_TILDE",
    "LINKCHASE_MUST_EXIST",
    "LINKCHASE_SCAN_MAX_DEPTH",
    "LINKCHASE_SCAN_INCLUDE_HIDDEN",
    "LINKCHASE_SCAN_BROKEN_ONLY",
];

/// Test environment with an isolated home and working directory.
///
/// This struct provides:
/// - A temporary directory (canonical) for test files
/// - A fake home directory so no user config is picked up
/// - Helper methods for building symlink trees
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Canonical path to the temporary directory
    pub temp_path: PathBuf,
    /// Home directory used by spawned commands
    pub home_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = std::fs::canonicalize(temp_dir.path()).expect("Failed to canonicalize");
        let home_dir = temp_path.join("home");
        std::fs::create_dir_all(&home_dir).expect("Failed to create home dir");

        Self {
            temp_dir,
            temp_path,
            home_dir,
        }
    }

    /// Get a bare command builder without any isolation.
    pub fn command_bare(&self) -> Command {
        Command::cargo_bin("linkchase").expect("Failed to find linkchase binary")
    }

    /// Get a command builder that runs inside the test directory with a
    /// fake home and no `LINKCHASE_*` variables.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.current_dir(&self.temp_path).env("HOME", &self.home_dir);
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Absolute path of `relative` inside the test directory.
    pub fn join(&self, relative: &str) -> PathBuf {
        self.temp_path.join(relative)
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Create a file with the given contents.
    pub fn create_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Create a symlink at `name` pointing at `target` verbatim.
    #[cfg(unix)]
    pub fn create_link(&self, name: &str, target: impl AsRef<Path>) -> PathBuf {
        let path = self.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::os::unix::fs::symlink(target, &path).expect("Failed to create symlink");
        path
    }

    /// Write the user configuration file.
    pub fn write_user_config(&self, contents: &str) -> PathBuf {
        let dir = self.home_dir.join(".linkchase");
        std::fs::create_dir_all(&dir).expect("Failed to create user config dir");
        let path = dir.join("config.yaml");
        std::fs::write(&path, contents).expect("Failed to write user config");
        path
    }
}
