//! Common test utilities for planboard integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't pollute
//! the user's `~/.local/share/planboard/` directory.

#![allow(dead_code)]

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with isolated data storage.
///
/// Each `TestEnv` creates three temporary directories:
/// - `work_dir`: Acts as the project directory the store is derived from
/// - `data_dir`: Holds planboard's data (via `PB_DATA_DIR` env var)
/// - `config_dir`: Holds the system config.kdl (via `PB_CONFIG_DIR` env var)
///
/// The `pb()` method returns a `Command` that sets these per-invocation,
/// making tests parallel-safe.
pub struct TestEnv {
    pub work_dir: TempDir,
    pub data_dir: TempDir,
    pub config_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with isolated directories.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().unwrap(),
            data_dir: TempDir::new().unwrap(),
            config_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the pb binary with isolated directories.
    pub fn pb(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_pb"));
        cmd.current_dir(self.work_dir.path());
        cmd.env("PB_DATA_DIR", self.data_dir.path());
        cmd.env("PB_CONFIG_DIR", self.config_dir.path());
        cmd.env_remove("PB_STORE");
        cmd.env_remove("PB_LOG");
        cmd
    }

    /// Run `pb` with `args`, assert success, and parse stdout as JSON.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.pb().args(args).assert().success().get_output().stdout.clone();
        parse_json(&output)
    }

    /// Get the path to the project directory.
    pub fn path(&self) -> &std::path::Path {
        self.work_dir.path()
    }

    /// Get the path to the data directory.
    pub fn data_path(&self) -> &std::path::Path {
        self.data_dir.path()
    }

    /// Get the path to the system config directory.
    pub fn config_path(&self) -> &std::path::Path {
        self.config_dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse command output as JSON, with the raw text in the panic message.
pub fn parse_json(bytes: &[u8]) -> serde_json::Value {
    let text = String::from_utf8_lossy(bytes);
    serde_json::from_str(text.trim())
        .unwrap_or_else(|e| panic!("invalid JSON ({}): {}", e, text))
}
