//! Action logging for planboard commands.
//!
//! Every `pb` invocation appends one JSONL record to `<data root>/action.log`.

use crate::storage::data_root;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the action log under the data root.
pub const ACTION_LOG_FILE: &str = "action.log";

const MAX_STRING_CHARS: usize = 100;
const MAX_ARRAY_ITEMS: usize = 10;

/// Represents a single action log entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionLog {
    /// ISO 8601 timestamp when the action occurred
    pub timestamp: DateTime<Utc>,

    /// Store directory the command ran against
    pub store_path: String,

    /// Command name (e.g., "task toggle", "export")
    pub command: String,

    /// Command arguments as JSON
    pub args: serde_json::Value,

    /// Whether the command succeeded
    pub success: bool,

    /// Error message if the command failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Command execution duration in milliseconds
    pub duration_ms: u64,

    /// User who executed the command
    pub user: String,
}

impl ActionLog {
    /// Build an entry stamped with the current time and user.
    pub fn new(
        store_path: &Path,
        command: &str,
        args: serde_json::Value,
        error: Option<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            store_path: store_path.display().to_string(),
            command: command.to_string(),
            args: sanitize_args(&args),
            success: error.is_none(),
            error,
            duration_ms,
            user: current_user(),
        }
    }
}

/// Default action log location.
pub fn log_path() -> crate::Result<PathBuf> {
    Ok(data_root()?.join(ACTION_LOG_FILE))
}

/// Append `entry` to the action log.
///
/// Never fails: problems are reported through `tracing` and otherwise ignored.
pub fn log_action(entry: &ActionLog) {
    let path = match log_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(error = %e, "could not determine action log path");
            return;
        }
    };
    if let Err(e) = write_log_entry(&path, entry) {
        tracing::warn!(path = %path.display(), error = %e, "failed to write action log");
    }
}

/// Write a log entry to the log file.
fn write_log_entry(path: &Path, entry: &ActionLog) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(entry)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", json)?;

    Ok(())
}

/// Shorten long strings and large arrays so log lines stay small.
fn sanitize_args(args: &serde_json::Value) -> serde_json::Value {
    match args {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), sanitize_args(v)))
                .collect(),
        ),
        serde_json::Value::Array(arr) => {
            if arr.len() > MAX_ARRAY_ITEMS {
                serde_json::Value::String(format!("[Array with {} items]", arr.len()))
            } else {
                serde_json::Value::Array(arr.iter().map(sanitize_args).collect())
            }
        }
        serde_json::Value::String(s) => {
            let chars = s.chars().count();
            if chars > MAX_STRING_CHARS {
                let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
                serde_json::Value::String(format!("{}... ({} chars)", head, chars))
            } else {
                serde_json::Value::String(s.clone())
            }
        }
        _ => args.clone(),
    }
}

/// Get the current user's username.
fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}
