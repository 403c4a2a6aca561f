//! Storage layer for planboard data.
//!
//! This module handles persistence of the plan document, the completed-task
//! set, comments and the last-used comment author.
//!
//! ## Layout
//!
//! The default store lives at `~/.local/share/planboard/<path-hash>/`, keyed by
//! a hash of the working directory so each project gets its own plan. Each
//! store key is one JSON file:
//!
//! - `plan-data.json` - the plan document
//! - `plan-checked-tasks.json` - list of completed task ids
//! - `plan-comments.json` - list of comments
//! - `commentAuthor.json` - last-used comment author
//!
//! A session `config.kdl` sits next to them (see [`crate::config`]).
//!
//! Absent keys read as their defaults. Values that fail to parse are logged
//! and also read as defaults, so a damaged file never blocks the tool.

pub mod backend;

pub use backend::{BackendType, FileBackend, MemoryBackend, StorageBackend};

use crate::comments::CommentList;
use crate::config::PlanboardConfig;
use crate::models::defaults::default_plan;
use crate::models::{Comment, CompletedTasks, PlanDocument};
use crate::{Error, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data root directory.
pub const DATA_DIR_ENV: &str = "PB_DATA_DIR";

/// Environment variable overriding the directory holding the system config.kdl.
pub const CONFIG_DIR_ENV: &str = "PB_CONFIG_DIR";

const CONFIG_FILE_NAME: &str = "config.kdl";

/// Keys under which planboard values are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    Plan,
    CompletedTasks,
    Comments,
    CommentAuthor,
}

impl StoreKey {
    /// Get the raw key string.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Plan => "plan-data",
            StoreKey::CompletedTasks => "plan-checked-tasks",
            StoreKey::Comments => "plan-comments",
            StoreKey::CommentAuthor => "commentAuthor",
        }
    }
}

/// Typed storage over a [`StorageBackend`].
pub struct Storage {
    backend: Box<dyn StorageBackend>,
    root: Option<PathBuf>,
}

impl Storage {
    /// Open the file store at `store_dir`, creating it if needed.
    pub fn open(store_dir: &Path) -> Result<Self> {
        let backend = FileBackend::open(store_dir)?;
        Ok(Self {
            backend: Box::new(backend),
            root: Some(store_dir.to_path_buf()),
        })
    }

    /// Storage over an in-memory backend.
    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(MemoryBackend::new()))
    }

    /// Storage over any backend. Such a store has no directory for config files.
    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            backend,
            root: None,
        }
    }

    /// Human-readable location of the store.
    pub fn location(&self) -> String {
        self.backend.location()
    }

    /// Backend type name.
    pub fn backend_type(&self) -> &'static str {
        self.backend.backend_type()
    }

    fn read_json(&self, key: StoreKey) -> Result<Option<serde_json::Value>> {
        let Some(raw) = self.backend.read(key.as_str())? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key = key.as_str(), error = %e, "ignoring unreadable stored value");
                Ok(None)
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: StoreKey, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        tracing::debug!(key = key.as_str(), bytes = raw.len(), "writing stored value");
        self.backend.write(key.as_str(), &raw)
    }

    // ==================== Plan ====================

    /// Load the plan, or the bundled default when none is stored.
    pub fn load_plan(&self) -> Result<PlanDocument> {
        Ok(self
            .read_json(StoreKey::Plan)?
            .map(PlanDocument::from)
            .unwrap_or_else(|| default_plan().clone()))
    }

    /// Replace the stored plan.
    pub fn save_plan(&mut self, doc: &PlanDocument) -> Result<()> {
        self.write_json(StoreKey::Plan, doc)
    }

    // ==================== Completed tasks ====================

    /// Load completed task ids. Non-string entries are dropped.
    pub fn load_completed(&self) -> Result<CompletedTasks> {
        let ids: CompletedTasks = match self.read_json(StoreKey::CompletedTasks)? {
            Some(serde_json::Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => CompletedTasks::new(),
        };
        Ok(ids)
    }

    /// Replace the stored completed task ids.
    pub fn save_completed(&mut self, done: &CompletedTasks) -> Result<()> {
        self.write_json(StoreKey::CompletedTasks, done)
    }

    // ==================== Comments ====================

    /// Load comments. Entries that are not valid comments are dropped.
    pub fn load_comments(&self) -> Result<CommentList> {
        let comments: CommentList = match self.read_json(StoreKey::Comments)? {
            Some(serde_json::Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| match serde_json::from_value::<Comment>(v) {
                    Ok(c) => Some(c),
                    Err(e) => {
                        tracing::warn!(error = %e, "dropping unreadable comment");
                        None
                    }
                })
                .collect(),
            _ => CommentList::new(),
        };
        Ok(comments)
    }

    /// Replace the stored comments.
    pub fn save_comments(&mut self, comments: &CommentList) -> Result<()> {
        self.write_json(StoreKey::Comments, comments)
    }

    // ==================== Comment author ====================

    /// Load the last-used comment author, or an empty string.
    pub fn load_author(&self) -> Result<String> {
        Ok(self
            .read_json(StoreKey::CommentAuthor)?
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default())
    }

    /// Remember the comment author.
    pub fn save_author(&mut self, author: &str) -> Result<()> {
        self.write_json(StoreKey::CommentAuthor, author)
    }

    // ==================== Reset ====================

    /// Restore the bundled default plan and clear completed tasks and comments.
    ///
    /// The remembered comment author is kept.
    pub fn reset(&mut self) -> Result<PlanDocument> {
        let doc = crate::edit::reset();
        self.save_plan(&doc)?;
        self.save_completed(&CompletedTasks::new())?;
        self.save_comments(&CommentList::new())?;
        Ok(doc)
    }

    // ==================== Config ====================

    /// Path to the session config.kdl, when backed by files.
    pub fn config_kdl_path(&self) -> Option<PathBuf> {
        self.root.as_ref().map(|root| root.join(CONFIG_FILE_NAME))
    }

    /// Read the session config. Stores without a directory have an empty one.
    pub fn read_planboard_config(&self) -> Result<PlanboardConfig> {
        match self.config_kdl_path() {
            Some(path) => PlanboardConfig::read(&path),
            None => Ok(PlanboardConfig::new()),
        }
    }

    /// Write the session config.
    pub fn write_planboard_config(&self, config: &PlanboardConfig) -> Result<()> {
        let path = self.config_kdl_path().ok_or_else(|| {
            Error::Other(format!(
                "{} store has no session config",
                self.backend.backend_type()
            ))
        })?;
        config.write(&path)
    }

    /// Path to the system config.kdl: `$PB_CONFIG_DIR/config.kdl` if set,
    /// else `~/.config/planboard/config.kdl`.
    pub fn system_config_kdl_path() -> Option<PathBuf> {
        match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir).join(CONFIG_FILE_NAME)),
            _ => dirs::config_dir().map(|d| d.join("planboard").join(CONFIG_FILE_NAME)),
        }
    }

    /// Read the system config. A missing file is an empty config.
    pub fn read_system_planboard_config() -> Result<PlanboardConfig> {
        match Self::system_config_kdl_path() {
            Some(path) => PlanboardConfig::read(&path),
            None => Ok(PlanboardConfig::new()),
        }
    }

    /// Write the system config.
    pub fn write_system_planboard_config(config: &PlanboardConfig) -> Result<()> {
        let path = Self::system_config_kdl_path()
            .ok_or_else(|| Error::Other("Could not determine config directory".to_string()))?;
        config.write(&path)
    }
}

/// Root directory for all planboard data: `$PB_DATA_DIR` if set, else
/// `~/.local/share/planboard/`.
pub fn data_root() -> Result<PathBuf> {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => Ok(dirs::data_dir()
            .ok_or_else(|| Error::Other("Could not determine data directory".to_string()))?
            .join("planboard")),
    }
}

/// Get the store directory for a working directory.
///
/// Uses a hash of the canonical path to create a unique directory under the
/// [`data_root`].
pub fn get_store_dir(work_dir: &Path) -> Result<PathBuf> {
    let data_root = data_root()?;

    let canonical = work_dir
        .canonicalize()
        .map_err(|e| Error::Other(format!("Could not canonicalize path: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string_lossy().as_bytes());
    let hash_hex = format!("{:x}", hasher.finalize());

    Ok(data_root.join(&hash_hex[..12]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::{NewComment, add_comment};
    use crate::edit;
    use crate::test_utils::TestEnv;

    #[test]
    fn test_empty_store_reads_defaults() {
        let storage = Storage::in_memory();
        assert_eq!(&storage.load_plan().unwrap(), default_plan());
        assert!(storage.load_completed().unwrap().is_empty());
        assert!(storage.load_comments().unwrap().is_empty());
        assert_eq!(storage.load_author().unwrap(), "");
    }

    #[test]
    fn test_plan_round_trip_through_files() {
        let env = TestEnv::new();
        let mut storage = env.open_storage();
        let doc = edit::add_phase(default_plan());
        storage.save_plan(&doc).unwrap();

        let reopened = env.open_storage();
        assert_eq!(reopened.load_plan().unwrap(), doc);
    }

    #[test]
    fn test_tech_category_order_survives_reload() {
        let env = TestEnv::new();
        let mut storage = env.open_storage();
        let mut doc = edit::add_tech_category(default_plan(), "Analytics");
        doc.config.colors.insert("zebra".to_string(), "#000000".to_string());
        doc.extra.insert("b-key".to_string(), serde_json::json!(1));
        doc.extra.insert("a-key".to_string(), serde_json::json!(2));
        storage.save_plan(&doc).unwrap();

        let loaded = env.open_storage().load_plan().unwrap();
        let keys: Vec<&str> = loaded.tech_stack.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["frontend", "cms", "hosting", "analytics"]);
        assert_eq!(loaded.config.colors.keys().last().map(String::as_str), Some("zebra"));
        let extra: Vec<&str> = loaded.extra.keys().map(String::as_str).collect();
        assert_eq!(extra, vec!["b-key", "a-key"]);
    }

    #[test]
    fn test_completed_tasks_round_trip() {
        let mut storage = Storage::in_memory();
        let mut done = CompletedTasks::new();
        done.toggle("2-1");
        done.toggle("1-3");
        storage.save_completed(&done).unwrap();
        assert_eq!(storage.load_completed().unwrap(), done);
    }

    #[test]
    fn test_comments_and_author_round_trip() {
        let mut storage = Storage::in_memory();
        let now = chrono::Utc::now();
        let new = NewComment {
            author: "Ana",
            text: "Check the redirects",
            section_id: "phase-2",
        };
        let (comments, _) = add_comment(&CommentList::new(), "1", new, now).unwrap();
        storage.save_comments(&comments).unwrap();
        storage.save_author("Ana").unwrap();

        assert_eq!(storage.load_comments().unwrap(), comments);
        assert_eq!(storage.load_author().unwrap(), "Ana");
    }

    #[test]
    fn test_corrupt_values_fall_back_to_defaults() {
        let mut backend = MemoryBackend::new();
        backend.write(StoreKey::Plan.as_str(), "{ broken").unwrap();
        backend
            .write(StoreKey::CompletedTasks.as_str(), r#"["1-1", 7, null]"#)
            .unwrap();
        backend
            .write(
                StoreKey::Comments.as_str(),
                r#"[{"id":"1"},{"id":"2","author":"A","text":"t","timestamp":"2026-01-01T00:00:00.000Z","sectionId":"x"}]"#,
            )
            .unwrap();
        let storage = Storage::with_backend(Box::new(backend));

        assert_eq!(&storage.load_plan().unwrap(), default_plan());
        let done = storage.load_completed().unwrap();
        assert_eq!(done.len(), 1);
        assert!(done.contains("1-1"));
        let comments = storage.load_comments().unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, "2");
    }

    #[test]
    fn test_reset_clears_progress_and_comments() {
        let mut storage = Storage::in_memory();
        storage.save_plan(&edit::add_phase(default_plan())).unwrap();
        let done: CompletedTasks = ["1-1".to_string()].into_iter().collect();
        storage.save_completed(&done).unwrap();
        storage.save_author("Ana").unwrap();

        let doc = storage.reset().unwrap();
        assert_eq!(&doc, default_plan());
        assert_eq!(&storage.load_plan().unwrap(), default_plan());
        assert!(storage.load_completed().unwrap().is_empty());
        assert!(storage.load_comments().unwrap().is_empty());
        assert_eq!(storage.load_author().unwrap(), "Ana");
    }

    #[test]
    fn test_store_dir_is_stable_per_path() {
        let env = TestEnv::new();
        let a = get_store_dir(env.path()).unwrap();
        let b = get_store_dir(env.path()).unwrap();
        assert_eq!(a, b);
        let name = a.file_name().unwrap().to_string_lossy().to_string();
        assert_eq!(name.len(), 12);
        assert!(name.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_memory_store_has_no_root() {
        let storage = Storage::in_memory();
        assert!(storage.config_kdl_path().is_none());
        assert_eq!(storage.backend_type(), "memory");
        assert_eq!(storage.read_planboard_config().unwrap(), PlanboardConfig::new());
        assert!(storage.write_planboard_config(&PlanboardConfig::new()).is_err());
    }

    #[test]
    fn test_session_config_round_trip() {
        let env = TestEnv::new();
        let storage = env.open_storage();
        let mut config = PlanboardConfig::new();
        config.set("author", "Ana").unwrap();
        storage.write_planboard_config(&config).unwrap();

        assert!(env.data_path().join("config.kdl").exists());
        assert_eq!(env.open_storage().read_planboard_config().unwrap(), config);
    }
}
