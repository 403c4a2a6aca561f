//! Command implementations for the planboard CLI.
//!
//! Each command loads what it needs from [`Storage`], applies the pure
//! operations in [`crate::edit`], [`crate::views`] and [`crate::comments`],
//! saves the result and returns a value implementing [`Output`].
//! Commands are organized by area:
//! - this module - views, import/export/reset, config and system info
//! - `plan` - header, overview, phases, tasks, sections, fields, tech and risks
//! - `comment` - comments

mod comment;
mod plan;

pub use comment::*;
pub use plan::*;

use crate::config::{CONFIG_KEYS, ResolvedConfig, ValueSource};
use crate::edit;
use crate::models::theme::{self, Theme};
use crate::models::{Comment, Field, Goal, PlanDocument, Risk, Section, TechItem};
use crate::storage::Storage;
use crate::views::{PhaseStatus, PlanProgress, PlanStats, Timeline};
use crate::{Error, Result, action_log};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// One-line description of a plan element, used in human output.
pub trait Summary {
    fn summary(&self) -> String;
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() { "(untitled)" } else { value }
}

impl Summary for Goal {
    fn summary(&self) -> String {
        if self.desc.is_empty() {
            or_placeholder(&self.goal).to_string()
        } else {
            format!("{} - {}", or_placeholder(&self.goal), self.desc)
        }
    }
}

impl Summary for Section {
    fn summary(&self) -> String {
        let names: Vec<String> = self.fields.iter().map(Summary::summary).collect();
        format!("{} ({}) [{}]", self.name, self.layout, names.join(", "))
    }
}

impl Summary for Field {
    fn summary(&self) -> String {
        match &self.sub {
            Some(sub) if !sub.is_empty() => {
                format!("{}: {} <{}>", self.name, self.field_type, sub.join(", "))
            }
            _ => format!("{}: {}", self.name, self.field_type),
        }
    }
}

impl Summary for TechItem {
    fn summary(&self) -> String {
        let mut line = format!("{} - {}", or_placeholder(&self.name), self.purpose);
        if let Some(details) = self.details() {
            line.push_str(&format!(" ({})", details));
        }
        line
    }
}

impl Summary for Risk {
    fn summary(&self) -> String {
        format!("[{}] {} => {}", self.impact, or_placeholder(&self.risk), self.mitigation)
    }
}

impl Summary for Comment {
    fn summary(&self) -> String {
        format!(
            "{} {} @{} ({}): {}",
            self.id,
            self.author,
            self.section_id,
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.text
        )
    }
}

/// A newly appended element and its index.
#[derive(Debug, Serialize)]
pub struct Added<T> {
    pub kind: &'static str,
    pub index: usize,
    pub item: T,
}

impl<T: Serialize + Summary> Output for Added<T> {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        format!("Added {} {}: {}", self.kind, self.index, self.item.summary())
    }
}

/// An element removed at an index.
#[derive(Debug, Serialize)]
pub struct Removed<T> {
    pub kind: &'static str,
    pub index: usize,
    pub item: T,
}

impl<T: Serialize + Summary> Output for Removed<T> {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        format!("Removed {} {}: {}", self.kind, self.index, self.item.summary())
    }
}

/// An element after one of its fields changed.
#[derive(Debug, Serialize)]
pub struct Updated<T> {
    pub kind: &'static str,
    pub index: usize,
    pub field: String,
    pub item: T,
}

impl<T: Serialize + Summary> Output for Updated<T> {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        format!(
            "Updated {} {} {}: {}",
            self.kind,
            self.index,
            self.field,
            self.item.summary()
        )
    }
}

/// An element paired with its position.
#[derive(Debug, Serialize)]
pub struct Indexed<T> {
    pub index: usize,
    #[serde(flatten)]
    pub item: T,
}

/// An ordered listing of elements.
#[derive(Debug, Serialize)]
pub struct Listing<T> {
    pub kind: &'static str,
    pub count: usize,
    pub items: Vec<Indexed<T>>,
}

impl<T> Listing<T> {
    pub fn new(kind: &'static str, items: impl IntoIterator<Item = T>) -> Self {
        let items: Vec<Indexed<T>> = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| Indexed { index, item })
            .collect();
        Self {
            kind,
            count: items.len(),
            items,
        }
    }
}

impl<T: Serialize + Summary> Output for Listing<T> {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        if self.items.is_empty() {
            return format!("No {} entries.", self.kind);
        }
        let mut lines = vec![format!("{} {} entries:", self.count, self.kind)];
        for entry in &self.items {
            lines.push(format!("  [{}] {}", entry.index, entry.item.summary()));
        }
        lines.join("\n")
    }
}

/// Fail with `NotFound` unless `index < len`.
pub(crate) fn require_index(kind: &str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::NotFound(format!(
            "{} {} (have {})",
            kind, index, len
        )))
    }
}

/// Load the plan, apply `f`, and save the result.
pub(crate) fn edit_plan<T>(
    storage: &mut Storage,
    f: impl FnOnce(&PlanDocument) -> Result<(PlanDocument, T)>,
) -> Result<T> {
    let doc = storage.load_plan()?;
    let (next, out) = f(&doc)?;
    storage.save_plan(&next)?;
    Ok(out)
}

// ==================== Views ====================

impl Output for PlanStats {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let mut lines = vec![self.brand_name.clone(), self.title.clone()];
        if !self.subtitle.is_empty() {
            lines.push(self.subtitle.clone());
        }
        lines.push(String::new());
        lines.push(format!(
            "Phases: {} | Tasks: {}/{} | Timeline: {} | Progress: {}%",
            self.phases, self.completed_tasks, self.total_tasks, self.timeline, self.progress
        ));
        lines.join("\n")
    }
}

/// Header statistics for the stored plan.
pub fn show(storage: &Storage) -> Result<PlanStats> {
    let doc = storage.load_plan()?;
    let done = storage.load_completed()?;
    Ok(PlanStats::new(&doc, &done))
}

/// Resolved theme colors plus the fixed palettes.
#[derive(Debug, Serialize)]
pub struct ThemeResult {
    pub colors: Theme,
    pub phase_palette: Vec<&'static str>,
    pub status: StatusColors,
}

#[derive(Debug, Serialize)]
pub struct StatusColors {
    pub complete: &'static str,
    pub in_progress: &'static str,
    pub not_started: &'static str,
}

impl Output for ThemeResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let c = &self.colors;
        [
            ("primary", c.primary.as_str()),
            ("dark", c.dark.as_str()),
            ("light", c.light.as_str()),
            ("accent", c.accent.as_str()),
            ("surface", c.surface.as_str()),
            ("border", c.border.as_str()),
        ]
        .iter()
        .map(|(role, hex)| format!("{:<8} {}", role, hex))
        .chain(std::iter::once(format!(
            "phases   {}",
            self.phase_palette.join(" ")
        )))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// Theme colors for the stored plan.
pub fn theme(storage: &Storage) -> Result<ThemeResult> {
    let doc = storage.load_plan()?;
    Ok(ThemeResult {
        colors: Theme::resolve(&doc),
        phase_palette: theme::PHASE_PALETTE.to_vec(),
        status: StatusColors {
            complete: theme::COMPLETE,
            in_progress: theme::IN_PROGRESS,
            not_started: theme::NOT_STARTED,
        },
    })
}

impl Output for Timeline {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!("Timeline: {}", self.label())];
        if self.max_week > 0 {
            let header: String = (1..=self.max_week).map(|w| format!("{:>3}", w)).collect();
            lines.push(header);
        }
        for row in &self.rows {
            let cells: String = row
                .cells
                .iter()
                .map(|&on| if on { "  █" } else { "  ·" })
                .collect();
            lines.push(format!("{}   {} {}", cells, row.icon, row.title));
        }
        lines.join("\n")
    }
}

/// Week grid for the stored plan.
pub fn timeline(storage: &Storage) -> Result<Timeline> {
    Ok(Timeline::build(&storage.load_plan()?))
}

impl Output for PlanProgress {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Progress: {}/{} tasks ({}%)",
            self.completed_tasks, self.total_tasks, self.percentage
        )];
        for phase in &self.phases {
            let mark = match phase.status {
                PhaseStatus::Complete => "✓",
                PhaseStatus::InProgress => "◐",
                PhaseStatus::NotStarted => "○",
            };
            lines.push(format!(
                "  {} Phase {} {}: {}/{} ({:.0}%)",
                mark, phase.phase_id, phase.title, phase.completed, phase.total, phase.percentage
            ));
        }
        if self.stale_ids > 0 {
            lines.push(format!(
                "  ({} completed ids no longer match a task)",
                self.stale_ids
            ));
        }
        lines.join("\n")
    }
}

/// Overall and per-phase progress.
pub fn progress(storage: &Storage) -> Result<PlanProgress> {
    let doc = storage.load_plan()?;
    let done = storage.load_completed()?;
    Ok(PlanProgress::new(&doc, &done))
}

// ==================== Import / export / reset ====================

/// Exported plan, either inline or written to a file.
#[derive(Debug, Serialize)]
pub struct ExportResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub bytes: usize,
    #[serde(skip)]
    pub content: String,
}

impl Output for ExportResult {
    fn to_json(&self) -> String {
        match self.path {
            Some(_) => serde_json::to_string(self).unwrap_or_default(),
            None => self.content.clone(),
        }
    }

    fn to_human(&self) -> String {
        match &self.path {
            Some(path) => format!("Exported plan to {} ({} bytes)", path.display(), self.bytes),
            None => self.content.clone(),
        }
    }
}

/// Serialize the stored plan as pretty JSON, optionally writing it to `output`.
pub fn export(storage: &Storage, output: Option<&Path>) -> Result<ExportResult> {
    let content = edit::export_json(&storage.load_plan()?)?;
    if let Some(path) = output {
        std::fs::write(path, format!("{}\n", content))?;
    }
    Ok(ExportResult {
        path: output.map(Path::to_path_buf),
        bytes: content.len(),
        content,
    })
}

#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub imported: bool,
    pub file: PathBuf,
    pub phases: usize,
    pub total_tasks: usize,
}

impl Output for ImportResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        format!(
            "Imported {}: {} phases, {} tasks",
            self.file.display(),
            self.phases,
            self.total_tasks
        )
    }
}

/// Replace the stored plan with the JSON in `file`.
///
/// Completed tasks and comments are left as they are. Invalid JSON fails
/// with [`Error::InvalidImport`] before anything is written.
pub fn import(storage: &mut Storage, file: &Path) -> Result<ImportResult> {
    let content = std::fs::read_to_string(file)?;
    let doc = edit::import_json(&content)?;
    storage.save_plan(&doc)?;
    tracing::debug!(file = %file.display(), phases = doc.phases.len(), "imported plan");
    Ok(ImportResult {
        imported: true,
        file: file.to_path_buf(),
        phases: doc.phases.len(),
        total_tasks: doc.total_tasks(),
    })
}

#[derive(Debug, Serialize)]
pub struct ResetResult {
    pub reset: bool,
    pub phases: usize,
    pub total_tasks: usize,
}

impl Output for ResetResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        format!(
            "Restored the default plan ({} phases, {} tasks); progress and comments cleared",
            self.phases, self.total_tasks
        )
    }
}

/// Restore the default plan and clear progress and comments.
pub fn reset(storage: &mut Storage, confirmed: bool) -> Result<ResetResult> {
    if !confirmed {
        return Err(Error::InvalidInput(
            "reset discards the current plan, progress and comments; pass --yes to confirm"
                .to_string(),
        ));
    }
    let doc = storage.reset()?;
    Ok(ResetResult {
        reset: true,
        phases: doc.phases.len(),
        total_tasks: doc.total_tasks(),
    })
}

// ==================== Config ====================

fn require_config_key(key: &str) -> Result<()> {
    if CONFIG_KEYS.contains(&key) {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "Unknown config key '{}' (expected one of: {})",
            key,
            CONFIG_KEYS.join(", ")
        )))
    }
}

/// A config value and where it came from.
#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: Option<String>,
    pub source: Option<ValueSource>,
}

impl ConfigEntry {
    fn lookup(config: &ResolvedConfig, key: &str) -> Self {
        let (value, source) = match config.lookup(key) {
            Some((value, source)) => (Some(value), Some(source)),
            None => (None, None),
        };
        Self {
            key: key.to_string(),
            value,
            source,
        }
    }

    fn line(&self) -> String {
        match (&self.value, &self.source) {
            (Some(value), Some(source)) => format!("{} = {} ({})", self.key, value, source),
            _ => format!("{} is not set", self.key),
        }
    }
}

impl Output for ConfigEntry {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        self.line()
    }
}

/// Resolved value of one config key.
pub fn config_get(config: &ResolvedConfig, key: &str) -> Result<ConfigEntry> {
    require_config_key(key)?;
    Ok(ConfigEntry::lookup(config, key))
}

#[derive(Debug, Serialize)]
pub struct ConfigList {
    pub configs: Vec<ConfigEntry>,
}

impl Output for ConfigList {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        self.configs
            .iter()
            .map(ConfigEntry::line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Resolved values of every config key.
pub fn config_list(config: &ResolvedConfig) -> ConfigList {
    ConfigList {
        configs: CONFIG_KEYS
            .iter()
            .map(|key| ConfigEntry::lookup(config, key))
            .collect(),
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigSet {
    pub key: String,
    pub value: Option<String>,
    pub scope: &'static str,
    pub path: Option<PathBuf>,
}

impl Output for ConfigSet {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        match &self.value {
            Some(value) => format!("Set {} = {} ({})", self.key, value, self.scope),
            None => format!("Cleared {} ({})", self.key, self.scope),
        }
    }
}

/// Set a key in the session config, or the system config when `system` is set.
///
/// Setting `author` to an empty string clears it.
pub fn config_set(storage: &Storage, key: &str, value: &str, system: bool) -> Result<ConfigSet> {
    require_config_key(key)?;
    let (mut config, path) = if system {
        (
            Storage::read_system_planboard_config()?,
            Storage::system_config_kdl_path(),
        )
    } else {
        (storage.read_planboard_config()?, storage.config_kdl_path())
    };
    config.set(key, value)?;
    if system {
        Storage::write_system_planboard_config(&config)?;
    } else {
        storage.write_planboard_config(&config)?;
    }
    Ok(ConfigSet {
        key: key.to_string(),
        value: config.get(key),
        scope: if system { "system" } else { "session" },
        path,
    })
}

// ==================== System ====================

#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub version: &'static str,
    pub build_timestamp: Option<&'static str>,
    pub git_commit: Option<&'static str>,
    pub backend: &'static str,
    pub store: String,
    pub session_config: Option<PathBuf>,
    pub system_config: Option<PathBuf>,
    pub action_log: Option<PathBuf>,
    pub action_log_enabled: bool,
}

impl Output for SystemInfo {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        let mut lines = vec![format!("pb {}", self.version)];
        if let (Some(ts), Some(commit)) = (self.build_timestamp, self.git_commit) {
            lines.push(format!("Built {} ({})", ts, commit));
        }
        lines.push(format!("Store: {} ({})", self.store, self.backend));
        lines.push(format!("Session config: {}", path(&self.session_config)));
        lines.push(format!("System config: {}", path(&self.system_config)));
        lines.push(format!(
            "Action log: {} ({})",
            path(&self.action_log),
            if self.action_log_enabled { "enabled" } else { "disabled" }
        ));
        lines.join("\n")
    }
}

/// Version, build and location details.
pub fn system_info(storage: &Storage, config: &ResolvedConfig) -> SystemInfo {
    SystemInfo {
        version: env!("CARGO_PKG_VERSION"),
        build_timestamp: option_env!("PB_BUILD_TIMESTAMP"),
        git_commit: option_env!("PB_GIT_COMMIT"),
        backend: storage.backend_type(),
        store: storage.location(),
        session_config: storage.config_kdl_path(),
        system_config: Storage::system_config_kdl_path(),
        action_log: action_log::log_path().ok(),
        action_log_enabled: config.action_log_enabled(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigOverrides, PlanboardConfig, resolve_layers};
    use crate::models::defaults::default_plan;
    use crate::test_utils::TestEnv;

    #[test]
    fn test_show_default_plan() {
        let mut storage = Storage::in_memory();
        let stats = show(&storage).unwrap();
        assert_eq!(stats.phases, 2);
        assert_eq!(stats.total_tasks, 7);
        assert_eq!(stats.timeline, "6 Weeks");
        assert_eq!(stats.progress, 0);

        task_toggle(&mut storage, "1-1").unwrap();
        let stats = show(&storage).unwrap();
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.progress, 14);
        assert!(stats.to_human().contains("Progress: 14%"));
    }

    #[test]
    fn test_theme_uses_document_colors() {
        let mut storage = Storage::in_memory();
        meta_color(&mut storage, "accent", "#123456").unwrap();
        let result = theme(&storage).unwrap();
        assert_eq!(result.colors.accent, "#123456");
        assert_eq!(result.phase_palette.len(), 8);
        assert!(result.to_human().contains("accent   #123456"));
    }

    #[test]
    fn test_timeline_human_grid() {
        let storage = Storage::in_memory();
        let grid = timeline(&storage).unwrap();
        assert_eq!(grid.max_week, 6);
        let human = grid.to_human();
        assert!(human.starts_with("Timeline: 6 Weeks"));
        assert_eq!(human.lines().count(), 4);
    }

    #[test]
    fn test_progress_reports_stale_ids() {
        let mut storage = Storage::in_memory();
        let done: crate::models::CompletedTasks =
            ["1-1".to_string(), "9-9".to_string()].into_iter().collect();
        storage.save_completed(&done).unwrap();

        let result = progress(&storage).unwrap();
        assert_eq!(result.completed_tasks, 2);
        assert_eq!(result.stale_ids, 1);
        assert_eq!(result.percentage, 29);
        assert!(result.to_human().contains("1 completed ids no longer match"));
    }

    #[test]
    fn test_export_inline_is_pretty_document() {
        let storage = Storage::in_memory();
        let result = export(&storage, None).unwrap();
        assert!(result.to_json().starts_with("{\n  \"config\""));
        let back = edit::import_json(&result.to_json()).unwrap();
        assert_eq!(&back, default_plan());
    }

    #[test]
    fn test_export_to_file_then_import() {
        let env = TestEnv::new();
        let mut storage = env.open_storage();
        phase_add(&mut storage).unwrap();
        let file = env.path().join("plan.json");
        let result = export(&storage, Some(&file)).unwrap();
        assert!(result.to_json().contains("\"path\""));

        let mut other = Storage::in_memory();
        let imported = import(&mut other, &file).unwrap();
        assert_eq!(imported.phases, 3);
        assert_eq!(other.load_plan().unwrap(), storage.load_plan().unwrap());
    }

    #[test]
    fn test_import_invalid_leaves_plan_unchanged() {
        let env = TestEnv::new();
        let mut storage = env.open_storage();
        phase_add(&mut storage).unwrap();
        let before = storage.load_plan().unwrap();
        let done = task_toggle(&mut storage, "1-1").unwrap();
        assert!(done.completed);

        let file = env.path().join("broken.json");
        std::fs::write(&file, "{ not json").unwrap();
        let err = import(&mut storage, &file).unwrap_err();
        assert!(matches!(err, Error::InvalidImport(_)));
        assert_eq!(storage.load_plan().unwrap(), before);
        assert!(storage.load_completed().unwrap().contains("1-1"));
    }

    #[test]
    fn test_import_keeps_completed_tasks() {
        let env = TestEnv::new();
        let mut storage = env.open_storage();
        task_toggle(&mut storage, "2-1").unwrap();
        let file = env.path().join("min.json");
        std::fs::write(&file, r#"{"phases": [{"id": 2, "tasks": [{"id": "2-1"}]}]}"#).unwrap();

        let result = import(&mut storage, &file).unwrap();
        assert_eq!(result.total_tasks, 1);
        assert!(storage.load_completed().unwrap().contains("2-1"));
        assert_eq!(show(&storage).unwrap().progress, 100);
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut storage = Storage::in_memory();
        phase_add(&mut storage).unwrap();
        assert!(matches!(reset(&mut storage, false), Err(Error::InvalidInput(_))));
        assert_eq!(storage.load_plan().unwrap().phases.len(), 3);

        let result = reset(&mut storage, true).unwrap();
        assert_eq!(result.phases, 2);
        assert_eq!(&storage.load_plan().unwrap(), default_plan());
    }

    #[test]
    fn test_config_set_get_list() {
        let env = TestEnv::new();
        let storage = env.open_storage();
        let set = config_set(&storage, "author", "Ana", false).unwrap();
        assert_eq!(set.value.as_deref(), Some("Ana"));
        assert_eq!(set.scope, "session");

        let session = storage.read_planboard_config().unwrap();
        let resolved = resolve_layers(&session, &PlanboardConfig::new(), &ConfigOverrides::new());
        let entry = config_get(&resolved, "author").unwrap();
        assert_eq!(entry.value.as_deref(), Some("Ana"));
        assert_eq!(entry.source, Some(ValueSource::Session));

        let list = config_list(&resolved);
        assert_eq!(list.configs.len(), CONFIG_KEYS.len());
        assert!(list.to_human().contains("output-format = json (default)"));

        assert!(config_get(&resolved, "editor").is_err());
        assert!(config_set(&storage, "output-format", "yaml", false).is_err());
    }

    #[test]
    fn test_system_info() {
        let storage = Storage::in_memory();
        let info = system_info(&storage, &ResolvedConfig::default());
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(info.backend, "memory");
        assert!(info.session_config.is_none());
        assert!(info.action_log_enabled);
    }

    #[test]
    fn test_listing_human() {
        let listing = Listing::new("goal", default_plan().overview.goals.iter().cloned());
        assert_eq!(listing.count, 3);
        assert!(listing.to_human().starts_with("3 goal entries:"));
        let empty: Listing<Goal> = Listing::new("goal", Vec::new());
        assert_eq!(empty.to_human(), "No goal entries.");
    }
}
