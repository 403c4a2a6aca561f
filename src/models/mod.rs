//! Data models for plan documents.
//!
//! This module defines the core data structures:
//! - `PlanDocument` - The root document holding everything below
//! - `Phase` / `Task` - Time-boxed groups of work and their items
//! - `Section` / `Field` - Content areas described by typed fields
//! - `TechItem` - One entry in a tech stack category
//! - `Risk` / `Goal` - Risk register and overview goals
//! - `Comment` - Free-form notes attached to a section id
//! - `CompletedTasks` - Task ids checked off by the user
//!
//! Collections are `im::Vector`s so that cloning a document is cheap and an
//! edit only copies the path from the root to the changed value.

pub mod defaults;
pub mod normalize;
pub mod theme;

use chrono::{DateTime, Utc};
use im::Vector;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered mapping from tech stack category to its items.
pub type TechStack = IndexMap<String, Vector<TechItem>>;

/// Keys a model does not know about, kept as-is so export loses nothing.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// The root plan document.
///
/// Deserialization is lenient: any JSON value is accepted and normalized so
/// that every collection is present (see [`normalize`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct PlanDocument {
    pub config: PlanConfig,

    pub overview: Overview,

    pub phases: Vector<Phase>,

    pub sections: Vector<Section>,

    #[serde(rename = "techStack")]
    pub tech_stack: TechStack,

    pub risks: Vector<Risk>,

    /// Top-level keys this model does not know about, kept for export.
    #[serde(flatten)]
    pub extra: Extra,
}

impl From<serde_json::Value> for PlanDocument {
    fn from(value: serde_json::Value) -> Self {
        normalize::document(&value)
    }
}

impl PlanDocument {
    /// Total number of tasks across all phases.
    pub fn total_tasks(&self) -> usize {
        self.phases.iter().map(|p| p.tasks.len()).sum()
    }

    /// Find a task by its id, returning the owning phase alongside it.
    pub fn find_task(&self, task_id: &str) -> Option<(&Phase, &Task)> {
        self.phases
            .iter()
            .find_map(|p| p.tasks.iter().find(|t| t.id == task_id).map(|t| (p, t)))
    }

    /// Id for the next phase: one past the largest existing id, or 1.
    pub fn next_phase_id(&self) -> i64 {
        self.phases.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
    }
}

/// Document header and colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub title: String,

    pub subtitle: String,

    #[serde(rename = "brandName")]
    pub brand_name: String,

    /// Color role name to hex color. Unused roles are preserved.
    pub colors: IndexMap<String, String>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// Summary text and goals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub summary: String,

    pub goals: Vector<Goal>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// A single project goal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub goal: String,

    pub desc: String,

    #[serde(flatten)]
    pub extra: Extra,
}

/// A titled, time-boxed group of tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Unique within the document's phases
    pub id: i64,

    pub title: String,

    /// Week range expression, e.g. "3" or "3-5"
    pub weeks: String,

    /// Short display glyph
    pub icon: String,

    pub summary: String,

    pub tasks: Vector<Task>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Phase {
    /// Create a phase with the editor's defaults.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: "New Phase".to_string(),
            weeks: String::new(),
            icon: "📋".to_string(),
            summary: String::new(),
            tasks: Vector::new(),
            extra: Extra::new(),
        }
    }

    /// Comment section id for this phase.
    pub fn section_id(&self) -> String {
        format!("phase-{}", self.id)
    }
}

/// A single work item inside a phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// `<phaseId>-<ordinal>`, stable for the life of the task
    pub id: String,

    pub task: String,

    pub detail: String,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Task {
    /// Create an empty task for the given phase and 1-based ordinal.
    pub fn new(phase_id: i64, ordinal: usize) -> Self {
        Self {
            id: format!("{}-{}", phase_id, ordinal),
            task: String::new(),
            detail: String::new(),
            extra: Extra::new(),
        }
    }
}

/// A named group of typed fields describing a content area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,

    /// Secondary identity, used for comment partitioning
    pub layout: String,

    pub color: String,

    pub fields: Vector<Field>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for Section {
    fn default() -> Self {
        Self {
            name: "New Section".to_string(),
            layout: "new_section".to_string(),
            color: "#6B7280".to_string(),
            fields: Vector::new(),
            extra: Extra::new(),
        }
    }
}

impl Section {
    /// Comment section id for this section.
    pub fn section_id(&self) -> String {
        format!("section-{}", self.layout)
    }
}

/// A typed field inside a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Sub-field labels (read-only in the editor)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// The kind of content a field holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    #[serde(rename = "Rich Text")]
    RichText,
    Image,
    Link,
    Select,
    Repeater,
    Number,
    Date,
    File,
}

impl FieldType {
    /// Get all field types in editor order.
    pub fn all() -> &'static [FieldType] {
        &[
            FieldType::Text,
            FieldType::Textarea,
            FieldType::RichText,
            FieldType::Image,
            FieldType::Link,
            FieldType::Select,
            FieldType::Repeater,
            FieldType::Number,
            FieldType::Date,
            FieldType::File,
        ]
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Textarea => "Textarea",
            FieldType::RichText => "Rich Text",
            FieldType::Image => "Image",
            FieldType::Link => "Link",
            FieldType::Select => "Select",
            FieldType::Repeater => "Repeater",
            FieldType::Number => "Number",
            FieldType::Date => "Date",
            FieldType::File => "File",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FieldType {
    type Err = String;

    /// Case-insensitive; "rich text", "rich_text" and "richtext" all match.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        FieldType::all()
            .iter()
            .copied()
            .find(|t| t.as_str().replace(' ', "").to_lowercase() == key)
            .ok_or_else(|| format!("Invalid field type: {}", s))
    }
}

/// One entry in a tech stack category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechItem {
    pub name: String,

    pub purpose: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl TechItem {
    /// The details value shown next to the item: `cost`, else `note`.
    pub fn details(&self) -> Option<&str> {
        self.cost.as_deref().or(self.note.as_deref())
    }
}

/// Impact level of a risk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    Low,
    #[default]
    Medium,
    High,
}

impl Impact {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Low => "Low",
            Impact::Medium => "Medium",
            Impact::High => "High",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Impact {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Impact::Low),
            "medium" => Ok(Impact::Medium),
            "high" => Ok(Impact::High),
            _ => Err(format!("Invalid impact: {}", s)),
        }
    }
}

/// An entry in the risk register.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    pub risk: String,

    pub impact: Impact,

    pub mitigation: String,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Risk {
    /// Comment section id for the risk at `index`.
    pub fn section_id(index: usize) -> String {
        format!("risk-{}", index)
    }
}

/// A free-form note attached to a location in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Caller-generated, unique within the comment list
    pub id: String,

    pub author: String,

    pub text: String,

    /// When the comment was added
    pub timestamp: DateTime<Utc>,

    /// Free-form location id, e.g. "phase-1" or "overview-summary"
    #[serde(rename = "sectionId")]
    pub section_id: String,
}

/// Comment section id for the overview summary.
pub const OVERVIEW_SECTION_ID: &str = "overview-summary";

/// Comment section id for the tech category at `index`.
pub fn tech_section_id(index: usize) -> String {
    format!("tech-{}", index)
}

/// Ids of tasks the user has checked off.
///
/// Stored independently of the plan; ids of deleted tasks are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletedTasks(IndexSet<String>);

impl CompletedTasks {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a task id is marked complete.
    pub fn contains(&self, task_id: &str) -> bool {
        self.0.contains(task_id)
    }

    /// Flip the completion state of a task id. Returns the new state.
    pub fn toggle(&mut self, task_id: &str) -> bool {
        if self.0.shift_remove(task_id) {
            false
        } else {
            self.0.insert(task_id.to_string());
            true
        }
    }

    /// Number of ids in the set, including stale ones.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate ids in the order they were checked.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    /// Ids that no longer match a task in `doc`.
    pub fn stale<'a>(&'a self, doc: &PlanDocument) -> Vec<&'a String> {
        self.0
            .iter()
            .filter(|id| doc.find_task(id).is_none())
            .collect()
    }
}

impl FromIterator<String> for CompletedTasks {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_serialization() {
        let json = serde_json::to_string(&FieldType::RichText).unwrap();
        assert_eq!(json, r#""Rich Text""#);
        let parsed: FieldType = serde_json::from_str(r#""Textarea""#).unwrap();
        assert_eq!(parsed, FieldType::Textarea);
    }

    #[test]
    fn test_field_type_from_str_is_lenient() {
        assert_eq!("rich text".parse::<FieldType>().unwrap(), FieldType::RichText);
        assert_eq!("Rich_Text".parse::<FieldType>().unwrap(), FieldType::RichText);
        assert_eq!("DATE".parse::<FieldType>().unwrap(), FieldType::Date);
        assert!("Spreadsheet".parse::<FieldType>().is_err());
    }

    #[test]
    fn test_impact_from_str() {
        assert_eq!("high".parse::<Impact>().unwrap(), Impact::High);
        assert_eq!("Low".parse::<Impact>().unwrap(), Impact::Low);
        assert!("severe".parse::<Impact>().is_err());
    }

    #[test]
    fn test_phase_new_defaults() {
        let phase = Phase::new(4);
        assert_eq!(phase.id, 4);
        assert_eq!(phase.title, "New Phase");
        assert_eq!(phase.icon, "📋");
        assert!(phase.weeks.is_empty());
        assert!(phase.tasks.is_empty());
        assert_eq!(phase.section_id(), "phase-4");
    }

    #[test]
    fn test_task_id_format() {
        assert_eq!(Task::new(2, 3).id, "2-3");
    }

    #[test]
    fn test_section_default() {
        let section = Section::default();
        assert_eq!(section.name, "New Section");
        assert_eq!(section.layout, "new_section");
        assert_eq!(section.color, "#6B7280");
        assert_eq!(section.section_id(), "section-new_section");
    }

    #[test]
    fn test_tech_item_details_prefers_cost() {
        let mut item = TechItem {
            name: "Postgres".to_string(),
            purpose: "Primary DB".to_string(),
            cost: None,
            note: Some("managed".to_string()),
            ..TechItem::default()
        };
        assert_eq!(item.details(), Some("managed"));
        item.cost = Some("$50/mo".to_string());
        assert_eq!(item.details(), Some("$50/mo"));
    }

    #[test]
    fn test_tech_item_omits_absent_details() {
        let item = TechItem::default();
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"name":"","purpose":""}"#);
    }

    #[test]
    fn test_next_phase_id() {
        let mut doc = PlanDocument::default();
        assert_eq!(doc.next_phase_id(), 1);
        doc.phases.push_back(Phase::new(7));
        doc.phases.push_back(Phase::new(3));
        assert_eq!(doc.next_phase_id(), 8);
    }

    #[test]
    fn test_completed_tasks_toggle() {
        let mut done = CompletedTasks::new();
        assert!(done.toggle("1-1"));
        assert!(done.contains("1-1"));
        assert!(!done.toggle("1-1"));
        assert!(!done.contains("1-1"));
        assert!(done.is_empty());
    }

    #[test]
    fn test_completed_tasks_serializes_as_list() {
        let done: CompletedTasks = ["1-2".to_string(), "1-1".to_string()].into_iter().collect();
        assert_eq!(serde_json::to_string(&done).unwrap(), r#"["1-2","1-1"]"#);
    }

    #[test]
    fn test_completed_tasks_stale_ids() {
        let mut doc = PlanDocument::default();
        let mut phase = Phase::new(1);
        phase.tasks.push_back(Task::new(1, 1));
        doc.phases.push_back(phase);

        let done: CompletedTasks = ["1-1".to_string(), "9-9".to_string()].into_iter().collect();
        assert_eq!(done.stale(&doc), vec!["9-9"]);
    }

    #[test]
    fn test_comment_serialization_uses_camel_case() {
        let comment = Comment {
            id: "1".to_string(),
            author: "Ana".to_string(),
            text: "Looks good".to_string(),
            timestamp: "2026-01-01T00:00:00Z".parse().unwrap(),
            section_id: "phase-1".to_string(),
        };
        let json = serde_json::to_string(&comment).unwrap();
        assert!(json.contains(r#""sectionId":"phase-1""#));
        let back: Comment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, comment);
    }
}
