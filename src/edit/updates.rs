//! Single-field updates for each editable element.
//!
//! Each enum names one field and carries its new value. `parse` builds an
//! update from a field name and a raw string, as typed on the command line.

use crate::models::{Field, FieldType, Goal, Impact, Phase, PlanConfig, Risk, Section, Task, TechItem};
use crate::{Error, Result};

fn unknown_field(kind: &str, field: &str, valid: &[&str]) -> Error {
    Error::InvalidInput(format!(
        "Unknown {} field '{}' (expected one of: {})",
        kind,
        field,
        valid.join(", ")
    ))
}

/// Lowercase and fold `-` to `_` so "brand-name" and "brandName" both match.
fn field_key(field: &str) -> String {
    field.to_lowercase().replace('-', "_")
}

/// A change to one phase field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseUpdate {
    Title(String),
    Weeks(String),
    Icon(String),
    Summary(String),
}

impl PhaseUpdate {
    pub const FIELDS: &'static [&'static str] = &["title", "weeks", "icon", "summary"];

    pub fn parse(field: &str, value: String) -> Result<Self> {
        match field_key(field).as_str() {
            "title" => Ok(Self::Title(value)),
            "weeks" => Ok(Self::Weeks(value)),
            "icon" => Ok(Self::Icon(value)),
            "summary" => Ok(Self::Summary(value)),
            _ => Err(unknown_field("phase", field, Self::FIELDS)),
        }
    }

    pub(crate) fn apply(self, phase: &mut Phase) {
        match self {
            Self::Title(v) => phase.title = v,
            Self::Weeks(v) => phase.weeks = v,
            Self::Icon(v) => phase.icon = v,
            Self::Summary(v) => phase.summary = v,
        }
    }
}

/// A change to one task field. The id is not editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskUpdate {
    Task(String),
    Detail(String),
}

impl TaskUpdate {
    pub const FIELDS: &'static [&'static str] = &["task", "detail"];

    pub fn parse(field: &str, value: String) -> Result<Self> {
        match field_key(field).as_str() {
            "task" | "title" => Ok(Self::Task(value)),
            "detail" => Ok(Self::Detail(value)),
            _ => Err(unknown_field("task", field, Self::FIELDS)),
        }
    }

    pub(crate) fn apply(self, task: &mut Task) {
        match self {
            Self::Task(v) => task.task = v,
            Self::Detail(v) => task.detail = v,
        }
    }
}

/// A change to one section field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionUpdate {
    Name(String),
    Layout(String),
    Color(String),
}

impl SectionUpdate {
    pub const FIELDS: &'static [&'static str] = &["name", "layout", "color"];

    pub fn parse(field: &str, value: String) -> Result<Self> {
        match field_key(field).as_str() {
            "name" => Ok(Self::Name(value)),
            "layout" => Ok(Self::Layout(value)),
            "color" => Ok(Self::Color(value)),
            _ => Err(unknown_field("section", field, Self::FIELDS)),
        }
    }

    pub(crate) fn apply(self, section: &mut Section) {
        match self {
            Self::Name(v) => section.name = v,
            Self::Layout(v) => section.layout = v,
            Self::Color(v) => section.color = v,
        }
    }
}

/// A change to a section field's name or type. Sub-field labels are read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Type(FieldType),
}

impl FieldUpdate {
    pub const FIELDS: &'static [&'static str] = &["name", "type"];

    pub fn parse(field: &str, value: String) -> Result<Self> {
        match field_key(field).as_str() {
            "name" => Ok(Self::Name(value)),
            "type" => value
                .parse::<FieldType>()
                .map(Self::Type)
                .map_err(Error::InvalidInput),
            _ => Err(unknown_field("field", field, Self::FIELDS)),
        }
    }

    pub(crate) fn apply(self, field: &mut Field) {
        match self {
            Self::Name(v) => field.name = v,
            Self::Type(t) => field.field_type = t,
        }
    }
}

/// A change to one tech item field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TechItemUpdate {
    Name(String),
    Purpose(String),
    Cost(String),
    Note(String),
    /// Writes to `cost` if present, else `note` if present, else `cost`.
    Details(String),
}

impl TechItemUpdate {
    pub const FIELDS: &'static [&'static str] = &["name", "purpose", "cost", "note", "details"];

    pub fn parse(field: &str, value: String) -> Result<Self> {
        match field_key(field).as_str() {
            "name" => Ok(Self::Name(value)),
            "purpose" => Ok(Self::Purpose(value)),
            "cost" => Ok(Self::Cost(value)),
            "note" => Ok(Self::Note(value)),
            "details" => Ok(Self::Details(value)),
            _ => Err(unknown_field("tech item", field, Self::FIELDS)),
        }
    }

    pub(crate) fn apply(self, item: &mut TechItem) {
        match self {
            Self::Name(v) => item.name = v,
            Self::Purpose(v) => item.purpose = v,
            Self::Cost(v) => item.cost = Some(v),
            Self::Note(v) => item.note = Some(v),
            Self::Details(v) => {
                if item.cost.is_none() && item.note.is_some() {
                    item.note = Some(v);
                } else {
                    item.cost = Some(v);
                }
            }
        }
    }
}

/// A change to one risk field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskUpdate {
    Risk(String),
    Impact(Impact),
    Mitigation(String),
}

impl RiskUpdate {
    pub const FIELDS: &'static [&'static str] = &["risk", "impact", "mitigation"];

    pub fn parse(field: &str, value: String) -> Result<Self> {
        match field_key(field).as_str() {
            "risk" => Ok(Self::Risk(value)),
            "impact" => value
                .parse::<Impact>()
                .map(Self::Impact)
                .map_err(Error::InvalidInput),
            "mitigation" => Ok(Self::Mitigation(value)),
            _ => Err(unknown_field("risk", field, Self::FIELDS)),
        }
    }

    pub(crate) fn apply(self, risk: &mut Risk) {
        match self {
            Self::Risk(v) => risk.risk = v,
            Self::Impact(i) => risk.impact = i,
            Self::Mitigation(v) => risk.mitigation = v,
        }
    }
}

/// A change to one goal field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalUpdate {
    Goal(String),
    Desc(String),
}

impl GoalUpdate {
    pub const FIELDS: &'static [&'static str] = &["goal", "desc"];

    pub fn parse(field: &str, value: String) -> Result<Self> {
        match field_key(field).as_str() {
            "goal" => Ok(Self::Goal(value)),
            "desc" | "description" => Ok(Self::Desc(value)),
            _ => Err(unknown_field("goal", field, Self::FIELDS)),
        }
    }

    pub(crate) fn apply(self, goal: &mut Goal) {
        match self {
            Self::Goal(v) => goal.goal = v,
            Self::Desc(v) => goal.desc = v,
        }
    }
}

/// A change to one header field. Colors are set with [`super::set_color`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigUpdate {
    Title(String),
    Subtitle(String),
    BrandName(String),
}

impl ConfigUpdate {
    pub const FIELDS: &'static [&'static str] = &["title", "subtitle", "brand-name"];

    pub fn parse(field: &str, value: String) -> Result<Self> {
        match field_key(field).as_str() {
            "title" => Ok(Self::Title(value)),
            "subtitle" => Ok(Self::Subtitle(value)),
            "brand_name" | "brandname" | "brand" => Ok(Self::BrandName(value)),
            _ => Err(unknown_field("plan", field, Self::FIELDS)),
        }
    }

    pub(crate) fn apply(self, config: &mut PlanConfig) {
        match self {
            Self::Title(v) => config.title = v,
            Self::Subtitle(v) => config.subtitle = v,
            Self::BrandName(v) => config.brand_name = v,
        }
    }
}
