//! Structural edit commands: header, overview, phases, tasks, sections,
//! fields, tech stack and risks.

use super::{Added, Listing, Output, Removed, Summary, Updated, edit_plan, require_index};
use crate::edit::{
    self, ConfigUpdate, FieldUpdate, GoalUpdate, PhaseUpdate, RiskUpdate, SectionUpdate,
    TaskUpdate, TechItemUpdate,
};
use crate::models::theme::ColorRole;
use crate::models::{
    CompletedTasks, Field, Goal, OVERVIEW_SECTION_ID, Overview, Phase, PlanDocument, Risk,
    Section, TechItem, tech_section_id,
};
use crate::storage::Storage;
use crate::views::{PhaseProgress, PhaseStatus};
use crate::{Error, Result};
use serde::Serialize;

/// A single scalar value that was set.
#[derive(Debug, Serialize)]
pub struct ValueSet {
    pub target: &'static str,
    pub field: String,
    pub value: String,
}

impl Output for ValueSet {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        format!("Set {} {} = {}", self.target, self.field, self.value)
    }
}

// ==================== Header ====================

/// Set `title`, `subtitle` or `brand-name`.
pub fn meta_set(storage: &mut Storage, field: &str, value: &str) -> Result<ValueSet> {
    let update = ConfigUpdate::parse(field, value.to_string())?;
    edit_plan(storage, |doc| Ok((edit::update_config(doc, update), ())))?;
    Ok(ValueSet {
        target: "meta",
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// `#rgb` or `#rrggbb`.
fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Set one theme color role.
pub fn meta_color(storage: &mut Storage, role: &str, hex: &str) -> Result<ValueSet> {
    let role = role.to_lowercase();
    let known: Vec<&str> = ColorRole::all().iter().map(ColorRole::key).collect();
    if !known.contains(&role.as_str()) {
        return Err(Error::InvalidInput(format!(
            "Unknown color role '{}' (expected one of: {})",
            role,
            known.join(", ")
        )));
    }
    if !is_hex_color(hex) {
        return Err(Error::InvalidInput(format!(
            "Invalid color '{}' (expected #rgb or #rrggbb)",
            hex
        )));
    }
    edit_plan(storage, |doc| Ok((edit::set_color(doc, &role, hex), ())))?;
    Ok(ValueSet {
        target: "color",
        field: role,
        value: hex.to_string(),
    })
}

// ==================== Overview ====================

impl Output for Overview {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let mut lines = vec![if self.summary.is_empty() {
            "(no summary)".to_string()
        } else {
            self.summary.clone()
        }];
        for (index, goal) in self.goals.iter().enumerate() {
            lines.push(format!("  [{}] {}", index, goal.summary()));
        }
        lines.join("\n")
    }
}

/// Summary and goals.
pub fn overview_show(storage: &Storage) -> Result<Overview> {
    Ok(storage.load_plan()?.overview)
}

/// Replace the overview summary.
pub fn overview_set_summary(storage: &mut Storage, summary: &str) -> Result<ValueSet> {
    edit_plan(storage, |doc| Ok((edit::set_summary(doc, summary), ())))?;
    Ok(ValueSet {
        target: "overview",
        field: "summary".to_string(),
        value: summary.to_string(),
    })
}

pub fn goal_add(storage: &mut Storage) -> Result<Added<Goal>> {
    edit_plan(storage, |doc| {
        let next = edit::add_goal(doc);
        let index = next.overview.goals.len() - 1;
        let item = next.overview.goals[index].clone();
        Ok((next, Added { kind: "goal", index, item }))
    })
}

pub fn goal_remove(storage: &mut Storage, index: usize) -> Result<Removed<Goal>> {
    edit_plan(storage, |doc| {
        require_index("goal", index, doc.overview.goals.len())?;
        let item = doc.overview.goals[index].clone();
        Ok((edit::remove_goal(doc, index), Removed { kind: "goal", index, item }))
    })
}

pub fn goal_set(storage: &mut Storage, index: usize, field: &str, value: &str) -> Result<Updated<Goal>> {
    let update = GoalUpdate::parse(field, value.to_string())?;
    edit_plan(storage, |doc| {
        require_index("goal", index, doc.overview.goals.len())?;
        let next = edit::update_goal(doc, index, update);
        let item = next.overview.goals[index].clone();
        Ok((next, Updated { kind: "goal", index, field: field.to_string(), item }))
    })
}

pub fn goal_list(storage: &Storage) -> Result<Listing<Goal>> {
    let doc = storage.load_plan()?;
    Ok(Listing::new("goal", doc.overview.goals))
}

// ==================== Phases ====================

impl Summary for Phase {
    fn summary(&self) -> String {
        let weeks = if self.weeks.is_empty() { "-" } else { &self.weeks };
        format!(
            "{} Phase {}: {} (weeks {}, {} tasks)",
            self.icon,
            self.id,
            self.title,
            weeks,
            self.tasks.len()
        )
    }
}

/// A phase with its progress, as listed.
#[derive(Debug, Serialize)]
pub struct PhaseRow {
    pub id: i64,
    pub title: String,
    pub weeks: String,
    pub icon: String,
    pub summary: String,
    pub section_id: String,
    pub tasks: usize,
    pub completed: usize,
    pub status: PhaseStatus,
}

impl PhaseRow {
    fn new(phase: &Phase, done: &CompletedTasks) -> Self {
        let progress = PhaseProgress::new(phase, done);
        Self {
            id: phase.id,
            title: phase.title.clone(),
            weeks: phase.weeks.clone(),
            icon: phase.icon.clone(),
            summary: phase.summary.clone(),
            section_id: phase.section_id(),
            tasks: progress.total,
            completed: progress.completed,
            status: progress.status,
        }
    }
}

impl Summary for PhaseRow {
    fn summary(&self) -> String {
        let weeks = if self.weeks.is_empty() { "-" } else { &self.weeks };
        format!(
            "{} Phase {}: {} (weeks {}) {}/{} done",
            self.icon, self.id, self.title, weeks, self.completed, self.tasks
        )
    }
}

pub fn phase_add(storage: &mut Storage) -> Result<Added<Phase>> {
    edit_plan(storage, |doc| {
        let next = edit::add_phase(doc);
        let index = next.phases.len() - 1;
        let item = next.phases[index].clone();
        Ok((next, Added { kind: "phase", index, item }))
    })
}

/// Remove a phase and its tasks. Completed ids of those tasks are kept.
pub fn phase_remove(storage: &mut Storage, index: usize) -> Result<Removed<Phase>> {
    edit_plan(storage, |doc| {
        require_index("phase", index, doc.phases.len())?;
        let item = doc.phases[index].clone();
        Ok((edit::remove_phase(doc, index), Removed { kind: "phase", index, item }))
    })
}

pub fn phase_set(storage: &mut Storage, index: usize, field: &str, value: &str) -> Result<Updated<Phase>> {
    let update = PhaseUpdate::parse(field, value.to_string())?;
    edit_plan(storage, |doc| {
        require_index("phase", index, doc.phases.len())?;
        let next = edit::update_phase(doc, index, update);
        let item = next.phases[index].clone();
        Ok((next, Updated { kind: "phase", index, field: field.to_string(), item }))
    })
}

pub fn phase_list(storage: &Storage) -> Result<Listing<PhaseRow>> {
    let doc = storage.load_plan()?;
    let done = storage.load_completed()?;
    Ok(Listing::new(
        "phase",
        doc.phases.iter().map(|p| PhaseRow::new(p, &done)),
    ))
}

// ==================== Tasks ====================

/// A task with its location and completion state.
#[derive(Debug, Serialize)]
pub struct TaskRow {
    pub phase_index: usize,
    pub phase_id: i64,
    pub task_index: usize,
    pub id: String,
    pub task: String,
    pub detail: String,
    pub completed: bool,
}

impl TaskRow {
    fn new(doc: &PlanDocument, phase_index: usize, task_index: usize, done: &CompletedTasks) -> Option<Self> {
        let phase = doc.phases.get(phase_index)?;
        let task = phase.tasks.get(task_index)?;
        Some(Self {
            phase_index,
            phase_id: phase.id,
            task_index,
            id: task.id.clone(),
            task: task.task.clone(),
            detail: task.detail.clone(),
            completed: done.contains(&task.id),
        })
    }
}

impl Summary for TaskRow {
    fn summary(&self) -> String {
        let mark = if self.completed { "[x]" } else { "[ ]" };
        let task = if self.task.is_empty() { "(untitled)" } else { &self.task };
        if self.detail.is_empty() {
            format!("{} {} {}", mark, self.id, task)
        } else {
            format!("{} {} {} - {}", mark, self.id, task, self.detail)
        }
    }
}

fn require_task(doc: &PlanDocument, phase: usize, task: usize) -> Result<()> {
    require_index("phase", phase, doc.phases.len())?;
    require_index("task", task, doc.phases[phase].tasks.len())
}

fn task_row(doc: &PlanDocument, phase: usize, task: usize, done: &CompletedTasks) -> Result<TaskRow> {
    TaskRow::new(doc, phase, task, done)
        .ok_or_else(|| Error::NotFound(format!("task {} in phase {}", task, phase)))
}

/// Append an empty task to a phase.
pub fn task_add(storage: &mut Storage, phase: usize) -> Result<Added<TaskRow>> {
    let done = storage.load_completed()?;
    edit_plan(storage, |doc| {
        require_index("phase", phase, doc.phases.len())?;
        let next = edit::add_task(doc, phase);
        let index = next.phases[phase].tasks.len() - 1;
        let item = task_row(&next, phase, index, &done)?;
        Ok((next, Added { kind: "task", index, item }))
    })
}

pub fn task_remove(storage: &mut Storage, phase: usize, task: usize) -> Result<Removed<TaskRow>> {
    let done = storage.load_completed()?;
    edit_plan(storage, |doc| {
        require_task(doc, phase, task)?;
        let item = task_row(doc, phase, task, &done)?;
        Ok((edit::remove_task(doc, phase, task), Removed { kind: "task", index: task, item }))
    })
}

pub fn task_set(
    storage: &mut Storage,
    phase: usize,
    task: usize,
    field: &str,
    value: &str,
) -> Result<Updated<TaskRow>> {
    let update = TaskUpdate::parse(field, value.to_string())?;
    let done = storage.load_completed()?;
    edit_plan(storage, |doc| {
        require_task(doc, phase, task)?;
        let next = edit::update_task(doc, phase, task, update);
        let item = task_row(&next, phase, task, &done)?;
        Ok((next, Updated { kind: "task", index: task, field: field.to_string(), item }))
    })
}

#[derive(Debug, Serialize)]
pub struct TaskToggled {
    pub id: String,
    pub task: String,
    pub completed: bool,
}

impl Output for TaskToggled {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let state = if self.completed { "done" } else { "not done" };
        format!("Marked {} {} ({})", self.id, state, self.task)
    }
}

/// Flip the completion state of the task with `id`.
pub fn task_toggle(storage: &mut Storage, id: &str) -> Result<TaskToggled> {
    let doc = storage.load_plan()?;
    let (_, task) = doc
        .find_task(id)
        .ok_or_else(|| Error::NotFound(format!("task '{}'", id)))?;
    let mut done = storage.load_completed()?;
    let completed = done.toggle(id);
    storage.save_completed(&done)?;
    Ok(TaskToggled {
        id: id.to_string(),
        task: task.task.clone(),
        completed,
    })
}

/// Tasks of every phase, or of one phase.
pub fn task_list(storage: &Storage, phase: Option<usize>) -> Result<Listing<TaskRow>> {
    let doc = storage.load_plan()?;
    let done = storage.load_completed()?;
    let phases: Vec<usize> = match phase {
        Some(p) => {
            require_index("phase", p, doc.phases.len())?;
            vec![p]
        }
        None => (0..doc.phases.len()).collect(),
    };
    let mut rows = Vec::new();
    for p in phases {
        for t in 0..doc.phases[p].tasks.len() {
            rows.extend(TaskRow::new(&doc, p, t, &done));
        }
    }
    Ok(Listing::new("task", rows))
}

// ==================== Sections and fields ====================

pub fn section_add(storage: &mut Storage) -> Result<Added<Section>> {
    edit_plan(storage, |doc| {
        let next = edit::add_section(doc);
        let index = next.sections.len() - 1;
        let item = next.sections[index].clone();
        Ok((next, Added { kind: "section", index, item }))
    })
}

pub fn section_remove(storage: &mut Storage, index: usize) -> Result<Removed<Section>> {
    edit_plan(storage, |doc| {
        require_index("section", index, doc.sections.len())?;
        let item = doc.sections[index].clone();
        Ok((edit::remove_section(doc, index), Removed { kind: "section", index, item }))
    })
}

pub fn section_set(storage: &mut Storage, index: usize, field: &str, value: &str) -> Result<Updated<Section>> {
    let update = SectionUpdate::parse(field, value.to_string())?;
    edit_plan(storage, |doc| {
        require_index("section", index, doc.sections.len())?;
        let next = edit::update_section(doc, index, update);
        let item = next.sections[index].clone();
        Ok((next, Updated { kind: "section", index, field: field.to_string(), item }))
    })
}

pub fn section_list(storage: &Storage) -> Result<Listing<Section>> {
    Ok(Listing::new("section", storage.load_plan()?.sections))
}

/// A field with the section it belongs to.
#[derive(Debug, Serialize)]
pub struct FieldEntry {
    pub section_index: usize,
    pub section: String,
    #[serde(flatten)]
    pub field: Field,
}

impl Summary for FieldEntry {
    fn summary(&self) -> String {
        format!("{} / {}", self.section, self.field.summary())
    }
}

fn field_entry(doc: &PlanDocument, section: usize, index: usize) -> Result<FieldEntry> {
    let s = doc
        .sections
        .get(section)
        .ok_or_else(|| Error::NotFound(format!("section {}", section)))?;
    let field = s
        .fields
        .get(index)
        .ok_or_else(|| Error::NotFound(format!("field {} in section {}", index, section)))?;
    Ok(FieldEntry {
        section_index: section,
        section: s.name.clone(),
        field: field.clone(),
    })
}

fn require_field(doc: &PlanDocument, section: usize, index: usize) -> Result<()> {
    require_index("section", section, doc.sections.len())?;
    require_index("field", index, doc.sections[section].fields.len())
}

/// Append an empty Text field to a section.
pub fn field_add(storage: &mut Storage, section: usize) -> Result<Added<FieldEntry>> {
    edit_plan(storage, |doc| {
        require_index("section", section, doc.sections.len())?;
        let next = edit::add_field(doc, section);
        let index = next.sections[section].fields.len() - 1;
        let item = field_entry(&next, section, index)?;
        Ok((next, Added { kind: "field", index, item }))
    })
}

pub fn field_remove(storage: &mut Storage, section: usize, index: usize) -> Result<Removed<FieldEntry>> {
    edit_plan(storage, |doc| {
        require_field(doc, section, index)?;
        let item = field_entry(doc, section, index)?;
        Ok((edit::remove_field(doc, section, index), Removed { kind: "field", index, item }))
    })
}

pub fn field_set(
    storage: &mut Storage,
    section: usize,
    index: usize,
    field: &str,
    value: &str,
) -> Result<Updated<FieldEntry>> {
    let update = FieldUpdate::parse(field, value.to_string())?;
    edit_plan(storage, |doc| {
        require_field(doc, section, index)?;
        let next = edit::update_field(doc, section, index, update);
        let item = field_entry(&next, section, index)?;
        Ok((next, Updated { kind: "field", index, field: field.to_string(), item }))
    })
}

// ==================== Tech stack ====================

/// Find the stored key for `category`, accepting either the key itself or a
/// display name that normalizes to it.
fn resolve_category(doc: &PlanDocument, category: &str) -> Result<String> {
    if doc.tech_stack.contains_key(category) {
        return Ok(category.to_string());
    }
    let key = edit::category_key(category);
    if doc.tech_stack.contains_key(&key) {
        return Ok(key);
    }
    let known: Vec<&str> = doc.tech_stack.keys().map(String::as_str).collect();
    Err(Error::NotFound(format!(
        "tech category '{}' (have: {})",
        category,
        known.join(", ")
    )))
}

/// A tech item with its category.
#[derive(Debug, Serialize)]
pub struct TechEntry {
    pub category: String,
    #[serde(flatten)]
    pub item: TechItem,
}

impl Summary for TechEntry {
    fn summary(&self) -> String {
        format!("{} / {}", self.category, self.item.summary())
    }
}

fn tech_entry(doc: &PlanDocument, category: &str, index: usize) -> Result<TechEntry> {
    let item = doc
        .tech_stack
        .get(category)
        .and_then(|items| items.get(index))
        .ok_or_else(|| Error::NotFound(format!("tech item {} in '{}'", index, category)))?;
    Ok(TechEntry {
        category: category.to_string(),
        item: item.clone(),
    })
}

fn require_tech_item(doc: &PlanDocument, category: &str, index: usize) -> Result<()> {
    let len = doc.tech_stack.get(category).map_or(0, |items| items.len());
    require_index("tech item", index, len)
}

#[derive(Debug, Serialize)]
pub struct TechCategoryAdded {
    pub key: String,
    pub created: bool,
    pub section_id: String,
}

impl Output for TechCategoryAdded {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        if self.created {
            format!("Added tech category '{}'", self.key)
        } else {
            format!("Tech category '{}' already exists", self.key)
        }
    }
}

/// Add an empty category. An existing category is left as it is.
pub fn tech_add_category(storage: &mut Storage, name: &str) -> Result<TechCategoryAdded> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput("Category name must not be empty".to_string()));
    }
    let key = edit::category_key(name);
    edit_plan(storage, |doc| {
        let created = !doc.tech_stack.contains_key(&key);
        let next = edit::add_tech_category(doc, name);
        let position = next.tech_stack.get_index_of(&key).unwrap_or_default();
        let result = TechCategoryAdded {
            key: key.clone(),
            created,
            section_id: tech_section_id(position),
        };
        Ok((next, result))
    })
}

pub fn tech_add(storage: &mut Storage, category: &str) -> Result<Added<TechEntry>> {
    edit_plan(storage, |doc| {
        let key = resolve_category(doc, category)?;
        let next = edit::add_tech_item(doc, &key);
        let index = next.tech_stack.get(&key).map_or(0, |items| items.len()) - 1;
        let item = tech_entry(&next, &key, index)?;
        Ok((next, Added { kind: "tech item", index, item }))
    })
}

pub fn tech_remove(storage: &mut Storage, category: &str, index: usize) -> Result<Removed<TechEntry>> {
    edit_plan(storage, |doc| {
        let key = resolve_category(doc, category)?;
        require_tech_item(doc, &key, index)?;
        let item = tech_entry(doc, &key, index)?;
        Ok((edit::remove_tech_item(doc, &key, index), Removed { kind: "tech item", index, item }))
    })
}

pub fn tech_set(
    storage: &mut Storage,
    category: &str,
    index: usize,
    field: &str,
    value: &str,
) -> Result<Updated<TechEntry>> {
    let update = TechItemUpdate::parse(field, value.to_string())?;
    edit_plan(storage, |doc| {
        let key = resolve_category(doc, category)?;
        require_tech_item(doc, &key, index)?;
        let next = edit::update_tech_item(doc, &key, index, update);
        let item = tech_entry(&next, &key, index)?;
        Ok((next, Updated { kind: "tech item", index, field: field.to_string(), item }))
    })
}

/// A category and its items, as listed.
#[derive(Debug, Serialize)]
pub struct TechCategory {
    pub key: String,
    pub section_id: String,
    pub items: Vec<TechItem>,
}

impl Summary for TechCategory {
    fn summary(&self) -> String {
        let names: Vec<&str> = self.items.iter().map(|i| i.name.as_str()).collect();
        format!("{}: {}", self.key, names.join(", "))
    }
}

pub fn tech_list(storage: &Storage) -> Result<Listing<TechCategory>> {
    let doc = storage.load_plan()?;
    let categories = doc
        .tech_stack
        .iter()
        .enumerate()
        .map(|(position, (key, items))| TechCategory {
            key: key.clone(),
            section_id: tech_section_id(position),
            items: items.iter().cloned().collect(),
        })
        .collect::<Vec<_>>();
    Ok(Listing::new("tech category", categories))
}

// ==================== Risks ====================

pub fn risk_add(storage: &mut Storage) -> Result<Added<Risk>> {
    edit_plan(storage, |doc| {
        let next = edit::add_risk(doc);
        let index = next.risks.len() - 1;
        let item = next.risks[index].clone();
        Ok((next, Added { kind: "risk", index, item }))
    })
}

pub fn risk_remove(storage: &mut Storage, index: usize) -> Result<Removed<Risk>> {
    edit_plan(storage, |doc| {
        require_index("risk", index, doc.risks.len())?;
        let item = doc.risks[index].clone();
        Ok((edit::remove_risk(doc, index), Removed { kind: "risk", index, item }))
    })
}

pub fn risk_set(storage: &mut Storage, index: usize, field: &str, value: &str) -> Result<Updated<Risk>> {
    let update = RiskUpdate::parse(field, value.to_string())?;
    edit_plan(storage, |doc| {
        require_index("risk", index, doc.risks.len())?;
        let next = edit::update_risk(doc, index, update);
        let item = next.risks[index].clone();
        Ok((next, Updated { kind: "risk", index, field: field.to_string(), item }))
    })
}

pub fn risk_list(storage: &Storage) -> Result<Listing<Risk>> {
    Ok(Listing::new("risk", storage.load_plan()?.risks))
}

/// Comment section ids for every commentable element, in display order.
pub fn section_ids(doc: &PlanDocument) -> Vec<String> {
    let mut ids = vec![OVERVIEW_SECTION_ID.to_string()];
    ids.extend(doc.phases.iter().map(Phase::section_id));
    ids.extend(doc.sections.iter().map(Section::section_id));
    ids.extend((0..doc.tech_stack.len()).map(tech_section_id));
    ids.extend((0..doc.risks.len()).map(Risk::section_id));
    ids
}
