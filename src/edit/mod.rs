//! Edit operations on plan documents.
//!
//! Every operation takes the current document by reference and returns a new
//! one with exactly one logical change applied. Inputs are never mutated.
//! Indices that do not exist and unknown tech categories are silent no-ops
//! that return an unchanged copy.
//!
//! Operations come in three verbs per collection: `add_*` appends the
//! editor's default value, `remove_*` deletes at an index, and `update_*`
//! sets one field at an index.

pub mod document;
pub mod updates;

pub use document::{export_json, import_json, reset};
pub use updates::{
    ConfigUpdate, FieldUpdate, GoalUpdate, PhaseUpdate, RiskUpdate, SectionUpdate, TaskUpdate,
    TechItemUpdate,
};

use crate::models::{Field, Goal, Phase, PlanDocument, Risk, Section, Task, TechItem};
use im::Vector;

/// Apply `f` to a copy of the element at `index`, returning the new vector.
fn update_at<T: Clone>(items: &Vector<T>, index: usize, f: impl FnOnce(&mut T)) -> Option<Vector<T>> {
    let mut item = items.get(index)?.clone();
    f(&mut item);
    Some(items.update(index, item))
}

/// Remove the element at `index`, returning the new vector.
fn remove_at<T: Clone>(items: &Vector<T>, index: usize) -> Option<Vector<T>> {
    if index >= items.len() {
        return None;
    }
    let mut items = items.clone();
    items.remove(index);
    Some(items)
}

/// Replace `doc.phases` when `phases` is `Some`, otherwise return a copy.
fn with_phases(doc: &PlanDocument, phases: Option<Vector<Phase>>) -> PlanDocument {
    let mut next = doc.clone();
    if let Some(phases) = phases {
        next.phases = phases;
    }
    next
}

fn with_sections(doc: &PlanDocument, sections: Option<Vector<Section>>) -> PlanDocument {
    let mut next = doc.clone();
    if let Some(sections) = sections {
        next.sections = sections;
    }
    next
}

fn with_risks(doc: &PlanDocument, risks: Option<Vector<Risk>>) -> PlanDocument {
    let mut next = doc.clone();
    if let Some(risks) = risks {
        next.risks = risks;
    }
    next
}

fn with_goals(doc: &PlanDocument, goals: Option<Vector<Goal>>) -> PlanDocument {
    let mut next = doc.clone();
    if let Some(goals) = goals {
        next.overview.goals = goals;
    }
    next
}

fn with_tech_items(
    doc: &PlanDocument,
    category: &str,
    items: Option<Vector<TechItem>>,
) -> PlanDocument {
    let mut next = doc.clone();
    if let (Some(items), Some(slot)) = (items, next.tech_stack.get_mut(category)) {
        *slot = items;
    }
    next
}

// ==================== Phases ====================

/// Append a new phase with id one past the current maximum.
pub fn add_phase(doc: &PlanDocument) -> PlanDocument {
    let mut next = doc.clone();
    next.phases.push_back(Phase::new(doc.next_phase_id()));
    next
}

/// Remove the phase at `index`.
pub fn remove_phase(doc: &PlanDocument, index: usize) -> PlanDocument {
    with_phases(doc, remove_at(&doc.phases, index))
}

/// Set one field of the phase at `index`.
pub fn update_phase(doc: &PlanDocument, index: usize, update: PhaseUpdate) -> PlanDocument {
    with_phases(doc, update_at(&doc.phases, index, |p| update.apply(p)))
}

// ==================== Tasks ====================

/// Append an empty task to the phase at `phase_index`.
///
/// The new id is `<phaseId>-<tasks.len() + 1>`. Ids are never renumbered, so
/// after a deletion this can repeat an existing id.
pub fn add_task(doc: &PlanDocument, phase_index: usize) -> PlanDocument {
    with_phases(
        doc,
        update_at(&doc.phases, phase_index, |p| {
            let task = Task::new(p.id, p.tasks.len() + 1);
            p.tasks.push_back(task);
        }),
    )
}

/// Remove a task from the phase at `phase_index`.
pub fn remove_task(doc: &PlanDocument, phase_index: usize, task_index: usize) -> PlanDocument {
    let phases = doc.phases.get(phase_index).and_then(|p| {
        let tasks = remove_at(&p.tasks, task_index)?;
        update_at(&doc.phases, phase_index, |p| p.tasks = tasks)
    });
    with_phases(doc, phases)
}

/// Set one field of a task in the phase at `phase_index`.
pub fn update_task(
    doc: &PlanDocument,
    phase_index: usize,
    task_index: usize,
    update: TaskUpdate,
) -> PlanDocument {
    let phases = doc.phases.get(phase_index).and_then(|p| {
        let tasks = update_at(&p.tasks, task_index, |t| update.apply(t))?;
        update_at(&doc.phases, phase_index, |p| p.tasks = tasks)
    });
    with_phases(doc, phases)
}

// ==================== Sections ====================

/// Append a section with the editor's defaults.
pub fn add_section(doc: &PlanDocument) -> PlanDocument {
    let mut next = doc.clone();
    next.sections.push_back(Section::default());
    next
}

/// Remove the section at `index`.
pub fn remove_section(doc: &PlanDocument, index: usize) -> PlanDocument {
    with_sections(doc, remove_at(&doc.sections, index))
}

/// Set one field of the section at `index`.
pub fn update_section(doc: &PlanDocument, index: usize, update: SectionUpdate) -> PlanDocument {
    with_sections(doc, update_at(&doc.sections, index, |s| update.apply(s)))
}

/// Append an empty `Text` field to the section at `section_index`.
pub fn add_field(doc: &PlanDocument, section_index: usize) -> PlanDocument {
    with_sections(
        doc,
        update_at(&doc.sections, section_index, |s| {
            s.fields.push_back(Field::default())
        }),
    )
}

/// Remove a field from the section at `section_index`.
pub fn remove_field(doc: &PlanDocument, section_index: usize, field_index: usize) -> PlanDocument {
    let sections = doc.sections.get(section_index).and_then(|s| {
        let fields = remove_at(&s.fields, field_index)?;
        update_at(&doc.sections, section_index, |s| s.fields = fields)
    });
    with_sections(doc, sections)
}

/// Set the name or type of a field in the section at `section_index`.
pub fn update_field(
    doc: &PlanDocument,
    section_index: usize,
    field_index: usize,
    update: FieldUpdate,
) -> PlanDocument {
    let sections = doc.sections.get(section_index).and_then(|s| {
        let fields = update_at(&s.fields, field_index, |f| update.apply(f))?;
        update_at(&doc.sections, section_index, |s| s.fields = fields)
    });
    with_sections(doc, sections)
}

// ==================== Tech stack ====================

/// Normalize a category name: lowercase, each whitespace run becomes `_`.
pub fn category_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                key.push('_');
            }
            in_space = true;
        } else {
            key.extend(c.to_lowercase());
            in_space = false;
        }
    }
    key
}

/// Add an empty category under the normalized form of `name`.
///
/// An empty name, or a name whose key already exists, leaves the document unchanged.
pub fn add_tech_category(doc: &PlanDocument, name: &str) -> PlanDocument {
    let mut next = doc.clone();
    if name.is_empty() {
        return next;
    }
    next.tech_stack.entry(category_key(name)).or_default();
    next
}

/// Append an empty item to `category`.
pub fn add_tech_item(doc: &PlanDocument, category: &str) -> PlanDocument {
    let items = doc.tech_stack.get(category).map(|items| {
        let mut items = items.clone();
        items.push_back(TechItem::default());
        items
    });
    with_tech_items(doc, category, items)
}

/// Remove the item at `index` from `category`.
pub fn remove_tech_item(doc: &PlanDocument, category: &str, index: usize) -> PlanDocument {
    let items = doc
        .tech_stack
        .get(category)
        .and_then(|items| remove_at(items, index));
    with_tech_items(doc, category, items)
}

/// Set one field of the item at `index` in `category`.
pub fn update_tech_item(
    doc: &PlanDocument,
    category: &str,
    index: usize,
    update: TechItemUpdate,
) -> PlanDocument {
    let items = doc
        .tech_stack
        .get(category)
        .and_then(|items| update_at(items, index, |item| update.apply(item)));
    with_tech_items(doc, category, items)
}

// ==================== Risks ====================

/// Append an empty risk with `Medium` impact.
pub fn add_risk(doc: &PlanDocument) -> PlanDocument {
    let mut next = doc.clone();
    next.risks.push_back(Risk::default());
    next
}

/// Remove the risk at `index`.
pub fn remove_risk(doc: &PlanDocument, index: usize) -> PlanDocument {
    with_risks(doc, remove_at(&doc.risks, index))
}

/// Set one field of the risk at `index`.
pub fn update_risk(doc: &PlanDocument, index: usize, update: RiskUpdate) -> PlanDocument {
    with_risks(doc, update_at(&doc.risks, index, |r| update.apply(r)))
}

// ==================== Overview ====================

/// Replace the overview summary.
pub fn set_summary(doc: &PlanDocument, summary: impl Into<String>) -> PlanDocument {
    let mut next = doc.clone();
    next.overview.summary = summary.into();
    next
}

/// Append an empty goal.
pub fn add_goal(doc: &PlanDocument) -> PlanDocument {
    let mut next = doc.clone();
    next.overview.goals.push_back(Goal::default());
    next
}

/// Remove the goal at `index`.
pub fn remove_goal(doc: &PlanDocument, index: usize) -> PlanDocument {
    with_goals(doc, remove_at(&doc.overview.goals, index))
}

/// Set one field of the goal at `index`.
pub fn update_goal(doc: &PlanDocument, index: usize, update: GoalUpdate) -> PlanDocument {
    with_goals(doc, update_at(&doc.overview.goals, index, |g| update.apply(g)))
}

// ==================== Config ====================

/// Replace one header field.
pub fn update_config(doc: &PlanDocument, update: ConfigUpdate) -> PlanDocument {
    let mut next = doc.clone();
    update.apply(&mut next.config);
    next
}

/// Replace one color role, keeping every other role as it was.
pub fn set_color(doc: &PlanDocument, role: &str, hex: impl Into<String>) -> PlanDocument {
    let mut next = doc.clone();
    next.config.colors.insert(role.to_string(), hex.into());
    next
}
