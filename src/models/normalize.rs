//! Normalization of loosely-shaped JSON into a fully populated [`PlanDocument`].
//!
//! Imported and stored documents are only guaranteed to be valid JSON. Every
//! missing or wrongly typed value is replaced with its default here, once, so
//! the rest of the crate can rely on all collections being present.

use super::{
    Extra, Field, FieldType, Goal, Impact, Overview, Phase, PlanConfig, PlanDocument, Risk,
    Section, Task, TechItem, TechStack,
};
use im::Vector;
use indexmap::IndexMap;
use serde_json::{Map, Value};

const DOCUMENT_KEYS: &[&str] = &["config", "overview", "phases", "sections", "techStack", "risks"];
const CONFIG_KEYS: &[&str] = &["title", "subtitle", "brandName", "colors"];
const OVERVIEW_KEYS: &[&str] = &["summary", "goals"];
const GOAL_KEYS: &[&str] = &["goal", "desc"];
const PHASE_KEYS: &[&str] = &["id", "title", "weeks", "icon", "summary", "tasks"];
const TASK_KEYS: &[&str] = &["id", "task", "detail"];
const SECTION_KEYS: &[&str] = &["name", "layout", "color", "fields"];
const FIELD_KEYS: &[&str] = &["name", "type", "sub"];
const TECH_ITEM_KEYS: &[&str] = &["name", "purpose", "cost", "note"];
const RISK_KEYS: &[&str] = &["risk", "impact", "mitigation"];

/// Build a document from any JSON value.
///
/// Non-object input yields an empty document.
pub fn document(value: &Value) -> PlanDocument {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);

    PlanDocument {
        config: object(obj, "config").map(config).unwrap_or_default(),
        overview: object(obj, "overview").map(overview).unwrap_or_default(),
        phases: list(obj, "phases", phase),
        sections: list(obj, "sections", section),
        tech_stack: object(obj, "techStack").map(tech_stack).unwrap_or_default(),
        risks: list(obj, "risks", risk),
        extra: extra(obj, DOCUMENT_KEYS),
    }
}

fn config(obj: &Map<String, Value>) -> PlanConfig {
    let colors = object(obj, "colors")
        .map(|colors| {
            colors
                .iter()
                .filter_map(|(role, v)| v.as_str().map(|hex| (role.clone(), hex.to_string())))
                .collect()
        })
        .unwrap_or_default();

    PlanConfig {
        title: string(obj, "title"),
        subtitle: string(obj, "subtitle"),
        brand_name: string(obj, "brandName"),
        colors,
        extra: extra(obj, CONFIG_KEYS),
    }
}

fn overview(obj: &Map<String, Value>) -> Overview {
    Overview {
        summary: string(obj, "summary"),
        goals: list(obj, "goals", |g| Goal {
            goal: string(g, "goal"),
            desc: string(g, "desc"),
            extra: extra(g, GOAL_KEYS),
        }),
        extra: extra(obj, OVERVIEW_KEYS),
    }
}

fn phase(obj: &Map<String, Value>) -> Phase {
    Phase {
        id: integer(obj, "id"),
        title: string(obj, "title"),
        weeks: string(obj, "weeks"),
        icon: string(obj, "icon"),
        summary: string(obj, "summary"),
        tasks: list(obj, "tasks", |t| Task {
            id: string(t, "id"),
            task: string(t, "task"),
            detail: string(t, "detail"),
            extra: extra(t, TASK_KEYS),
        }),
        extra: extra(obj, PHASE_KEYS),
    }
}

fn section(obj: &Map<String, Value>) -> Section {
    Section {
        name: string(obj, "name"),
        layout: string(obj, "layout"),
        color: string(obj, "color"),
        fields: list(obj, "fields", field),
        extra: extra(obj, SECTION_KEYS),
    }
}

fn field(obj: &Map<String, Value>) -> Field {
    let sub = obj.get("sub").and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    });

    Field {
        name: string(obj, "name"),
        field_type: obj
            .get("type")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<FieldType>().ok())
            .unwrap_or_default(),
        sub,
        extra: extra(obj, FIELD_KEYS),
    }
}

fn tech_stack(obj: &Map<String, Value>) -> TechStack {
    let mut stack = IndexMap::new();
    for (category, items) in obj {
        let items = match items.as_array() {
            Some(items) => items.iter().filter_map(Value::as_object).map(tech_item).collect(),
            None => Vector::new(),
        };
        stack.insert(category.clone(), items);
    }
    stack
}

fn tech_item(obj: &Map<String, Value>) -> TechItem {
    TechItem {
        name: string(obj, "name"),
        purpose: string(obj, "purpose"),
        cost: optional_string(obj, "cost"),
        note: optional_string(obj, "note"),
        extra: extra(obj, TECH_ITEM_KEYS),
    }
}

fn risk(obj: &Map<String, Value>) -> Risk {
    Risk {
        risk: string(obj, "risk"),
        impact: obj
            .get("impact")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Impact>().ok())
            .unwrap_or_default(),
        mitigation: string(obj, "mitigation"),
        extra: extra(obj, RISK_KEYS),
    }
}

/// Entries of `obj` whose keys are not in `known`.
fn extra(obj: &Map<String, Value>, known: &[&str]) -> Extra {
    obj.iter()
        .filter(|(k, _)| !known.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn object<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    obj.get(key).and_then(Value::as_object)
}

/// Map every object element of the array under `key`; other elements are dropped.
fn list<T: Clone>(
    obj: &Map<String, Value>,
    key: &str,
    f: impl Fn(&Map<String, Value>) -> T,
) -> Vector<T> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_object).map(f).collect())
        .unwrap_or_default()
}

/// Strings pass through, numbers and booleans are rendered, anything else is empty.
fn string(obj: &Map<String, Value>, key: &str) -> String {
    optional_string(obj, key).unwrap_or_default()
}

fn optional_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn integer(obj: &Map<String, Value>, key: &str) -> i64 {
    match obj.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
