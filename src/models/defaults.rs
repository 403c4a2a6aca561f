//! The bundled default plan.

use super::PlanDocument;
use std::sync::OnceLock;

/// Raw JSON of the bundled default plan.
pub const DEFAULT_PLAN_JSON: &str = include_str!("../../assets/default_plan.json");

static DEFAULT_PLAN: OnceLock<PlanDocument> = OnceLock::new();

/// The bundled default plan, parsed once per process.
pub fn default_plan() -> &'static PlanDocument {
    DEFAULT_PLAN.get_or_init(|| {
        serde_json::from_str::<serde_json::Value>(DEFAULT_PLAN_JSON)
            .map(PlanDocument::from)
            .unwrap_or_default()
    })
}
