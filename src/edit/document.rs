//! Whole-document operations: import, export and reset.

use crate::models::PlanDocument;
use crate::models::defaults::default_plan;
use crate::{Error, Result};

/// File name used for exported plans.
pub const EXPORT_FILE_NAME: &str = "plan.json";

/// Parse an imported plan.
///
/// Any syntactically valid JSON is accepted and normalized; only a parse
/// failure is an error. The caller keeps its current document in that case.
pub fn import_json(content: &str) -> Result<PlanDocument> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| Error::InvalidImport(e.to_string()))?;
    Ok(PlanDocument::from(value))
}

/// Serialize a plan as JSON with 2-space indentation.
pub fn export_json(doc: &PlanDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// A fresh copy of the bundled default plan.
pub fn reset() -> PlanDocument {
    default_plan().clone()
}
