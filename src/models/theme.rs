//! Theme color resolution.
//!
//! Each color role resolves in order: the document's `config.colors`, the
//! bundled default plan's `config.colors`, then a fixed fallback.

use super::PlanDocument;
use super::defaults::default_plan;
use serde::Serialize;

/// Fallback colors used when neither the document nor the default plan sets a role.
pub mod fallback {
    pub const PRIMARY: &str = "#0055A4";
    pub const DARK: &str = "#0D1B2A";
    pub const LIGHT: &str = "#E8F0FE";
    pub const ACCENT: &str = "#00C2FF";
    pub const SURFACE: &str = "#F7F9FC";
    pub const BORDER: &str = "#D1D9E6";
}

/// Timeline colors assigned to phases by position, reused cyclically.
pub const PHASE_PALETTE: [&str; 8] = [
    "#0055A4", "#1A73E8", "#34A853", "#FB8C00", "#7B1FA2", "#EA4335", "#00897B", "#5C6BC0",
];

/// Badge color for a fully completed phase.
pub const COMPLETE: &str = "#34A853";
/// Badge color for a partially completed phase.
pub const IN_PROGRESS: &str = "#FB8C00";
/// Badge color for a phase with nothing completed.
pub const NOT_STARTED: &str = "#9CA3AF";

/// A color role the view layer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Primary,
    Dark,
    Light,
    Accent,
    Surface,
    Border,
}

impl ColorRole {
    /// Get all roles.
    pub fn all() -> &'static [ColorRole] {
        &[
            ColorRole::Primary,
            ColorRole::Dark,
            ColorRole::Light,
            ColorRole::Accent,
            ColorRole::Surface,
            ColorRole::Border,
        ]
    }

    /// Key of this role in `config.colors`.
    pub fn key(&self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Dark => "dark",
            ColorRole::Light => "light",
            ColorRole::Accent => "accent",
            ColorRole::Surface => "surface",
            ColorRole::Border => "border",
        }
    }

    /// Last-resort color for this role.
    pub fn fallback(&self) -> &'static str {
        match self {
            ColorRole::Primary => fallback::PRIMARY,
            ColorRole::Dark => fallback::DARK,
            ColorRole::Light => fallback::LIGHT,
            ColorRole::Accent => fallback::ACCENT,
            ColorRole::Surface => fallback::SURFACE,
            ColorRole::Border => fallback::BORDER,
        }
    }
}

/// Fully resolved theme colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub primary: String,
    pub dark: String,
    pub light: String,
    pub accent: String,
    pub surface: String,
    pub border: String,
}

impl Theme {
    /// Resolve every role for `doc`.
    pub fn resolve(doc: &PlanDocument) -> Self {
        Self {
            primary: resolve_color(doc, ColorRole::Primary),
            dark: resolve_color(doc, ColorRole::Dark),
            light: resolve_color(doc, ColorRole::Light),
            accent: resolve_color(doc, ColorRole::Accent),
            surface: resolve_color(doc, ColorRole::Surface),
            border: resolve_color(doc, ColorRole::Border),
        }
    }
}

/// Resolve a single role for `doc`. Empty strings count as unset.
pub fn resolve_color(doc: &PlanDocument, role: ColorRole) -> String {
    let lookup = |d: &PlanDocument| {
        d.config
            .colors
            .get(role.key())
            .filter(|c| !c.is_empty())
            .cloned()
    };
    lookup(doc)
        .or_else(|| lookup(default_plan()))
        .unwrap_or_else(|| role.fallback().to_string())
}

/// Timeline color for the phase at `index`.
pub fn phase_color(index: usize) -> &'static str {
    PHASE_PALETTE[index % PHASE_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_color_wins() {
        let mut doc = PlanDocument::default();
        doc.config
            .colors
            .insert("primary".to_string(), "#123456".to_string());
        assert_eq!(resolve_color(&doc, ColorRole::Primary), "#123456");
    }

    #[test]
    fn test_missing_color_falls_back_to_default_plan() {
        let doc = PlanDocument::default();
        let expected = default_plan().config.colors.get("accent").unwrap().clone();
        assert_eq!(resolve_color(&doc, ColorRole::Accent), expected);
    }

    #[test]
    fn test_empty_color_counts_as_unset() {
        let mut doc = PlanDocument::default();
        doc.config.colors.insert("dark".to_string(), String::new());
        assert_ne!(resolve_color(&doc, ColorRole::Dark), "");
    }

    #[test]
    fn test_theme_resolve_fills_every_role() {
        let theme = Theme::resolve(&PlanDocument::default());
        for value in [
            &theme.primary,
            &theme.dark,
            &theme.light,
            &theme.accent,
            &theme.surface,
            &theme.border,
        ] {
            assert!(value.starts_with('#'));
        }
    }

    #[test]
    fn test_phase_color_cycles() {
        assert_eq!(phase_color(0), "#0055A4");
        assert_eq!(phase_color(7), "#5C6BC0");
        assert_eq!(phase_color(8), phase_color(0));
        assert_eq!(phase_color(13), phase_color(5));
    }
}
