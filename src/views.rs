//! Derived view computations.
//!
//! Pure functions over a [`PlanDocument`] and the completed-task set:
//! week-range parsing, the timeline grid, and progress figures.

use crate::models::theme::{self, phase_color};
use crate::models::{CompletedTasks, Phase, PlanDocument};
use serde::Serialize;
use std::ops::RangeInclusive;

/// Inclusive week range of a week expression.
///
/// `"3"` is `3..=3`; `"3-5"` and `"3–5"` (en-dash) are `3..=5`. Empty,
/// non-numeric and reversed ranges yield `None`.
pub fn week_span(weeks: &str) -> Option<RangeInclusive<u32>> {
    let normalized = weeks.replace('–', "-");
    let parts: Vec<&str> = normalized.split('-').map(str::trim).collect();
    match parts.as_slice() {
        [single] => single.parse().ok().map(|w| w..=w),
        [low, high] => match (low.parse::<u32>(), high.parse::<u32>()) {
            (Ok(low), Ok(high)) if low <= high => Some(low..=high),
            _ => None,
        },
        _ => None,
    }
}

/// Parse a week expression into the weeks it covers.
///
/// `"3-5"` is `[3, 4, 5]`. Anything [`week_span`] rejects is an empty list.
pub fn parse_weeks(weeks: &str) -> Vec<u32> {
    week_span(weeks).map(Iterator::collect).unwrap_or_default()
}

/// Largest week covered by any phase, or 0.
pub fn max_week(doc: &PlanDocument) -> u32 {
    doc.phases
        .iter()
        .filter_map(|p| week_span(&p.weeks))
        .map(|span| *span.end())
        .max()
        .unwrap_or(0)
}

/// One timeline row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineRow {
    pub phase_id: i64,
    pub title: String,
    pub icon: String,
    pub color: &'static str,
    /// `cells[w - 1]` is true when week `w` belongs to the phase.
    pub cells: Vec<bool>,
}

/// A week-indexed grid with one row per phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub max_week: u32,
    pub rows: Vec<TimelineRow>,
}

impl Timeline {
    /// Build the grid for `doc`.
    pub fn build(doc: &PlanDocument) -> Self {
        let max_week = max_week(doc);
        let rows = doc
            .phases
            .iter()
            .enumerate()
            .map(|(index, phase)| {
                let span = week_span(&phase.weeks);
                TimelineRow {
                    phase_id: phase.id,
                    title: phase.title.clone(),
                    icon: phase.icon.clone(),
                    color: phase_color(index),
                    cells: (1..=max_week)
                        .map(|w| span.as_ref().is_some_and(|s| s.contains(&w)))
                        .collect(),
                }
            })
            .collect();

        Self { max_week, rows }
    }

    /// Header label: `"<n> Weeks"`, or `—` when no phase has weeks.
    pub fn label(&self) -> String {
        timeline_label(self.max_week)
    }
}

/// Header label for a timeline spanning `max_week` weeks.
pub fn timeline_label(max_week: u32) -> String {
    if max_week > 0 {
        format!("{} Weeks", max_week)
    } else {
        "—".to_string()
    }
}

/// Completion state shown on a phase badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    NotStarted,
    InProgress,
    Complete,
}

impl PhaseStatus {
    /// Badge color for this state.
    pub fn color(&self) -> &'static str {
        match self {
            PhaseStatus::NotStarted => theme::NOT_STARTED,
            PhaseStatus::InProgress => theme::IN_PROGRESS,
            PhaseStatus::Complete => theme::COMPLETE,
        }
    }
}

/// Progress of a single phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseProgress {
    pub phase_id: i64,
    pub title: String,
    pub total: usize,
    pub completed: usize,
    /// Completion percentage (0-100)
    pub percentage: f64,
    pub status: PhaseStatus,
}

impl PhaseProgress {
    /// Compute progress for `phase`. A phase with no tasks is at 0%.
    pub fn new(phase: &Phase, done: &CompletedTasks) -> Self {
        let total = phase.tasks.len();
        let completed = phase.tasks.iter().filter(|t| done.contains(&t.id)).count();
        let percentage = if total > 0 {
            (completed as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        let status = if total > 0 && completed == total {
            PhaseStatus::Complete
        } else if completed > 0 {
            PhaseStatus::InProgress
        } else {
            PhaseStatus::NotStarted
        };

        Self {
            phase_id: phase.id,
            title: phase.title.clone(),
            total,
            completed,
            percentage,
            status,
        }
    }
}

/// Document-wide progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanProgress {
    pub total_tasks: usize,
    /// Every stored completed id, stale ones included
    pub completed_tasks: usize,
    /// Completed ids that no longer match any task
    pub stale_ids: usize,
    /// `completed_tasks / total_tasks` as a rounded percent
    pub percentage: u32,
    pub phases: Vec<PhaseProgress>,
}

impl PlanProgress {
    /// Compute progress for `doc`.
    pub fn new(doc: &PlanDocument, done: &CompletedTasks) -> Self {
        let phases: Vec<PhaseProgress> = doc
            .phases
            .iter()
            .map(|p| PhaseProgress::new(p, done))
            .collect();
        let total_tasks = doc.total_tasks();
        let completed_tasks = done.len();

        Self {
            total_tasks,
            completed_tasks,
            stale_ids: done.stale(doc).len(),
            percentage: overall_percentage(completed_tasks, total_tasks),
            phases,
        }
    }
}

/// `completed / total` as a rounded percent, 0 when there are no tasks.
pub fn overall_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

/// Header statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanStats {
    pub brand_name: String,
    pub title: String,
    pub subtitle: String,
    pub phases: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub timeline: String,
    pub progress: u32,
}

/// Brand shown when the document leaves it empty.
pub const FALLBACK_BRAND: &str = "Your Company";
/// Title shown when the document leaves it empty.
pub const FALLBACK_TITLE: &str = "Project Plan";

impl PlanStats {
    /// Compute header stats for `doc`.
    pub fn new(doc: &PlanDocument, done: &CompletedTasks) -> Self {
        let progress = PlanProgress::new(doc, done);
        let or = |value: &str, fallback: &str| {
            if value.is_empty() {
                fallback.to_string()
            } else {
                value.to_string()
            }
        };

        Self {
            brand_name: or(&doc.config.brand_name, FALLBACK_BRAND),
            title: or(&doc.config.title, FALLBACK_TITLE),
            subtitle: doc.config.subtitle.clone(),
            phases: doc.phases.len(),
            total_tasks: progress.total_tasks,
            completed_tasks: progress.completed_tasks,
            timeline: timeline_label(max_week(doc)),
            progress: progress.percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit;
    use crate::models::Task;
    use crate::models::defaults::default_plan;

    fn phase_with_weeks(id: i64, weeks: &str) -> Phase {
        Phase {
            weeks: weeks.to_string(),
            ..Phase::new(id)
        }
    }

    fn phase_with_tasks(id: i64, n: usize) -> Phase {
        let mut phase = Phase::new(id);
        for i in 1..=n {
            phase.tasks.push_back(Task::new(id, i));
        }
        phase
    }

    fn done(ids: &[&str]) -> CompletedTasks {
        ids.iter().map(|s| s.to_string()).collect()
    }

    // ==================== Week Parsing Tests ====================

    #[test]
    fn test_parse_weeks_examples() {
        assert_eq!(parse_weeks("3-5"), vec![3, 4, 5]);
        assert_eq!(parse_weeks("3–5"), vec![3, 4, 5]);
        assert_eq!(parse_weeks("7"), vec![7]);
        assert_eq!(parse_weeks(""), Vec::<u32>::new());
    }

    #[test]
    fn test_parse_weeks_trims_parts() {
        assert_eq!(parse_weeks(" 2 - 4 "), vec![2, 3, 4]);
        assert_eq!(parse_weeks("4-4"), vec![4]);
    }

    #[test]
    fn test_parse_weeks_malformed_is_empty() {
        assert!(parse_weeks("5-3").is_empty());
        assert!(parse_weeks("abc").is_empty());
        assert!(parse_weeks("1-x").is_empty());
        assert!(parse_weeks("1-2-3").is_empty());
        assert!(parse_weeks("-2").is_empty());
        assert!(parse_weeks("   ").is_empty());
    }

    #[test]
    fn test_week_span() {
        assert_eq!(week_span("3–5"), Some(3..=5));
        assert_eq!(week_span("7"), Some(7..=7));
        assert_eq!(week_span("5-3"), None);
        assert_eq!(week_span(""), None);
    }

    #[test]
    fn test_timeline_wide_span() {
        let mut doc = PlanDocument::default();
        doc.phases.push_back(phase_with_weeks(1, "1-200000"));
        doc.phases.push_back(phase_with_weeks(2, "199999-200000"));
        let grid = Timeline::build(&doc);
        assert_eq!(grid.max_week, 200_000);
        assert!(grid.rows[0].cells.iter().all(|&on| on));
        let active: Vec<usize> = grid.rows[1]
            .cells
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(active, vec![199_999, 200_000]);
    }

    #[test]
    fn test_max_week() {
        let mut doc = PlanDocument::default();
        assert_eq!(max_week(&doc), 0);
        doc.phases.push_back(phase_with_weeks(1, "1-2"));
        doc.phases.push_back(phase_with_weeks(2, "3–6"));
        doc.phases.push_back(phase_with_weeks(3, "junk"));
        assert_eq!(max_week(&doc), 6);
    }

    // ==================== Timeline Tests ====================

    #[test]
    fn test_timeline_cells() {
        let mut doc = PlanDocument::default();
        doc.phases.push_back(phase_with_weeks(1, "1-2"));
        doc.phases.push_back(phase_with_weeks(2, "4"));
        let timeline = Timeline::build(&doc);

        assert_eq!(timeline.max_week, 4);
        assert_eq!(timeline.rows[0].cells, vec![true, true, false, false]);
        assert_eq!(timeline.rows[1].cells, vec![false, false, false, true]);
        assert_eq!(timeline.label(), "4 Weeks");
    }

    #[test]
    fn test_timeline_colors_cycle_after_eight_phases() {
        let mut doc = PlanDocument::default();
        for id in 1..=10 {
            doc.phases.push_back(phase_with_weeks(id, "1"));
        }
        let timeline = Timeline::build(&doc);
        assert_eq!(timeline.rows[8].color, timeline.rows[0].color);
        assert_eq!(timeline.rows[9].color, timeline.rows[1].color);
        assert_ne!(timeline.rows[7].color, timeline.rows[0].color);
    }

    #[test]
    fn test_timeline_without_weeks() {
        let mut doc = PlanDocument::default();
        doc.phases.push_back(phase_with_weeks(1, ""));
        let timeline = Timeline::build(&doc);
        assert_eq!(timeline.max_week, 0);
        assert!(timeline.rows[0].cells.is_empty());
        assert_eq!(timeline.label(), "—");
    }

    // ==================== Progress Tests ====================

    #[test]
    fn test_phase_without_tasks_is_zero() {
        let progress = PhaseProgress::new(&Phase::new(1), &done(&["1-1"]));
        assert_eq!(progress.percentage, 0.0);
        assert_eq!(progress.status, PhaseStatus::NotStarted);
    }

    #[test]
    fn test_phase_progress_states() {
        let phase = phase_with_tasks(1, 4);
        let partial = PhaseProgress::new(&phase, &done(&["1-1"]));
        assert_eq!(partial.percentage, 25.0);
        assert_eq!(partial.status, PhaseStatus::InProgress);
        assert_eq!(partial.status.color(), theme::IN_PROGRESS);

        let full = PhaseProgress::new(&phase, &done(&["1-1", "1-2", "1-3", "1-4"]));
        assert_eq!(full.percentage, 100.0);
        assert_eq!(full.status, PhaseStatus::Complete);
    }

    #[test]
    fn test_overall_progress_thirty_percent() {
        let mut doc = PlanDocument::default();
        doc.phases.push_back(phase_with_tasks(1, 6));
        doc.phases.push_back(phase_with_tasks(2, 4));
        let progress = PlanProgress::new(&doc, &done(&["1-1", "1-2", "2-4"]));
        assert_eq!(progress.total_tasks, 10);
        assert_eq!(progress.completed_tasks, 3);
        assert_eq!(progress.percentage, 30);
    }

    #[test]
    fn test_overall_progress_no_tasks() {
        let progress = PlanProgress::new(&PlanDocument::default(), &CompletedTasks::new());
        assert_eq!(progress.total_tasks, 0);
        assert_eq!(progress.percentage, 0);
    }

    #[test]
    fn test_overall_percentage_rounds() {
        assert_eq!(overall_percentage(1, 3), 33);
        assert_eq!(overall_percentage(2, 3), 67);
        assert_eq!(overall_percentage(0, 0), 0);
    }

    #[test]
    fn test_stale_ids_count_toward_overall_progress() {
        let doc = edit::remove_task(default_plan(), 0, 0);
        let progress = PlanProgress::new(&doc, &done(&["1-1", "1-2", "1-3"]));
        assert_eq!(progress.total_tasks, 6);
        assert_eq!(progress.completed_tasks, 3);
        assert_eq!(progress.stale_ids, 1);
        assert_eq!(progress.percentage, 50);
        // Per-phase progress only sees tasks that exist.
        assert_eq!(progress.phases[0].completed, 2);
        assert_eq!(progress.phases[0].status, PhaseStatus::Complete);
    }

    #[test]
    fn test_plan_stats_fallbacks() {
        let stats = PlanStats::new(&PlanDocument::default(), &CompletedTasks::new());
        assert_eq!(stats.brand_name, FALLBACK_BRAND);
        assert_eq!(stats.title, FALLBACK_TITLE);
        assert_eq!(stats.timeline, "—");
        assert_eq!(stats.progress, 0);
    }

    #[test]
    fn test_plan_stats_for_default_plan() {
        let stats = PlanStats::new(default_plan(), &done(&["1-1"]));
        assert_eq!(stats.phases, 2);
        assert_eq!(stats.total_tasks, 7);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.timeline, "6 Weeks");
        assert_eq!(stats.progress, 14);
    }
}
