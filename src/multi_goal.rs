// ABOUTME: Stage 2 multi-goal conflict analyzer: gap checks, blend strategy, phase timeline
// ABOUTME: Only runs when a request resolves to two goals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Multi-goal conflict analysis
//!
//! Given two dated race goals, computes the calendar gap, raises
//! [`ConflictWarning`]s for schedules that cannot safely serve both, selects a
//! blending strategy, and emits a phase timeline: week ranges tagged with a
//! phase and a per-goal percentage split. The skeleton assembler stamps the
//! splits onto weeks and days.

use tracing::{debug, warn};

use crate::models::{
    ConflictType, ConflictWarning, GoalConfig, GoalSplit, Phase, Severity,
};
use crate::training_constants::multi_goal::{
    DUAL_PEAK_MIN_GAP_WEEKS, MAINTENANCE_SECONDARY_SHARE, PEAK_BLOCK_WEEKS,
    TOO_CLOSE_MARGIN_WEEKS, TRANSITION_WEEKS,
};

/// How two goals share one training timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendStrategy {
    /// One goal effectively absorbs the other (undated secondary)
    SinglePeak,
    /// Two full base→build→peak→taper arcs joined by a transition block
    DualPeak,
    /// One arc toward the primary; the secondary keeps a fixed share of key workouts
    PrimaryWithMaintenance,
    /// The earlier race is run as a training effort inside the primary arc
    TrainingRace,
}

/// One phase window of the blended timeline
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseWindow {
    /// First week of the window, 1-based inclusive
    pub start_week: u32,
    /// Last week of the window, inclusive
    pub end_week: u32,
    /// Phase of every week in the window
    pub phase: Phase,
    /// Per-goal percentage split applied to the window's weeks
    pub split: GoalSplit,
}

/// Result of analyzing a dual-goal request
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MultiGoalAnalysis {
    /// Calendar gap between the two race dates in whole weeks
    pub gap_weeks: i64,
    /// Selected blending strategy
    pub strategy: BlendStrategy,
    /// Conflicts found, hardest first
    pub warnings: Vec<ConflictWarning>,
    /// Phase timeline; empty when the goals cannot share a timeline
    pub timeline: Vec<PhaseWindow>,
}

impl MultiGoalAnalysis {
    /// True when a hard conflict means the goals cannot share a timeline
    #[must_use]
    pub fn has_blocking_conflict(&self) -> bool {
        self.warnings.iter().any(|w| w.severity == Severity::Error)
    }

    /// The split covering a given 1-based week, when the timeline has one
    #[must_use]
    pub fn split_for_week(&self, week_number: u32) -> Option<GoalSplit> {
        self.timeline
            .iter()
            .find(|w| week_number >= w.start_week && week_number <= w.end_week)
            .map(|w| w.split)
    }
}

/// Analyze two resolved goals over a plan of `total_weeks`
///
/// `total_weeks` runs from plan start to the later race. Goals without race
/// dates degrade to single-peak blending with a maintenance split.
#[must_use]
pub fn analyze(
    primary: &GoalConfig,
    secondary: &GoalConfig,
    total_weeks: u32,
) -> MultiGoalAnalysis {
    let (Some(primary_date), Some(secondary_date)) = (primary.race_date, secondary.race_date)
    else {
        debug!("one goal is undated, blending as single peak with maintenance");
        return MultiGoalAnalysis {
            gap_weeks: 0,
            strategy: BlendStrategy::SinglePeak,
            warnings: Vec::new(),
            timeline: single_arc_timeline(total_weeks, primary.goal_type.taper_weeks(), true),
        };
    };

    if primary_date == secondary_date {
        warn!(date = %primary_date, "both goals share one race date");
        return MultiGoalAnalysis {
            gap_weeks: 0,
            strategy: BlendStrategy::SinglePeak,
            warnings: vec![ConflictWarning {
                conflict_type: ConflictType::SameDate,
                severity: Severity::Error,
                message: format!("both goals share the race date {primary_date}"),
                recommendation: "Drop one goal or pick a different race.".into(),
            }],
            timeline: Vec::new(),
        };
    }

    // Chronological order drives the arc layout; priority drives the splits.
    let primary_is_first = primary_date < secondary_date;
    let (first, second) = if primary_is_first {
        (primary, secondary)
    } else {
        (secondary, primary)
    };
    let (first_date, second_date) = if primary_is_first {
        (primary_date, secondary_date)
    } else {
        (secondary_date, primary_date)
    };
    let gap_weeks = (second_date - first_date).num_days() / 7;

    let mut warnings = Vec::new();
    let first_taper = i64::from(first.goal_type.taper_weeks());

    let too_close_floor = first_taper + PEAK_BLOCK_WEEKS + TOO_CLOSE_MARGIN_WEEKS;
    if gap_weeks < too_close_floor {
        warnings.push(ConflictWarning {
            conflict_type: ConflictType::TooClose,
            severity: Severity::Error,
            message: format!(
                "{gap_weeks} weeks between races is under the {too_close_floor} needed to race both at full effort"
            ),
            recommendation: format!(
                "Run the {} on {first_date} as a training race inside the {} build.",
                first.goal_type, second.goal_type
            ),
        });
    } else {
        let rebuild_floor = first_taper + i64::from(second.goal_type.min_build_weeks());
        if gap_weeks < rebuild_floor {
            warnings.push(ConflictWarning {
                conflict_type: ConflictType::InsufficientRebuild,
                severity: Severity::Warning,
                message: format!(
                    "only {gap_weeks} weeks to rebuild toward the {} after the {}",
                    second.goal_type, first.goal_type
                ),
                recommendation: "Expect a compressed build block; keep the first race controlled."
                    .into(),
            });
        }
    }

    if gap_weeks < i64::from(second.goal_type.taper_weeks()) {
        warnings.push(ConflictWarning {
            conflict_type: ConflictType::TaperOverlap,
            severity: Severity::Warning,
            message: format!(
                "the {} taper window starts before the {} is run",
                second.goal_type, first.goal_type
            ),
            recommendation: format!(
                "The {} taper will be shortened to fit.",
                second.goal_type
            ),
        });
    }

    let strategy = if gap_weeks < too_close_floor {
        BlendStrategy::TrainingRace
    } else if gap_weeks >= DUAL_PEAK_MIN_GAP_WEEKS {
        BlendStrategy::DualPeak
    } else {
        BlendStrategy::PrimaryWithMaintenance
    };

    let timeline = match strategy {
        BlendStrategy::DualPeak => dual_peak_timeline(
            total_weeks,
            gap_weeks as u32,
            first.goal_type.taper_weeks(),
            second.goal_type.taper_weeks(),
            primary_is_first,
        ),
        BlendStrategy::TrainingRace | BlendStrategy::PrimaryWithMaintenance
        | BlendStrategy::SinglePeak => {
            single_arc_timeline(total_weeks, second.goal_type.taper_weeks(), !primary_is_first)
        }
    };

    debug!(gap_weeks, ?strategy, windows = timeline.len(), "multi-goal analysis complete");
    MultiGoalAnalysis {
        gap_weeks,
        strategy,
        warnings,
        timeline,
    }
}

/// Split helper: percentages as seen from the priority-primary goal
const fn split(primary_pct: u8) -> GoalSplit {
    GoalSplit {
        primary_pct,
        secondary_pct: 100 - primary_pct,
    }
}

/// One base→build→peak→taper arc across the whole plan
fn single_arc_timeline(
    total_weeks: u32,
    taper_weeks: u32,
    race_goal_is_primary: bool,
) -> Vec<PhaseWindow> {
    if total_weeks == 0 {
        return Vec::new();
    }
    // The goal whose race closes the plan owns most of each week's work;
    // the other keeps the maintenance share of key workouts.
    let arc_split = if race_goal_is_primary {
        split(100 - MAINTENANCE_SECONDARY_SHARE)
    } else {
        split(MAINTENANCE_SECONDARY_SHARE)
    };

    let taper = taper_weeks.min(total_weeks.saturating_sub(1));
    let pre_taper = total_weeks - taper;
    let base_len = (pre_taper / 4).max(1).min(pre_taper);
    let mut windows = vec![PhaseWindow {
        start_week: 1,
        end_week: base_len,
        phase: Phase::Base,
        split: split(50),
    }];
    if pre_taper > base_len {
        windows.push(PhaseWindow {
            start_week: base_len + 1,
            end_week: pre_taper,
            phase: Phase::Build,
            split: arc_split,
        });
    }
    if taper > 0 {
        windows.push(PhaseWindow {
            start_week: pre_taper + 1,
            end_week: total_weeks,
            phase: Phase::Taper,
            split: arc_split,
        });
    }
    windows
}

/// Two independent arcs sharing the early base phase, joined by a recovery
/// transition block
fn dual_peak_timeline(
    total_weeks: u32,
    gap_weeks: u32,
    first_taper: u32,
    second_taper: u32,
    primary_is_first: bool,
) -> Vec<PhaseWindow> {
    let weeks_to_first = total_weeks.saturating_sub(gap_weeks);
    if weeks_to_first == 0 || total_weeks == 0 {
        return single_arc_timeline(total_weeks, second_taper, !primary_is_first);
    }

    let first_split = if primary_is_first { split(80) } else { split(20) };
    let second_split = if primary_is_first { split(20) } else { split(80) };

    let mut windows = Vec::new();

    // Arc 1: shared base, then build/peak/taper into the first race
    let taper1 = first_taper.min(weeks_to_first.saturating_sub(1));
    let pre_taper1 = weeks_to_first - taper1;
    let base_len = (pre_taper1 / 3).max(1).min(pre_taper1);
    windows.push(PhaseWindow {
        start_week: 1,
        end_week: base_len,
        phase: Phase::Base,
        split: split(60),
    });
    if pre_taper1 > base_len {
        windows.push(PhaseWindow {
            start_week: base_len + 1,
            end_week: pre_taper1,
            phase: Phase::Build,
            split: first_split,
        });
    }
    if taper1 > 0 {
        windows.push(PhaseWindow {
            start_week: pre_taper1 + 1,
            end_week: weeks_to_first,
            phase: Phase::Taper,
            split: first_split,
        });
    }

    // Transition: recover from the first race before rebuilding
    let transition = TRANSITION_WEEKS.min(gap_weeks.saturating_sub(1));
    if transition > 0 {
        windows.push(PhaseWindow {
            start_week: weeks_to_first + 1,
            end_week: weeks_to_first + transition,
            phase: Phase::Recovery,
            split: split(50),
        });
    }

    // Arc 2: build/peak/taper into the second race
    let arc2_start = weeks_to_first + transition + 1;
    if arc2_start > total_weeks {
        return windows;
    }
    let arc2_len = total_weeks - arc2_start + 1;
    let taper2 = second_taper.min(arc2_len.saturating_sub(1));
    let pre_taper2_end = total_weeks - taper2;
    if pre_taper2_end >= arc2_start {
        windows.push(PhaseWindow {
            start_week: arc2_start,
            end_week: pre_taper2_end,
            phase: Phase::Build,
            split: second_split,
        });
    }
    if taper2 > 0 {
        windows.push(PhaseWindow {
            start_week: pre_taper2_end + 1,
            end_week: total_weeks,
            phase: Phase::Taper,
            split: second_split,
        });
    }

    windows
}
