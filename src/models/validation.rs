// ABOUTME: Warning and correction record types: the audit trail of the guardrail and analyzer passes
// ABOUTME: Warnings never block generation; corrections record silent auto-fixes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Validation, warning, and correction records

use serde::{Deserialize, Serialize};

/// Severity of a warning surfaced to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Generation should not proceed as requested
    Error,
    /// Worth surfacing; generation proceeds
    Warning,
    /// Informational only
    Info,
}

/// Conflict classes the multi-goal analyzer can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// Both goals share one race date
    SameDate,
    /// The races are too close to train for both
    TooClose,
    /// The taper windows overlap
    TaperOverlap,
    /// Not enough weeks to rebuild between races
    InsufficientRebuild,
}

/// One conflict raised by the multi-goal analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictWarning {
    /// Conflict class
    pub conflict_type: ConflictType,
    /// How serious it is
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
    /// What the athlete should do about it
    pub recommendation: String,
}

/// Kinds of automatic corrections the guardrail pass applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionType {
    /// A single day's distance was capped or floored
    DayDistanceClamped,
    /// A non-long-run day reached the long run and was pushed down
    LongRunHierarchyRestored,
    /// A whole week was scaled to respect the growth ceiling
    WeeklyGrowthClamped,
    /// The long run exceeded its share of weekly volume
    LongRunShareClamped,
    /// A recovery week was inserted on the expected cadence
    RecoveryWeekInserted,
    /// The taper tail was reshaped
    TaperReshaped,
    /// Excess hard days were demoted
    HardDayDemoted,
    /// A missing weekly rest day was restored
    RestDayInserted,
    /// The peak long run was raised toward the race-distance target
    PeakLongRunRaised,
    /// The long-run growth ceiling was re-applied
    LongRunGrowthClamped,
}

/// One recorded auto-fix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionAction {
    /// What kind of correction ran
    pub correction_type: CorrectionType,
    /// 1-based week the correction touched
    pub week_number: u32,
    /// Value before correction
    pub original_value: f64,
    /// Value after correction
    pub corrected_value: f64,
    /// Why the correction ran
    pub reason: String,
}

/// Outcome of a guardrail validation pass
///
/// The corrected skeleton is always returned, even when residual errors
/// remain; the caller decides whether to accept it with a warning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Residual problems corrections could not fix
    pub errors: Vec<String>,
    /// Non-blocking observations
    pub warnings: Vec<String>,
    /// Ordered audit trail of applied corrections
    pub corrections: Vec<CorrectionAction>,
}

impl ValidationResult {
    /// True when the pass found nothing to fix and nothing residual
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.corrections.is_empty()
    }
}

/// Advisory realism classes, for UI display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RealismConcern {
    /// Peak volume is a large multiple of baseline
    AggressiveVolume,
    /// Peak long run is a large multiple of the recent longest run
    AggressiveLongRunJump,
    /// Not many weeks between now and race day
    InsufficientLeadTime,
    /// Baseline volume is low for any race goal
    LowBaseline,
}

/// One advisory realism warning; never blocks generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealismWarning {
    /// Concern class
    pub concern: RealismConcern,
    /// How serious it is
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
}
