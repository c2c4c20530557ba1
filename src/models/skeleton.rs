// ABOUTME: Plan skeleton value types: plan, week, and day with closed workout/phase/intensity enums
// ABOUTME: Numeric and structural fields are immutable after assembly; enrichment fills only text placeholders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Plan skeleton data model
//!
//! A skeleton is the structural plan — dates, distances, workout types,
//! phases — before any coached text content is attached. The guardrail pass
//! clones a skeleton and returns a new corrected value; nothing in this crate
//! mutates a caller's skeleton in place.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::goal::{DistanceUnit, GoalType, Terrain};

/// Closed set of workout types a day can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Conversational aerobic run
    Easy,
    /// Sustained threshold effort
    Tempo,
    /// Repeated hard efforts with recovery
    Intervals,
    /// The week's long endurance run
    LongRun,
    /// Very easy run the day after a hard session
    Recovery,
    /// No running
    Rest,
    /// Non-running aerobic work
    CrossTraining,
    /// Race day
    Race,
    /// Unstructured speed play
    Fartlek,
    /// Hill repeats
    Hills,
    /// Progressive-pace run finishing fast
    Progression,
    /// Second long effort the day after the long run (ultra preparation)
    BackToBackLong,
    /// Easy run rehearsing race-day nutrition
    FuelingPractice,
}

impl WorkoutType {
    /// True for types that involve running on the day
    #[must_use]
    pub const fn is_running(self) -> bool {
        !matches!(self, Self::Rest | Self::CrossTraining)
    }

    /// True for quality sessions that target a specific adaptation
    #[must_use]
    pub const fn is_quality(self) -> bool {
        matches!(
            self,
            Self::Tempo | Self::Intervals | Self::Fartlek | Self::Hills | Self::Progression
        )
    }

    /// True for sessions the day-after rule treats as hard
    #[must_use]
    pub const fn is_hard(self) -> bool {
        self.is_quality() || matches!(self, Self::LongRun | Self::Race | Self::BackToBackLong)
    }

    /// Default intensity for this workout type
    #[must_use]
    pub const fn default_intensity(self) -> Intensity {
        match self {
            Self::Tempo | Self::Intervals | Self::Race => Intensity::High,
            Self::LongRun
            | Self::Fartlek
            | Self::Hills
            | Self::Progression
            | Self::BackToBackLong => Intensity::Moderate,
            Self::Easy
            | Self::Recovery
            | Self::Rest
            | Self::CrossTraining
            | Self::FuelingPractice => Intensity::Low,
        }
    }
}

/// Training phase of a week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Aerobic foundation
    Base,
    /// Progressive overload
    Build,
    /// Race-specific build block (ultra goals only)
    #[serde(rename = "build2_specific")]
    Build2Specific,
    /// Highest-volume pre-taper week
    Peak,
    /// Scheduled cutback week
    Recovery,
    /// Pre-race volume shedding
    Taper,
}

impl Phase {
    /// True for phases excluded from week-over-week growth comparisons
    #[must_use]
    pub const fn is_cutback(self) -> bool {
        matches!(self, Self::Recovery | Self::Taper)
    }
}

/// Session intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Conversational or easier
    Low,
    /// Comfortably hard
    Moderate,
    /// Near or above threshold
    High,
}

/// Per-goal contribution percentages on a multi-goal plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSplit {
    /// Share of the work serving the primary goal (0–100)
    pub primary_pct: u8,
    /// Share serving the secondary goal (0–100)
    pub secondary_pct: u8,
}

/// Text placeholders filled by the enrichment collaborator, never by the core
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayContent {
    /// Short workout title
    pub title: Option<String>,
    /// Coached prose description
    pub description: Option<String>,
    /// Target pace text, e.g. "5:10–5:20 /km"
    pub target_pace: Option<String>,
    /// Heart-rate zone text, e.g. "Z2"
    pub hr_zone: Option<String>,
    /// Main-set structure text for quality sessions
    pub main_set: Option<String>,
}

/// One scheduled day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonDay {
    /// Calendar date
    pub date: NaiveDate,
    /// Day of week
    pub weekday: Weekday,
    /// Workout type
    pub workout_type: WorkoutType,
    /// Planned distance (km); `None` for rest and cross-training days
    pub distance_km: Option<f64>,
    /// Session intensity
    pub intensity: Intensity,
    /// Enrichment placeholders
    pub content: DayContent,
    /// Second half of a back-to-back long weekend
    pub is_back_to_back: bool,
    /// Flagged for race-nutrition rehearsal
    pub is_fueling_practice: bool,
    /// Multi-goal contribution, when the plan blends two goals
    pub goal_split: Option<GoalSplit>,
}

impl SkeletonDay {
    /// A rest day on the given date
    #[must_use]
    pub fn rest(date: NaiveDate) -> Self {
        Self {
            date,
            weekday: chrono::Datelike::weekday(&date),
            workout_type: WorkoutType::Rest,
            distance_km: None,
            intensity: Intensity::Low,
            content: DayContent::default(),
            is_back_to_back: false,
            is_fueling_practice: false,
            goal_split: None,
        }
    }

    /// Planned distance treating rest days as zero
    #[must_use]
    pub fn distance_or_zero(&self) -> f64 {
        self.distance_km.unwrap_or(0.0)
    }
}

/// One scheduled week, always 7 days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonWeek {
    /// 1-based week number
    pub week_number: u32,
    /// Monday of the week
    pub start_date: NaiveDate,
    /// Sunday of the week
    pub end_date: NaiveDate,
    /// Training phase
    pub phase: Phase,
    /// How demanding the coached content should read (1–5); never scales distance
    pub quality_level: u8,
    /// Planned total distance (km)
    pub planned_distance_km: f64,
    /// Vertical gain target (m), trail and mountain terrain only
    pub vertical_gain_m: Option<f64>,
    /// Multi-goal percentage split for the week
    pub goal_split: Option<GoalSplit>,
    /// One-line rationale for the week's intent
    pub rationale: String,
    /// The 7 days, Monday first
    pub days: Vec<SkeletonDay>,
}

impl SkeletonWeek {
    /// Sum of all day distances
    #[must_use]
    pub fn total_day_distance_km(&self) -> f64 {
        self.days.iter().map(SkeletonDay::distance_or_zero).sum()
    }

    /// The week's long-run (or race) day distance, when one exists
    #[must_use]
    pub fn long_run_km(&self) -> Option<f64> {
        self.days
            .iter()
            .filter(|d| {
                matches!(d.workout_type, WorkoutType::LongRun | WorkoutType::Race)
            })
            .filter_map(|d| d.distance_km)
            .fold(None, |acc, km| Some(acc.map_or(km, |a: f64| a.max(km))))
    }

    /// Count of high-intensity days
    #[must_use]
    pub fn hard_day_count(&self) -> usize {
        self.days
            .iter()
            .filter(|d| d.intensity == Intensity::High)
            .count()
    }

    /// Count of full rest days
    #[must_use]
    pub fn rest_day_count(&self) -> usize {
        self.days
            .iter()
            .filter(|d| d.workout_type == WorkoutType::Rest)
            .count()
    }
}

/// Plan-level settings stamped onto the skeleton at assembly time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSettings {
    /// Goal the plan is built around
    pub goal_type: GoalType,
    /// Primary race date, when one exists
    pub race_date: Option<NaiveDate>,
    /// Race terrain
    pub terrain: Terrain,
    /// Running days per week
    pub days_per_week: u8,
    /// Preferred run days
    pub preferred_days: Vec<Weekday>,
    /// Long-run day
    pub long_run_day: Weekday,
    /// Total plan length in weeks
    pub total_weeks: u32,
    /// Display unit preference
    pub unit: DistanceUnit,
}

/// A complete structural training plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSkeleton {
    /// Stable id for persistence and progress subscriptions
    pub id: Uuid,
    /// Plan-level settings
    pub settings: PlanSettings,
    /// Ordered weeks, week 1 first
    pub weeks: Vec<SkeletonWeek>,
}

impl PlanSkeleton {
    /// The highest planned weekly distance in the plan
    #[must_use]
    pub fn peak_weekly_km(&self) -> f64 {
        self.weeks
            .iter()
            .map(|w| w.planned_distance_km)
            .fold(0.0, f64::max)
    }

    /// Returns a copy with the given weeks substituted
    ///
    /// The copy-with-changes seam the guardrail pass uses instead of mutating
    /// the caller's value.
    #[must_use]
    pub fn with_weeks(&self, weeks: Vec<SkeletonWeek>) -> Self {
        Self {
            id: self.id,
            settings: self.settings.clone(),
            weeks,
        }
    }
}
