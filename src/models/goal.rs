// ABOUTME: Goal and request model types for plan generation
// ABOUTME: Closed goal-type enum with per-goal periodization constants, and the Single/Dual goal sum type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Goal configuration for plan generation
//!
//! [`GoalType`] is the closed set of supported race targets; every
//! periodization constant that varies by goal hangs off it so the curve
//! builder and guardrail pass read from one table. [`PlanGoals`] makes the
//! one-or-two-goals shape a sum type: the conflict analyzer cannot be handed
//! zero or three goals.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported race and training targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// 5 km road race
    #[serde(rename = "5k")]
    FiveK,
    /// 10 km road race
    #[serde(rename = "10k")]
    TenK,
    /// Half marathon (21.0975 km)
    HalfMarathon,
    /// Marathon (42.195 km)
    Marathon,
    /// 50 km ultra
    #[serde(rename = "50k")]
    FiftyK,
    /// 50 mile ultra
    #[serde(rename = "50_mile")]
    FiftyMile,
    /// 100 km ultra
    #[serde(rename = "100k")]
    HundredK,
    /// 100 mile ultra
    #[serde(rename = "100_mile")]
    HundredMile,
    /// No race target, structured aerobic maintenance
    GeneralFitness,
}

impl GoalType {
    /// Race distance in km, `None` for general fitness
    #[must_use]
    pub fn race_distance_km(self) -> Option<f64> {
        match self {
            Self::FiveK => Some(5.0),
            Self::TenK => Some(10.0),
            Self::HalfMarathon => Some(21.0975),
            Self::Marathon => Some(42.195),
            Self::FiftyK => Some(50.0),
            Self::FiftyMile => Some(80.47),
            Self::HundredK => Some(100.0),
            Self::HundredMile => Some(160.93),
            Self::GeneralFitness => None,
        }
    }

    /// Goal-specific taper length in weeks
    #[must_use]
    pub fn taper_weeks(self) -> u32 {
        match self {
            Self::FiveK | Self::TenK => 1,
            Self::HalfMarathon => 2,
            Self::Marathon | Self::FiftyK => 3,
            Self::FiftyMile | Self::HundredK => 4,
            Self::HundredMile => 5,
            Self::GeneralFitness => 0,
        }
    }

    /// Goal-specific peak weekly volume constant (km), before the
    /// baseline floor is applied
    #[must_use]
    pub fn peak_weekly_km(self) -> f64 {
        match self {
            Self::FiveK => 45.0,
            Self::TenK => 55.0,
            Self::HalfMarathon => 65.0,
            Self::Marathon => 85.0,
            Self::FiftyK => 90.0,
            Self::FiftyMile => 100.0,
            Self::HundredK => 110.0,
            Self::HundredMile => 120.0,
            Self::GeneralFitness => 40.0,
        }
    }

    /// Cap on the peak long run as a fraction of race distance
    ///
    /// Road goals rehearse most of the distance; ultras substitute time on
    /// feet, so the fraction shrinks as the race grows.
    #[must_use]
    pub fn long_run_cap_fraction(self) -> f64 {
        match self {
            Self::FiveK => 2.4,
            Self::TenK => 1.6,
            Self::HalfMarathon | Self::Marathon => 0.9,
            Self::FiftyK => 0.8,
            Self::FiftyMile => 0.6,
            Self::HundredK => 0.5,
            Self::HundredMile => 0.35,
            Self::GeneralFitness => 1.0,
        }
    }

    /// Default plan length in weeks when no race date anchors the plan
    #[must_use]
    pub fn default_plan_weeks(self) -> u32 {
        match self {
            Self::FiveK => 8,
            Self::TenK => 10,
            Self::HalfMarathon | Self::GeneralFitness => 12,
            Self::Marathon | Self::FiftyK => 16,
            Self::FiftyMile => 20,
            Self::HundredK => 24,
            Self::HundredMile => 28,
        }
    }

    /// Minimum plan length in weeks; anything shorter is a hard error
    #[must_use]
    pub fn min_plan_weeks(self) -> u32 {
        match self {
            Self::FiveK | Self::GeneralFitness => 4,
            Self::TenK => 6,
            Self::HalfMarathon => 8,
            Self::Marathon | Self::FiftyK => 12,
            Self::FiftyMile | Self::HundredK => 16,
            Self::HundredMile => 20,
        }
    }

    /// Minimum build weeks needed to rebuild toward this goal after an
    /// earlier race (multi-goal rebuild window)
    #[must_use]
    pub fn min_build_weeks(self) -> u32 {
        match self {
            Self::FiveK | Self::TenK | Self::GeneralFitness => 4,
            Self::HalfMarathon => 6,
            Self::Marathon | Self::FiftyK => 8,
            Self::FiftyMile | Self::HundredK => 10,
            Self::HundredMile => 12,
        }
    }

    /// True for the ultra distances, which get a `build2_specific` phase,
    /// back-to-back long weekends, and fueling-practice days
    #[must_use]
    pub fn is_ultra(self) -> bool {
        matches!(
            self,
            Self::FiftyK | Self::FiftyMile | Self::HundredK | Self::HundredMile
        )
    }

    /// True when the peak long run must reach a fixed percentage of race
    /// distance before taper (guardrail check 8)
    #[must_use]
    pub fn requires_race_fraction_long_run(self) -> bool {
        matches!(self, Self::HalfMarathon | Self::Marathon)
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::FiveK => "5k",
            Self::TenK => "10k",
            Self::HalfMarathon => "half marathon",
            Self::Marathon => "marathon",
            Self::FiftyK => "50k",
            Self::FiftyMile => "50 mile",
            Self::HundredK => "100k",
            Self::HundredMile => "100 mile",
            Self::GeneralFitness => "general fitness",
        };
        f.write_str(label)
    }
}

/// Priority of a goal when two are present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    /// The race the plan is built around
    Primary,
    /// A supporting race blended into the primary arc
    Secondary,
}

/// Race terrain, drives vertical-gain targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    /// Flat or rolling pavement
    Road,
    /// Runnable singletrack or fire road
    Trail,
    /// Sustained climbing and descending
    Mountain,
}

/// A single resolved race or training goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalConfig {
    /// What the athlete is training for
    pub goal_type: GoalType,
    /// Race date, when one exists
    pub race_date: Option<NaiveDate>,
    /// Target finish time in seconds, advisory only
    pub target_time_seconds: Option<u32>,
    /// Primary or secondary
    pub priority: GoalPriority,
    /// Race terrain
    pub terrain: Terrain,
}

impl GoalConfig {
    /// A primary road goal with no race date or target time
    #[must_use]
    pub const fn primary(goal_type: GoalType) -> Self {
        Self {
            goal_type,
            race_date: None,
            target_time_seconds: None,
            priority: GoalPriority::Primary,
            terrain: Terrain::Road,
        }
    }
}

/// One or two resolved goals
///
/// The two-goal shape carries its own invariant: exactly one primary and one
/// secondary, with the earlier race first where both are dated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanGoals {
    /// One goal drives the whole plan
    Single(GoalConfig),
    /// Two goals blended into one timeline
    Dual {
        /// The goal the plan is built around
        primary: GoalConfig,
        /// The supporting goal
        secondary: GoalConfig,
    },
}

impl PlanGoals {
    /// The goal the plan is built around
    #[must_use]
    pub const fn primary(&self) -> &GoalConfig {
        match self {
            Self::Single(goal) | Self::Dual { primary: goal, .. } => goal,
        }
    }

    /// The secondary goal, when one exists
    #[must_use]
    pub const fn secondary(&self) -> Option<&GoalConfig> {
        match self {
            Self::Single(_) => None,
            Self::Dual { secondary, .. } => Some(secondary),
        }
    }
}

/// Self-reported experience level; widens or narrows safe progression deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// First structured plan
    Beginner,
    /// Has trained through at least one race cycle
    Intermediate,
    /// Multiple race cycles, tolerates faster progressions
    Advanced,
}

/// Distance unit for display; all internal math is km
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    /// Kilometers
    Km,
    /// Miles
    Miles,
}

/// Raw plan request from the request-handling layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// One or two goals, unresolved
    pub goals: Vec<GoalConfig>,
    /// Days per week the athlete wants to run
    pub days_per_week: u8,
    /// Preferred run days
    pub preferred_days: Vec<Weekday>,
    /// Preferred long-run day
    pub long_run_day: Weekday,
    /// Whether to schedule quality (speed) sessions
    pub include_speedwork: bool,
    /// Whether to schedule a weekly long run
    pub include_long_runs: bool,
    /// Self-reported experience
    pub experience: ExperienceLevel,
    /// Display unit preference
    pub unit: DistanceUnit,
    /// Free-text constraints, passed through to enrichment untouched
    pub constraints: Option<String>,
}

impl PlanRequest {
    /// A minimal single-goal request with sensible defaults
    #[must_use]
    pub fn single(goal_type: GoalType) -> Self {
        Self {
            goals: vec![GoalConfig::primary(goal_type)],
            days_per_week: 4,
            preferred_days: vec![
                Weekday::Tue,
                Weekday::Thu,
                Weekday::Sat,
                Weekday::Sun,
            ],
            long_run_day: Weekday::Sun,
            include_speedwork: true,
            include_long_runs: true,
            experience: ExperienceLevel::Intermediate,
            unit: DistanceUnit::Km,
            constraints: None,
        }
    }
}
