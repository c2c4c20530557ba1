// ABOUTME: Error types for plan generation with the three-tier error policy
// ABOUTME: Hard errors reject generation; warnings and corrections never do
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! # Plan Generation Errors
//!
//! Only the *hard* tier lives here: conditions under which generation refuses
//! to run at all. Everything else is a value — [`crate::models::ConflictWarning`]
//! and [`crate::models::RealismWarning`] ride alongside a still-valid plan, and
//! guardrail violations become [`crate::models::CorrectionAction`] audit records.
//! The guardrail pass itself never returns an error.

use crate::models::GoalType;

/// Result alias used throughout the crate
pub type PlanResult<T> = Result<T, PlanError>;

/// Hard errors that reject plan generation before the core stages run
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// The race date leaves fewer weeks than the goal's minimum plan length
    #[error("{weeks_available} weeks to race day is below the {minimum_weeks}-week minimum for a {goal} plan")]
    DurationTooShort {
        /// Goal the plan was requested for
        goal: GoalType,
        /// Weeks between today and the race date
        weeks_available: u32,
        /// Goal-specific minimum plan length
        minimum_weeks: u32,
    },

    /// Baseline weekly volume is implausibly low for the requested goal
    #[error("baseline of {baseline_km:.0} km/week is implausibly low for a {goal} goal")]
    ImplausibleBaseline {
        /// Goal the plan was requested for
        goal: GoalType,
        /// Athlete's baseline weekly volume
        baseline_km: f64,
    },

    /// Two goals share the same race date
    #[error("both goals share the race date {date}; pick one race to target")]
    IdenticalRaceDates {
        /// The shared race date
        date: chrono::NaiveDate,
    },

    /// The request named no goals at all
    #[error("a plan request needs at least one goal")]
    NoGoals,

    /// The request carried more goals than the planner supports
    #[error("at most two goals are supported, got {count}")]
    TooManyGoals {
        /// Number of goals in the request
        count: usize,
    },

    /// A race date lies in the past
    #[error("race date {date} is in the past")]
    RaceDateInPast {
        /// The offending date
        date: chrono::NaiveDate,
    },
}

impl PlanError {
    /// True when the error reflects a timeline problem the athlete can fix by
    /// picking a later race
    #[must_use]
    pub const fn is_timeline_error(&self) -> bool {
        matches!(
            self,
            Self::DurationTooShort { .. } | Self::RaceDateInPast { .. }
        )
    }
}
