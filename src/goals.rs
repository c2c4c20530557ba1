// ABOUTME: Stage 1 goal resolver: normalizes a raw request into the PlanGoals sum type
// ABOUTME: Validates goal count, race dates, and priority assignment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Goal resolution
//!
//! Turns the loose `Vec<GoalConfig>` of a [`PlanRequest`] into the
//! [`PlanGoals`] sum type, so every later stage knows statically whether it is
//! working with one goal or two. Priority strings on the request are advisory:
//! exactly one goal comes out primary, and when both goals carry race dates the
//! earlier race is normalized to come first in conflict analysis.

use chrono::NaiveDate;
use tracing::debug;

use crate::errors::{PlanError, PlanResult};
use crate::models::{GoalConfig, GoalPriority, PlanGoals, PlanRequest};

/// Resolve the goals of a request into the one-or-two-goal sum type
///
/// # Errors
///
/// Returns a hard error when the request carries zero or more than two goals,
/// when a race date lies before `today`, or when two goals share a race date.
pub fn resolve_goals(request: &PlanRequest, today: NaiveDate) -> PlanResult<PlanGoals> {
    for goal in &request.goals {
        if let Some(date) = goal.race_date {
            if date < today {
                return Err(PlanError::RaceDateInPast { date });
            }
        }
    }

    match request.goals.as_slice() {
        [] => Err(PlanError::NoGoals),
        [only] => {
            let mut goal = only.clone();
            goal.priority = GoalPriority::Primary;
            debug!(goal = %goal.goal_type, "resolved single-goal request");
            Ok(PlanGoals::Single(goal))
        }
        [first, second] => resolve_dual(first, second),
        more => Err(PlanError::TooManyGoals { count: more.len() }),
    }
}

fn resolve_dual(first: &GoalConfig, second: &GoalConfig) -> PlanResult<PlanGoals> {
    if let (Some(a), Some(b)) = (first.race_date, second.race_date) {
        if a == b {
            return Err(PlanError::IdenticalRaceDates { date: a });
        }
    }

    // Explicit priorities win; a tie falls back to request order
    let (mut primary, mut secondary) =
        if second.priority == GoalPriority::Primary && first.priority != GoalPriority::Primary {
            (second.clone(), first.clone())
        } else {
            (first.clone(), second.clone())
        };
    primary.priority = GoalPriority::Primary;
    secondary.priority = GoalPriority::Secondary;

    debug!(
        primary = %primary.goal_type,
        secondary = %secondary.goal_type,
        "resolved dual-goal request"
    );
    Ok(PlanGoals::Dual { primary, secondary })
}
