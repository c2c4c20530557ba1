// ABOUTME: Advisory realism screening: flags ambitious plans without changing them
// ABOUTME: Compares the built curves against the athlete's recent history

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Plan realism screening
//!
//! Runs after the curves exist and before assembly finishes; produces
//! warnings only. A plan that triples an athlete's volume still generates,
//! because the hard-error layer already rejected the truly implausible
//! cases, but the caller gets told.

use tracing::debug;

use crate::models::{AthleteProfile, GoalConfig, RealismConcern, RealismWarning, Severity};
use crate::progression::ProgressionCurves;
use crate::training_constants::realism;

/// Screen a plan's curves against the athlete's recent history
#[must_use]
pub fn check_plan_realism(
    profile: &AthleteProfile,
    goal: &GoalConfig,
    curves: &ProgressionCurves,
    total_weeks: u32,
) -> Vec<RealismWarning> {
    let mut warnings = Vec::new();

    let baseline = profile.baseline_weekly_km.max(1.0);
    let peak_weekly = curves.weekly_km.iter().copied().fold(0.0, f64::max);
    let volume_ratio = peak_weekly / baseline;
    if volume_ratio > realism::AGGRESSIVE_VOLUME_RATIO {
        warnings.push(RealismWarning {
            concern: RealismConcern::AggressiveVolume,
            severity: Severity::Warning,
            message: format!(
                "Peak week of {peak_weekly:.0} km is {volume_ratio:.1}x your recent \
                 {baseline:.0} km/week baseline; expect the early weeks to feel like a step up"
            ),
        });
    }

    let anchor = profile.longest_recent_run_km.max(1.0);
    let peak_long = curves.long_run_km.iter().copied().fold(0.0, f64::max);
    let long_ratio = peak_long / anchor;
    if long_ratio > realism::AGGRESSIVE_LONG_RUN_RATIO {
        warnings.push(RealismWarning {
            concern: RealismConcern::AggressiveLongRunJump,
            severity: Severity::Warning,
            message: format!(
                "Peak long run of {peak_long:.0} km is {long_ratio:.1}x your recent longest \
                 run of {anchor:.0} km"
            ),
        });
    }

    if total_weeks < goal.goal_type.default_plan_weeks() {
        warnings.push(RealismWarning {
            concern: RealismConcern::InsufficientLeadTime,
            severity: Severity::Info,
            message: format!(
                "{total_weeks} weeks is shorter than the usual {} for a {} plan; the build \
                 will be compressed",
                goal.goal_type.default_plan_weeks(),
                goal.goal_type
            ),
        });
    }

    if profile.baseline_weekly_km < realism::LOW_BASELINE_KM
        && goal.goal_type.race_distance_km().is_some()
    {
        warnings.push(RealismWarning {
            concern: RealismConcern::LowBaseline,
            severity: Severity::Warning,
            message: format!(
                "A recent baseline of {:.0} km/week is low for a {} goal; consider several \
                 weeks of consistent easy running first",
                profile.baseline_weekly_km, goal.goal_type
            ),
        });
    }

    debug!(count = warnings.len(), "realism screening complete");
    warnings
}
