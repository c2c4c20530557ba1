// ABOUTME: Stage 3 weekly progression curve builder: weekly volume and long-run sequences
// ABOUTME: Linear ramp over true growth weeks, recovery cutbacks, goal-specific taper factors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Weekly progression curves
//!
//! Turns baseline weekly distance, the goal's peak targets, and plan length
//! into two per-week sequences: target total distance and target long-run
//! distance. Recovery cutbacks sit outside the growth line — the linear step
//! is recomputed over the reduced count of true growth weeks so the curve
//! still lands on the peak in the final build week. Taper weeks apply a
//! goal-specific multiplicative factor sequence rather than a flat
//! percentage, since early taper weeks shed less.

use tracing::debug;

use crate::config::ProgressionLimits;
use crate::models::{AthleteProfile, GoalConfig};
use crate::training_constants::{long_run, progression, taper};

/// The two per-week target sequences driving skeleton assembly
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionCurves {
    /// Target total distance per week (km), week 1 first
    pub weekly_km: Vec<f64>,
    /// Target long-run distance per week (km), week 1 first
    pub long_run_km: Vec<f64>,
    /// Number of trailing taper weeks
    pub taper_weeks: u32,
    /// 1-based week numbers that are recovery cutbacks
    pub recovery_weeks: Vec<u32>,
}

/// Taper factor sequence for a taper of the given length
#[must_use]
pub fn taper_factors(taper_weeks: u32) -> &'static [f64] {
    match taper_weeks {
        0 => &[],
        1 => &taper::FACTORS_1_WEEK,
        2 => &taper::FACTORS_2_WEEK,
        3 => &taper::FACTORS_3_WEEK,
        4 => &taper::FACTORS_4_WEEK,
        _ => &taper::FACTORS_5_WEEK,
    }
}

/// Build both progression curves for a plan
///
/// The athlete's consistency tier widens or narrows the growth ceilings by a
/// fixed increment; everything else is a function of the goal tables.
#[must_use]
pub fn build_curves(
    profile: &AthleteProfile,
    goal: &GoalConfig,
    total_weeks: u32,
    limits: &ProgressionLimits,
) -> ProgressionCurves {
    let total = total_weeks.max(1) as usize;
    let taper_len = (goal.goal_type.taper_weeks() as usize).min(total.saturating_sub(1));
    let build_len = total - taper_len;

    let tier_adjust =
        profile.consistency.growth_adjustment_sign() * progression::EXPERIENCE_GROWTH_ADJUSTMENT;
    let weekly_ceiling = (limits.max_weekly_growth + tier_adjust).max(0.05);
    let long_run_ceiling = (limits.max_long_run_growth + tier_adjust).max(0.05);

    let baseline = profile.baseline_weekly_km.max(1.0);
    let peak_weekly = goal
        .goal_type
        .peak_weekly_km()
        .max(baseline * limits.peak_baseline_floor);

    let anchor = profile.longest_recent_run_km.max(3.0);
    let peak_long = peak_long_run_km(profile, goal).min(peak_weekly * progression::MAX_LONG_RUN_SHARE);

    // Recovery cutbacks recur every Nth build week but never displace the
    // final (peak) build week.
    let recovery_weeks: Vec<u32> = (1..=build_len)
        .filter(|i| i % limits.recovery_week_cadence == 0 && *i != build_len)
        .map(|i| i as u32)
        .collect();

    let weekly = ramp(
        baseline,
        peak_weekly,
        build_len,
        &recovery_weeks,
        limits.recovery_week_factor,
        weekly_ceiling,
        None,
    );
    // The long run's share cap applies inside the ramp so its growth ceiling
    // is measured on the capped sequence, not on a pre-cap ideal
    let share_caps: Vec<f64> = weekly
        .iter()
        .map(|wk| wk * progression::MAX_LONG_RUN_SHARE)
        .collect();
    let long = ramp(
        anchor,
        peak_long,
        build_len,
        &recovery_weeks,
        limits.recovery_week_factor,
        long_run_ceiling,
        Some(&share_caps),
    );

    let factors = taper_factors(taper_len as u32);
    let peak_weekly_reached = weekly.last().copied().unwrap_or(baseline);
    let peak_long_reached = long.last().copied().unwrap_or(anchor);

    let mut weekly_km = weekly;
    let mut long_run_km = long;
    // Taper weeks scale both peaks by the same factor, so the long run's
    // share of the week carries through from the final build week
    for factor in factors.iter().take(taper_len) {
        weekly_km.push(peak_weekly_reached * factor);
        long_run_km.push(peak_long_reached * factor);
    }

    debug!(
        total_weeks = total,
        taper_weeks = taper_len,
        peak_weekly = format!("{peak_weekly_reached:.1}"),
        peak_long = format!("{peak_long_reached:.1}"),
        "built progression curves"
    );

    ProgressionCurves {
        weekly_km,
        long_run_km,
        taper_weeks: taper_len as u32,
        recovery_weeks,
    }
}

/// Peak long-run target: goal cap fraction of race distance, with a time
/// budget for ultras (a 100-mile long run is bounded near 5 hours on feet
/// regardless of the raw distance math)
#[must_use]
pub fn peak_long_run_km(profile: &AthleteProfile, goal: &GoalConfig) -> f64 {
    let anchor = profile.longest_recent_run_km.max(3.0);
    let distance_cap = goal.goal_type.race_distance_km().map_or_else(
        || anchor.max(12.0),
        |race_km| race_km * goal.goal_type.long_run_cap_fraction(),
    );

    if goal.goal_type.is_ultra() {
        let pace = profile.easy_pace.midpoint_min_per_km().max(3.0);
        let time_cap = long_run::ULTRA_DURATION_CAP_HOURS * 60.0 / pace;
        distance_cap.min(time_cap)
    } else {
        distance_cap
    }
}

/// Linear ramp from `start` to `peak` over the build weeks, skipping recovery
/// weeks (held at a fraction of the interpolated level) and clamping each
/// growth step to the ceiling and, when given, a per-week absolute cap. A
/// capped value feeds back into the level, so the ceiling always measures
/// growth on the sequence actually emitted.
fn ramp(
    start: f64,
    peak: f64,
    build_len: usize,
    recovery_weeks: &[u32],
    recovery_factor: f64,
    growth_ceiling: f64,
    week_caps: Option<&[f64]>,
) -> Vec<f64> {
    let growth_count = build_len - recovery_weeks.len();
    let step = if growth_count > 1 {
        (peak - start) / (growth_count as f64 - 1.0)
    } else {
        0.0
    };

    let mut out = Vec::with_capacity(build_len);
    let mut level = start;
    let mut growth_index = 0usize;
    for week in 1..=build_len {
        let cap = week_caps.map_or(f64::INFINITY, |caps| caps[week - 1]);
        if recovery_weeks.contains(&(week as u32)) {
            out.push(round_half((level * recovery_factor).min(cap)));
            continue;
        }
        let target = if growth_count <= 1 {
            peak
        } else {
            start + step * growth_index as f64
        };
        // Growth never outruns the ceiling (to within half-km rounding);
        // a flat or declining curve passes through untouched
        let ceiling = level * (1.0 + growth_ceiling);
        let value = if target > level {
            round_half(target.min(ceiling).min(cap))
        } else {
            round_half(target.min(cap))
        };
        out.push(value);
        level = value;
        growth_index += 1;
    }
    out
}

fn round_half(km: f64) -> f64 {
    (km * 2.0).round() / 2.0
}
