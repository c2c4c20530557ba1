// ABOUTME: Tests for the weekly progression curve builder
// ABOUTME: Growth ceilings, recovery cutbacks, taper shape, and long-run caps

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use strideplan::config::ProgressionLimits;
use strideplan::models::{AthleteProfile, ConsistencyTier, GoalConfig, GoalType, PaceRange};
use strideplan::progression::{build_curves, peak_long_run_km, taper_factors};

const GROWTH_SLACK_KM: f64 = 0.3;

fn profile() -> AthleteProfile {
    AthleteProfile {
        baseline_weekly_km: 30.0,
        longest_recent_run_km: 12.0,
        avg_runs_per_week: 4.0,
        easy_pace: PaceRange {
            fast_min_per_km: 6.0,
            slow_min_per_km: 7.0,
        },
        fitness_score: 40.0,
        hr_zones: None,
        consistency: ConsistencyTier::Established,
    }
}

#[test]
fn marathon_sixteen_week_shape() {
    let curves = build_curves(
        &profile(),
        &GoalConfig::primary(GoalType::Marathon),
        16,
        &ProgressionLimits::default(),
    );

    assert_eq!(curves.weekly_km.len(), 16);
    assert_eq!(curves.long_run_km.len(), 16);
    assert_eq!(curves.taper_weeks, 3);
    assert_eq!(curves.recovery_weeks, vec![4, 8, 12]);
}

#[test]
fn weekly_growth_respects_ceiling() {
    let curves = build_curves(
        &profile(),
        &GoalConfig::primary(GoalType::Marathon),
        16,
        &ProgressionLimits::default(),
    );

    for week in 2..=13u32 {
        if curves.recovery_weeks.contains(&week) || curves.recovery_weeks.contains(&(week - 1)) {
            continue;
        }
        let prev = curves.weekly_km[week as usize - 2];
        let current = curves.weekly_km[week as usize - 1];
        assert!(
            current <= prev * 1.12 + GROWTH_SLACK_KM,
            "week {week}: {current} grew too fast from {prev}"
        );
    }
}

#[test]
fn recovery_weeks_cut_back() {
    let curves = build_curves(
        &profile(),
        &GoalConfig::primary(GoalType::Marathon),
        16,
        &ProgressionLimits::default(),
    );

    for &week in &curves.recovery_weeks {
        let prev = curves.weekly_km[week as usize - 2];
        let cutback = curves.weekly_km[week as usize - 1];
        assert!(
            cutback <= prev * 0.85,
            "recovery week {week} at {cutback} is not a cutback from {prev}"
        );
    }
}

#[test]
fn taper_strictly_decreases_below_peak() {
    let curves = build_curves(
        &profile(),
        &GoalConfig::primary(GoalType::Marathon),
        16,
        &ProgressionLimits::default(),
    );

    let peak = curves.weekly_km[12];
    let mut prev = peak;
    for taper_week in &curves.weekly_km[13..] {
        assert!(*taper_week < prev, "taper must strictly decrease");
        prev = *taper_week;
    }
}

#[test]
fn marathon_long_run_reaches_race_fraction() {
    let curves = build_curves(
        &profile(),
        &GoalConfig::primary(GoalType::Marathon),
        16,
        &ProgressionLimits::default(),
    );

    let peak_long = curves.long_run_km.iter().copied().fold(0.0, f64::max);
    assert!(
        peak_long >= 42.195 * 0.9 - GROWTH_SLACK_KM,
        "peak long run {peak_long} misses the marathon rehearsal distance"
    );

    for (long, weekly) in curves.long_run_km.iter().zip(&curves.weekly_km) {
        assert!(
            *long <= weekly * 0.5 + 0.26,
            "long run {long} exceeds half of weekly {weekly}"
        );
    }
}

#[test]
fn share_capped_long_run_still_respects_growth_ceiling() {
    // A short recent long run against a low weekly baseline makes the
    // half-of-weekly cap bind from week 1, so the growth ceiling must be
    // measured on the capped sequence rather than the uncapped ramp
    let mut athlete = profile();
    athlete.baseline_weekly_km = 20.0;
    athlete.longest_recent_run_km = 18.0;

    let curves = build_curves(
        &athlete,
        &GoalConfig::primary(GoalType::Marathon),
        16,
        &ProgressionLimits::default(),
    );

    assert!(
        (curves.long_run_km[0] - 10.0).abs() < 0.01,
        "week 1 long run should be capped to half the weekly volume, got {}",
        curves.long_run_km[0]
    );

    for (long, weekly) in curves.long_run_km.iter().zip(&curves.weekly_km) {
        assert!(
            *long <= weekly * 0.5 + 0.26,
            "long run {long} exceeds half of weekly {weekly}"
        );
    }

    for week in 2..=13u32 {
        if curves.recovery_weeks.contains(&week) || curves.recovery_weeks.contains(&(week - 1)) {
            continue;
        }
        let prev = curves.long_run_km[week as usize - 2];
        let current = curves.long_run_km[week as usize - 1];
        if current > prev {
            assert!(
                current <= prev * 1.15 + GROWTH_SLACK_KM,
                "week {week}: long run {current} grew too fast from {prev}"
            );
        }
    }
}

#[test]
fn flat_when_baseline_meets_peak() {
    let limits = ProgressionLimits {
        peak_baseline_floor: 1.0,
        ..ProgressionLimits::default()
    };
    let mut athlete = profile();
    athlete.baseline_weekly_km = 60.0;

    let curves = build_curves(&athlete, &GoalConfig::primary(GoalType::FiveK), 8, &limits);

    assert!((curves.weekly_km[0] - 60.0).abs() < f64::EPSILON);
    for week in 1..=7u32 {
        if curves.recovery_weeks.contains(&week) || week > 7 {
            continue;
        }
        assert!(
            curves.weekly_km[week as usize - 1] <= 60.0 + 0.1,
            "flat curve grew at week {week}"
        );
    }
}

#[test]
fn single_build_week_ramps_from_baseline() {
    let curves = build_curves(
        &profile(),
        &GoalConfig::primary(GoalType::Marathon),
        4,
        &ProgressionLimits::default(),
    );

    assert_eq!(curves.weekly_km.len(), 4);
    assert_eq!(curves.taper_weeks, 3);
    assert!(curves.weekly_km[0] <= 30.0 * 1.12 + GROWTH_SLACK_KM);
}

#[test]
fn taper_factor_tables_match_goal_lengths() {
    assert!(taper_factors(0).is_empty());
    assert_eq!(taper_factors(1).len(), 1);
    assert_eq!(taper_factors(3), [0.75, 0.60, 0.45]);
    assert_eq!(taper_factors(5).len(), 5);

    for length in 1..=5 {
        let factors = taper_factors(length);
        let mut prev = 1.0;
        for factor in factors {
            assert!(*factor < prev, "taper factors must strictly decrease");
            prev = *factor;
        }
    }
}

#[test]
fn ultra_long_run_is_time_capped() {
    let peak = peak_long_run_km(&profile(), &GoalConfig::primary(GoalType::HundredMile));

    // 5 hours at a 6.5 min/km easy midpoint
    let expected = 5.0 * 60.0 / 6.5;
    assert!((peak - expected).abs() < 0.01, "expected {expected}, got {peak}");
}

#[test]
fn short_race_long_run_over_distances() {
    let peak = peak_long_run_km(&profile(), &GoalConfig::primary(GoalType::FiveK));
    assert!((peak - 12.0).abs() < 0.01);
}

#[test]
fn developing_athletes_ramp_slower() {
    let mut cautious = profile();
    cautious.consistency = ConsistencyTier::Developing;

    let steady = build_curves(
        &profile(),
        &GoalConfig::primary(GoalType::Marathon),
        16,
        &ProgressionLimits::default(),
    );
    let careful = build_curves(
        &cautious,
        &GoalConfig::primary(GoalType::Marathon),
        16,
        &ProgressionLimits::default(),
    );

    // Same plan length, lower ceiling, so the early curve sits lower
    assert!(careful.weekly_km[2] <= steady.weekly_km[2]);
}
