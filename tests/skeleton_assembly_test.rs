// ABOUTME: Tests for the skeleton assembler
// ABOUTME: Weekly sums, long-run dominance, phase layout, ultra augmentations, dates

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{Datelike, NaiveDate, Weekday};
use strideplan::assembler::{AssemblyInput, SkeletonAssembler};
use strideplan::config::ProgressionLimits;
use strideplan::models::{
    AthleteProfile, ConsistencyTier, DistanceUnit, GoalConfig, GoalType, PaceRange, Phase,
    PlanSettings, PlanSkeleton, Terrain, WorkoutType,
};
use strideplan::progression::build_curves;
use strideplan::template::build_week_template;
use strideplan::training_constants::allocation;

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

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn settings(goal: &GoalConfig, days_per_week: u8, long_run_day: Weekday, weeks: u32) -> PlanSettings {
    PlanSettings {
        goal_type: goal.goal_type,
        race_date: goal.race_date,
        terrain: goal.terrain,
        days_per_week,
        preferred_days: vec![Weekday::Tue, Weekday::Thu, Weekday::Sat, Weekday::Sun],
        long_run_day,
        total_weeks: weeks,
        unit: DistanceUnit::Km,
    }
}

fn assemble_marathon() -> PlanSkeleton {
    let athlete = profile();
    let goal = GoalConfig::primary(GoalType::Marathon);
    let curves = build_curves(&athlete, &goal, 16, &ProgressionLimits::default());
    let template = build_week_template(
        4,
        &[Weekday::Tue, Weekday::Thu, Weekday::Sat, Weekday::Sun],
        Weekday::Sun,
        true,
        true,
    );

    SkeletonAssembler::default().assemble(&AssemblyInput {
        goal: &goal,
        secondary_goal: None,
        profile: &athlete,
        curves: &curves,
        analysis: None,
        template,
        settings: settings(&goal, 4, Weekday::Sun, 16),
        start_date: monday(),
    })
}

#[test]
fn weekly_sums_track_the_curve() {
    let athlete = profile();
    let goal = GoalConfig::primary(GoalType::Marathon);
    let curves = build_curves(&athlete, &goal, 16, &ProgressionLimits::default());
    let skeleton = assemble_marathon();

    for (week, target) in skeleton.weeks.iter().zip(&curves.weekly_km) {
        let sum = week.total_day_distance_km();
        assert!(
            (sum - target).abs() <= allocation::WEEK_SUM_TOLERANCE_KM,
            "week {} sums to {sum}, target {target}",
            week.week_number
        );
        assert!((week.planned_distance_km - sum).abs() < 0.11);
    }
}

#[test]
fn long_run_dominates_every_week() {
    let skeleton = assemble_marathon();

    for week in &skeleton.weeks {
        let long = week.long_run_km().unwrap();
        for day in &week.days {
            if day.workout_type == WorkoutType::LongRun || day.distance_km.is_none() {
                continue;
            }
            assert!(
                day.distance_or_zero() < long,
                "week {}: {:?} at {:?} reaches the long run of {long}",
                week.week_number,
                day.workout_type,
                day.distance_km
            );
        }
    }
}

#[test]
fn dates_are_contiguous_mondays() {
    let skeleton = assemble_marathon();

    for (index, week) in skeleton.weeks.iter().enumerate() {
        assert_eq!(week.week_number, index as u32 + 1);
        assert_eq!(week.start_date.weekday(), Weekday::Mon);
        assert_eq!((week.end_date - week.start_date).num_days(), 6);
        assert_eq!(week.days.len(), 7);
        for (offset, day) in week.days.iter().enumerate() {
            assert_eq!(
                (day.date - week.start_date).num_days(),
                offset as i64,
                "day dates must be consecutive"
            );
            assert_eq!(day.weekday, day.date.weekday());
        }
    }
}

#[test]
fn phases_follow_the_periodization_layout() {
    let skeleton = assemble_marathon();
    let phases: Vec<Phase> = skeleton.weeks.iter().map(|w| w.phase).collect();

    assert_eq!(phases[0], Phase::Base);
    assert_eq!(phases[1], Phase::Base);
    assert_eq!(phases[2], Phase::Base);
    assert_eq!(phases[3], Phase::Recovery);
    assert_eq!(phases[7], Phase::Recovery);
    assert_eq!(phases[11], Phase::Recovery);
    assert_eq!(phases[12], Phase::Peak);
    assert_eq!(&phases[13..], [Phase::Taper, Phase::Taper, Phase::Taper]);
}

#[test]
fn quality_level_peaks_before_taper() {
    let skeleton = assemble_marathon();

    assert_eq!(skeleton.weeks[12].quality_level, 5);
    assert!(skeleton.weeks[0].quality_level <= 2);
    for week in &skeleton.weeks[13..] {
        assert_eq!(week.quality_level, 2);
    }
    for week in &skeleton.weeks {
        assert!(!week.rationale.is_empty());
    }
}

#[test]
fn every_week_keeps_a_rest_day() {
    let skeleton = assemble_marathon();
    for week in &skeleton.weeks {
        assert!(week.rest_day_count() >= 1);
    }
}

fn assemble_ultra() -> PlanSkeleton {
    let athlete = AthleteProfile {
        baseline_weekly_km: 55.0,
        longest_recent_run_km: 25.0,
        avg_runs_per_week: 5.0,
        ..profile()
    };
    let goal = GoalConfig {
        terrain: Terrain::Trail,
        ..GoalConfig::primary(GoalType::FiftyMile)
    };
    let curves = build_curves(&athlete, &goal, 20, &ProgressionLimits::default());
    // Saturday long run leaves Sunday free for the back-to-back
    let template = build_week_template(
        6,
        &[Weekday::Tue, Weekday::Thu, Weekday::Sun],
        Weekday::Sat,
        false,
        true,
    );

    SkeletonAssembler::default().assemble(&AssemblyInput {
        goal: &goal,
        secondary_goal: None,
        profile: &athlete,
        curves: &curves,
        analysis: None,
        template,
        settings: settings(&goal, 6, Weekday::Sat, 20),
        start_date: monday(),
    })
}

#[test]
fn ultra_gets_a_specific_block_and_back_to_backs() {
    let skeleton = assemble_ultra();

    assert!(skeleton
        .weeks
        .iter()
        .any(|w| w.phase == Phase::Build2Specific));

    let b2b_weeks: Vec<&_> = skeleton
        .weeks
        .iter()
        .filter(|w| {
            w.days
                .iter()
                .any(|d| d.workout_type == WorkoutType::BackToBackLong)
        })
        .collect();
    assert!(!b2b_weeks.is_empty(), "no back-to-back weekends scheduled");

    for week in b2b_weeks {
        assert!(matches!(week.phase, Phase::Build2Specific | Phase::Peak));
        let long = week.long_run_km().unwrap();
        let b2b = week
            .days
            .iter()
            .find(|d| d.workout_type == WorkoutType::BackToBackLong)
            .unwrap();
        assert!(b2b.is_back_to_back);
        assert!(
            (b2b.distance_or_zero() - long * 0.65).abs() <= 0.3,
            "back-to-back should run ~65% of the long run"
        );
    }
}

#[test]
fn ultra_rehearses_fueling_late_in_the_plan() {
    let skeleton = assemble_ultra();

    let fueling_weeks: Vec<u32> = skeleton
        .weeks
        .iter()
        .filter(|w| w.days.iter().any(|d| d.is_fueling_practice))
        .map(|w| w.week_number)
        .collect();

    assert!(!fueling_weeks.is_empty());
    // Fueling starts midway through the race-specific block, never earlier
    assert!(fueling_weeks.iter().all(|w| *w >= 11));
    let fueling_day = skeleton
        .weeks
        .iter()
        .flat_map(|w| &w.days)
        .find(|d| d.is_fueling_practice)
        .unwrap();
    assert_eq!(fueling_day.workout_type, WorkoutType::FuelingPractice);
}

#[test]
fn trail_terrain_sets_vertical_gain_targets() {
    let skeleton = assemble_ultra();

    for week in &skeleton.weeks {
        let vert = week.vertical_gain_m.unwrap();
        assert!(
            (vert - (week.planned_distance_km * 15.0).round()).abs() < f64::EPSILON,
            "trail vertical target should scale with weekly distance"
        );
    }
}

#[test]
fn road_terrain_has_no_vertical_target() {
    let skeleton = assemble_marathon();
    assert!(skeleton.weeks.iter().all(|w| w.vertical_gain_m.is_none()));
}

#[test]
fn race_day_is_stamped_at_full_distance() {
    let athlete = profile();
    let race_date = NaiveDate::from_ymd_opt(2025, 6, 29).unwrap();
    let goal = GoalConfig {
        race_date: Some(race_date),
        ..GoalConfig::primary(GoalType::Marathon)
    };
    let curves = build_curves(&athlete, &goal, 16, &ProgressionLimits::default());
    let template = build_week_template(
        4,
        &[Weekday::Tue, Weekday::Thu, Weekday::Sat, Weekday::Sun],
        Weekday::Sun,
        true,
        true,
    );
    let skeleton = SkeletonAssembler::default().assemble(&AssemblyInput {
        goal: &goal,
        secondary_goal: None,
        profile: &athlete,
        curves: &curves,
        analysis: None,
        template,
        settings: settings(&goal, 4, Weekday::Sun, 16),
        start_date: monday(),
    });

    let race_week = &skeleton.weeks[15];
    let race_day = race_week
        .days
        .iter()
        .find(|d| d.workout_type == WorkoutType::Race)
        .expect("race day missing");
    assert_eq!(race_day.date, race_date);
    assert!((race_day.distance_or_zero() - 42.0).abs() < 0.01);

    // Race weeks carry no quality sessions
    assert!(race_week
        .days
        .iter()
        .all(|d| !d.workout_type.is_quality()));
}
