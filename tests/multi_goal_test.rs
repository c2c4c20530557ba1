// ABOUTME: Tests for the multi-goal conflict analyzer
// ABOUTME: Gap classification, blend strategy selection, and phase timeline shape

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::NaiveDate;
use strideplan::models::{ConflictType, GoalConfig, GoalPriority, GoalType, Phase, Severity};
use strideplan::multi_goal::{analyze, BlendStrategy, MultiGoalAnalysis};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn goal(goal_type: GoalType, race_date: Option<NaiveDate>, priority: GoalPriority) -> GoalConfig {
    GoalConfig {
        race_date,
        priority,
        ..GoalConfig::primary(goal_type)
    }
}

fn assert_contiguous(analysis: &MultiGoalAnalysis, total_weeks: u32) {
    let timeline = &analysis.timeline;
    assert!(!timeline.is_empty());
    assert_eq!(timeline[0].start_week, 1);
    assert_eq!(timeline.last().unwrap().end_week, total_weeks);
    for pair in timeline.windows(2) {
        assert_eq!(
            pair[1].start_week,
            pair[0].end_week + 1,
            "timeline windows must be contiguous"
        );
    }
}

#[test]
fn same_race_date_is_a_blocking_conflict() {
    let d = date(2025, 6, 1);
    let primary = goal(GoalType::Marathon, Some(d), GoalPriority::Primary);
    let secondary = goal(GoalType::TenK, Some(d), GoalPriority::Secondary);

    let analysis = analyze(&primary, &secondary, 16);

    assert_eq!(analysis.warnings.len(), 1);
    assert_eq!(analysis.warnings[0].conflict_type, ConflictType::SameDate);
    assert_eq!(analysis.warnings[0].severity, Severity::Error);
    assert!(analysis.has_blocking_conflict());
    assert!(analysis.timeline.is_empty());
}

#[test]
fn races_too_close_become_a_training_race() {
    // 5 weeks between a half and the marathon it leads into
    let primary = goal(GoalType::Marathon, Some(date(2025, 6, 8)), GoalPriority::Primary);
    let secondary = goal(
        GoalType::HalfMarathon,
        Some(date(2025, 5, 4)),
        GoalPriority::Secondary,
    );

    let analysis = analyze(&primary, &secondary, 18);

    assert_eq!(analysis.gap_weeks, 5);
    assert_eq!(analysis.strategy, BlendStrategy::TrainingRace);
    let too_close = analysis
        .warnings
        .iter()
        .find(|w| w.conflict_type == ConflictType::TooClose)
        .unwrap();
    assert_eq!(too_close.severity, Severity::Error);
    assert!(too_close.recommendation.contains("training race"));

    // The plan still lays out one arc toward the later race
    assert_contiguous(&analysis, 18);
    let build_split = analysis.split_for_week(10).unwrap();
    assert_eq!(build_split.primary_pct, 75);
}

#[test]
fn short_rebuild_window_warns_without_blocking() {
    // 7 weeks from a 10k to a marathon: racing both is possible, rebuilding is tight
    let primary = goal(GoalType::Marathon, Some(date(2025, 6, 22)), GoalPriority::Primary);
    let secondary = goal(GoalType::TenK, Some(date(2025, 5, 4)), GoalPriority::Secondary);

    let analysis = analyze(&primary, &secondary, 20);

    assert_eq!(analysis.gap_weeks, 7);
    assert_eq!(analysis.strategy, BlendStrategy::PrimaryWithMaintenance);
    assert!(analysis
        .warnings
        .iter()
        .any(|w| w.conflict_type == ConflictType::InsufficientRebuild
            && w.severity == Severity::Warning));
    assert!(!analysis.has_blocking_conflict());
}

#[test]
fn overlapping_taper_windows_are_flagged() {
    // 2 weeks apart: the marathon taper starts before the half is even run
    let primary = goal(GoalType::Marathon, Some(date(2025, 5, 18)), GoalPriority::Primary);
    let secondary = goal(
        GoalType::HalfMarathon,
        Some(date(2025, 5, 4)),
        GoalPriority::Secondary,
    );

    let analysis = analyze(&primary, &secondary, 14);

    let kinds: Vec<ConflictType> = analysis.warnings.iter().map(|w| w.conflict_type).collect();
    assert!(kinds.contains(&ConflictType::TooClose));
    assert!(kinds.contains(&ConflictType::TaperOverlap));
}

#[test]
fn wide_gap_earns_two_full_arcs() {
    // 14 weeks between a 10k and the marathon behind it
    let primary = goal(GoalType::Marathon, Some(date(2025, 9, 7)), GoalPriority::Primary);
    let secondary = goal(GoalType::TenK, Some(date(2025, 6, 1)), GoalPriority::Secondary);

    let analysis = analyze(&primary, &secondary, 26);

    assert_eq!(analysis.gap_weeks, 14);
    assert_eq!(analysis.strategy, BlendStrategy::DualPeak);
    assert!(analysis.warnings.is_empty());
    assert_contiguous(&analysis, 26);

    let tapers = analysis
        .timeline
        .iter()
        .filter(|w| w.phase == Phase::Taper)
        .count();
    assert_eq!(tapers, 2, "two arcs means two tapers");
    assert!(analysis
        .timeline
        .iter()
        .any(|w| w.phase == Phase::Recovery));

    // The earlier 10k is the secondary goal, so its arc carries the
    // maintenance share and the marathon arc carries the bulk
    assert_eq!(analysis.split_for_week(5).unwrap().primary_pct, 20);
    assert_eq!(analysis.split_for_week(20).unwrap().primary_pct, 80);
}

#[test]
fn undated_secondary_blends_as_single_peak() {
    let primary = goal(GoalType::Marathon, Some(date(2025, 9, 7)), GoalPriority::Primary);
    let secondary = goal(GoalType::GeneralFitness, None, GoalPriority::Secondary);

    let analysis = analyze(&primary, &secondary, 16);

    assert_eq!(analysis.strategy, BlendStrategy::SinglePeak);
    assert!(analysis.warnings.is_empty());
    assert_contiguous(&analysis, 16);
    assert_eq!(analysis.split_for_week(10).unwrap().primary_pct, 75);
}
