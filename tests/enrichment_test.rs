// ABOUTME: Tests for the enrichment seam: requests, application, driver, progress events
// ABOUTME: Uses a mock enricher; content fills text placeholders and never touches structure

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::{NaiveDate, Weekday};
use strideplan::enrichment::{
    apply_week_enrichment, athlete_context, enrich_plan, enrichment_requests, EnrichedDayContent,
    EnrichmentError, EnrichmentEvent, EnrichmentProgress, WeekEnrichmentRequest, WorkoutEnricher,
};
use strideplan::models::{
    AthleteProfile, ConsistencyTier, DayContent, GoalType, PaceRange, PlanRequest, PlanSkeleton,
};
use strideplan::PlanGenerator;

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

fn marathon_skeleton() -> PlanSkeleton {
    let mut request = PlanRequest::single(GoalType::Marathon);
    request.goals[0].race_date = NaiveDate::from_ymd_opt(2025, 6, 29);
    let today = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    PlanGenerator::new()
        .generate(&request, &profile(), today)
        .unwrap()
        .skeleton
}

/// Titles every Sunday "Week {n} long run" and leaves other days alone
struct TitleEnricher;

#[async_trait]
impl WorkoutEnricher for TitleEnricher {
    async fn enrich_week(
        &self,
        _athlete_context: &str,
        request: &WeekEnrichmentRequest,
    ) -> Result<Vec<EnrichedDayContent>, EnrichmentError> {
        Ok(vec![EnrichedDayContent {
            weekday: Weekday::Sun,
            content: DayContent {
                title: Some(format!("Week {} long run", request.week_number)),
                ..DayContent::default()
            },
        }])
    }
}

/// Fails on week 3, succeeds elsewhere
struct FailingEnricher;

#[async_trait]
impl WorkoutEnricher for FailingEnricher {
    async fn enrich_week(
        &self,
        athlete_context: &str,
        request: &WeekEnrichmentRequest,
    ) -> Result<Vec<EnrichedDayContent>, EnrichmentError> {
        if request.week_number == 3 {
            return Err(EnrichmentError::Provider(String::from("model timeout")));
        }
        TitleEnricher.enrich_week(athlete_context, request).await
    }
}

#[test]
fn requests_mirror_the_skeleton() {
    let skeleton = marathon_skeleton();
    let requests = enrichment_requests(&skeleton);

    assert_eq!(requests.len(), 16);
    for (request, week) in requests.iter().zip(&skeleton.weeks) {
        assert_eq!(request.week_number, week.week_number);
        assert_eq!(request.phase, week.phase);
        assert_eq!(request.long_run_km, week.long_run_km());
        assert!(!request.rationale.is_empty());
        for descriptor in &request.quality_days {
            assert!(descriptor.workout_type.is_quality());
            assert!(descriptor.distance_km > 0.0);
        }
    }
}

#[test]
fn athlete_context_summarizes_the_profile() {
    let context = athlete_context(&profile(), None);
    assert!(context.contains("30 km/week"));
    assert!(context.contains("12 km"));
    assert!(!context.contains("Constraints"));

    let constrained = athlete_context(&profile(), Some("no running on Mondays"));
    assert!(constrained.contains("Constraints: no running on Mondays."));
}

#[test]
fn application_touches_text_only() {
    let mut skeleton = marathon_skeleton();
    let before = skeleton.weeks[0].clone();

    apply_week_enrichment(
        &mut skeleton.weeks[0],
        &[EnrichedDayContent {
            weekday: Weekday::Sun,
            content: DayContent {
                title: Some(String::from("Long run")),
                ..DayContent::default()
            },
        }],
    );

    let after = &skeleton.weeks[0];
    for (day_before, day_after) in before.days.iter().zip(&after.days) {
        assert_eq!(day_before.distance_km, day_after.distance_km);
        assert_eq!(day_before.workout_type, day_after.workout_type);
        if day_after.weekday == Weekday::Sun {
            assert_eq!(day_after.content.title.as_deref(), Some("Long run"));
            assert!(day_after.content.description.is_none());
        } else {
            assert!(day_after.content.title.is_none());
        }
    }
}

#[tokio::test]
async fn full_enrichment_streams_progress() {
    let mut skeleton = marathon_skeleton();
    let progress = EnrichmentProgress::new(skeleton.id);
    let mut events = progress.subscribe();

    enrich_plan(&TitleEnricher, &mut skeleton, &profile(), None, &progress)
        .await
        .unwrap();

    assert_eq!(
        events.try_recv().unwrap(),
        EnrichmentEvent::Started {
            plan_id: skeleton.id,
            total_weeks: 16,
        }
    );
    for expected_week in 1..=16u32 {
        assert_eq!(
            events.try_recv().unwrap(),
            EnrichmentEvent::WeekEnriched {
                plan_id: skeleton.id,
                week_number: expected_week,
            }
        );
    }
    assert_eq!(
        events.try_recv().unwrap(),
        EnrichmentEvent::Completed {
            plan_id: skeleton.id,
        }
    );

    for week in &skeleton.weeks {
        let sunday = week
            .days
            .iter()
            .find(|d| d.weekday == Weekday::Sun)
            .unwrap();
        assert_eq!(
            sunday.content.title.as_deref(),
            Some(format!("Week {} long run", week.week_number).as_str())
        );
    }
}

#[tokio::test]
async fn failure_keeps_earlier_weeks_and_reports() {
    let mut skeleton = marathon_skeleton();
    let progress = EnrichmentProgress::new(skeleton.id);
    let mut events = progress.subscribe();

    let err = enrich_plan(&FailingEnricher, &mut skeleton, &profile(), None, &progress)
        .await
        .unwrap_err();
    assert_eq!(err, EnrichmentError::Provider(String::from("model timeout")));

    // Weeks before the failure keep their content, the rest stay blank
    for week in &skeleton.weeks {
        let sunday = week
            .days
            .iter()
            .find(|d| d.weekday == Weekday::Sun)
            .unwrap();
        if week.week_number < 3 {
            assert!(sunday.content.title.is_some());
        } else {
            assert!(sunday.content.title.is_none());
        }
    }

    let mut last = None;
    while let Ok(event) = events.try_recv() {
        last = Some(event);
    }
    assert!(matches!(last, Some(EnrichmentEvent::Failed { .. })));
}

/// Requests cancellation through a shared progress handle after week 2
struct CancellingEnricher {
    progress: EnrichmentProgress,
}

#[async_trait]
impl WorkoutEnricher for CancellingEnricher {
    async fn enrich_week(
        &self,
        athlete_context: &str,
        request: &WeekEnrichmentRequest,
    ) -> Result<Vec<EnrichedDayContent>, EnrichmentError> {
        if request.week_number == 2 {
            self.progress.cancel();
        }
        TitleEnricher.enrich_week(athlete_context, request).await
    }
}

#[tokio::test]
async fn cancellation_stops_between_weeks() {
    let mut skeleton = marathon_skeleton();
    let progress = EnrichmentProgress::new(skeleton.id);
    let mut events = progress.subscribe();
    let enricher = CancellingEnricher {
        progress: progress.clone(),
    };

    let err = enrich_plan(&enricher, &mut skeleton, &profile(), None, &progress)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EnrichmentError::Cancelled {
            last_completed_week: 2
        }
    );

    // The week that requested cancellation still lands; later weeks stay blank
    for week in &skeleton.weeks {
        let sunday = week
            .days
            .iter()
            .find(|d| d.weekday == Weekday::Sun)
            .unwrap();
        if week.week_number <= 2 {
            assert!(sunday.content.title.is_some());
        } else {
            assert!(sunday.content.title.is_none());
        }
    }

    let mut last = None;
    while let Ok(event) = events.try_recv() {
        last = Some(event);
    }
    assert!(matches!(last, Some(EnrichmentEvent::Failed { .. })));
}
