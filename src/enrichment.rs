// ABOUTME: Week-by-week content enrichment seam: requests, trait, application, progress events
// ABOUTME: Enrichment fills text placeholders only; structural and numeric fields stay frozen

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Workout content enrichment
//!
//! The skeleton leaves every [`DayContent`] field empty. An external
//! collaborator (an LLM-backed coach, a template engine, a human editor)
//! implements [`WorkoutEnricher`] and fills them in, one week per call so a
//! long plan streams progressively. Enrichment is best effort: a failed week
//! leaves its placeholders empty and the plan stays fully usable.
//!
//! Progress flows through a per-plan broadcast channel. Subscribers attach
//! and detach freely; publishing to a channel nobody listens to is a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Weekday;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{
    AthleteProfile, DayContent, Phase, PlanSkeleton, SkeletonWeek, WorkoutType,
};

/// Capacity of a plan's progress channel; events beyond this lag slow subscribers
const PROGRESS_CHANNEL_CAPACITY: usize = 64;

/// Errors from the enrichment collaborator
///
/// Separate from [`crate::errors::PlanError`] because enrichment failures
/// never invalidate the generated plan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrichmentError {
    /// The external provider failed or returned unusable content
    #[error("enrichment provider failed: {0}")]
    Provider(String),

    /// The caller cancelled enrichment partway through
    #[error("enrichment cancelled after week {last_completed_week}")]
    Cancelled {
        /// Last week that finished before cancellation
        last_completed_week: u32,
    },
}

/// One quality session a week's enrichment request describes
#[derive(Debug, Clone, PartialEq)]
pub struct QualityDayDescriptor {
    /// Day of week
    pub weekday: Weekday,
    /// Session type
    pub workout_type: WorkoutType,
    /// Planned distance (km)
    pub distance_km: f64,
}

/// Everything an enricher needs to write one week's content
#[derive(Debug, Clone, PartialEq)]
pub struct WeekEnrichmentRequest {
    /// 1-based week number
    pub week_number: u32,
    /// Training phase of the week
    pub phase: Phase,
    /// How demanding the content should read (1 to 5)
    pub quality_level: u8,
    /// Planned total distance (km)
    pub planned_distance_km: f64,
    /// Long-run distance, when the week has one (km)
    pub long_run_km: Option<f64>,
    /// The week's quality sessions
    pub quality_days: Vec<QualityDayDescriptor>,
    /// One-line intent of the week
    pub rationale: String,
}

/// Content for one day, keyed by weekday within the requested week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedDayContent {
    /// Day of week within the enriched week
    pub weekday: Weekday,
    /// Filled text fields
    pub content: DayContent,
}

/// External collaborator that writes coached content for one week at a time
#[async_trait]
pub trait WorkoutEnricher: Send + Sync {
    /// Produce content for the given week
    ///
    /// Implementations may return fewer entries than the week has days;
    /// unmentioned days keep their empty placeholders.
    async fn enrich_week(
        &self,
        athlete_context: &str,
        request: &WeekEnrichmentRequest,
    ) -> Result<Vec<EnrichedDayContent>, EnrichmentError>;
}

/// Build one enrichment request per week of the skeleton
#[must_use]
pub fn enrichment_requests(skeleton: &PlanSkeleton) -> Vec<WeekEnrichmentRequest> {
    skeleton
        .weeks
        .iter()
        .map(|week| WeekEnrichmentRequest {
            week_number: week.week_number,
            phase: week.phase,
            quality_level: week.quality_level,
            planned_distance_km: week.planned_distance_km,
            long_run_km: week.long_run_km(),
            quality_days: week
                .days
                .iter()
                .filter(|d| d.workout_type.is_quality())
                .map(|d| QualityDayDescriptor {
                    weekday: d.weekday,
                    workout_type: d.workout_type,
                    distance_km: d.distance_or_zero(),
                })
                .collect(),
            rationale: week.rationale.clone(),
        })
        .collect()
}

/// One compact prose block describing the athlete, shared by every week's
/// enrichment call
#[must_use]
pub fn athlete_context(profile: &AthleteProfile, constraints: Option<&str>) -> String {
    let mut context = format!(
        "Athlete: {:.0} km/week recently, longest recent run {:.0} km, \
         about {:.1} runs/week, easy pace {:.1}-{:.1} min/km, fitness score {:.0}.",
        profile.baseline_weekly_km,
        profile.longest_recent_run_km,
        profile.avg_runs_per_week,
        profile.easy_pace.fast_min_per_km,
        profile.easy_pace.slow_min_per_km,
        profile.fitness_score,
    );
    if let Some(zones) = &profile.hr_zones {
        context.push_str(&format!(
            " HR zones (bpm ceilings): Z1 {}, Z2 {}, Z3 {}, Z4 {}, Z5 {}.",
            zones.zone1_max, zones.zone2_max, zones.zone3_max, zones.zone4_max, zones.zone5_max
        ));
    }
    if let Some(text) = constraints {
        if !text.trim().is_empty() {
            context.push_str(" Constraints: ");
            context.push_str(text.trim());
            context.push('.');
        }
    }
    context
}

/// Apply one week's enriched content onto the skeleton week
///
/// Only the text placeholder fields change. Entries for weekdays the week
/// does not schedule, and `None` fields within an entry, are ignored.
pub fn apply_week_enrichment(week: &mut SkeletonWeek, enriched: &[EnrichedDayContent]) {
    for entry in enriched {
        let Some(day) = week.days.iter_mut().find(|d| d.weekday == entry.weekday) else {
            warn!(
                week = week.week_number,
                weekday = ?entry.weekday,
                "enrichment named a weekday the week does not schedule"
            );
            continue;
        };
        let content = &entry.content;
        if content.title.is_some() {
            day.content.title.clone_from(&content.title);
        }
        if content.description.is_some() {
            day.content.description.clone_from(&content.description);
        }
        if content.target_pace.is_some() {
            day.content.target_pace.clone_from(&content.target_pace);
        }
        if content.hr_zone.is_some() {
            day.content.hr_zone.clone_from(&content.hr_zone);
        }
        if content.main_set.is_some() {
            day.content.main_set.clone_from(&content.main_set);
        }
    }
}

/// Progress events published while a plan enriches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentEvent {
    /// Enrichment began
    Started {
        /// Plan being enriched
        plan_id: Uuid,
        /// Number of weeks to enrich
        total_weeks: u32,
    },
    /// One week finished
    WeekEnriched {
        /// Plan being enriched
        plan_id: Uuid,
        /// 1-based week that finished
        week_number: u32,
    },
    /// Every week finished
    Completed {
        /// Plan that finished
        plan_id: Uuid,
    },
    /// Enrichment stopped early
    Failed {
        /// Plan that failed
        plan_id: Uuid,
        /// Provider failure text
        message: String,
    },
}

/// Per-plan progress channel handle
///
/// Owned by whoever drives enrichment; clones share the same channel and the
/// same cancellation flag.
#[derive(Debug, Clone)]
pub struct EnrichmentProgress {
    plan_id: Uuid,
    sender: broadcast::Sender<EnrichmentEvent>,
    cancelled: Arc<AtomicBool>,
}

impl EnrichmentProgress {
    /// A fresh channel for the given plan
    #[must_use]
    pub fn new(plan_id: Uuid) -> Self {
        let (sender, _) = broadcast::channel(PROGRESS_CHANNEL_CAPACITY);
        Self {
            plan_id,
            sender,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The plan this channel reports on
    #[must_use]
    pub const fn plan_id(&self) -> Uuid {
        self.plan_id
    }

    /// Attach a new subscriber; events published before this call are not replayed
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EnrichmentEvent> {
        self.sender.subscribe()
    }

    /// Request cancellation; the driver stops before starting the next week
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested on any clone of this handle
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn publish(&self, event: EnrichmentEvent) {
        // A send error only means nobody is subscribed right now
        let _ = self.sender.send(event);
    }
}

/// Drive enrichment across a whole skeleton, week by week
///
/// Applies each week's content as it arrives and publishes progress. Stops at
/// the first provider failure; earlier weeks keep their content and later
/// weeks keep their placeholders. Cancelling the progress handle stops the
/// loop between weeks the same way.
///
/// # Errors
///
/// Returns the provider's [`EnrichmentError`] if any week fails, or
/// [`EnrichmentError::Cancelled`] when the progress handle was cancelled
/// between weeks.
pub async fn enrich_plan(
    enricher: &dyn WorkoutEnricher,
    skeleton: &mut PlanSkeleton,
    profile: &AthleteProfile,
    constraints: Option<&str>,
    progress: &EnrichmentProgress,
) -> Result<(), EnrichmentError> {
    let context = athlete_context(profile, constraints);
    let requests = enrichment_requests(skeleton);
    progress.publish(EnrichmentEvent::Started {
        plan_id: skeleton.id,
        total_weeks: requests.len() as u32,
    });

    let mut last_completed_week = 0u32;
    for (week, request) in skeleton.weeks.iter_mut().zip(&requests) {
        if progress.is_cancelled() {
            let error = EnrichmentError::Cancelled { last_completed_week };
            warn!(week = week.week_number, %error, "enrichment stopped early");
            progress.publish(EnrichmentEvent::Failed {
                plan_id: skeleton.id,
                message: error.to_string(),
            });
            return Err(error);
        }
        match enricher.enrich_week(&context, request).await {
            Ok(enriched) => {
                apply_week_enrichment(week, &enriched);
                debug!(week = week.week_number, "week enriched");
                last_completed_week = week.week_number;
                progress.publish(EnrichmentEvent::WeekEnriched {
                    plan_id: skeleton.id,
                    week_number: week.week_number,
                });
            }
            Err(error) => {
                warn!(week = week.week_number, %error, "enrichment stopped early");
                progress.publish(EnrichmentEvent::Failed {
                    plan_id: skeleton.id,
                    message: error.to_string(),
                });
                return Err(error);
            }
        }
    }

    progress.publish(EnrichmentEvent::Completed {
        plan_id: skeleton.id,
    });
    Ok(())
}
