// ABOUTME: Top-level plan generator facade wiring the six stages together
// ABOUTME: Resolve goals, analyze conflicts, build curves, template, assemble, guardrail

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Plan generation facade
//!
//! One entry point over the staged pipeline. Callers that need finer control
//! (a different template per phase, a custom guardrail pass) use the stage
//! modules directly; everything here is re-exported building blocks.

use chrono::{Datelike, Days, NaiveDate};
use tracing::info;

use crate::assembler::{AssemblyInput, SkeletonAssembler};
use crate::config::PlanGenerationConfig;
use crate::enrichment::EnrichmentProgress;
use crate::errors::{PlanError, PlanResult};
use crate::goals::resolve_goals;
use crate::guardrails::GuardrailValidator;
use crate::models::{
    AthleteProfile, ConflictWarning, GoalConfig, PlanRequest, PlanSettings, PlanSkeleton,
    RealismWarning, ValidationResult,
};
use crate::multi_goal::{self, MultiGoalAnalysis};
use crate::progression::build_curves;
use crate::realism::check_plan_realism;
use crate::template::build_week_template;
use crate::training_constants::realism;

/// A generated plan plus everything the caller should surface alongside it
#[derive(Debug)]
pub struct GeneratedPlan {
    /// The corrected structural plan
    pub skeleton: PlanSkeleton,
    /// Guardrail audit trail and residual errors
    pub validation: ValidationResult,
    /// Advisory realism warnings
    pub realism_warnings: Vec<RealismWarning>,
    /// Multi-goal conflicts, empty on single-goal plans
    pub conflicts: Vec<ConflictWarning>,
    /// Multi-goal analysis, when two goals were blended
    pub analysis: Option<MultiGoalAnalysis>,
    /// Progress channel for streaming enrichment of this plan
    pub progress: EnrichmentProgress,
}

/// Plan generator facade
#[derive(Debug, Clone, Default)]
pub struct PlanGenerator {
    config: PlanGenerationConfig,
}

impl PlanGenerator {
    /// Generator with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator with custom configuration
    #[must_use]
    pub const fn with_config(config: PlanGenerationConfig) -> Self {
        Self { config }
    }

    /// Generate a complete plan skeleton for the request
    ///
    /// The plan starts on the Monday after `today` and runs through the
    /// latest race date, or the goal's default length when no race is dated.
    ///
    /// # Errors
    ///
    /// Returns a hard error when the goals cannot be resolved, when the race
    /// date leaves fewer weeks than the goal's minimum, or when the athlete's
    /// baseline is implausibly low for the goal.
    pub fn generate(
        &self,
        request: &PlanRequest,
        profile: &AthleteProfile,
        today: NaiveDate,
    ) -> PlanResult<GeneratedPlan> {
        let goals = resolve_goals(request, today)?;
        let primary = goals.primary();
        let secondary = goals.secondary();

        let start_date = next_monday(today);
        let total_weeks = plan_length_weeks(primary, secondary, start_date);
        check_hard_limits(primary, profile, total_weeks, start_date)?;

        let analysis =
            secondary.map(|second| multi_goal::analyze(primary, second, total_weeks));
        let conflicts = analysis
            .as_ref()
            .map_or_else(Vec::new, |a| a.warnings.clone());

        let curves = build_curves(profile, primary, total_weeks, &self.config.progression);
        let realism_warnings = check_plan_realism(profile, primary, &curves, total_weeks);

        let template = build_week_template(
            request.days_per_week,
            &request.preferred_days,
            request.long_run_day,
            request.include_speedwork,
            request.include_long_runs,
        );

        let settings = PlanSettings {
            goal_type: primary.goal_type,
            race_date: primary.race_date,
            terrain: primary.terrain,
            days_per_week: request.days_per_week,
            preferred_days: request.preferred_days.clone(),
            long_run_day: request.long_run_day,
            total_weeks,
            unit: request.unit,
        };

        let assembler = SkeletonAssembler::with_rules(self.config.scheduling.clone());
        let skeleton = assembler.assemble(&AssemblyInput {
            goal: primary,
            secondary_goal: secondary,
            profile,
            curves: &curves,
            analysis: analysis.as_ref(),
            template,
            settings,
            start_date,
        });

        let validator = GuardrailValidator::with_limits(self.config.guardrails.clone());
        let (skeleton, validation) = validator.validate_and_correct(&skeleton);

        info!(
            plan_id = %skeleton.id,
            goal = %primary.goal_type,
            weeks = total_weeks,
            corrections = validation.corrections.len(),
            "plan generated"
        );

        let progress = EnrichmentProgress::new(skeleton.id);
        Ok(GeneratedPlan {
            skeleton,
            validation,
            realism_warnings,
            conflicts,
            analysis,
            progress,
        })
    }
}

/// The Monday strictly after `today`
fn next_monday(today: NaiveDate) -> NaiveDate {
    let offset = 7 - u64::from(today.weekday().num_days_from_monday());
    today
        .checked_add_days(Days::new(offset))
        .unwrap_or(today)
}

/// Weeks from plan start through the latest dated race, or the primary
/// goal's default length when nothing is dated
fn plan_length_weeks(
    primary: &GoalConfig,
    secondary: Option<&GoalConfig>,
    start_date: NaiveDate,
) -> u32 {
    let latest_race = [Some(primary), secondary]
        .into_iter()
        .flatten()
        .filter_map(|g| g.race_date)
        .max();
    latest_race.map_or_else(
        || primary.goal_type.default_plan_weeks(),
        |race| weeks_through(start_date, race),
    )
}

/// Whole plan weeks such that `race` lands inside the final week
fn weeks_through(start: NaiveDate, race: NaiveDate) -> u32 {
    let days = (race - start).num_days();
    if days < 0 {
        0
    } else {
        (days / 7 + 1) as u32
    }
}

fn check_hard_limits(
    primary: &GoalConfig,
    profile: &AthleteProfile,
    total_weeks: u32,
    start_date: NaiveDate,
) -> PlanResult<()> {
    let goal = primary.goal_type;
    if let Some(race) = primary.race_date {
        let weeks_available = weeks_through(start_date, race);
        if weeks_available < goal.min_plan_weeks() {
            return Err(PlanError::DurationTooShort {
                goal,
                weeks_available,
                minimum_weeks: goal.min_plan_weeks(),
            });
        }
    } else if total_weeks < goal.min_plan_weeks() {
        return Err(PlanError::DurationTooShort {
            goal,
            weeks_available: total_weeks,
            minimum_weeks: goal.min_plan_weeks(),
        });
    }

    let baseline_floor = goal.peak_weekly_km() * realism::IMPLAUSIBLE_BASELINE_FRACTION;
    if profile.baseline_weekly_km < baseline_floor && goal.race_distance_km().is_some() {
        return Err(PlanError::ImplausibleBaseline {
            goal,
            baseline_km: profile.baseline_weekly_km,
        });
    }

    Ok(())
}
