// ABOUTME: Periodized running training plan generation and safety validation engine
// ABOUTME: Staged pipeline from goal resolution through guardrail correction and enrichment

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! # Strideplan
//!
//! Generates periodized, day-by-day running training plans and
//! guardrail-corrects unsafe progressions.
//!
//! The pipeline runs in stages:
//!
//! 1. **Goal resolution** ([`goals`]) normalizes a raw request into one or
//!    two prioritized goals.
//! 2. **Conflict analysis** ([`multi_goal`]) blends two race goals into one
//!    timeline and surfaces conflicts it cannot resolve.
//! 3. **Progression curves** ([`progression`]) turn baseline volume and goal
//!    targets into per-week distance sequences with recovery cutbacks and a
//!    goal-specific taper.
//! 4. **Schedule template** ([`template`]) maps athlete preferences to a
//!    repeating weekly workout layout.
//! 5. **Skeleton assembly** ([`assembler`]) stamps dates, distances, phases,
//!    and ultra augmentations onto the calendar.
//! 6. **Guardrail validation** ([`guardrails`]) re-checks the finished
//!    skeleton against safe-progression limits and corrects violations,
//!    recording every fix.
//!
//! [`PlanGenerator`] wires the stages together; [`enrichment`] is the
//! post-generation seam where an external collaborator fills in coached
//! workout text.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use strideplan::{AthleteProfile, GoalType, PlanGenerator, PlanRequest};
//!
//! # fn main() -> Result<(), strideplan::PlanError> {
//! let generator = PlanGenerator::new();
//! let request = PlanRequest::single(GoalType::Marathon);
//! let profile = AthleteProfile::recreational_default();
//! let today = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap_or_default();
//!
//! let plan = generator.generate(&request, &profile, today)?;
//! assert_eq!(plan.skeleton.weeks.len(), 16);
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod config;
pub mod enrichment;
pub mod errors;
pub mod generator;
pub mod goals;
pub mod guardrails;
pub mod models;
pub mod multi_goal;
pub mod progression;
pub mod realism;
pub mod template;
pub mod training_constants;

pub use config::{GuardrailLimits, PlanGenerationConfig, ProgressionLimits, SchedulingRules};
pub use errors::{PlanError, PlanResult};
pub use generator::{GeneratedPlan, PlanGenerator};
pub use guardrails::GuardrailValidator;
pub use models::{
    AthleteProfile, ConflictType, ConflictWarning, CorrectionAction, CorrectionType, GoalConfig,
    GoalPriority, GoalType, Intensity, Phase, PlanGoals, PlanRequest, PlanSkeleton, RealismWarning,
    Severity, SkeletonDay, SkeletonWeek, Terrain, ValidationResult, WorkoutType,
};
pub use multi_goal::{BlendStrategy, MultiGoalAnalysis, PhaseWindow};
pub use progression::ProgressionCurves;
