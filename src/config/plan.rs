// ABOUTME: Plan generation configuration: progression ceilings, scheduling rules, guardrail limits
// ABOUTME: Defaults come from the training constants; everything here is overridable per deployment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Plan Generation Configuration
//!
//! Configuration for the progression curve builder, schedule assembler, and
//! guardrail validator. Defaults mirror `training_constants`; deployments that
//! coach different populations (e.g. youth programs) tighten these values.

use serde::{Deserialize, Serialize};

use crate::training_constants::{allocation, intensity, long_run, progression};

/// Plan generation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanGenerationConfig {
    /// Progression ceilings and recovery cadence
    pub progression: ProgressionLimits,
    /// Template and allocation rules
    pub scheduling: SchedulingRules,
    /// Guardrail validation limits
    pub guardrails: GuardrailLimits,
}

/// Week-over-week progression ceilings and recovery cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionLimits {
    /// Maximum weekly volume growth between consecutive non-cutback weeks
    pub max_weekly_growth: f64,
    /// Maximum long-run growth between consecutive non-cutback weeks
    pub max_long_run_growth: f64,
    /// Every Nth build week becomes a recovery cutback
    pub recovery_week_cadence: usize,
    /// Recovery weeks run at this fraction of the interpolated value
    pub recovery_week_factor: f64,
    /// Peak weekly volume floor as a multiple of baseline
    pub peak_baseline_floor: f64,
}

impl Default for ProgressionLimits {
    fn default() -> Self {
        Self {
            max_weekly_growth: progression::MAX_WEEKLY_GROWTH,
            max_long_run_growth: progression::MAX_LONG_RUN_GROWTH,
            recovery_week_cadence: progression::RECOVERY_WEEK_CADENCE,
            recovery_week_factor: progression::RECOVERY_WEEK_FACTOR,
            peak_baseline_floor: progression::PEAK_BASELINE_FLOOR_MULTIPLIER,
        }
    }
}

/// Template building and per-day distance allocation rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingRules {
    /// Quality sessions take roughly this share of weekly volume
    pub quality_share_of_week: f64,
    /// Lower clamp on a quality session (km)
    pub quality_min_km: f64,
    /// Upper clamp on a quality session (km)
    pub quality_max_km: f64,
    /// Per-slot smoothing window against the prior week (km)
    pub slot_smoothing_window_km: f64,
    /// Minimum scheduled run distance (km)
    pub min_run_km: f64,
    /// Rounding reconciliation step (km)
    pub reconcile_step_km: f64,
}

impl Default for SchedulingRules {
    fn default() -> Self {
        Self {
            quality_share_of_week: allocation::QUALITY_SHARE_OF_WEEK,
            quality_min_km: allocation::QUALITY_MIN_KM,
            quality_max_km: allocation::QUALITY_MAX_KM,
            slot_smoothing_window_km: allocation::SLOT_SMOOTHING_WINDOW_KM,
            min_run_km: allocation::MIN_RUN_KM,
            reconcile_step_km: allocation::RECONCILE_STEP_KM,
        }
    }
}

/// Guardrail validation limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailLimits {
    /// Week-over-week growth ceiling re-checked after assembly
    pub max_weekly_growth: f64,
    /// Long-run growth ceiling re-checked after assembly
    pub max_long_run_growth: f64,
    /// Long run's maximum share of weekly volume
    pub max_long_run_share: f64,
    /// Expected recovery cadence when inserting missing cutback weeks
    pub recovery_week_cadence: usize,
    /// Maximum high-intensity days per week
    pub max_hard_days_per_week: usize,
    /// Minimum rest days per week
    pub min_rest_days_per_week: usize,
    /// Non-long-run days forced down to this fraction of the long run
    pub non_long_run_ceiling_factor: f64,
    /// Peak long run target as a fraction of race distance (road race goals)
    pub peak_long_run_race_fraction: f64,
    /// Day-distance ceiling for plans without a race distance (km)
    pub fallback_day_cap_km: f64,
}

impl Default for GuardrailLimits {
    fn default() -> Self {
        Self {
            max_weekly_growth: progression::MAX_WEEKLY_GROWTH,
            max_long_run_growth: progression::MAX_LONG_RUN_GROWTH,
            max_long_run_share: progression::MAX_LONG_RUN_SHARE,
            recovery_week_cadence: progression::RECOVERY_WEEK_CADENCE,
            max_hard_days_per_week: intensity::MAX_HARD_DAYS_PER_WEEK,
            min_rest_days_per_week: intensity::MIN_REST_DAYS_PER_WEEK,
            non_long_run_ceiling_factor: long_run::NON_LONG_RUN_CEILING_FACTOR,
            peak_long_run_race_fraction: long_run::ROAD_RACE_PEAK_FRACTION,
            fallback_day_cap_km: 25.0,
        }
    }
}
