// ABOUTME: Read-only athlete profile consumed by the plan generator
// ABOUTME: Derived statistics computed by the external profile collaborator, never mutated here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Athlete performance profile
//!
//! Owned by the profile-computation collaborator; this crate only reads it.

use serde::{Deserialize, Serialize};

/// Easy-pace window in minutes per km
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceRange {
    /// Faster end of the easy range (min/km)
    pub fast_min_per_km: f64,
    /// Slower end of the easy range (min/km)
    pub slow_min_per_km: f64,
}

impl PaceRange {
    /// Midpoint of the easy range, used for duration-capping ultra long runs
    #[must_use]
    pub fn midpoint_min_per_km(&self) -> f64 {
        f64::midpoint(self.fast_min_per_km, self.slow_min_per_km)
    }
}

/// Heart-rate training zones (bpm ceilings, zone 1 through zone 5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateZones {
    /// Zone 1 ceiling
    pub zone1_max: u16,
    /// Zone 2 ceiling
    pub zone2_max: u16,
    /// Zone 3 ceiling
    pub zone3_max: u16,
    /// Zone 4 ceiling
    pub zone4_max: u16,
    /// Zone 5 ceiling (max HR)
    pub zone5_max: u16,
}

/// Consistency/experience classification derived from activity history
///
/// Widens or narrows the safe progression deltas the curve builder and
/// guardrail pass allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyTier {
    /// Sparse or erratic history; progress conservatively
    Developing,
    /// Regular training over recent months
    Established,
    /// Long, unbroken training history; tolerates the upper ceilings
    Proven,
}

impl ConsistencyTier {
    /// Signed adjustment applied to the weekly growth ceiling
    #[must_use]
    pub const fn growth_adjustment_sign(self) -> f64 {
        match self {
            Self::Developing => -1.0,
            Self::Established => 0.0,
            Self::Proven => 1.0,
        }
    }
}

/// Athlete performance profile (external, read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Baseline weekly distance over recent training (km)
    pub baseline_weekly_km: f64,
    /// Longest single run in recent history (km)
    pub longest_recent_run_km: f64,
    /// Average runs per week over recent training
    pub avg_runs_per_week: f64,
    /// Easy-pace window
    pub easy_pace: PaceRange,
    /// Estimated fitness score (VDOT-like)
    pub fitness_score: f64,
    /// Heart-rate zones, when known
    pub hr_zones: Option<HeartRateZones>,
    /// Consistency classification
    pub consistency: ConsistencyTier,
}

impl AthleteProfile {
    /// A plausible recreational-runner profile, used by callers that have no
    /// activity history yet
    #[must_use]
    pub fn recreational_default() -> Self {
        Self {
            baseline_weekly_km: 25.0,
            longest_recent_run_km: 10.0,
            avg_runs_per_week: 3.5,
            easy_pace: PaceRange {
                fast_min_per_km: 6.0,
                slow_min_per_km: 7.0,
            },
            fitness_score: 38.0,
            hr_zones: None,
            consistency: ConsistencyTier::Established,
        }
    }
}
