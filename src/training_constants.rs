// ABOUTME: Centralized training-science constants used across plan generation
// ABOUTME: Progression ceilings, taper factor tables, allocation shares, realism thresholds

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! # Training Constants
//!
//! Every magic number of the generation pipeline lives here, grouped by the
//! stage that consumes it. Values follow mainstream endurance coaching
//! practice (the ~10% weekly progression guideline, 3-to-1 loading cycles,
//! multiplicative taper) rather than any single program, and the runtime
//! configuration layer can override the safety-relevant ones per deployment.

/// Week-over-week progression ceilings and recovery cadence
pub mod progression {
    /// Maximum weekly volume growth between consecutive non-cutback weeks.
    /// Slightly above the folk "10% rule"; the consistency-tier adjustment
    /// pulls developing athletes back under it.
    pub const MAX_WEEKLY_GROWTH: f64 = 0.12;

    /// Maximum long-run growth between consecutive non-cutback weeks. The
    /// long run tolerates a slightly steeper ramp than total volume because
    /// it starts from a rehearsed distance.
    pub const MAX_LONG_RUN_GROWTH: f64 = 0.15;

    /// Every Nth build week becomes a recovery cutback (3-to-1 loading)
    pub const RECOVERY_WEEK_CADENCE: usize = 4;

    /// Recovery weeks run at this fraction of the interpolated volume
    pub const RECOVERY_WEEK_FACTOR: f64 = 0.80;

    /// Peak weekly volume never drops below this multiple of the athlete's
    /// baseline, even when the goal's table value is lower
    pub const PEAK_BASELINE_FLOOR_MULTIPLIER: f64 = 1.4;

    /// The long run never exceeds this share of the same week's volume
    pub const MAX_LONG_RUN_SHARE: f64 = 0.5;

    /// Consistency-tier increment applied to the growth ceilings: proven
    /// athletes get the ceiling plus this, developing athletes minus it
    pub const EXPERIENCE_GROWTH_ADJUSTMENT: f64 = 0.02;
}

/// Multiplicative taper factor tables, indexed by taper length
///
/// Each factor applies to the peak volume actually reached, not the table
/// target. Early taper weeks shed less so fitness holds while fatigue drops.
pub mod taper {
    /// 1-week taper (5k, 10k)
    pub const FACTORS_1_WEEK: [f64; 1] = [0.60];
    /// 2-week taper (half marathon)
    pub const FACTORS_2_WEEK: [f64; 2] = [0.70, 0.50];
    /// 3-week taper (marathon, 50k)
    pub const FACTORS_3_WEEK: [f64; 3] = [0.75, 0.60, 0.45];
    /// 4-week taper (50 mile, 100k)
    pub const FACTORS_4_WEEK: [f64; 4] = [0.80, 0.65, 0.50, 0.40];
    /// 5-week taper (100 mile)
    pub const FACTORS_5_WEEK: [f64; 5] = [0.85, 0.70, 0.55, 0.45, 0.35];
}

/// Long-run sizing rules
pub mod long_run {
    /// Peak long run target as a fraction of race distance for half and full
    /// marathon goals; shorter races over-distance instead
    pub const ROAD_RACE_PEAK_FRACTION: f64 = 0.90;

    /// Time budget for a single ultra long run. Beyond roughly this many
    /// hours on feet, injury risk outpaces the endurance stimulus; volume
    /// moves to back-to-back weekends instead.
    pub const ULTRA_DURATION_CAP_HOURS: f64 = 5.0;

    /// The second day of a back-to-back long weekend runs at this fraction
    /// of the first
    pub const BACK_TO_BACK_FACTOR: f64 = 0.65;

    /// A non-long-run day that reaches the long run is pushed down to this
    /// fraction of it
    pub const NON_LONG_RUN_CEILING_FACTOR: f64 = 0.70;
}

/// Per-day distance allocation rules
pub mod allocation {
    /// Quality sessions take roughly this share of the week's volume
    pub const QUALITY_SHARE_OF_WEEK: f64 = 0.20;
    /// Lower clamp on a quality session (km); anything shorter has no
    /// meaningful main set after warm-up
    pub const QUALITY_MIN_KM: f64 = 5.0;
    /// Upper clamp on a quality session (km)
    pub const QUALITY_MAX_KM: f64 = 16.0;
    /// A weekday's session moves at most this far from its prior-week value (km)
    pub const SLOT_SMOOTHING_WINDOW_KM: f64 = 2.0;
    /// Minimum scheduled run distance (km); shorter runs become rest
    pub const MIN_RUN_KM: f64 = 3.0;
    /// Rounding reconciliation nudges days in steps of this size (km)
    pub const RECONCILE_STEP_KM: f64 = 0.5;
    /// A week's day distances must sum to within this of the weekly target (km)
    pub const WEEK_SUM_TOLERANCE_KM: f64 = 1.0;
    /// Weekly vertical gain target per planned km on trail terrain (m)
    pub const TRAIL_VERT_M_PER_KM: f64 = 15.0;
    /// Weekly vertical gain target per planned km on mountain terrain (m)
    pub const MOUNTAIN_VERT_M_PER_KM: f64 = 30.0;
}

/// Intensity distribution limits
pub mod intensity {
    /// Maximum high-intensity days in any week
    pub const MAX_HARD_DAYS_PER_WEEK: usize = 2;
    /// Minimum full rest days in any week
    pub const MIN_REST_DAYS_PER_WEEK: usize = 1;
}

/// Multi-goal blending thresholds
pub mod multi_goal {
    /// Weeks of peak-specific work a race needs immediately before its taper
    pub const PEAK_BLOCK_WEEKS: i64 = 2;
    /// Safety margin added to the too-close gap floor (weeks)
    pub const TOO_CLOSE_MARGIN_WEEKS: i64 = 2;
    /// Recovery transition between two full arcs (weeks)
    pub const TRANSITION_WEEKS: u32 = 2;
    /// Minimum gap for two full base-build-peak-taper arcs (weeks)
    pub const DUAL_PEAK_MIN_GAP_WEEKS: i64 = 12;
    /// Share of key workouts the secondary goal keeps under maintenance
    /// blending (percent)
    pub const MAINTENANCE_SECONDARY_SHARE: u8 = 25;
}

/// Ultra-specific augmentation points
pub mod ultra {
    /// Fueling-practice days start this far into the race-specific block
    /// (fraction of the block's length)
    pub const FUELING_PRACTICE_PHASE_POINT: f64 = 0.5;
}

/// Advisory realism thresholds; these warn, never block
pub mod realism {
    /// Peak weekly volume above this multiple of baseline is flagged
    pub const AGGRESSIVE_VOLUME_RATIO: f64 = 1.8;
    /// Peak long run above this multiple of the recent longest run is flagged
    pub const AGGRESSIVE_LONG_RUN_RATIO: f64 = 2.0;
    /// Baseline below this many km/week is flagged for any dated race goal
    pub const LOW_BASELINE_KM: f64 = 15.0;
    /// Baseline below this fraction of the goal's peak volume is a hard error
    pub const IMPLAUSIBLE_BASELINE_FRACTION: f64 = 0.15;
}
