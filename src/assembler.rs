// ABOUTME: Stage 5 skeleton assembler: stamps dates, distances, phases, and ultra augmentations
// ABOUTME: Produces the complete PlanSkeleton from the template and progression curves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Skeleton assembly
//!
//! Walks the plan week by week: stamps calendar dates onto the repeating
//! template, assigns concrete per-day distances from the progression curves,
//! attaches phase and quality metadata, inserts ultra-specific augmentations,
//! and tags multi-goal contribution percentages from the blended timeline.

use chrono::{Datelike, Days, NaiveDate};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::SchedulingRules;
use crate::models::{
    AthleteProfile, GoalConfig, Intensity, Phase, PlanSettings, PlanSkeleton, SkeletonDay,
    SkeletonWeek, Terrain, WorkoutType,
};
use crate::multi_goal::MultiGoalAnalysis;
use crate::progression::ProgressionCurves;
use crate::template::{slot_index, WeekTemplate};
use crate::training_constants::{allocation, long_run, ultra};

/// Everything the assembler needs for one plan
#[derive(Debug)]
pub struct AssemblyInput<'a> {
    /// The primary goal the plan is built around
    pub goal: &'a GoalConfig,
    /// The secondary goal, when the plan blends two
    pub secondary_goal: Option<&'a GoalConfig>,
    /// Athlete profile (read-only)
    pub profile: &'a AthleteProfile,
    /// Progression curves for the plan
    pub curves: &'a ProgressionCurves,
    /// Multi-goal timeline, when two goals were analyzed
    pub analysis: Option<&'a MultiGoalAnalysis>,
    /// Repeating weekly template
    pub template: WeekTemplate,
    /// Plan-level settings to stamp on the skeleton
    pub settings: PlanSettings,
    /// Monday the plan starts on
    pub start_date: NaiveDate,
}

/// Skeleton assembler
#[derive(Debug, Clone, Default)]
pub struct SkeletonAssembler {
    scheduling: SchedulingRules,
}

impl SkeletonAssembler {
    /// Assembler with custom scheduling rules
    #[must_use]
    pub const fn with_rules(scheduling: SchedulingRules) -> Self {
        Self { scheduling }
    }

    /// Assemble the full skeleton
    #[must_use]
    pub fn assemble(&self, input: &AssemblyInput<'_>) -> PlanSkeleton {
        let total_weeks = input.curves.weekly_km.len();
        let phases = classify_phases(
            total_weeks,
            input.curves.taper_weeks as usize,
            &input.curves.recovery_weeks,
            input.goal.goal_type.is_ultra(),
        );

        let mut weeks: Vec<SkeletonWeek> = Vec::with_capacity(total_weeks);
        for index in 0..total_weeks {
            let prior = weeks.last();
            let week = self.assemble_week(input, &phases, index, prior);
            weeks.push(week);
        }

        debug!(
            weeks = weeks.len(),
            goal = %input.goal.goal_type,
            "assembled plan skeleton"
        );

        PlanSkeleton {
            id: Uuid::new_v4(),
            settings: input.settings.clone(),
            weeks,
        }
    }

    fn assemble_week(
        &self,
        input: &AssemblyInput<'_>,
        phases: &[Phase],
        index: usize,
        prior_week: Option<&SkeletonWeek>,
    ) -> SkeletonWeek {
        let week_number = index as u32 + 1;
        let phase = phases.get(index).copied().unwrap_or(Phase::Build);
        let start_date = input
            .start_date
            .checked_add_days(Days::new(7 * index as u64))
            .unwrap_or(input.start_date);
        let end_date = start_date
            .checked_add_days(Days::new(6))
            .unwrap_or(start_date);

        let target_km = input.curves.weekly_km.get(index).copied().unwrap_or(0.0);
        let long_km = input.curves.long_run_km.get(index).copied().unwrap_or(0.0);

        // Start from the template, then apply week-specific overrides
        let mut days: Vec<SkeletonDay> = (0..7u64)
            .map(|offset| {
                let date = start_date
                    .checked_add_days(Days::new(offset))
                    .unwrap_or(start_date);
                let workout_type = input.template[offset as usize];
                SkeletonDay {
                    date,
                    weekday: date.weekday(),
                    workout_type,
                    distance_km: None,
                    intensity: workout_type.default_intensity(),
                    ..SkeletonDay::rest(date)
                }
            })
            .collect();

        self.stamp_race_days(input, &mut days, start_date, end_date);
        let long_slot = self.stamp_long_run(input, &mut days, long_km);
        stamp_back_to_back(input, &mut days, phase, week_number, long_slot, long_km);
        self.stamp_quality_days(&mut days, target_km, long_km, phase, prior_week);

        stamp_fueling_practice(input, &mut days, phases, index);

        self.spread_remaining_volume(&mut days, target_km, long_km);
        self.reconcile_rounding(&mut days, target_km);

        let goal_split = input
            .analysis
            .and_then(|a| a.split_for_week(week_number));
        if let Some(split) = goal_split {
            for day in &mut days {
                if day.workout_type.is_hard() {
                    day.goal_split = Some(split);
                }
            }
        }

        let planned = round_tenth(days.iter().map(SkeletonDay::distance_or_zero).sum());
        let vertical_gain_m = match input.goal.terrain {
            Terrain::Road => None,
            Terrain::Trail => Some((planned * allocation::TRAIL_VERT_M_PER_KM).round()),
            Terrain::Mountain => Some((planned * allocation::MOUNTAIN_VERT_M_PER_KM).round()),
        };

        SkeletonWeek {
            week_number,
            start_date,
            end_date,
            phase,
            quality_level: quality_level(phases, index),
            planned_distance_km: planned,
            vertical_gain_m,
            goal_split,
            rationale: week_rationale(phase, week_number),
            days,
        }
    }

    /// Any goal race date falling in-week overrides its day with a race at
    /// full distance
    fn stamp_race_days(
        &self,
        input: &AssemblyInput<'_>,
        days: &mut [SkeletonDay],
        start: NaiveDate,
        end: NaiveDate,
    ) {
        let mut stamped = false;
        let mut stamp = |goal: &GoalConfig| {
            let Some(date) = goal.race_date else { return };
            if date < start || date > end {
                return;
            }
            let slot = slot_index(date.weekday());
            if let Some(day) = days.get_mut(slot) {
                day.workout_type = WorkoutType::Race;
                day.intensity = Intensity::High;
                day.distance_km = goal
                    .goal_type
                    .race_distance_km()
                    .map(round_half)
                    .or(Some(self.scheduling.min_run_km));
                stamped = true;
            }
        };
        stamp(input.goal);
        if let Some(secondary) = input.secondary_goal {
            stamp(secondary);
        }

        // No quality sessions in a race week
        if stamped {
            for day in days.iter_mut() {
                if day.workout_type.is_quality() {
                    day.workout_type = WorkoutType::Easy;
                    day.intensity = Intensity::Low;
                }
            }
        }
    }

    /// The long-run day receives the week's long-run-curve value; returns the
    /// slot, when one exists
    fn stamp_long_run(
        &self,
        input: &AssemblyInput<'_>,
        days: &mut [SkeletonDay],
        long_km: f64,
    ) -> Option<usize> {
        let slot = days
            .iter()
            .position(|d| d.workout_type == WorkoutType::LongRun)?;
        days[slot].distance_km = Some(round_half(long_km.max(self.scheduling.min_run_km)));
        if input.goal.goal_type.is_ultra() {
            days[slot].intensity = Intensity::Moderate;
        }
        Some(slot)
    }

    /// Quality days receive ~20% of the week's target, clamped, and outside
    /// the base phase smoothed to within the window of the same weekday's
    /// prior-week value
    fn stamp_quality_days(
        &self,
        days: &mut [SkeletonDay],
        target_km: f64,
        long_km: f64,
        phase: Phase,
        prior_week: Option<&SkeletonWeek>,
    ) {
        for slot in 0..days.len() {
            if !days[slot].workout_type.is_quality() {
                continue;
            }
            let mut km = (target_km * self.scheduling.quality_share_of_week)
                .clamp(self.scheduling.quality_min_km, self.scheduling.quality_max_km);

            // Per-slot smoothing: a weekday's session moves at most the
            // window from where it was last week
            if phase != Phase::Base {
                if let Some(prev_km) = prior_week
                    .and_then(|w| w.days.get(slot))
                    .filter(|d| d.workout_type.is_quality())
                    .and_then(|d| d.distance_km)
                {
                    let window = self.scheduling.slot_smoothing_window_km;
                    km = km.clamp(prev_km - window, prev_km + window);
                }
            }

            if long_km > 0.0 {
                km = km.min(long_km - self.scheduling.reconcile_step_km);
            }
            let km = round_half(km.max(self.scheduling.min_run_km));
            days[slot].distance_km = Some(km);
        }
    }

    /// Remaining volume after long-run/quality/back-to-back allocation spreads
    /// evenly across easy-type days with a minimum floor, never letting an
    /// easy day meet or exceed the long run
    fn spread_remaining_volume(&self, days: &mut [SkeletonDay], target_km: f64, long_km: f64) {
        let easy_slots: Vec<usize> = days
            .iter()
            .enumerate()
            .filter(|(_, d)| is_fillable(d))
            .map(|(i, _)| i)
            .collect();
        if easy_slots.is_empty() {
            return;
        }

        let fixed_km: f64 = days
            .iter()
            .filter(|d| !is_fillable(d))
            .map(SkeletonDay::distance_or_zero)
            .sum();
        let remaining = (target_km - fixed_km).max(0.0);
        let mut share = (remaining / easy_slots.len() as f64).max(self.scheduling.min_run_km);
        if long_km > 0.0 {
            share = share.min(long_km - self.scheduling.reconcile_step_km);
        }
        let share = round_half(share.max(self.scheduling.min_run_km));

        for slot in easy_slots {
            days[slot].distance_km = Some(share);
        }
    }

    /// Nudge easy-day distances in fixed steps until the week's sum matches
    /// the target, never touching the long-run day
    fn reconcile_rounding(&self, days: &mut [SkeletonDay], target_km: f64) {
        let step = self.scheduling.reconcile_step_km;
        let long_km = days
            .iter()
            .filter(|d| d.workout_type == WorkoutType::LongRun)
            .filter_map(|d| d.distance_km)
            .fold(0.0, f64::max);

        // Race weeks can carry a fixed load (race + floors) above the curve
        // target; the reconciliation goal is whichever is higher
        let fixed_km: f64 = days
            .iter()
            .filter(|d| !is_fillable(d))
            .map(SkeletonDay::distance_or_zero)
            .sum();
        let easy_floor_km = days.iter().filter(|d| is_fillable(d)).count() as f64
            * self.scheduling.min_run_km;
        let target_km = target_km.max(fixed_km + easy_floor_km);

        for _ in 0..64 {
            let sum: f64 = days.iter().map(SkeletonDay::distance_or_zero).sum();
            let diff = target_km - sum;
            if diff.abs() < step {
                break;
            }
            let direction = if diff > 0.0 { step } else { -step };
            let mut nudged = false;
            for day in days.iter_mut() {
                if !is_fillable(day) {
                    continue;
                }
                let Some(km) = day.distance_km else { continue };
                let next = km + direction;
                let under_long = long_km <= 0.0 || next < long_km;
                if next >= self.scheduling.min_run_km && under_long {
                    day.distance_km = Some(round_half(next));
                    nudged = true;
                    break;
                }
            }
            if !nudged {
                break;
            }
        }

        // A race week's fixed load or an all-floored week can leave a residual
        // the nudging cannot close; anything past the tolerance is worth a log
        let sum: f64 = days.iter().map(SkeletonDay::distance_or_zero).sum();
        if (sum - target_km).abs() > allocation::WEEK_SUM_TOLERANCE_KM {
            warn!(
                target_km,
                allocated_km = sum,
                "week allocation missed its target beyond tolerance"
            );
        }
    }
}

/// Easy-type slots that absorb leftover weekly volume
fn is_fillable(day: &SkeletonDay) -> bool {
    matches!(
        day.workout_type,
        WorkoutType::Easy | WorkoutType::Recovery | WorkoutType::FuelingPractice
    )
}

/// Ultra augmentation: on alternating weeks within specific/peak phases the
/// day after the long run becomes a back-to-back long run at a fixed fraction,
/// skipping quality and rest slots
fn stamp_back_to_back(
    input: &AssemblyInput<'_>,
    days: &mut [SkeletonDay],
    phase: Phase,
    week_number: u32,
    long_slot: Option<usize>,
    long_km: f64,
) {
    if !input.goal.goal_type.is_ultra() {
        return;
    }
    if !matches!(phase, Phase::Build2Specific | Phase::Peak) || week_number % 2 != 0 {
        return;
    }
    // The long run must not be the week's last day; a Sunday long run has no
    // in-week day after it
    let Some(slot) = long_slot else { return };
    let next = slot + 1;
    if next >= days.len() {
        return;
    }
    let day = &mut days[next];
    if day.workout_type.is_quality() || day.workout_type == WorkoutType::Rest {
        return;
    }
    day.workout_type = WorkoutType::BackToBackLong;
    day.intensity = Intensity::Moderate;
    day.is_back_to_back = true;
    day.distance_km = Some(round_half(long_km * long_run::BACK_TO_BACK_FACTOR));
}

/// Ultra augmentation: from a fixed point in the specific phase onward, one
/// ordinary easy day per week rehearses race fueling
fn stamp_fueling_practice(
    input: &AssemblyInput<'_>,
    days: &mut [SkeletonDay],
    phases: &[Phase],
    index: usize,
) {
    if !input.goal.goal_type.is_ultra() {
        return;
    }
    let specific: Vec<usize> = phases
        .iter()
        .enumerate()
        .filter(|(_, p)| matches!(p, Phase::Build2Specific | Phase::Peak))
        .map(|(i, _)| i)
        .collect();
    let Some(&first) = specific.first() else { return };
    let from = first
        + ((specific.len() as f64) * ultra::FUELING_PRACTICE_PHASE_POINT).floor() as usize;
    if index < from {
        return;
    }
    if let Some(day) = days
        .iter_mut()
        .find(|d| d.workout_type == WorkoutType::Easy)
    {
        day.workout_type = WorkoutType::FuelingPractice;
        day.is_fueling_practice = true;
    }
}

/// Phase classification: a small state machine over the week index
///
/// Early weeks are base; interior weeks are build (with a race-specific
/// second block for ultra goals); the single highest pre-taper week is peak;
/// every Nth build week stays recovery; the goal-length suffix is taper.
#[must_use]
pub fn classify_phases(
    total_weeks: usize,
    taper_weeks: usize,
    recovery_weeks: &[u32],
    is_ultra: bool,
) -> Vec<Phase> {
    let build_len = total_weeks.saturating_sub(taper_weeks);
    let base_len = (build_len / 4).max(1).min(build_len);
    let specific_start = base_len + (build_len - base_len) / 2;

    (0..total_weeks)
        .map(|index| {
            let week_number = index as u32 + 1;
            if index >= build_len {
                Phase::Taper
            } else if recovery_weeks.contains(&week_number) {
                Phase::Recovery
            } else if index + 1 == build_len {
                Phase::Peak
            } else if index < base_len {
                Phase::Base
            } else if is_ultra && index >= specific_start {
                Phase::Build2Specific
            } else {
                Phase::Build
            }
        })
        .collect()
}

/// Quality level 1–5: deterministic function of phase and position, scaling
/// only how demanding the coached content should read, never distance
#[must_use]
pub fn quality_level(phases: &[Phase], index: usize) -> u8 {
    match phases.get(index) {
        Some(Phase::Base) => {
            let base_len = phases.iter().filter(|p| **p == Phase::Base).count();
            if base_len > 1 && index >= base_len / 2 {
                2
            } else {
                1
            }
        }
        Some(Phase::Build) => 3,
        Some(Phase::Build2Specific) => 4,
        Some(Phase::Peak) => 5,
        Some(Phase::Recovery) | None => 1,
        Some(Phase::Taper) => 2,
    }
}

fn week_rationale(phase: Phase, week_number: u32) -> String {
    match phase {
        Phase::Base => format!("Week {week_number}: aerobic base, easy volume and consistency."),
        Phase::Build => format!("Week {week_number}: progressive overload with quality sessions."),
        Phase::Build2Specific => {
            format!("Week {week_number}: race-specific endurance and terrain work.")
        }
        Phase::Peak => format!("Week {week_number}: highest volume of the plan before taper."),
        Phase::Recovery => {
            format!("Week {week_number}: scheduled cutback to absorb recent training.")
        }
        Phase::Taper => format!("Week {week_number}: shedding fatigue while keeping sharpness."),
    }
}

fn round_half(km: f64) -> f64 {
    (km * 2.0).round() / 2.0
}

fn round_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}
