// ABOUTME: Guardrail validator/corrector: re-checks a completed skeleton and rewrites violations
// ABOUTME: Ordered checks over a working copy; every fix lands in the correction audit trail
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Guardrail validation and correction
//!
//! A belt-and-suspenders pass: the builder already targets these invariants,
//! but heuristics and later content-filling can still produce out-of-bounds
//! values, and externally modified plans can carry arbitrary numbers. The
//! pass assumes nothing about its input, runs an ordered sequence of checks
//! over a working copy, and never throws — every violation becomes either a
//! correction (recorded) or a residual error (the corrected plan is still
//! returned so the caller can accept it with a warning).
//!
//! Running the pass twice on its own output is a fixed point: the second pass
//! produces zero additional corrections.

use tracing::{debug, warn};

use crate::config::GuardrailLimits;
use crate::models::{
    CorrectionAction, CorrectionType, GoalType, Intensity, Phase, PlanSkeleton, SkeletonDay,
    SkeletonWeek, ValidationResult, WorkoutType,
};
use crate::training_constants::{long_run, realism};

/// Slack for comparisons against values the assembler rounds to the half km
const ROUNDING_SLACK_KM: f64 = 0.51;

/// Guardrail validator
#[derive(Debug, Clone, Default)]
pub struct GuardrailValidator {
    limits: GuardrailLimits,
}

impl GuardrailValidator {
    /// Validator with custom limits
    #[must_use]
    pub const fn with_limits(limits: GuardrailLimits) -> Self {
        Self { limits }
    }

    /// Validate a skeleton and return a corrected copy plus the audit trail
    ///
    /// The input is never mutated; corrections apply to a working copy.
    #[must_use]
    pub fn validate_and_correct(
        &self,
        skeleton: &PlanSkeleton,
    ) -> (PlanSkeleton, ValidationResult) {
        let mut plan = skeleton.clone();
        let mut result = ValidationResult::default();
        let goal = plan.settings.goal_type;

        self.check_day_caps_and_hierarchy(&mut plan, goal, &mut result);
        self.check_weekly_growth(&mut plan, goal, &mut result);
        self.check_long_run_share(&mut plan, goal, &mut result);
        self.check_recovery_cadence(&mut plan, goal, &mut result);
        self.check_taper_shape(&mut plan, goal, &mut result);
        self.check_intensity_limits(&mut plan, &mut result);
        check_plausibility(&plan, goal, &mut result);
        self.check_peak_long_run(&mut plan, goal, &mut result);
        self.check_long_run_growth(&mut plan, goal, &mut result);

        for correction in &result.corrections {
            debug!(
                kind = ?correction.correction_type,
                week = correction.week_number,
                from = correction.original_value,
                to = correction.corrected_value,
                "guardrail correction applied"
            );
        }
        if !result.errors.is_empty() {
            warn!(errors = result.errors.len(), "guardrail pass left residual errors");
        }

        (plan, result)
    }

    /// Check 1: cap every workout to a race-distance-relative ceiling/floor
    /// and restore the long-run hierarchy. Runs first because the later
    /// percentage checks assume every day already respects this hierarchy.
    fn check_day_caps_and_hierarchy(
        &self,
        plan: &mut PlanSkeleton,
        goal: GoalType,
        result: &mut ValidationResult,
    ) {
        let day_cap = self.day_cap_km(goal);
        for week in &mut plan.weeks {
            for day in &mut week.days {
                let Some(km) = day.distance_km else { continue };
                if day.workout_type == WorkoutType::Race {
                    continue;
                }
                if km > day_cap {
                    day.distance_km = Some(round_half(day_cap));
                    result.corrections.push(correction(
                        CorrectionType::DayDistanceClamped,
                        week.week_number,
                        km,
                        day_cap,
                        format!("single run above the {day_cap:.0} km ceiling for a {goal} plan"),
                    ));
                } else if km < 1.0 {
                    day.distance_km = Some(1.0);
                    result.corrections.push(correction(
                        CorrectionType::DayDistanceClamped,
                        week.week_number,
                        km,
                        1.0,
                        "scheduled run below the 1 km floor".into(),
                    ));
                }
            }

            // The hierarchy reference is the LongRun day itself; a race day
            // can legitimately be shorter than the week's training runs
            let long_km = week
                .days
                .iter()
                .filter(|d| d.workout_type == WorkoutType::LongRun)
                .filter_map(|d| d.distance_km)
                .fold(f64::NAN, f64::max);
            if long_km.is_nan() {
                recompute_planned(week);
                continue;
            }
            enforce_long_run_hierarchy(
                week,
                long_km,
                self.limits.non_long_run_ceiling_factor,
                result,
            );
            recompute_planned(week);
        }
    }

    /// Check 2: clamp week-over-week growth, scaling every non-race day in an
    /// over-limit week proportionally. The race-fraction peak week is exempt
    /// so the peak-long-run raise survives repeated passes.
    fn check_weekly_growth(
        &self,
        plan: &mut PlanSkeleton,
        goal: GoalType,
        result: &mut ValidationResult,
    ) {
        let mut baseline: Option<f64> = None;
        for week in &mut plan.weeks {
            if week.phase.is_cutback() {
                continue;
            }
            if race_fraction_peak_exempt(week, goal) {
                result.warnings.push(format!(
                    "week {} carries the race-distance rehearsal long run and sits outside the growth limits",
                    week.week_number
                ));
                baseline = Some(week.planned_distance_km);
                continue;
            }
            if let Some(prev) = baseline {
                let ceiling = prev * (1.0 + self.limits.max_weekly_growth);
                if week.planned_distance_km > ceiling + ROUNDING_SLACK_KM && prev > 0.0 {
                    let original = week.planned_distance_km;
                    scale_week(week, ceiling / original);
                    result.corrections.push(correction(
                        CorrectionType::WeeklyGrowthClamped,
                        week.week_number,
                        original,
                        week.planned_distance_km,
                        format!(
                            "weekly volume grew more than {:.0}% over the prior week",
                            self.limits.max_weekly_growth * 100.0
                        ),
                    ));
                }
            }
            baseline = Some(week.planned_distance_km);
        }
    }

    /// Check 3: clamp the long run to its configured share of weekly volume,
    /// redistributing the excess to an easy day. The race-fraction peak week
    /// is exempt, same as check 2.
    fn check_long_run_share(
        &self,
        plan: &mut PlanSkeleton,
        goal: GoalType,
        result: &mut ValidationResult,
    ) {
        for week in &mut plan.weeks {
            if race_fraction_peak_exempt(week, goal) {
                continue;
            }
            let Some(long_slot) = week
                .days
                .iter()
                .position(|d| d.workout_type == WorkoutType::LongRun)
            else {
                continue;
            };
            let Some(long_km) = week.days[long_slot].distance_km else {
                continue;
            };
            let cap = week.planned_distance_km * self.limits.max_long_run_share;
            if long_km <= cap + ROUNDING_SLACK_KM {
                continue;
            }

            let corrected = round_half(cap);
            let excess = long_km - corrected;
            week.days[long_slot].distance_km = Some(corrected);
            push_excess_to_easy_day(week, excess, corrected);
            recompute_planned(week);
            result.corrections.push(correction(
                CorrectionType::LongRunShareClamped,
                week.week_number,
                long_km,
                corrected,
                format!(
                    "long run above {:.0}% of weekly volume",
                    self.limits.max_long_run_share * 100.0
                ),
            ));
        }
    }

    /// Check 4: insert missing recovery weeks on the expected cadence,
    /// scaling days down and demoting high-intensity days to moderate
    fn check_recovery_cadence(
        &self,
        plan: &mut PlanSkeleton,
        goal: GoalType,
        result: &mut ValidationResult,
    ) {
        let cadence = self.limits.recovery_week_cadence.max(2);
        let total = plan.weeks.len();
        let taper_len = (goal.taper_weeks() as usize).min(total.saturating_sub(1));
        let build_len = total - taper_len;

        let mut position = cadence;
        while position < build_len {
            let neighborhood_has_recovery = plan.weeks
                [position.saturating_sub(2)..(position + 1).min(build_len)]
                .iter()
                .any(|w| w.phase == Phase::Recovery);
            let week = &mut plan.weeks[position - 1];
            if !neighborhood_has_recovery && week.phase != Phase::Peak {
                let original = week.planned_distance_km;
                scale_week(week, 0.8);
                week.phase = Phase::Recovery;
                for day in &mut week.days {
                    if day.intensity == Intensity::High && day.workout_type != WorkoutType::Race {
                        day.intensity = Intensity::Moderate;
                    }
                }
                result.corrections.push(correction(
                    CorrectionType::RecoveryWeekInserted,
                    week.week_number,
                    original,
                    week.planned_distance_km,
                    format!("no recovery week within {cadence} build weeks"),
                ));
            }
            position += cadence;
        }
    }

    /// Check 5: force a goal-specific taper length and a strictly-decreasing
    /// shape at the plan's tail (race-day distance excluded from the
    /// comparison so a race week never counts as a volume increase)
    fn check_taper_shape(
        &self,
        plan: &mut PlanSkeleton,
        goal: GoalType,
        result: &mut ValidationResult,
    ) {
        let total = plan.weeks.len();
        let taper_len = (goal.taper_weeks() as usize).min(total.saturating_sub(1));
        if taper_len == 0 || total == 0 {
            return;
        }
        let taper_start = total - taper_len;

        for week in &mut plan.weeks[taper_start..] {
            if week.phase != Phase::Taper {
                week.phase = Phase::Taper;
                result.corrections.push(correction(
                    CorrectionType::TaperReshaped,
                    week.week_number,
                    week.planned_distance_km,
                    week.planned_distance_km,
                    format!("final {taper_len} weeks of a {goal} plan must taper"),
                ));
            }
        }

        let mut prev = comparable_km(&plan.weeks[taper_start - 1]);
        for index in taper_start..total {
            let week = &mut plan.weeks[index];
            let current = comparable_km(week);
            if current + ROUNDING_SLACK_KM >= prev && prev > 0.0 {
                let original = week.planned_distance_km;
                let target = prev * 0.85;
                scale_non_race_days(week, target / current.max(0.1));
                result.corrections.push(correction(
                    CorrectionType::TaperReshaped,
                    week.week_number,
                    original,
                    week.planned_distance_km,
                    "taper weeks must strictly decrease".into(),
                ));
            }
            prev = comparable_km(&plan.weeks[index]);
        }
    }

    /// Check 6: cap hard-workout count per week, protect tempo/interval
    /// sessions, break up consecutive hard days, and restore the weekly rest day
    fn check_intensity_limits(&self, plan: &mut PlanSkeleton, result: &mut ValidationResult) {
        for week in &mut plan.weeks {
            let max_hard = self.limits.max_hard_days_per_week;
            let hard_count = week.hard_day_count();
            if hard_count > max_hard {
                let mut to_demote = hard_count - max_hard;
                // Demote unprotected sessions first, then intervals from the
                // end of the week; tempo holds on the longest
                for protected_pass in [false, true] {
                    if to_demote == 0 {
                        break;
                    }
                    for day in week.days.iter_mut().rev() {
                        if to_demote == 0 {
                            break;
                        }
                        if day.intensity != Intensity::High
                            || day.workout_type == WorkoutType::Race
                        {
                            continue;
                        }
                        let protected = matches!(
                            day.workout_type,
                            WorkoutType::Tempo | WorkoutType::Intervals
                        );
                        if protected == protected_pass
                            && (!protected || day.workout_type == WorkoutType::Intervals)
                        {
                            day.intensity = Intensity::Moderate;
                            to_demote -= 1;
                        }
                    }
                    // Final fallback demotes tempo too
                    if protected_pass && to_demote > 0 {
                        for day in week.days.iter_mut().rev() {
                            if to_demote == 0 {
                                break;
                            }
                            if day.intensity == Intensity::High
                                && day.workout_type != WorkoutType::Race
                            {
                                day.intensity = Intensity::Moderate;
                                to_demote -= 1;
                            }
                        }
                    }
                }
                result.corrections.push(correction(
                    CorrectionType::HardDayDemoted,
                    week.week_number,
                    hard_count as f64,
                    week.hard_day_count() as f64,
                    format!("more than {max_hard} high-intensity days in one week"),
                ));
            }

            // No two consecutive high-intensity days
            for slot in 0..6 {
                if week.days[slot].intensity == Intensity::High
                    && week.days[slot + 1].intensity == Intensity::High
                {
                    let demote = if week.days[slot + 1].workout_type == WorkoutType::Race {
                        slot
                    } else {
                        slot + 1
                    };
                    week.days[demote].intensity = Intensity::Moderate;
                    result.corrections.push(correction(
                        CorrectionType::HardDayDemoted,
                        week.week_number,
                        2.0,
                        1.0,
                        "two consecutive high-intensity days".into(),
                    ));
                }
            }

            if week.rest_day_count() < self.limits.min_rest_days_per_week {
                // Convert the shortest easy-type day to rest
                if let Some(slot) = shortest_fillable_slot(week) {
                    let km = week.days[slot].distance_or_zero();
                    week.days[slot] = SkeletonDay::rest(week.days[slot].date);
                    recompute_planned(week);
                    result.corrections.push(correction(
                        CorrectionType::RestDayInserted,
                        week.week_number,
                        km,
                        0.0,
                        "every week needs at least one full rest day".into(),
                    ));
                }
            }
        }
    }

    /// Check 8: raise the peak long run to the goal's race-distance
    /// percentage target if under-shot, adjusting that week's total and
    /// re-checking the long-run share against the new total
    fn check_peak_long_run(
        &self,
        plan: &mut PlanSkeleton,
        goal: GoalType,
        result: &mut ValidationResult,
    ) {
        if !goal.requires_race_fraction_long_run() {
            return;
        }
        let Some(race_km) = goal.race_distance_km() else { return };
        let target = race_km * self.limits.peak_long_run_race_fraction;

        let peak_long = plan
            .weeks
            .iter()
            .filter(|w| w.phase != Phase::Taper)
            .filter_map(SkeletonWeek::long_run_km)
            .fold(0.0, f64::max);
        if peak_long + ROUNDING_SLACK_KM >= target {
            return;
        }

        // Raise the pre-taper peak week's long run; the week total rises by
        // the same delta so the share invariant keeps holding
        let Some(peak_index) = plan.weeks.iter().rposition(|w| w.phase == Phase::Peak) else {
            return;
        };
        let week = &mut plan.weeks[peak_index];
        let Some(day) = week
            .days
            .iter_mut()
            .find(|d| d.workout_type == WorkoutType::LongRun)
        else {
            return;
        };
        let original = day.distance_or_zero();
        day.distance_km = Some(round_half(target));
        recompute_planned(week);
        result.corrections.push(correction(
            CorrectionType::PeakLongRunRaised,
            week.week_number,
            original,
            target,
            format!(
                "peak long run must reach {:.0}% of {goal} race distance before taper",
                self.limits.peak_long_run_race_fraction * 100.0
            ),
        ));
    }

    /// Check 9: re-apply the week-over-week long-run growth cap, excluding
    /// recovery/taper weeks from the comparison baseline. The race-fraction
    /// peak week is exempt so check 8's raise survives repeated passes. The
    /// clamped excess moves onto an easy day so the week total is unchanged
    /// and the totals check 2 already approved stay valid.
    fn check_long_run_growth(
        &self,
        plan: &mut PlanSkeleton,
        goal: GoalType,
        result: &mut ValidationResult,
    ) {
        let mut baseline: Option<f64> = None;
        for week in &mut plan.weeks {
            if week.phase.is_cutback() {
                continue;
            }
            let Some(slot) = week
                .days
                .iter()
                .position(|d| d.workout_type == WorkoutType::LongRun)
            else {
                continue;
            };
            let Some(long_km) = week.days[slot].distance_km else { continue };

            let exempt = race_fraction_peak_exempt(week, goal);
            if let Some(prev) = baseline {
                let ceiling = prev * (1.0 + self.limits.max_long_run_growth);
                if long_km > ceiling + ROUNDING_SLACK_KM && prev > 0.0 && !exempt {
                    let corrected = round_half(ceiling);
                    week.days[slot].distance_km = Some(corrected);
                    push_excess_to_easy_day(week, long_km - corrected, corrected);
                    enforce_long_run_hierarchy(
                        week,
                        corrected,
                        self.limits.non_long_run_ceiling_factor,
                        result,
                    );
                    recompute_planned(week);
                    result.corrections.push(correction(
                        CorrectionType::LongRunGrowthClamped,
                        week.week_number,
                        long_km,
                        corrected,
                        format!(
                            "long run grew more than {:.0}% over the prior week",
                            self.limits.max_long_run_growth * 100.0
                        ),
                    ));
                }
            }
            baseline = week.days[slot].distance_km;
        }
    }

    /// Race-distance-relative ceiling for any single scheduled run
    fn day_cap_km(&self, goal: GoalType) -> f64 {
        goal.race_distance_km().map_or(self.limits.fallback_day_cap_km, |race| {
            (race * goal.long_run_cap_fraction()).max(race) * 1.05
        })
    }
}

/// The peak week of a goal whose long run must reach a race-distance
/// fraction sits outside the proportional checks; the raise in check 8 takes
/// precedence and must survive repeated passes unchanged
fn race_fraction_peak_exempt(week: &SkeletonWeek, goal: GoalType) -> bool {
    week.phase == Phase::Peak && goal.requires_race_fraction_long_run()
}

/// Check 7: residual errors for implausibly short timelines or implausibly
/// low starting volume. Errors never block the corrected plan from being
/// returned.
fn check_plausibility(plan: &PlanSkeleton, goal: GoalType, result: &mut ValidationResult) {
    let total = plan.weeks.len() as u32;
    if total < goal.min_plan_weeks() {
        result.errors.push(format!(
            "{total} weeks is below the {}-week minimum for a {goal} plan",
            goal.min_plan_weeks()
        ));
    }
    if let Some(first) = plan.weeks.first() {
        let floor = goal.peak_weekly_km() * realism::IMPLAUSIBLE_BASELINE_FRACTION;
        if first.planned_distance_km < floor {
            result.errors.push(format!(
                "starting volume of {:.1} km/week is implausibly low for a {goal} goal",
                first.planned_distance_km
            ));
        }
    }
}

fn correction(
    correction_type: CorrectionType,
    week_number: u32,
    original: f64,
    corrected: f64,
    reason: String,
) -> CorrectionAction {
    CorrectionAction {
        correction_type,
        week_number,
        original_value: round_tenth(original),
        corrected_value: round_tenth(corrected),
        reason,
    }
}

/// Cap every non-long, non-race day against the week's long run: back-to-back
/// days stay under 65% of it, everything else stays strictly below it
fn enforce_long_run_hierarchy(
    week: &mut SkeletonWeek,
    long_km: f64,
    ceiling_factor: f64,
    result: &mut ValidationResult,
) {
    for day in &mut week.days {
        let Some(km) = day.distance_km else { continue };
        if matches!(day.workout_type, WorkoutType::LongRun | WorkoutType::Race) {
            continue;
        }
        if day.is_back_to_back {
            let cap = long_km * long_run::BACK_TO_BACK_FACTOR;
            if km > cap + ROUNDING_SLACK_KM {
                day.distance_km = Some(round_half(cap));
                result.corrections.push(correction(
                    CorrectionType::LongRunHierarchyRestored,
                    week.week_number,
                    km,
                    cap,
                    "back-to-back day above 65% of the long run".into(),
                ));
            }
        } else if km >= long_km {
            let target = long_km * ceiling_factor;
            day.distance_km = Some(round_half(target));
            result.corrections.push(correction(
                CorrectionType::LongRunHierarchyRestored,
                week.week_number,
                km,
                target,
                "non-long-run day met or exceeded the week's long run".into(),
            ));
        }
    }
}

/// Move shed long-run distance onto the largest easy day, keeping that day
/// under the corrected long run; whatever does not fit is simply shed
fn push_excess_to_easy_day(week: &mut SkeletonWeek, excess: f64, long_km: f64) {
    let Some(easy) = week
        .days
        .iter_mut()
        .filter(|d| d.workout_type == WorkoutType::Easy && d.distance_km.is_some())
        .max_by(|a, b| {
            a.distance_or_zero()
                .partial_cmp(&b.distance_or_zero())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    else {
        return;
    };
    let current = easy.distance_or_zero();
    let headroom = (long_km - 1.0 - current).max(0.0);
    easy.distance_km = Some(round_half(current + excess.min(headroom)));
}

/// Week volume with race-day distance excluded
fn comparable_km(week: &SkeletonWeek) -> f64 {
    week.planned_distance_km
        - week
            .days
            .iter()
            .filter(|d| d.workout_type == WorkoutType::Race)
            .map(SkeletonDay::distance_or_zero)
            .sum::<f64>()
}

fn recompute_planned(week: &mut SkeletonWeek) {
    week.planned_distance_km = round_tenth(week.total_day_distance_km());
}

fn scale_week(week: &mut SkeletonWeek, factor: f64) {
    scale_non_race_days(week, factor);
}

fn scale_non_race_days(week: &mut SkeletonWeek, factor: f64) {
    for day in &mut week.days {
        if day.workout_type == WorkoutType::Race {
            continue;
        }
        if let Some(km) = day.distance_km {
            day.distance_km = Some(round_half(km * factor));
        }
    }
    recompute_planned(week);
}

fn shortest_fillable_slot(week: &SkeletonWeek) -> Option<usize> {
    week.days
        .iter()
        .enumerate()
        .filter(|(_, d)| {
            matches!(
                d.workout_type,
                WorkoutType::Easy | WorkoutType::Recovery | WorkoutType::CrossTraining
            )
        })
        .min_by(|(_, a), (_, b)| {
            a.distance_or_zero()
                .partial_cmp(&b.distance_or_zero())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(slot, _)| slot)
}

fn round_half(km: f64) -> f64 {
    (km * 2.0).round() / 2.0
}

fn round_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}
