// ABOUTME: Stage 4 schedule template builder: one repeating 7-slot weekly workout template
// ABOUTME: Places quality away from the long run and recovery after hard sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Weekly schedule template
//!
//! Pure mapping from preferences to a repeating 7-slot template of workout
//! types, Monday first. The assembler stamps dates and distances on top of it
//! per week.

use chrono::Weekday;

use crate::models::WorkoutType;

/// A repeating weekly template, Monday at index 0
pub type WeekTemplate = [WorkoutType; 7];

/// Monday-first slot index of a weekday
#[must_use]
pub fn slot_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

/// Build the repeating weekly template
///
/// All 7 slots start as rest; chosen days become easy runs; the long-run day
/// is marked (when long runs are requested); quality sessions are placed on
/// run days that are neither the long-run day nor the day before it; the day
/// after any quality or long session downgrades from easy to recovery.
#[must_use]
pub fn build_week_template(
    days_per_week: u8,
    preferred_days: &[Weekday],
    long_run_day: Weekday,
    include_speedwork: bool,
    include_long_runs: bool,
) -> WeekTemplate {
    // Cap at 6 so every week keeps at least one full rest day
    let days_per_week = usize::from(days_per_week.clamp(1, 6));
    let mut template: WeekTemplate = [WorkoutType::Rest; 7];

    let run_slots = choose_run_slots(days_per_week, preferred_days, long_run_day);
    for &slot in &run_slots {
        template[slot] = WorkoutType::Easy;
    }

    let long_slot = slot_index(long_run_day);
    if include_long_runs {
        template[long_slot] = WorkoutType::LongRun;
    }

    if include_speedwork {
        place_quality_sessions(&mut template, &run_slots, long_slot, days_per_week);
    }

    // Recovery slot after any hard session
    for slot in 0..7 {
        let next = (slot + 1) % 7;
        if template[slot].is_hard() && template[next] == WorkoutType::Easy {
            template[next] = WorkoutType::Recovery;
        }
    }

    template
}

/// Pick the run-day slots: preferred days first, then a default rotation to
/// fill up to the requested frequency
fn choose_run_slots(
    days_per_week: usize,
    preferred_days: &[Weekday],
    long_run_day: Weekday,
) -> Vec<usize> {
    let mut slots: Vec<usize> = Vec::with_capacity(days_per_week);

    // The long-run day always counts as one of the run days
    let long_slot = slot_index(long_run_day);
    slots.push(long_slot);

    for day in preferred_days {
        let slot = slot_index(*day);
        if !slots.contains(&slot) && slots.len() < days_per_week {
            slots.push(slot);
        }
    }

    // Spread any remaining days across the week, preferring alternation
    let default_order = [1usize, 3, 5, 0, 2, 4, 6];
    for slot in default_order {
        if slots.len() >= days_per_week {
            break;
        }
        if !slots.contains(&slot) {
            slots.push(slot);
        }
    }

    slots.sort_unstable();
    slots
}

/// Place 1 quality slot (2 when running more than 4 days a week) on run days
/// that are neither the long-run day nor the day before it
fn place_quality_sessions(
    template: &mut WeekTemplate,
    run_slots: &[usize],
    long_slot: usize,
    days_per_week: usize,
) {
    let quality_count = if days_per_week > 4 { 2 } else { 1 };
    let day_before_long = (long_slot + 6) % 7;

    let mut placed = 0usize;
    let mut last_quality: Option<usize> = None;
    for &slot in run_slots {
        if placed == quality_count {
            break;
        }
        if slot == long_slot || slot == day_before_long {
            continue;
        }
        if template[slot] != WorkoutType::Easy {
            continue;
        }
        // Keep two quality days from landing back to back
        if let Some(prev) = last_quality {
            if slot == (prev + 1) % 7 {
                continue;
            }
        }
        template[slot] = if placed == 0 {
            WorkoutType::Tempo
        } else {
            WorkoutType::Intervals
        };
        last_quality = Some(slot);
        placed += 1;
    }
}
