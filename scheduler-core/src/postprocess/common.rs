//! Shared helpers for every post-processing pass: reading/writing an
//! employee's shift sequence for the month, streak arithmetic, and the
//! propose -> simulate -> accept-or-reject primitive each pass is built on
//! (spec §9 "single source of truth", grounded in the pack's swap-then-
//! validate-then-rollback pattern).

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use shared::ShiftType;

use crate::calendar;
use crate::eligibility;
use crate::model::{DaySchedule, Employee, Schedule};

pub fn is_pinned(schedule: &Schedule, date: NaiveDate, name: &str) -> bool {
    schedule
        .config
        .pins
        .iter()
        .any(|p| p.date == date && p.employee == name)
}

pub fn shift_sequence(schedule: &Schedule, name: &str) -> Vec<ShiftType> {
    schedule
        .days
        .iter()
        .map(|d| d.shift_of(name).unwrap_or(ShiftType::DayOff))
        .collect()
}

pub fn write_shift(schedule: &mut Schedule, name: &str, idx: usize, shift: ShiftType) {
    schedule.days[idx].set(name, shift);
}

/// Length of the contiguous working/off run that passes through `idx`,
/// as it would be if `seq[idx]` were `new_shift`.
pub fn run_length_if(seq: &[ShiftType], idx: usize, new_shift: ShiftType) -> u32 {
    let mut probe = seq.to_vec();
    probe[idx] = new_shift;
    let working = new_shift.is_working();
    let mut count = 1u32;
    let mut i = idx;
    while i > 0 && probe[i - 1].is_working() == working {
        count += 1;
        i -= 1;
    }
    let mut j = idx;
    while j + 1 < probe.len() && probe[j + 1].is_working() == working {
        count += 1;
        j += 1;
    }
    count
}

/// Whether converting `seq[idx]` to `new_shift` keeps both the working-run
/// cap (`max_cw_postprocess`) and the off-run cap (`max_co`) satisfied.
pub fn keeps_streak_caps(e: &Employee, seq: &[ShiftType], idx: usize, new_shift: ShiftType) -> bool {
    let run = run_length_if(seq, idx, new_shift);
    if new_shift.is_working() {
        run <= eligibility::max_cw_postprocess(e)
    } else {
        run <= eligibility::max_co(e)
    }
}

pub fn is_isolated_off(seq: &[ShiftType], idx: usize) -> bool {
    if seq[idx].is_working() {
        return false;
    }
    let has_left = idx > 0;
    let has_right = idx + 1 < seq.len();
    if !has_left && !has_right {
        return false;
    }
    let left_ok = !has_left || seq[idx - 1].is_working();
    let right_ok = !has_right || seq[idx + 1].is_working();
    left_ok && right_ok
}

pub fn isolated_off_indices(seq: &[ShiftType]) -> Vec<usize> {
    (0..seq.len()).filter(|&i| is_isolated_off(seq, i)).collect()
}

pub fn total_working(seq: &[ShiftType]) -> u32 {
    seq.iter().filter(|s| s.is_working()).count() as u32
}

/// Whether turning the working day at `idx` into `DayOff` would leave a
/// work fragment shorter than `MIN_WORK_BETWEEN_OFFS` immediately before or
/// after it (spec §4.4.3's "no creation of sub-3-day work fragments").
pub fn would_leave_short_work_fragment(seq: &[ShiftType], idx: usize) -> bool {
    let mut left = 0u32;
    let mut i = idx;
    while i > 0 && seq[i - 1].is_working() {
        left += 1;
        i -= 1;
    }
    let mut right = 0u32;
    let mut j = idx;
    while j + 1 < seq.len() && seq[j + 1].is_working() {
        right += 1;
        j += 1;
    }
    (left > 0 && left < eligibility::MIN_WORK_BETWEEN_OFFS)
        || (right > 0 && right < eligibility::MIN_WORK_BETWEEN_OFFS)
}

pub fn is_weekend_or_holiday(schedule: &Schedule, idx: usize) -> bool {
    let day = &schedule.days[idx];
    day.is_holiday || calendar::is_weekend(day.date)
}

/// Whether `e` is allowed to hold `shift` at all (ignoring availability and
/// streak caps) given their morning/evening restriction.
pub fn shift_compatible(e: &Employee, shift: ShiftType) -> bool {
    match shift {
        ShiftType::Morning => !e.evening_only,
        ShiftType::Evening => !e.morning_only,
        _ => true,
    }
}

/// Whether `e` is free to be scheduled at all on `date`: not on vacation,
/// not marked unavailable, and not one of their fixed weekly days off
/// (the same checks `eligibility::can_work` makes for the greedy phase,
/// minus the streak-cap check which every pass already applies via
/// `keeps_streak_caps`).
pub fn is_available(e: &Employee, date: NaiveDate) -> bool {
    !e.is_on_vacation(date) && !e.is_unavailable(date) && !e.days_off_weekly.contains(&date.weekday())
}

/// Whether giving `e` one more `shift` would still respect their
/// `max_morning_shifts`/`max_evening_shifts`/`max_night_shifts` cap, judged
/// against their count over `seq` (the sequence *before* the swap).
pub fn under_shift_cap(e: &Employee, seq: &[ShiftType], shift: ShiftType) -> bool {
    let cap = match shift {
        ShiftType::Morning => e.max_morning_shifts,
        ShiftType::Evening => e.max_evening_shifts,
        ShiftType::Night => e.max_night_shifts,
        _ => None,
    };
    match cap {
        Some(cap) => seq.iter().filter(|&&s| s == shift).count() < cap as usize,
        None => true,
    }
}

/// The rest rules from spec §4.1: a day after `Evening` may only be
/// `Evening` or `DayOff`; a day after `Night` must be `DayOff` (or
/// `Vacation`). Checked in both directions around `idx`.
pub fn respects_rest_rules(seq: &[ShiftType], idx: usize, new_shift: ShiftType) -> bool {
    if idx > 0 {
        match seq[idx - 1] {
            ShiftType::Evening if !matches!(new_shift, ShiftType::Evening | ShiftType::DayOff) => {
                return false;
            }
            ShiftType::Night if !matches!(new_shift, ShiftType::DayOff | ShiftType::Vacation) => {
                return false;
            }
            _ => {}
        }
    }
    if idx + 1 < seq.len() {
        match new_shift {
            ShiftType::Evening if matches!(seq[idx + 1], ShiftType::Morning | ShiftType::Workday) => {
                return false;
            }
            ShiftType::Night if !matches!(seq[idx + 1], ShiftType::DayOff | ShiftType::Vacation) => {
                return false;
            }
            _ => {}
        }
    }
    true
}

/// Whether putting `name` into `shift` on `day` would collide with another
/// member of their `group` already working a duty shift that day (spec
/// invariant: no two members of the same group share a duty day).
pub fn group_conflict(
    day: &DaySchedule,
    employees: &HashMap<String, Employee>,
    name: &str,
    shift: ShiftType,
) -> bool {
    if !shift.is_duty_shift() {
        return false;
    }
    let Some(group) = employees.get(name).and_then(|e| e.group.as_ref()) else {
        return false;
    };
    [&day.morning, &day.evening, &day.night]
        .iter()
        .any(|list| {
            list.iter().any(|n| {
                n != name
                    && employees
                        .get(n)
                        .and_then(|e| e.group.as_ref())
                        == Some(group)
            })
        })
}
