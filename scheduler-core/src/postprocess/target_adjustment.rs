//! Pass 4.4.3 (run twice, before and after trimming long off-blocks): nudge
//! each employee's `Workday`/`DayOff` split so their actual working-day
//! count converges on `EmployeeState::effective_target` (spec §4.4.3).
//!
//! Only plain `Workday` cells are touched; duty shifts are never
//! reassigned here; duty-only employees are left alone since they have no
//! `Workday` slot to adjust.

use std::collections::HashMap;

use shared::{ScheduleType, ShiftType};

use crate::calendar;
use crate::model::{Employee, EmployeeState, Schedule};

use super::common;

fn effective_target(schedule: &Schedule, e: &Employee) -> u32 {
    let production_days =
        calendar::production_days_in_month(schedule.config.year, schedule.config.month, &schedule.holidays);
    EmployeeState::new(e, production_days, &schedule.holidays).effective_target()
}

/// Surplus side: walk from the end of the month backwards, converting a
/// `Workday` to `DayOff` when the day is not a holiday, not pinned, the
/// resulting off-streak stays within `max_co`, and — for `FLEXIBLE`
/// full-time employees — neither adjacent work run is left shorter than
/// `MIN_WORK_BETWEEN_OFFS`.
fn shed_surplus(schedule: &mut Schedule, e: &Employee, name: &str, target: u32) {
    loop {
        let seq = common::shift_sequence(schedule, name);
        if common::total_working(&seq) <= target {
            break;
        }
        let slot = (0..seq.len()).rev().find(|&i| {
            let date = schedule.days[i].date;
            seq[i] == ShiftType::Workday
                && !schedule.days[i].is_holiday
                && !common::is_pinned(schedule, date, name)
                && common::keeps_streak_caps(e, &seq, i, ShiftType::DayOff)
                && common::respects_rest_rules(&seq, i, ShiftType::DayOff)
                && (e.schedule_type != ScheduleType::Flexible
                    || !common::would_leave_short_work_fragment(&seq, i))
        });
        match slot {
            Some(i) => common::write_shift(schedule, name, i, ShiftType::DayOff),
            None => break,
        }
    }
}

/// Deficit side: walk forward from day 1, converting a `DayOff` to
/// `Workday` when the resulting work-streak stays within `max_cw`, the day
/// is not pinned, and — for non-`FLEXIBLE` (`FiveTwo`) employees — the day
/// is a production business day. `FLEXIBLE` employees prefer their
/// isolated off-days first so the conversion also relieves isolation.
fn fill_deficit(schedule: &mut Schedule, e: &Employee, name: &str, target: u32) {
    loop {
        let seq = common::shift_sequence(schedule, name);
        if common::total_working(&seq) >= target {
            break;
        }
        let legal = |i: usize| -> bool {
            let date = schedule.days[i].date;
            seq[i] == ShiftType::DayOff
                && !common::is_pinned(schedule, date, name)
                && common::keeps_streak_caps(e, &seq, i, ShiftType::Workday)
                && common::respects_rest_rules(&seq, i, ShiftType::Workday)
                && (e.schedule_type == ScheduleType::Flexible
                    || !calendar::is_production_off_day(date, &schedule.holidays))
        };
        let isolated: std::collections::HashSet<usize> =
            common::isolated_off_indices(&seq).into_iter().collect();
        let slot = if e.schedule_type == ScheduleType::Flexible {
            (0..seq.len())
                .find(|&i| isolated.contains(&i) && legal(i))
                .or_else(|| (0..seq.len()).find(|&i| legal(i)))
        } else {
            (0..seq.len()).find(|&i| legal(i))
        };
        match slot {
            Some(i) => common::write_shift(schedule, name, i, ShiftType::Workday),
            None => break,
        }
    }
}

pub fn run(schedule: &mut Schedule, employees: &HashMap<String, Employee>) {
    let names: Vec<String> = employees.keys().cloned().collect();
    for name in names {
        let e = employees.get(&name).unwrap();
        if e.duty_only() {
            continue;
        }
        let target = effective_target(schedule, e);
        let seq = common::shift_sequence(schedule, &name);
        if common::total_working(&seq) > target {
            shed_surplus(schedule, e, &name, target);
        } else {
            fill_deficit(schedule, e, &name, target);
        }
    }
}
