//! Pass 4.4.5 (run three times in the fixed pipeline, spec §4.4): eliminate
//! isolated single-day-off slots — a `DayOff` with a working shift on both
//! sides — greedily, in a loop until no progress.
//!
//! Primary path (`extend + compensate`): free a working neighbour of the
//! isolated day into `DayOff`, and pay for it by converting a different
//! off-day elsewhere for the same employee into `Workday`, so the total
//! off-day count never changes. Fallback (`FLEXIBLE` only, when no
//! compensation exists): convert the isolated day itself to `Workday`, then
//! pair up a *different* isolated off-day by freeing one of its neighbours
//! — net zero change to total working days, two isolations resolved.

use std::collections::HashMap;

use shared::{ScheduleType, ShiftType};

use crate::calendar;
use crate::model::{Employee, Schedule};

use super::common;

fn find_extend(schedule: &Schedule, e: &Employee, name: &str, seq: &[ShiftType], isolated_idx: usize) -> Option<usize> {
    [isolated_idx.checked_sub(1), isolated_idx.checked_add(1)]
        .into_iter()
        .flatten()
        .filter(|&idx| idx < seq.len() && seq[idx].is_working())
        .find(|&idx| {
            !common::is_pinned(schedule, schedule.days[idx].date, name)
                && common::keeps_streak_caps(e, seq, idx, ShiftType::DayOff)
                && common::respects_rest_rules(seq, idx, ShiftType::DayOff)
        })
}

/// Another off-day, not in `exclude`, that can absorb the work the extend
/// step gave up: not pinned, a production business day unless `e` is
/// `FLEXIBLE`, keeps the work-streak cap, and creates no new isolated
/// off-day among its neighbours.
fn find_compensation(
    schedule: &Schedule,
    e: &Employee,
    name: &str,
    seq: &[ShiftType],
    exclude: &[usize],
) -> Option<usize> {
    (0..seq.len()).find(|&i| {
        if exclude.contains(&i) || seq[i] != ShiftType::DayOff {
            return false;
        }
        let date = schedule.days[i].date;
        if common::is_pinned(schedule, date, name) {
            return false;
        }
        if e.schedule_type != ScheduleType::Flexible && calendar::is_production_off_day(date, &schedule.holidays) {
            return false;
        }
        if !common::keeps_streak_caps(e, seq, i, ShiftType::Workday) {
            return false;
        }
        let mut probe = seq.to_vec();
        probe[i] = ShiftType::Workday;
        let left_clear = i == 0 || !common::is_isolated_off(&probe, i - 1);
        let right_clear = i + 1 >= probe.len() || !common::is_isolated_off(&probe, i + 1);
        left_clear && right_clear
    })
}

fn try_primary(schedule: &mut Schedule, e: &Employee, name: &str, seq: &[ShiftType], isolated_idx: usize) -> bool {
    let Some(extend_idx) = find_extend(schedule, e, name, seq, isolated_idx) else {
        return false;
    };
    let Some(comp_i) = find_compensation(schedule, e, name, seq, &[isolated_idx, extend_idx]) else {
        return false;
    };
    common::write_shift(schedule, name, extend_idx, ShiftType::DayOff);
    common::write_shift(schedule, name, comp_i, ShiftType::Workday);
    true
}

fn try_fallback(schedule: &mut Schedule, e: &Employee, name: &str, seq: &[ShiftType], isolated_idx: usize) -> bool {
    let date = schedule.days[isolated_idx].date;
    if common::is_pinned(schedule, date, name)
        || !common::keeps_streak_caps(e, seq, isolated_idx, ShiftType::Workday)
        || !common::respects_rest_rules(seq, isolated_idx, ShiftType::Workday)
    {
        return false;
    }
    let mut probe = seq.to_vec();
    probe[isolated_idx] = ShiftType::Workday;

    let pairing = common::isolated_off_indices(&probe).into_iter().find_map(|target_i| {
        [target_i.checked_sub(1), target_i.checked_add(1)]
            .into_iter()
            .flatten()
            .filter(|&nb_i| nb_i < probe.len() && probe[nb_i].is_working())
            .find(|&nb_i| {
                !common::is_pinned(schedule, schedule.days[nb_i].date, name)
                    && common::keeps_streak_caps(e, &probe, nb_i, ShiftType::DayOff)
                    && common::respects_rest_rules(&probe, nb_i, ShiftType::DayOff)
            })
    });
    let Some(nb_i) = pairing else { return false };

    common::write_shift(schedule, name, isolated_idx, ShiftType::Workday);
    common::write_shift(schedule, name, nb_i, ShiftType::DayOff);
    true
}

pub fn run(schedule: &mut Schedule, employees: &HashMap<String, Employee>) {
    let names: Vec<String> = employees.keys().cloned().collect();
    for name in names {
        let e = employees.get(&name).unwrap();
        loop {
            let seq = common::shift_sequence(schedule, &name);
            let isolated = common::isolated_off_indices(&seq);
            if isolated.is_empty() {
                break;
            }
            let progressed = isolated.into_iter().any(|isolated_idx| {
                try_primary(schedule, e, &name, &seq, isolated_idx)
                    || (e.schedule_type == ScheduleType::Flexible
                        && try_fallback(schedule, e, &name, &seq, isolated_idx))
            });
            if !progressed {
                break;
            }
        }
    }
}
