//! Pass 4.4.4: for each `FLEXIBLE` non-`duty_only` employee, break up every
//! off-run of length >= 4 (spec §4.4.4). Primary mechanism is a two-point
//! swap that pairs an isolated off-day elsewhere with one of its working
//! neighbours, so the over-long run shrinks while no off-day is lost and a
//! previously-isolated off-day gets a companion; the fallback converts the
//! trimmed day alone and leaves the resulting surplus for the second
//! `target_adjustment_pass` to absorb.

use std::collections::HashMap;

use shared::{ScheduleType, ShiftType};

use crate::model::{Employee, Schedule};

use super::common;

/// The first off-run (`!is_working()`) longer than `cap`, as a half-open
/// `[start, end)` index range.
fn find_long_off_run(seq: &[ShiftType], cap: usize) -> Option<(usize, usize)> {
    let mut i = 0;
    while i < seq.len() {
        if seq[i].is_working() {
            i += 1;
            continue;
        }
        let start = i;
        while i < seq.len() && !seq[i].is_working() {
            i += 1;
        }
        if i - start > cap {
            return Some((start, i));
        }
    }
    None
}

fn find_pairing(
    schedule: &Schedule,
    e: &Employee,
    name: &str,
    seq: &[ShiftType],
    run: (usize, usize),
) -> Option<usize> {
    common::isolated_off_indices(seq)
        .into_iter()
        .filter(|&iso_i| iso_i < run.0 || iso_i >= run.1)
        .find_map(|iso_i| {
            [iso_i.checked_sub(1), iso_i.checked_add(1)]
                .into_iter()
                .flatten()
                .filter(|&nb_i| nb_i < seq.len() && seq[nb_i].is_working())
                .find(|&nb_i| {
                    !common::is_pinned(schedule, schedule.days[nb_i].date, name)
                        && common::keeps_streak_caps(e, seq, nb_i, ShiftType::DayOff)
                        && common::respects_rest_rules(seq, nb_i, ShiftType::DayOff)
                })
        })
}

pub fn run(schedule: &mut Schedule, employees: &HashMap<String, Employee>) {
    let names: Vec<String> = employees.keys().cloned().collect();
    for name in names {
        let e = employees.get(&name).unwrap();
        if e.duty_only() || e.schedule_type != ScheduleType::Flexible {
            continue;
        }
        loop {
            let seq = common::shift_sequence(schedule, &name);
            let Some(run) = find_long_off_run(&seq, e.max_co() as usize) else {
                break;
            };

            let trim_idx = (run.0..run.1).find(|&i| {
                let date = schedule.days[i].date;
                seq[i] == ShiftType::DayOff
                    && !common::is_pinned(schedule, date, &name)
                    && common::is_available(e, date)
                    && common::keeps_streak_caps(e, &seq, i, ShiftType::Workday)
                    && common::respects_rest_rules(&seq, i, ShiftType::Workday)
            });
            let Some(trim_idx) = trim_idx else { break };
            let pairing = find_pairing(schedule, e, &name, &seq, run);

            common::write_shift(schedule, &name, trim_idx, ShiftType::Workday);
            if let Some(nb_i) = pairing {
                common::write_shift(schedule, &name, nb_i, ShiftType::DayOff);
            }
        }
    }
}
