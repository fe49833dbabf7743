//! Pass 4.4.2: balance how many `Morning`/`Evening`/`Night` shifts each
//! duty-capable employee has accumulated, within the shift types they are
//! actually eligible for.
//!
//! Mechanism: for each duty shift kind, find the most- and least-loaded
//! eligible employee and swap one day where the over-loaded one holds that
//! shift and the under-loaded one is off, subject to the usual streak,
//! rest, restriction and group checks.

use std::collections::HashMap;

use shared::ShiftType;

use crate::model::{Employee, Schedule};

use super::common;

fn eligible_for(employees: &HashMap<String, Employee>, shift: ShiftType) -> Vec<String> {
    employees
        .values()
        .filter(|e| {
            e.on_duty
                && common::shift_compatible(e, shift)
                && match shift {
                    ShiftType::Night => e.city == shared::City::Khabarovsk,
                    ShiftType::Morning | ShiftType::Evening => e.city == shared::City::Moscow,
                    _ => false,
                }
        })
        .map(|e| e.name.clone())
        .collect()
}

fn shift_count(schedule: &Schedule, name: &str, shift: ShiftType) -> u32 {
    schedule
        .days
        .iter()
        .filter(|d| d.shift_of(name) == Some(shift))
        .count() as u32
}

fn balance_one(schedule: &mut Schedule, employees: &HashMap<String, Employee>, shift: ShiftType) {
    let pool = eligible_for(employees, shift);
    if pool.len() < 2 {
        return;
    }
    let mut guard = pool.len() * pool.len() * 4 + 16;
    loop {
        if guard == 0 {
            break;
        }
        guard -= 1;

        let mut counts: Vec<(String, u32)> = pool
            .iter()
            .map(|n| (n.clone(), shift_count(schedule, n, shift)))
            .collect();
        counts.sort_by_key(|(_, c)| *c);
        let (under_name, under_count) = counts.first().cloned().unwrap();
        let (over_name, over_count) = counts.last().cloned().unwrap();
        if over_count <= under_count + 1 || over_name == under_name {
            break;
        }

        let over_seq = common::shift_sequence(schedule, &over_name);
        let under_seq = common::shift_sequence(schedule, &under_name);
        let over = employees.get(&over_name).unwrap();
        let under = employees.get(&under_name).unwrap();

        let swap_idx = (0..schedule.days.len()).find(|&i| {
            let date = schedule.days[i].date;
            // Per spec §4.4.2 the under-loaded side of the swap is always a
            // WORKDAY, never a DayOff/Vacation cell — this also keeps the
            // pass from ever overwriting a vacation day.
            over_seq[i] == shift
                && under_seq[i] == shared::ShiftType::Workday
                && !common::is_pinned(schedule, date, &over_name)
                && !common::is_pinned(schedule, date, &under_name)
                && common::is_available(under, date)
                && common::under_shift_cap(under, &under_seq, shift)
                && common::keeps_streak_caps(under, &under_seq, i, shift)
                && common::keeps_streak_caps(over, &over_seq, i, shared::ShiftType::DayOff)
                && common::respects_rest_rules(&under_seq, i, shift)
                && common::respects_rest_rules(&over_seq, i, shared::ShiftType::DayOff)
                && !common::group_conflict(&schedule.days[i], employees, &under_name, shift)
        });

        let Some(idx) = swap_idx else { break };
        common::write_shift(schedule, &over_name, idx, shared::ShiftType::DayOff);
        common::write_shift(schedule, &under_name, idx, shift);
    }
}

pub fn run(schedule: &mut Schedule, employees: &HashMap<String, Employee>) {
    for shift in [ShiftType::Morning, ShiftType::Evening, ShiftType::Night] {
        balance_one(schedule, employees, shift);
    }
}
