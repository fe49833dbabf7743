//! Pass 4.4.6: break the `Evening -> isolated DayOff -> work` idiom by
//! swapping the evening duty itself away from the affected employee A,
//! rather than touching the rest day in isolation.
//!
//! For each occurrence, find another MOSCOW duty employee B who on the same
//! day is not off and is evening-capable; B takes the evening, A takes B's
//! former shift. Freed from the evening-rest obligation, A's rest day can
//! then convert back to `Workday`, which is what actually resolves the
//! isolation (the swap alone never changes it, since both `Evening` and
//! `Morning`/`Workday` count as "working" for isolation purposes). Accepted
//! only if A's isolated-off count strictly drops and B's stays within 2
//! (spec §4.4.6, thresholds left to implementer discretion per spec §9).

use std::collections::HashMap;

use shared::{City, ShiftType};

use crate::model::{Employee, Schedule};

use super::common;

fn isolated_count(seq: &[ShiftType]) -> usize {
    common::isolated_off_indices(seq).len()
}

fn try_swap(schedule: &mut Schedule, employees: &HashMap<String, Employee>, name: &str, e: &Employee, i: usize) -> bool {
    let seq = common::shift_sequence(schedule, name);
    let date = schedule.days[i].date;
    let off_idx = i + 1;

    let candidates: Vec<String> = employees
        .values()
        .filter(|b| b.name != name && b.on_duty && b.city == City::Moscow && !b.morning_only)
        .map(|b| b.name.clone())
        .collect();

    for b_name in candidates {
        let b = employees.get(&b_name).unwrap();
        let b_seq = common::shift_sequence(schedule, &b_name);
        let b_shift = b_seq[i];
        if !matches!(b_shift, ShiftType::Morning | ShiftType::Workday) {
            continue;
        }
        if common::is_pinned(schedule, date, name) || common::is_pinned(schedule, date, &b_name) {
            continue;
        }
        if !common::keeps_streak_caps(e, &seq, i, b_shift) || !common::respects_rest_rules(&seq, i, b_shift) {
            continue;
        }
        if !common::keeps_streak_caps(b, &b_seq, i, ShiftType::Evening)
            || !common::respects_rest_rules(&b_seq, i, ShiftType::Evening)
        {
            continue;
        }
        if common::group_conflict(&schedule.days[i], employees, &b_name, ShiftType::Evening)
            || common::group_conflict(&schedule.days[i], employees, name, b_shift)
        {
            continue;
        }

        let mut a_after = seq.clone();
        a_after[i] = b_shift;
        let off_date = schedule.days[off_idx].date;
        if common::is_pinned(schedule, off_date, name)
            || !common::keeps_streak_caps(e, &a_after, off_idx, ShiftType::Workday)
            || !common::respects_rest_rules(&a_after, off_idx, ShiftType::Workday)
        {
            continue;
        }
        a_after[off_idx] = ShiftType::Workday;

        let mut b_after = b_seq.clone();
        b_after[i] = ShiftType::Evening;
        if isolated_count(&b_after) > 2 {
            continue;
        }
        if isolated_count(&a_after) >= isolated_count(&seq) {
            continue;
        }

        common::write_shift(schedule, name, i, b_shift);
        common::write_shift(schedule, &b_name, i, ShiftType::Evening);
        common::write_shift(schedule, name, off_idx, ShiftType::Workday);
        return true;
    }
    false
}

pub fn run(schedule: &mut Schedule, employees: &HashMap<String, Employee>) {
    let names: Vec<String> = employees.keys().cloned().collect();
    for name in names {
        let e = employees.get(&name).unwrap();
        loop {
            let seq = common::shift_sequence(schedule, &name);
            let pattern = (0..seq.len().saturating_sub(2)).find(|&i| {
                seq[i] == ShiftType::Evening
                    && seq[i + 1] == ShiftType::DayOff
                    && common::is_isolated_off(&seq, i + 1)
                    && seq[i + 2] == ShiftType::Workday
            });
            let Some(i) = pattern else { break };
            if !try_swap(schedule, employees, &name, e, i) {
                break;
            }
        }
    }
}
