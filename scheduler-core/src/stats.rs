//! Per-employee summary statistics derived from a finished [`Schedule`],
//! the kind of thing a caller typically wants alongside the roster itself
//! (grounded on the teacher's habit of pairing a domain result with a
//! statistics DTO).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Schedule, ShiftCounts};

/// Shift-type counts and streak extremes for one employee over the month.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EmployeeStats {
    pub total_working: u32,
    pub counts: ShiftCountsView,
    pub isolated_off_days: u32,
    pub longest_working_streak: u32,
    pub longest_off_streak: u32,
}

/// A serializable mirror of [`ShiftCounts`] (which intentionally has no
/// `Serialize` impl of its own, since it is a pure runtime counter).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShiftCountsView {
    pub morning: u32,
    pub evening: u32,
    pub night: u32,
    pub workday: u32,
}

impl From<ShiftCounts> for ShiftCountsView {
    fn from(c: ShiftCounts) -> Self {
        Self {
            morning: c.morning,
            evening: c.evening,
            night: c.night,
            workday: c.workday,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RosterStats {
    pub employees: HashMap<String, EmployeeStats>,
}

fn longest_run(seq: &[shared::ShiftType], working: bool) -> u32 {
    let mut best = 0u32;
    let mut current = 0u32;
    for s in seq {
        if s.is_working() == working {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

impl RosterStats {
    pub fn compute(schedule: &Schedule) -> Self {
        let mut employees = HashMap::new();
        for e in &schedule.config.employees {
            let seq: Vec<shared::ShiftType> = schedule
                .days
                .iter()
                .map(|d| d.shift_of(&e.name).unwrap_or(shared::ShiftType::DayOff))
                .collect();

            let mut counts = ShiftCountsView::default();
            for s in &seq {
                match s {
                    shared::ShiftType::Morning => counts.morning += 1,
                    shared::ShiftType::Evening => counts.evening += 1,
                    shared::ShiftType::Night => counts.night += 1,
                    shared::ShiftType::Workday => counts.workday += 1,
                    _ => {}
                }
            }

            let stats = EmployeeStats {
                total_working: seq.iter().filter(|s| s.is_working()).count() as u32,
                counts,
                isolated_off_days: isolated_off_count(&seq),
                longest_working_streak: longest_run(&seq, true),
                longest_off_streak: longest_run(&seq, false),
            };
            employees.insert(e.name.clone(), stats);
        }
        Self { employees }
    }
}

fn isolated_off_count(seq: &[shared::ShiftType]) -> u32 {
    (0..seq.len())
        .filter(|&i| {
            if seq[i].is_working() {
                return false;
            }
            let left_ok = i == 0 || seq[i - 1].is_working();
            let right_ok = i + 1 == seq.len() || seq[i + 1].is_working();
            (i > 0 || i + 1 < seq.len()) && left_ok && right_ok
        })
        .count() as u32
}
