//! A reusable invariant checker for finished schedules, built from the
//! universal properties every roster must satisfy (spec §8). Exposed to
//! callers (not gated on `#[cfg(test)]`) so integration tests, and callers
//! embedding this engine, can assert on the same checks.

use std::collections::HashMap;

use shared::ShiftType;

use crate::eligibility;
use crate::model::{Employee, Schedule};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation(pub String);

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check every universal invariant from spec §8 against a finished
/// schedule. Returns every violation found, rather than stopping at the
/// first one, so a failing test shows the whole picture.
pub fn check_schedule_invariants(schedule: &Schedule) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let employees: HashMap<String, Employee> = schedule
        .config
        .employees
        .iter()
        .cloned()
        .map(|e| (e.name.clone(), e))
        .collect();

    for day in &schedule.days {
        if !day.is_covered() {
            violations.push(InvariantViolation(format!(
                "{}: duty coverage incomplete (morning={}, evening={}, night={})",
                day.date,
                day.morning.len(),
                day.evening.len(),
                day.night.len()
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for name in day
            .morning
            .iter()
            .chain(&day.evening)
            .chain(&day.night)
            .chain(&day.workday)
            .chain(&day.day_off)
            .chain(&day.vacation)
        {
            if !seen.insert(name) {
                violations.push(InvariantViolation(format!(
                    "{}: {name} appears more than once",
                    day.date
                )));
            }
        }
        for name in &day.morning {
            if let Some(e) = employees.get(name) {
                if e.evening_only {
                    violations.push(InvariantViolation(format!(
                        "{}: evening_only {name} assigned MORNING",
                        day.date
                    )));
                }
            }
        }
        for name in &day.evening {
            if let Some(e) = employees.get(name) {
                if e.morning_only {
                    violations.push(InvariantViolation(format!(
                        "{}: morning_only {name} assigned EVENING",
                        day.date
                    )));
                }
            }
        }
        for name in day.morning.iter().chain(&day.evening) {
            if let Some(e) = employees.get(name) {
                if e.city != shared::City::Moscow {
                    violations.push(InvariantViolation(format!(
                        "{}: non-MOSCOW {name} holds a MOSCOW-only duty shift",
                        day.date
                    )));
                }
            }
        }
        for name in &day.night {
            if let Some(e) = employees.get(name) {
                if e.city != shared::City::Khabarovsk {
                    violations.push(InvariantViolation(format!(
                        "{}: non-KHABAROVSK {name} holds NIGHT",
                        day.date
                    )));
                }
            }
        }

        for group_list in [&day.morning, &day.evening, &day.night] {
            let mut seen_groups = std::collections::HashSet::new();
            for name in group_list {
                if let Some(group) = employees.get(name).and_then(|e| e.group.as_ref()) {
                    if !seen_groups.insert(group) {
                        violations.push(InvariantViolation(format!(
                            "{}: two employees from group {group} share a duty shift",
                            day.date
                        )));
                    }
                }
            }
        }
    }

    for e in employees.values() {
        let seq: Vec<ShiftType> = schedule
            .days
            .iter()
            .map(|d| d.shift_of(&e.name).unwrap_or(ShiftType::DayOff))
            .collect();

        for (i, date) in schedule.days.iter().map(|d| d.date).enumerate() {
            if e.is_on_vacation(date) && seq[i] != ShiftType::Vacation {
                violations.push(InvariantViolation(format!(
                    "{date}: {} should be on VACATION but holds {:?}",
                    e.name, seq[i]
                )));
            }
            if i > 0 {
                match seq[i - 1] {
                    ShiftType::Evening if !matches!(seq[i], ShiftType::Evening | ShiftType::DayOff) => {
                        violations.push(InvariantViolation(format!(
                            "{date}: {} works {:?} the day after EVENING",
                            e.name, seq[i]
                        )));
                    }
                    ShiftType::Night if !matches!(seq[i], ShiftType::DayOff | ShiftType::Vacation) => {
                        violations.push(InvariantViolation(format!(
                            "{date}: {} works {:?} the day after NIGHT",
                            e.name, seq[i]
                        )));
                    }
                    _ => {}
                }
            }
        }

        let cap = eligibility::max_cw_postprocess(e);
        let mut run = 0u32;
        for s in &seq {
            if s.is_working() {
                run += 1;
                if run > cap {
                    violations.push(InvariantViolation(format!(
                        "{}: working streak exceeds {cap}",
                        e.name
                    )));
                }
            } else {
                run = 0;
            }
        }
        let off_cap = eligibility::max_co(e);
        let mut off_run = 0u32;
        for s in &seq {
            if !s.is_working() {
                off_run += 1;
                if off_run > off_cap {
                    violations.push(InvariantViolation(format!(
                        "{}: off-day streak exceeds {off_cap}",
                        e.name
                    )));
                }
            } else {
                off_run = 0;
            }
        }
    }

    violations
}

/// Panics with every violation listed if `schedule` is not fully legal.
/// Intended for test code.
pub fn assert_schedule_invariants(schedule: &Schedule) {
    let violations = check_schedule_invariants(schedule);
    assert!(
        violations.is_empty(),
        "schedule invariant violations:\n{}",
        violations
            .iter()
            .map(|v| v.0.clone())
            .collect::<Vec<_>>()
            .join("\n")
    );
}
