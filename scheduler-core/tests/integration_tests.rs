use std::collections::HashSet;

use scheduler_core::{generate_schedule, Config, Employee, Pin, RosterError, ScheduleType, ShiftType};
use shared::City;

fn base_roster() -> Vec<Employee> {
    vec![
        Employee::new("moscow_morning", City::Moscow, ScheduleType::Flexible, true, false, true, false, 100)
            .unwrap(),
        Employee::new("moscow_evening", City::Moscow, ScheduleType::Flexible, true, false, false, true, 100)
            .unwrap(),
        Employee::new("moscow_swing_a", City::Moscow, ScheduleType::Flexible, true, false, false, false, 100)
            .unwrap(),
        Employee::new("moscow_swing_b", City::Moscow, ScheduleType::Flexible, true, false, false, false, 100)
            .unwrap(),
        Employee::new("khabarovsk_a", City::Khabarovsk, ScheduleType::Flexible, true, false, false, false, 100)
            .unwrap(),
        Employee::new("khabarovsk_b", City::Khabarovsk, ScheduleType::Flexible, true, false, false, false, 100)
            .unwrap(),
    ]
}

fn config(employees: Vec<Employee>, pins: Vec<Pin>) -> Config {
    Config {
        month: 1,
        year: 2026,
        seed: 42,
        employees,
        pins,
        carry_over: vec![],
        timezone: "Europe/Moscow".into(),
    }
}

/// Scenario A: a minimal valid roster covers every day of the month.
#[test]
fn minimal_roster_is_feasible() {
    let cfg = config(base_roster(), vec![]);
    let schedule = generate_schedule(cfg, HashSet::new()).expect("schedule should be feasible");
    assert_eq!(schedule.days.len(), 31);
    for day in &schedule.days {
        assert!(day.is_covered(), "{} not fully covered", day.date);
    }
    scheduler_core::testing::assert_schedule_invariants(&schedule);
}

/// Scenario D: a pin referencing an unknown employee is rejected up front,
/// before any day is built.
#[test]
fn invalid_pin_is_rejected() {
    use chrono::NaiveDate;
    let pins = vec![Pin {
        date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        employee: "nobody".into(),
        shift: ShiftType::Morning,
    }];
    let cfg = config(base_roster(), pins);
    let err = generate_schedule(cfg, HashSet::new()).unwrap_err();
    assert!(matches!(err, RosterError::InvalidPin { .. }));
}

/// A roster missing a KHABAROVSK duty employee fails roster validation,
/// never reaching the day builder.
#[test]
fn understaffed_roster_is_rejected() {
    let mut employees = base_roster();
    employees.retain(|e| e.name != "khabarovsk_b");
    let cfg = config(employees, vec![]);
    let err = generate_schedule(cfg, HashSet::new()).unwrap_err();
    assert!(matches!(err, RosterError::InvalidRoster(_)));
}
