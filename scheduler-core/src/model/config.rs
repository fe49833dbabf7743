use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::ShiftType;

use super::employee::Employee;

/// A forced `(date, employee, shift)` assignment. The day builder applies
/// pins before any other logic and never re-validates them — the caller is
/// responsible for pin consistency, which `generate_schedule` checks once
/// up front (spec §4.3 step 1, §8 Scenario D).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    pub date: NaiveDate,
    pub employee: String,
    pub shift: ShiftType,
}

/// Streak state carried over from the end of the previous month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarryOver {
    pub employee: String,
    pub consecutive_working: u32,
    pub consecutive_off: u32,
    pub last_shift: Option<ShiftType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub month: u32,
    pub year: i32,
    pub seed: u64,
    pub employees: Vec<Employee>,
    pub pins: Vec<Pin>,
    pub carry_over: Vec<CarryOver>,
    /// Informational only; the core never interprets time zones.
    pub timezone: String,
}

impl Config {
    pub fn employee(&self, name: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.name == name)
    }

    pub fn carry_over_for(&self, name: &str) -> Option<&CarryOver> {
        self.carry_over.iter().find(|c| c.employee == name)
    }

    pub fn pins_for(&self, date: NaiveDate) -> impl Iterator<Item = &Pin> {
        self.pins.iter().filter(move |p| p.date == date)
    }
}
