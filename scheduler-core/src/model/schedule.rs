use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::config::Config;

/// One day's worth of assignments. `morning`/`evening`/`night` are spec'd
/// as name-lists that must hold exactly one entry once the day is built
/// (invariant `is_covered`, spec §3).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub is_holiday: bool,
    pub morning: Vec<String>,
    pub evening: Vec<String>,
    pub night: Vec<String>,
    pub workday: Vec<String>,
    pub day_off: Vec<String>,
    pub vacation: Vec<String>,
}

impl DaySchedule {
    pub fn new(date: NaiveDate, is_holiday: bool) -> Self {
        Self {
            date,
            is_holiday,
            ..Default::default()
        }
    }

    pub fn is_covered(&self) -> bool {
        self.morning.len() == 1 && self.evening.len() == 1 && self.night.len() == 1
    }

    /// The shift a given employee currently holds on this day, if any.
    pub fn shift_of(&self, name: &str) -> Option<shared::ShiftType> {
        use shared::ShiftType::*;
        if self.morning.iter().any(|n| n == name) {
            Some(Morning)
        } else if self.evening.iter().any(|n| n == name) {
            Some(Evening)
        } else if self.night.iter().any(|n| n == name) {
            Some(Night)
        } else if self.workday.iter().any(|n| n == name) {
            Some(Workday)
        } else if self.day_off.iter().any(|n| n == name) {
            Some(DayOff)
        } else if self.vacation.iter().any(|n| n == name) {
            Some(Vacation)
        } else {
            None
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.morning.retain(|n| n != name);
        self.evening.retain(|n| n != name);
        self.night.retain(|n| n != name);
        self.workday.retain(|n| n != name);
        self.day_off.retain(|n| n != name);
        self.vacation.retain(|n| n != name);
    }

    pub fn set(&mut self, name: &str, shift: shared::ShiftType) {
        self.remove(name);
        let list = match shift {
            shared::ShiftType::Morning => &mut self.morning,
            shared::ShiftType::Evening => &mut self.evening,
            shared::ShiftType::Night => &mut self.night,
            shared::ShiftType::Workday => &mut self.workday,
            shared::ShiftType::DayOff => &mut self.day_off,
            shared::ShiftType::Vacation => &mut self.vacation,
        };
        list.push(name.to_string());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub config: Config,
    pub holidays: HashSet<NaiveDate>,
    pub days: Vec<DaySchedule>,
}

impl Schedule {
    pub fn day(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> Option<&mut DaySchedule> {
        self.days.iter_mut().find(|d| d.date == date)
    }

    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|d| d.date == date)
    }
}
