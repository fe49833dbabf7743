use std::collections::HashSet;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use shared::{City, RosterError, RosterResult, ScheduleType, ShiftType};

/// An inclusive vacation range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VacationRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl VacationRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn business_days(&self, holidays: &HashSet<NaiveDate>) -> u32 {
        let mut count = 0;
        let mut d = self.start;
        while d <= self.end {
            if !crate::calendar::is_production_off_day(d, holidays) {
                count += 1;
            }
            d = d.succ_opt().unwrap();
        }
        count
    }
}

/// An employee's immutable profile for the month being scheduled.
///
/// Construction is validated: `Employee::new` is the only way to build one,
/// and it enforces the invariants from spec §3 (mutually exclusive shift
/// restrictions, `always_on_duty` implies MOSCOW, every duty employee
/// compatible with at least one mandatory shift).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub city: City,
    pub schedule_type: ScheduleType,
    pub on_duty: bool,
    pub always_on_duty: bool,
    pub morning_only: bool,
    pub evening_only: bool,
    pub vacations: Vec<VacationRange>,
    pub unavailable_dates: HashSet<NaiveDate>,
    pub max_morning_shifts: Option<u32>,
    pub max_evening_shifts: Option<u32>,
    pub max_night_shifts: Option<u32>,
    pub preferred_shift: Option<ShiftType>,
    pub workload_pct: u8,
    pub days_off_weekly: HashSet<Weekday>,
    pub max_consecutive_working: Option<u32>,
    pub group: Option<String>,
}

impl Employee {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        city: City,
        schedule_type: ScheduleType,
        on_duty: bool,
        always_on_duty: bool,
        morning_only: bool,
        evening_only: bool,
        workload_pct: u8,
    ) -> RosterResult<Self> {
        let name = name.into();
        if morning_only && evening_only {
            return Err(RosterError::InvalidEmployee {
                name,
                reason: "morning_only and evening_only cannot both be true".into(),
            });
        }
        if always_on_duty && city != City::Moscow {
            return Err(RosterError::InvalidEmployee {
                name,
                reason: "always_on_duty requires city = Moscow".into(),
            });
        }
        if !(1..=100).contains(&workload_pct) {
            return Err(RosterError::InvalidEmployee {
                name,
                reason: format!("workload_pct {workload_pct} out of range [1,100]"),
            });
        }
        let employee = Self {
            name,
            city,
            schedule_type,
            on_duty,
            always_on_duty,
            morning_only,
            evening_only,
            vacations: Vec::new(),
            unavailable_dates: HashSet::new(),
            max_morning_shifts: None,
            max_evening_shifts: None,
            max_night_shifts: None,
            preferred_shift: None,
            workload_pct,
            days_off_weekly: HashSet::new(),
            max_consecutive_working: None,
            group: None,
        };
        employee.check_duty_compatibility()?;
        Ok(employee)
    }

    fn check_duty_compatibility(&self) -> RosterResult<()> {
        if !self.on_duty {
            return Ok(());
        }
        let compatible = match self.city {
            City::Moscow => true, // Morning and/or Evening always cover morning_only/evening_only/neither
            City::Khabarovsk => !self.morning_only && !self.evening_only,
        };
        if !compatible {
            return Err(RosterError::InvalidEmployee {
                name: self.name.clone(),
                reason: "duty employee is not compatible with any mandatory shift for their city"
                    .into(),
            });
        }
        Ok(())
    }

    /// `duty_only` per spec glossary: a duty employee who never works a
    /// plain `Workday`.
    pub fn duty_only(&self) -> bool {
        self.on_duty && (self.morning_only || self.evening_only || self.always_on_duty)
    }

    pub fn is_on_vacation(&self, date: NaiveDate) -> bool {
        self.vacations.iter().any(|v| v.contains(date))
    }

    pub fn is_unavailable(&self, date: NaiveDate) -> bool {
        self.unavailable_dates.contains(&date)
    }

    pub fn max_cw_greedy(&self) -> u32 {
        self.max_consecutive_working.unwrap_or(5).min(5)
    }

    pub fn max_cw_postprocess(&self) -> u32 {
        if self.schedule_type == ScheduleType::Flexible && self.on_duty && !self.duty_only() {
            6
        } else {
            5
        }
    }

    pub fn max_co(&self) -> u32 {
        3
    }

    pub fn vacation_business_days(&self, holidays: &HashSet<NaiveDate>) -> u32 {
        self.vacations
            .iter()
            .map(|v| v.business_days(holidays))
            .sum()
    }
}
