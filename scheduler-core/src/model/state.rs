use shared::ShiftType;

use super::employee::Employee;
use super::config::CarryOver;

/// Per-shift counters used by fairness-ranked candidate selection
/// (spec §4.2) and by the balance passes in post-processing (spec §4.4.2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftCounts {
    pub morning: u32,
    pub evening: u32,
    pub night: u32,
    pub workday: u32,
}

impl ShiftCounts {
    pub fn get(&self, shift: ShiftType) -> u32 {
        match shift {
            ShiftType::Morning => self.morning,
            ShiftType::Evening => self.evening,
            ShiftType::Night => self.night,
            ShiftType::Workday => self.workday,
            ShiftType::DayOff | ShiftType::Vacation => 0,
        }
    }

    fn bump(&mut self, shift: ShiftType) {
        match shift {
            ShiftType::Morning => self.morning += 1,
            ShiftType::Evening => self.evening += 1,
            ShiftType::Night => self.night += 1,
            ShiftType::Workday => self.workday += 1,
            ShiftType::DayOff | ShiftType::Vacation => {}
        }
    }
}

/// Mutable running counters for one employee, owned exclusively by a
/// single `generate_schedule` invocation (spec §3, §5).
#[derive(Debug, Clone)]
pub struct EmployeeState {
    pub consecutive_working: u32,
    pub consecutive_off: u32,
    pub last_shift: Option<ShiftType>,
    pub total_working: u32,
    pub target_working_days: u32,
    pub vacation_days: u32,
    pub counts: ShiftCounts,
}

impl EmployeeState {
    /// `production_days` is the number of business days (non-weekend,
    /// non-holiday) in the month being scheduled.
    pub fn new(employee: &Employee, production_days: u32, holidays: &std::collections::HashSet<chrono::NaiveDate>) -> Self {
        let vacation_days = employee.vacation_business_days(holidays);
        let target_working_days =
            ((production_days as f64 * employee.workload_pct as f64) / 100.0).round() as u32;
        Self {
            consecutive_working: 0,
            consecutive_off: 0,
            last_shift: None,
            total_working: 0,
            target_working_days,
            vacation_days,
            counts: ShiftCounts::default(),
        }
    }

    pub fn apply_carry_over(&mut self, carry: &CarryOver) {
        self.consecutive_working = carry.consecutive_working;
        self.consecutive_off = carry.consecutive_off;
        self.last_shift = carry.last_shift;
    }

    /// Build a fresh state for `employee` and immediately fold in carry-over
    /// streak state from the end of the previous month, if any.
    pub fn from_carry_over(
        employee: &Employee,
        production_days: u32,
        holidays: &std::collections::HashSet<chrono::NaiveDate>,
        carry: Option<&CarryOver>,
    ) -> Self {
        let mut state = Self::new(employee, production_days, holidays);
        if let Some(carry) = carry {
            state.apply_carry_over(carry);
        }
        state
    }

    pub fn effective_target(&self) -> u32 {
        self.target_working_days.saturating_sub(self.vacation_days)
    }

    pub fn needs_more_work(&self, _remaining_days: u32) -> bool {
        self.total_working < self.effective_target()
    }

    pub fn record(&mut self, shift: ShiftType) {
        if shift.is_working() {
            self.total_working += 1;
            self.consecutive_working += 1;
            self.consecutive_off = 0;
            self.counts.bump(shift);
        } else {
            self.consecutive_off += 1;
            self.consecutive_working = 0;
        }
        self.last_shift = Some(shift);
    }
}
