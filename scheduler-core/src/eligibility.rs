//! Pure eligibility predicates over `(Employee, EmployeeState, date, holidays)`,
//! shared by the greedy day builder and every post-processing pass so there
//! is a single source of truth for what counts as a legal assignment
//! (spec §4.1, §9 "single source of truth").

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use shared::ShiftType;

use crate::calendar;
use crate::model::{Employee, EmployeeState};

pub const MIN_WORK_BETWEEN_OFFS: u32 = 3;
pub const MAX_BACKTRACK_DAYS: usize = 3;
pub const MAX_BACKTRACK_ATTEMPTS: u32 = 10;

/// Whether `e` may be assigned any working shift on `date` at all, ignoring
/// which specific shift it would be.
pub fn can_work(
    e: &Employee,
    st: &EmployeeState,
    date: NaiveDate,
    holidays: &HashSet<NaiveDate>,
) -> bool {
    if e.is_on_vacation(date) || e.is_unavailable(date) {
        return false;
    }
    if st.consecutive_working >= e.max_cw_greedy() {
        return false;
    }
    if matches!(e.schedule_type, shared::ScheduleType::FiveTwo)
        && calendar::is_production_off_day(date, holidays)
    {
        return false;
    }
    if e.days_off_weekly.contains(&date.weekday()) {
        return false;
    }
    true
}

pub fn resting_after_evening(st: &EmployeeState) -> bool {
    st.last_shift == Some(ShiftType::Evening)
}

pub fn resting_after_night(st: &EmployeeState) -> bool {
    st.last_shift == Some(ShiftType::Night)
}

pub fn max_cw(e: &Employee) -> u32 {
    e.max_cw_greedy()
}

pub fn max_cw_postprocess(e: &Employee) -> u32 {
    e.max_cw_postprocess()
}

pub fn max_co(e: &Employee) -> u32 {
    e.max_co()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Employee;
    use shared::{City, ScheduleType};

    fn employee() -> Employee {
        Employee::new("a", City::Moscow, ScheduleType::Flexible, true, false, false, false, 100).unwrap()
    }

    #[test]
    fn cannot_work_past_consecutive_cap() {
        let e = employee();
        let mut st = EmployeeState::new(&e, 20, &HashSet::new());
        st.consecutive_working = e.max_cw_greedy();
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert!(!can_work(&e, &st, date, &HashSet::new()));
    }

    #[test]
    fn five_two_blocked_on_weekend() {
        let e = Employee::new("b", City::Moscow, ScheduleType::FiveTwo, false, false, false, false, 100).unwrap();
        let st = EmployeeState::new(&e, 20, &HashSet::new());
        let saturday = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
        assert!(!can_work(&e, &st, saturday, &HashSet::new()));
    }

    #[test]
    fn resting_after_evening_and_night() {
        let e = employee();
        let mut st = EmployeeState::new(&e, 20, &HashSet::new());
        st.last_shift = Some(ShiftType::Evening);
        assert!(resting_after_evening(&st));
        assert!(!resting_after_night(&st));
        st.last_shift = Some(ShiftType::Night);
        assert!(resting_after_night(&st));
        assert!(!resting_after_evening(&st));
    }
}
