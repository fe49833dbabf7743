pub mod day;

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use shared::{City, RosterError, RosterResult, ShiftType};

use crate::calendar;
use crate::eligibility::{MAX_BACKTRACK_ATTEMPTS, MAX_BACKTRACK_DAYS};
use crate::model::{Config, DaySchedule, Employee, EmployeeState};
use crate::rng;

/// Validate the roster meets the minimum coverage precondition from
/// spec §6.1: at least 4 MOSCOW duty employees (one morning-capable, one
/// evening-capable) and at least 2 KHABAROVSK duty employees.
pub fn validate_roster(employees: &[Employee]) -> RosterResult<()> {
    let moscow_duty: Vec<&Employee> = employees
        .iter()
        .filter(|e| e.city == City::Moscow && e.on_duty)
        .collect();
    let khabarovsk_duty_count = employees
        .iter()
        .filter(|e| e.city == City::Khabarovsk && e.on_duty)
        .count();

    if moscow_duty.len() < 4 {
        return Err(RosterError::InvalidRoster(format!(
            "need at least 4 MOSCOW duty employees, found {}",
            moscow_duty.len()
        )));
    }
    if !moscow_duty.iter().any(|e| !e.evening_only) {
        return Err(RosterError::InvalidRoster(
            "no morning-capable MOSCOW duty employee".into(),
        ));
    }
    if !moscow_duty.iter().any(|e| !e.morning_only) {
        return Err(RosterError::InvalidRoster(
            "no evening-capable MOSCOW duty employee".into(),
        ));
    }
    if khabarovsk_duty_count < 2 {
        return Err(RosterError::InvalidRoster(format!(
            "need at least 2 KHABAROVSK duty employees, found {khabarovsk_duty_count}"
        )));
    }
    Ok(())
}

/// Validate pins are internally consistent (spec §7, §8 Scenario D):
/// the employee exists, the shift is compatible with their city, it does
/// not collide with a vacation/unavailability, and no employee has two
/// pins on the same date.
pub fn validate_pins(config: &Config, holidays: &HashSet<NaiveDate>) -> RosterResult<()> {
    let employees: HashMap<&str, &Employee> =
        config.employees.iter().map(|e| (e.name.as_str(), e)).collect();

    let mut seen: HashSet<(NaiveDate, String)> = HashSet::new();
    for pin in &config.pins {
        let Some(employee) = employees.get(pin.employee.as_str()) else {
            return Err(RosterError::InvalidPin {
                employee: pin.employee.clone(),
                date: pin.date,
                reason: "unknown employee".into(),
            });
        };
        if !seen.insert((pin.date, pin.employee.clone())) {
            return Err(RosterError::InvalidPin {
                employee: pin.employee.clone(),
                date: pin.date,
                reason: "duplicate pin for the same employee and date".into(),
            });
        }
        match pin.shift.mandatory_city() {
            Some(city) if city != employee.city => {
                return Err(RosterError::InvalidPin {
                    employee: pin.employee.clone(),
                    date: pin.date,
                    reason: format!(
                        "{:?} is a {city:?}-only shift but {} is based in {:?}",
                        pin.shift, pin.employee, employee.city
                    ),
                });
            }
            _ => {}
        }
        if employee.is_on_vacation(pin.date) && pin.shift != ShiftType::Vacation {
            return Err(RosterError::InvalidPin {
                employee: pin.employee.clone(),
                date: pin.date,
                reason: "employee is on vacation that date".into(),
            });
        }
    }
    let _ = holidays;
    Ok(())
}

fn build_initial_states(config: &Config, holidays: &HashSet<NaiveDate>) -> HashMap<String, EmployeeState> {
    let production_days = calendar::production_days_in_month(config.year, config.month, holidays);
    config
        .employees
        .iter()
        .map(|e| {
            let st = EmployeeState::from_carry_over(e, production_days, holidays, config.carry_over_for(&e.name));
            (e.name.clone(), st)
        })
        .collect()
}

/// The single primary core operation (spec §6.1): a pure function of
/// `(Config, holidays)` that produces a fully covered `Schedule`, or fails
/// with `InvalidRoster`, `InvalidPin`, or `ScheduleInfeasible`.
#[tracing::instrument(skip(config, holidays), fields(month = config.month, year = config.year, seed = config.seed))]
pub fn generate_schedule(
    config: Config,
    holidays: HashSet<NaiveDate>,
) -> RosterResult<crate::model::Schedule> {
    validate_roster(&config.employees)?;
    validate_pins(&config, &holidays)?;

    let employees: HashMap<String, Employee> = config
        .employees
        .iter()
        .cloned()
        .map(|e| (e.name.clone(), e))
        .collect();

    let days = calendar::days_in_month(config.year, config.month);
    let total_days = days.len();

    let mut states = build_initial_states(&config, &holidays);
    let mut built: Vec<DaySchedule> = Vec::new();
    let mut snapshots: Vec<HashMap<String, EmployeeState>> = Vec::new();
    let mut rng = rng::seeded_rng(config.seed);
    let mut attempts: u32 = 0;
    let mut day_idx = 0usize;

    while day_idx < total_days {
        snapshots.push(states.clone());
        let next_day_is_holiday = days
            .get(day_idx + 1)
            .map(|d| calendar::is_holiday(*d, &holidays))
            .unwrap_or(false);
        let remaining_days = (total_days - day_idx) as u32;

        match day::build_day(
            days[day_idx],
            next_day_is_holiday,
            remaining_days,
            &holidays,
            &employees,
            &states,
            &config,
            &mut rng,
        ) {
            Ok(day_schedule) => {
                for e in employees.values() {
                    if let Some(shift) = day_schedule.shift_of(&e.name) {
                        states.get_mut(&e.name).unwrap().record(shift);
                    }
                }
                built.push(day_schedule);
                day_idx += 1;
            }
            Err(insufficient) => {
                attempts += 1;
                tracing::warn!(
                    date = %insufficient.date,
                    shift = ?insufficient.shift,
                    attempts,
                    "insufficient coverage, backtracking"
                );
                if attempts > MAX_BACKTRACK_ATTEMPTS {
                    return Err(RosterError::from(insufficient));
                }
                let k = MAX_BACKTRACK_DAYS.min(day_idx);
                day_idx -= k;
                states = snapshots[day_idx].clone();
                built.truncate(day_idx);
                snapshots.truncate(day_idx);
                rng = rng::seeded_rng(rng::backtrack_seed(config.seed, attempts, day_idx));
            }
        }
    }

    let mut schedule = crate::model::Schedule {
        config,
        holidays,
        days: built,
    };
    crate::postprocess::run_pipeline(&mut schedule, &employees);
    Ok(schedule)
}
