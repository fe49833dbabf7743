use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rand::Rng;
use shared::{City, RosterError, RosterResult, ScheduleType, ShiftType};

use crate::calendar;
use crate::eligibility::{self, MIN_WORK_BETWEEN_OFFS};
use crate::model::{Config, DaySchedule, Employee, EmployeeState};
use crate::selection;

/// Internal signal from a mandatory step that could not find a candidate.
/// Always caught by the backtracking loop in `builder::mod` — it never
/// reaches a caller of `generate_schedule` (spec §4.3, §7).
#[derive(Debug, Clone)]
pub struct InsufficientCoverage {
    pub date: NaiveDate,
    pub shift: ShiftType,
    pub reason: String,
}

impl From<InsufficientCoverage> for RosterError {
    fn from(i: InsufficientCoverage) -> Self {
        RosterError::ScheduleInfeasible {
            date: i.date,
            shift: i.shift,
            reason: i.reason,
        }
    }
}

struct DayCtx<'a> {
    date: NaiveDate,
    is_holiday: bool,
    next_day_is_holiday: bool,
    holidays: &'a HashSet<NaiveDate>,
    employees: &'a HashMap<String, Employee>,
    remaining_days: u32,
}

/// Build one day's schedule following the fixed 11-step order in spec §4.3.
pub fn build_day(
    date: NaiveDate,
    next_day_is_holiday: bool,
    remaining_days: u32,
    holidays: &HashSet<NaiveDate>,
    employees: &HashMap<String, Employee>,
    states: &HashMap<String, EmployeeState>,
    config: &Config,
    rng: &mut impl Rng,
) -> Result<DaySchedule, InsufficientCoverage> {
    let ctx = DayCtx {
        date,
        is_holiday: calendar::is_holiday(date, holidays),
        next_day_is_holiday,
        holidays,
        employees,
        remaining_days,
    };

    let mut day = DaySchedule::new(date, ctx.is_holiday);

    // Step 1: pins.
    for pin in config.pins_for(date) {
        day.set(&pin.employee, pin.shift);
    }

    let assigned_today = |day: &DaySchedule, name: &str| day.shift_of(name).is_some();

    // Step 2: always-on-duty placement (MOSCOW). Restricted employees are
    // force-assigned immediately; unrestricted ones are recorded so steps
    // 4/5 can prioritise them.
    let mut priority_unrestricted: HashSet<String> = HashSet::new();
    for e in employees.values() {
        if !e.always_on_duty || assigned_today(&day, &e.name) {
            continue;
        }
        let st = &states[&e.name];
        if !eligibility::can_work(e, st, date, holidays) {
            continue;
        }
        if e.morning_only && day.morning.is_empty() {
            day.set(&e.name, ShiftType::Morning);
        } else if e.evening_only && day.evening.is_empty() {
            day.set(&e.name, ShiftType::Evening);
        } else if !e.morning_only && !e.evening_only {
            priority_unrestricted.insert(e.name.clone());
        }
    }

    let group_used = |day: &DaySchedule, employees: &HashMap<String, Employee>, group: &Option<String>| -> bool {
        let Some(g) = group else { return false };
        [&day.morning, &day.evening, &day.night, &day.workday]
            .iter()
            .any(|list| {
                list.iter()
                    .any(|n| employees.get(n).and_then(|e| e.group.as_ref()) == Some(g))
            })
    };

    // Step 3: NIGHT (KHABAROVSK).
    let night_pool: Vec<&Employee> = employees
        .values()
        .filter(|e| {
            e.city == City::Khabarovsk
                && e.on_duty
                && !assigned_today(&day, &e.name)
                && eligibility::can_work(e, &states[&e.name], date, holidays)
                && !eligibility::resting_after_evening(&states[&e.name])
                && !eligibility::resting_after_night(&states[&e.name])
                && e.max_night_shifts
                    .map(|cap| states[&e.name].counts.night < cap)
                    .unwrap_or(true)
                && !group_used(&day, employees, &e.group)
        })
        .collect();
    if night_pool.is_empty() {
        return Err(InsufficientCoverage {
            date,
            shift: ShiftType::Night,
            reason: "no eligible KHABAROVSK duty employee for NIGHT".into(),
        });
    }
    let chosen = selection::select_for_mandatory(
        &night_pool,
        states,
        ShiftType::Night,
        remaining_days,
        1,
        rng,
    );
    for name in &chosen {
        day.set(name, ShiftType::Night);
    }

    // Step 4: MORNING (MOSCOW).
    let morning_pool: Vec<&Employee> = employees
        .values()
        .filter(|e| {
            e.city == City::Moscow
                && e.on_duty
                && !e.evening_only
                && !assigned_today(&day, &e.name)
                && eligibility::can_work(e, &states[&e.name], date, holidays)
                && !eligibility::resting_after_evening(&states[&e.name])
                && !eligibility::resting_after_night(&states[&e.name])
                && e.max_morning_shifts
                    .map(|cap| states[&e.name].counts.morning < cap)
                    .unwrap_or(true)
                && !group_used(&day, employees, &e.group)
        })
        .collect();
    if morning_pool.is_empty() {
        return Err(InsufficientCoverage {
            date,
            shift: ShiftType::Morning,
            reason: "no eligible MOSCOW duty employee for MORNING".into(),
        });
    }
    let priority_pool: Vec<&Employee> = morning_pool
        .iter()
        .copied()
        .filter(|e| priority_unrestricted.contains(&e.name))
        .collect();
    let morning_only_in_pool: Vec<&Employee> =
        morning_pool.iter().copied().filter(|e| e.morning_only).collect();
    let evening_capable_outside: bool = employees
        .values()
        .filter(|e| e.city == City::Moscow && e.on_duty && !e.morning_only)
        .any(|e| !morning_pool.iter().any(|m| m.name == e.name));

    let chosen_morning = if !priority_pool.is_empty() {
        selection::select_fair(&priority_pool, states, ShiftType::Morning, 1, rng)
    } else if !morning_only_in_pool.is_empty() && evening_capable_outside {
        selection::select_for_mandatory(
            &morning_only_in_pool,
            states,
            ShiftType::Morning,
            remaining_days,
            1,
            rng,
        )
    } else {
        selection::select_for_mandatory(
            &morning_pool,
            states,
            ShiftType::Morning,
            remaining_days,
            1,
            rng,
        )
    };
    for name in &chosen_morning {
        day.set(name, ShiftType::Morning);
    }

    // Step 5: EVENING (MOSCOW).
    let evening_pool: Vec<&Employee> = employees
        .values()
        .filter(|e| {
            e.city == City::Moscow
                && e.on_duty
                && !e.morning_only
                && !assigned_today(&day, &e.name)
                && eligibility::can_work(e, &states[&e.name], date, holidays)
                && !eligibility::resting_after_night(&states[&e.name])
                && e.max_evening_shifts
                    .map(|cap| states[&e.name].counts.evening < cap)
                    .unwrap_or(true)
                && !group_used(&day, employees, &e.group)
        })
        .collect();
    if evening_pool.is_empty() {
        return Err(InsufficientCoverage {
            date,
            shift: ShiftType::Evening,
            reason: "no eligible MOSCOW duty employee for EVENING".into(),
        });
    }
    let resting_pool: Vec<&Employee> = evening_pool
        .iter()
        .copied()
        .filter(|e| eligibility::resting_after_evening(&states[&e.name]))
        .collect();
    let flexible_streak_pool: Vec<&Employee> = evening_pool
        .iter()
        .copied()
        .filter(|e| {
            e.schedule_type == ScheduleType::Flexible
                && states[&e.name].consecutive_working >= MIN_WORK_BETWEEN_OFFS - 1
        })
        .collect();
    let chosen_evening = if !resting_pool.is_empty() {
        selection::select_fair(&resting_pool, states, ShiftType::Evening, 1, rng)
    } else if !flexible_streak_pool.is_empty() {
        selection::select_fair(&flexible_streak_pool, states, ShiftType::Evening, 1, rng)
    } else {
        selection::select_for_mandatory(
            &evening_pool,
            states,
            ShiftType::Evening,
            remaining_days,
            1,
            rng,
        )
    };
    for name in &chosen_evening {
        day.set(name, ShiftType::Evening);
    }

    // Step 6: duty WORKDAY fill (MOSCOW), only on non-holidays.
    if !ctx.is_holiday {
        loop {
            let candidates: Vec<&Employee> = employees
                .values()
                .filter(|e| {
                    e.city == City::Moscow
                        && e.on_duty
                        && !e.duty_only()
                        && !assigned_today(&day, &e.name)
                        && eligibility::can_work(e, &states[&e.name], date, holidays)
                        && states[&e.name].needs_more_work(remaining_days)
                        && states[&e.name].consecutive_working < eligibility::max_cw(e)
                        && !eligibility::resting_after_evening(&states[&e.name])
                        && !eligibility::resting_after_night(&states[&e.name])
                        && !(e.schedule_type == ScheduleType::Flexible
                            && states[&e.name].consecutive_off == 1)
                })
                .collect();
            if candidates.is_empty() {
                break;
            }
            let ranked = selection::select_by_urgency(&candidates, states, remaining_days);
            let Some(next) = ranked.into_iter().next() else {
                break;
            };
            if ctx.next_day_is_holiday {
                let remaining_moscow_tomorrow = employees
                    .values()
                    .filter(|e| {
                        e.city == City::Moscow
                            && e.on_duty
                            && e.name != next
                            && !assigned_today(&day, &e.name)
                    })
                    .count();
                if remaining_moscow_tomorrow < 2 {
                    break;
                }
            }
            day.set(&next, ShiftType::Workday);
        }
    }

    // Step 7: duty WORKDAY fill (KHABAROVSK), unconditional.
    for e in employees.values() {
        if e.city != City::Khabarovsk || !e.on_duty || assigned_today(&day, &e.name) {
            continue;
        }
        let st = &states[&e.name];
        let should_work = st.needs_more_work(remaining_days)
            && !(e.schedule_type == ScheduleType::Flexible && st.consecutive_off == 1)
            && !eligibility::resting_after_evening(st)
            && !eligibility::resting_after_night(st)
            && eligibility::can_work(e, st, date, holidays);
        if should_work {
            day.set(&e.name, ShiftType::Workday);
        } else if e.is_on_vacation(date) {
            day.set(&e.name, ShiftType::Vacation);
        } else {
            day.set(&e.name, ShiftType::DayOff);
        }
    }

    // Step 8: non-duty assignment.
    for e in employees.values() {
        if e.on_duty || assigned_today(&day, &e.name) {
            continue;
        }
        if e.is_on_vacation(date) {
            day.set(&e.name, ShiftType::Vacation);
            continue;
        }
        if e.is_unavailable(date) {
            day.set(&e.name, ShiftType::DayOff);
            continue;
        }
        match e.schedule_type {
            ScheduleType::FiveTwo => {
                if calendar::is_production_off_day(date, holidays) {
                    day.set(&e.name, ShiftType::DayOff);
                } else {
                    day.set(&e.name, ShiftType::Workday);
                }
            }
            ScheduleType::Flexible => {
                let st = &states[&e.name];
                let should_work = st.needs_more_work(remaining_days)
                    && st.consecutive_working < eligibility::max_cw(e)
                    && !eligibility::resting_after_evening(st)
                    && !eligibility::resting_after_night(st)
                    && st.consecutive_off != 1;
                day.set(
                    &e.name,
                    if should_work {
                        ShiftType::Workday
                    } else {
                        ShiftType::DayOff
                    },
                );
            }
        }
    }

    // Step 9: anti-isolated-off override.
    let pinned_names: HashSet<&str> = config
        .pins_for(date)
        .map(|p| p.employee.as_str())
        .collect();
    let candidate_names: Vec<String> = day.day_off.clone();
    for name in candidate_names {
        if pinned_names.contains(name.as_str()) {
            continue;
        }
        let Some(e) = employees.get(&name) else { continue };
        let st = &states[&name];
        if st.consecutive_off + 1 >= eligibility::max_co(e)
            && eligibility::can_work(e, st, date, holidays)
            && !eligibility::resting_after_evening(st)
            && (st.needs_more_work(remaining_days) || e.schedule_type == ScheduleType::Flexible)
            && !ctx.is_holiday
        {
            day.set(&name, ShiftType::Workday);
        }
    }

    // Step 10: anti-short-work override (no holiday exception).
    let candidate_names: Vec<String> = day.day_off.clone();
    for name in candidate_names {
        if pinned_names.contains(name.as_str()) {
            continue;
        }
        let Some(e) = employees.get(&name) else { continue };
        if e.schedule_type != ScheduleType::Flexible {
            continue;
        }
        let st = &states[&name];
        if st.consecutive_working > 0 && st.consecutive_working < MIN_WORK_BETWEEN_OFFS {
            day.set(&name, ShiftType::Workday);
        }
    }

    Ok(day)
}
