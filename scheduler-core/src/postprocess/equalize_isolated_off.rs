//! Pass 4.4.7: equalize how many isolated off-days each duty employee in a
//! city ends up carrying, by swapping one of the over-loaded employee's
//! isolated off-days with a working day the under-loaded employee holds
//! that would not itself become isolated for them.

use std::collections::HashMap;

use shared::City;

use crate::model::{Employee, Schedule};

use super::common;

fn pool(employees: &HashMap<String, Employee>, city: City) -> Vec<String> {
    employees
        .values()
        .filter(|e| e.city == city && e.on_duty)
        .map(|e| e.name.clone())
        .collect()
}

fn isolated_count(schedule: &Schedule, name: &str) -> u32 {
    let seq = common::shift_sequence(schedule, name);
    common::isolated_off_indices(&seq).len() as u32
}

pub fn run(schedule: &mut Schedule, employees: &HashMap<String, Employee>) {
    for city in [City::Moscow, City::Khabarovsk] {
        let names = pool(employees, city);
        if names.len() < 2 {
            continue;
        }
        let mut guard = names.len() * names.len() * 4 + 16;
        loop {
            if guard == 0 {
                break;
            }
            guard -= 1;

            let mut counts: Vec<(String, u32)> = names
                .iter()
                .map(|n| (n.clone(), isolated_count(schedule, n)))
                .collect();
            counts.sort_by_key(|(_, c)| *c);
            let (under_name, under_count) = counts.first().cloned().unwrap();
            let (over_name, over_count) = counts.last().cloned().unwrap();
            if over_count <= under_count + 1 || over_name == under_name {
                break;
            }

            let over_seq = common::shift_sequence(schedule, &over_name);
            let under_seq = common::shift_sequence(schedule, &under_name);
            let over = employees.get(&over_name).unwrap();
            let under = employees.get(&under_name).unwrap();

            let isolated = common::isolated_off_indices(&over_seq);
            let swap_idx = isolated.into_iter().find(|&i| {
                under_seq[i].is_working()
                    && !common::is_pinned(schedule, schedule.days[i].date, &over_name)
                    && !common::is_pinned(schedule, schedule.days[i].date, &under_name)
                    && common::shift_compatible(over, under_seq[i])
                    && common::keeps_streak_caps(over, &over_seq, i, under_seq[i])
                    && common::keeps_streak_caps(under, &under_seq, i, shared::ShiftType::DayOff)
                    && common::respects_rest_rules(&over_seq, i, under_seq[i])
                    && common::respects_rest_rules(&under_seq, i, shared::ShiftType::DayOff)
                    && !common::is_isolated_off(&{
                        let mut probe = under_seq.clone();
                        probe[i] = shared::ShiftType::DayOff;
                        probe
                    }, i)
                    && !common::group_conflict(&schedule.days[i], employees, &over_name, under_seq[i])
            });

            let Some(idx) = swap_idx else { break };
            let freed_shift = under_seq[idx];
            common::write_shift(schedule, &under_name, idx, shared::ShiftType::DayOff);
            common::write_shift(schedule, &over_name, idx, freed_shift);
        }
    }
}
