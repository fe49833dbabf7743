//! Fairness-ranked candidate selection (spec §4.2). All three primitives are
//! deterministic once the RNG is seeded: random tiebreaks come only from the
//! supplied RNG, never from iteration order.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use shared::ShiftType;

use crate::model::{Employee, EmployeeState};

/// Sort `candidates` ascending by their current count for `shift`,
/// preferring `preferred_shift == shift`, randomly tiebreaking via `rng`,
/// and return the names of the first `count`.
pub fn select_fair(
    candidates: &[&Employee],
    states: &HashMap<String, EmployeeState>,
    shift: ShiftType,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<String> {
    let mut pool: Vec<&Employee> = candidates.to_vec();
    pool.shuffle(rng);
    pool.sort_by_key(|e| {
        let n = states.get(&e.name).map(|s| s.counts.get(shift)).unwrap_or(0);
        let preferred = e.preferred_shift == Some(shift);
        (n, !preferred)
    });
    pool.into_iter().take(count).map(|e| e.name.clone()).collect()
}

/// Split `candidates` into employees that still owe work and the rest;
/// pick from the needy partition first when it can supply `count` on its
/// own, otherwise fall back to the full pool (spec §4.2).
pub fn select_for_mandatory(
    candidates: &[&Employee],
    states: &HashMap<String, EmployeeState>,
    shift: ShiftType,
    remaining_days: u32,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<String> {
    let needy: Vec<&Employee> = candidates
        .iter()
        .copied()
        .filter(|e| {
            states
                .get(&e.name)
                .map(|s| s.needs_more_work(remaining_days))
                .unwrap_or(false)
        })
        .collect();

    if needy.len() >= count {
        select_fair(&needy, states, shift, count, rng)
    } else {
        select_fair(candidates, states, shift, count, rng)
    }
}

/// Sort by descending `(effective_target - total_working) / max(remaining_days, 1)`
/// — the most behind-schedule employees come first.
pub fn select_by_urgency(
    candidates: &[&Employee],
    states: &HashMap<String, EmployeeState>,
    remaining_days: u32,
) -> Vec<String> {
    let denom = remaining_days.max(1) as f64;
    let mut pool: Vec<(&Employee, f64)> = candidates
        .iter()
        .map(|&e| {
            let urgency = states
                .get(&e.name)
                .map(|s| {
                    (s.effective_target() as f64 - s.total_working as f64) / denom
                })
                .unwrap_or(f64::MIN);
            (e, urgency)
        })
        .collect();
    pool.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
    pool.into_iter().map(|(e, _)| e.name.clone()).collect()
}
