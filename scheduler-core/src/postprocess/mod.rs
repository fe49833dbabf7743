//! The fixed, non-reorderable fairness-balancing pipeline (spec §4.4) that
//! `generate_schedule` runs once the greedy day builder has produced a
//! fully-covered schedule. Every pass only ever turns a legal schedule into
//! another legal one: it checks streak caps, rest rules, pins, and group
//! clashes with the same predicates the day builder uses, so a cover-complete
//! schedule stays cover-complete throughout.

mod balance_duty_shifts;
mod balance_weekend;
mod break_evening_isolated;
mod common;
mod equalize_isolated_off;
mod minimize_isolated_off;
mod target_adjustment;
mod trim_long_off_blocks;

use std::collections::HashMap;

use crate::model::{Employee, Schedule};

#[tracing::instrument(skip(schedule, employees))]
pub fn run_pipeline(schedule: &mut Schedule, employees: &HashMap<String, Employee>) {
    balance_weekend::run(schedule, employees);
    balance_duty_shifts::run(schedule, employees);
    target_adjustment::run(schedule, employees);
    trim_long_off_blocks::run(schedule, employees);
    target_adjustment::run(schedule, employees);
    minimize_isolated_off::run(schedule, employees);
    break_evening_isolated::run(schedule, employees);
    minimize_isolated_off::run(schedule, employees);
    equalize_isolated_off::run(schedule, employees);
    minimize_isolated_off::run(schedule, employees);
    tracing::info!("post-processing pipeline complete");
}
