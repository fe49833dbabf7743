//! Generates a monthly on-call duty roster for a two-city team by greedily
//! building one day at a time with bounded backtracking, then running a
//! fixed pipeline of fairness-balancing passes over the result.
//!
//! The only entry point that matters to a caller is [`generate_schedule`]:
//! everything else in this crate exists to make that one function correct
//! and reproducible.

pub mod builder;
pub mod calendar;
pub mod eligibility;
pub mod model;
pub mod postprocess;
pub mod rng;
pub mod selection;
pub mod stats;
pub mod testing;

pub use builder::generate_schedule;
pub use model::{CarryOver, Config, DaySchedule, Employee, EmployeeState, Pin, Schedule, VacationRange};
pub use shared::{City, RosterError, RosterResult, ScheduleType, ShiftType};
pub use stats::RosterStats;
