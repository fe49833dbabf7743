use chrono::NaiveDate;
use thiserror::Error;

use crate::types::ShiftType;

/// Errors surfaced by the duty-roster engine to its callers.
///
/// `InsufficientCoverage`, the internal signal the day builder raises to
/// trigger a backtrack, never appears here: it is caught inside
/// `scheduler_core` and either resolved by a retry or converted into
/// `ScheduleInfeasible` once the backtracking budget is exhausted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    #[error("invalid pin for {employee} on {date}: {reason}")]
    InvalidPin {
        employee: String,
        date: NaiveDate,
        reason: String,
    },

    #[error("invalid employee {name}: {reason}")]
    InvalidEmployee { name: String, reason: String },

    #[error("schedule infeasible on {date}: could not fill {shift:?} ({reason})")]
    ScheduleInfeasible {
        date: NaiveDate,
        shift: ShiftType,
        reason: String,
    },
}

pub type RosterResult<T> = Result<T, RosterError>;
