pub mod config;
pub mod employee;
pub mod schedule;
pub mod state;

pub use config::{CarryOver, Config, Pin};
pub use employee::{Employee, VacationRange};
pub use schedule::{DaySchedule, Schedule};
pub use state::{EmployeeState, ShiftCounts};
