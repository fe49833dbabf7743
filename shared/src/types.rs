use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// The six shift kinds a day can be filled with. Morning and Evening are
/// MOSCOW-only mandatory duty shifts, Night is the KHABAROVSK-only mandatory
/// duty shift, Workday is ordinary non-duty work.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftType {
    Morning,
    Evening,
    Night,
    Workday,
    DayOff,
    Vacation,
}

impl ShiftType {
    /// Fixed start/end times, authoritative for any exporter built on top
    /// of this engine (see spec §6.3). `DayOff`/`Vacation` have no shift
    /// time and return `None`.
    pub fn time_range(self) -> Option<(NaiveTime, NaiveTime)> {
        let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        match self {
            ShiftType::Morning => Some((hm(8, 0), hm(17, 0))),
            ShiftType::Evening => Some((hm(15, 0), hm(0, 0))),
            ShiftType::Night => Some((hm(0, 0), hm(8, 0))),
            ShiftType::Workday => Some((hm(9, 0), hm(18, 0))),
            ShiftType::DayOff | ShiftType::Vacation => None,
        }
    }

    pub fn is_duty_shift(self) -> bool {
        matches!(self, ShiftType::Morning | ShiftType::Evening | ShiftType::Night)
    }

    pub fn is_working(self) -> bool {
        matches!(
            self,
            ShiftType::Morning | ShiftType::Evening | ShiftType::Night | ShiftType::Workday
        )
    }
}

/// The two sites a duty shift can belong to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum City {
    Moscow,
    Khabarovsk,
}

impl ShiftType {
    /// The city a mandatory duty shift belongs to. Returns `None` for
    /// shifts that are not tied to a single city (`Workday`, `DayOff`,
    /// `Vacation`).
    pub fn mandatory_city(self) -> Option<City> {
        match self {
            ShiftType::Morning | ShiftType::Evening => Some(City::Moscow),
            ShiftType::Night => Some(City::Khabarovsk),
            _ => None,
        }
    }
}

/// How an employee's working days are anchored to the calendar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleType {
    /// Any day of the week is a candidate working day.
    Flexible,
    /// Only the production calendar's workdays are candidate working days.
    FiveTwo,
}
