use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_holiday(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> bool {
    holidays.contains(&date)
}

/// A day that is neither a business day per the production calendar: a
/// weekend or a holiday.
pub fn is_production_off_day(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> bool {
    is_weekend(date) || is_holiday(date, holidays)
}

pub fn days_in_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid year/month");
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("valid year/month");

    let mut days = Vec::new();
    let mut d = first;
    while d < next_month_first {
        days.push(d);
        d = d.succ_opt().unwrap();
    }
    days
}

pub fn production_days_in_month(year: i32, month: u32, holidays: &HashSet<NaiveDate>) -> u32 {
    days_in_month(year, month)
        .into_iter()
        .filter(|d| !is_production_off_day(*d, holidays))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn january_2026_has_thirty_one_days() {
        assert_eq!(days_in_month(2026, 1).len(), 31);
    }

    #[test]
    fn weekend_detection() {
        // 2026-01-03 is a Saturday, 2026-01-05 a Monday.
        assert!(is_weekend(NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()));
        assert!(!is_weekend(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()));
    }

    #[test]
    fn holiday_counts_as_production_off_day() {
        let holiday = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap(); // a Wednesday
        let mut holidays = HashSet::new();
        holidays.insert(holiday);
        assert!(!is_weekend(holiday));
        assert!(is_production_off_day(holiday, &holidays));
    }

    #[test]
    fn production_days_excludes_weekends_and_holidays() {
        let mut holidays = HashSet::new();
        holidays.insert(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let total = days_in_month(2026, 1).len() as u32;
        let weekends = days_in_month(2026, 1)
            .into_iter()
            .filter(|d| is_weekend(*d))
            .count() as u32;
        assert_eq!(
            production_days_in_month(2026, 1, &holidays),
            total - weekends - 1
        );
    }
}
