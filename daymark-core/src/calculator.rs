//! Date calculator: the span between two dates, and milestone dates.

use chrono::{Days, NaiveDate};

use crate::date_math::days_between;

const DAYS_PER_MONTH: f64 = 30.44;
const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// End is after start
    Forward,
    /// End is before start
    Backward,
    Same,
}

/// Breakdown of the span between two dates.
#[derive(Debug, Clone, PartialEq)]
pub struct DateDifference {
    /// `end - start`, signed
    pub days: i64,
    pub abs_days: u64,
    pub weeks: u64,
    pub remaining_days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub approx_months: f64,
    pub approx_years: f64,
    pub direction: Direction,
}

impl DateDifference {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        let days = days_between(start, end);
        let abs_days = days.unsigned_abs();

        let direction = match days {
            d if d > 0 => Direction::Forward,
            d if d < 0 => Direction::Backward,
            _ => Direction::Same,
        };

        DateDifference {
            days,
            abs_days,
            weeks: abs_days / 7,
            remaining_days: abs_days % 7,
            hours: abs_days * 24,
            minutes: abs_days * 24 * 60,
            approx_months: abs_days as f64 / DAYS_PER_MONTH,
            approx_years: abs_days as f64 / DAYS_PER_YEAR,
            direction,
        }
    }
}

/// A notable date counted from a start date.
#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub label: &'static str,
    pub days: u64,
    pub date: NaiveDate,
}

const MILESTONES: [(u64, &str); 4] = [
    (100, "100 days"),
    (365, "1 year"),
    (1000, "1000 days"),
    (3650, "10 years"),
];

/// The 100-day, 1-year, 1000-day and 10-year marks after `start`.
///
/// Marks past the end of the supported date range are left out.
pub fn milestones(start: NaiveDate) -> Vec<Milestone> {
    MILESTONES
        .iter()
        .filter_map(|&(days, label)| {
            start
                .checked_add_days(Days::new(days))
                .map(|date| Milestone { label, days, date })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn breakdown_forward() {
        let diff = DateDifference::between(date(2024, 1, 1), date(2024, 1, 17));
        assert_eq!(diff.days, 16);
        assert_eq!(diff.weeks, 2);
        assert_eq!(diff.remaining_days, 2);
        assert_eq!(diff.hours, 384);
        assert_eq!(diff.minutes, 23040);
        assert_eq!(diff.direction, Direction::Forward);
    }

    #[test]
    fn breakdown_backward_uses_absolute_values() {
        let diff = DateDifference::between(date(2025, 1, 1), date(2024, 1, 1));
        assert_eq!(diff.days, -366);
        assert_eq!(diff.abs_days, 366);
        assert_eq!(diff.direction, Direction::Backward);
        assert!((diff.approx_years - 366.0 / 365.25).abs() < 1e-9);
    }

    #[test]
    fn same_day() {
        let diff = DateDifference::between(date(2024, 1, 1), date(2024, 1, 1));
        assert_eq!(diff.direction, Direction::Same);
        assert_eq!(diff.approx_months, 0.0);
    }

    #[test]
    fn milestone_dates() {
        let marks = milestones(date(2024, 1, 1));
        assert_eq!(marks.len(), 4);
        assert_eq!(marks[0].date, date(2024, 4, 10));
        assert_eq!(marks[1].date, date(2024, 12, 31));
        assert_eq!(marks[1].label, "1 year");
        assert_eq!(marks[3].days, 3650);
    }
}
