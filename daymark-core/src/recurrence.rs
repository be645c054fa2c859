//! Repeat rules and next-occurrence calculation.
//!
//! Advancing is calendar aware: month and year steps land on the same day of
//! the month when it exists, and on the last day of the target month when it
//! does not (Jan 31 + 1 month is Feb 28 or 29, Feb 29 + 1 year is Feb 28).

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How an event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RepeatRule {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RepeatRule {
    /// Parse a rule name, case-insensitively. Anything unrecognised is
    /// `None`, which never advances.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAILY" => RepeatRule::Daily,
            "WEEKLY" => RepeatRule::Weekly,
            "MONTHLY" => RepeatRule::Monthly,
            "YEARLY" => RepeatRule::Yearly,
            _ => RepeatRule::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RepeatRule::None => "NONE",
            RepeatRule::Daily => "DAILY",
            RepeatRule::Weekly => "WEEKLY",
            RepeatRule::Monthly => "MONTHLY",
            RepeatRule::Yearly => "YEARLY",
        }
    }

    pub fn is_repeating(self) -> bool {
        self != RepeatRule::None
    }

    /// Add one unit of this rule to a date.
    ///
    /// Returns `None` for [`RepeatRule::None`] or when the result is outside
    /// the representable range.
    pub fn advance(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            RepeatRule::None => None,
            RepeatRule::Daily => date.checked_add_days(Days::new(1)),
            RepeatRule::Weekly => date.checked_add_days(Days::new(7)),
            RepeatRule::Monthly => date.checked_add_months(Months::new(1)),
            RepeatRule::Yearly => date.checked_add_months(Months::new(12)),
        }
    }

    /// Add one unit of this rule to a moment, keeping its time of day.
    pub fn advance_at(self, moment: NaiveDateTime) -> Option<NaiveDateTime> {
        self.advance(moment.date())
            .map(|date| date.and_time(moment.time()))
    }

    /// iCalendar `FREQ` value, if this rule repeats.
    pub fn ics_freq(self) -> Option<&'static str> {
        match self {
            RepeatRule::None => None,
            RepeatRule::Daily => Some("DAILY"),
            RepeatRule::Weekly => Some("WEEKLY"),
            RepeatRule::Monthly => Some("MONTHLY"),
            RepeatRule::Yearly => Some("YEARLY"),
        }
    }
}

/// The moment one rule unit after `current`, if it is strictly after `now`.
///
/// Pure: callers decide whether to materialize a record from the result.
pub fn next_occurrence(
    current: NaiveDateTime,
    rule: RepeatRule,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    rule.advance_at(current).filter(|next| *next > now)
}

/// Date-only form of [`next_occurrence`], treating `current` as midnight.
pub fn next_occurrence_date(
    current: NaiveDate,
    rule: RepeatRule,
    now: NaiveDateTime,
) -> Option<NaiveDate> {
    next_occurrence(current.and_time(chrono::NaiveTime::MIN), rule, now).map(|next| next.date())
}

impl FromStr for RepeatRule {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RepeatRule::parse_lenient(s))
    }
}

impl fmt::Display for RepeatRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RepeatRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RepeatRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(RepeatRule::parse_lenient(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn parses_leniently() {
        assert_eq!(RepeatRule::parse_lenient("yearly"), RepeatRule::Yearly);
        assert_eq!(RepeatRule::parse_lenient(" WEEKLY "), RepeatRule::Weekly);
        assert_eq!(RepeatRule::parse_lenient("FORTNIGHTLY"), RepeatRule::None);
        assert_eq!(RepeatRule::parse_lenient(""), RepeatRule::None);
    }

    #[test]
    fn advances_one_unit() {
        let d = date(2024, 3, 15);
        assert_eq!(RepeatRule::Daily.advance(d), Some(date(2024, 3, 16)));
        assert_eq!(RepeatRule::Weekly.advance(d), Some(date(2024, 3, 22)));
        assert_eq!(RepeatRule::Monthly.advance(d), Some(date(2024, 4, 15)));
        assert_eq!(RepeatRule::Yearly.advance(d), Some(date(2025, 3, 15)));
        assert_eq!(RepeatRule::None.advance(d), None);
    }

    #[test]
    fn month_end_clamps() {
        assert_eq!(RepeatRule::Monthly.advance(date(2024, 1, 31)), Some(date(2024, 2, 29)));
        assert_eq!(RepeatRule::Monthly.advance(date(2023, 1, 31)), Some(date(2023, 2, 28)));
        assert_eq!(RepeatRule::Yearly.advance(date(2024, 2, 29)), Some(date(2025, 2, 28)));
    }

    #[test]
    fn next_occurrence_keeps_time_of_day() {
        let current = at(2024, 6, 1, 9);
        let now = at(2024, 5, 1, 0);
        assert_eq!(
            next_occurrence(current, RepeatRule::Daily, now),
            Some(at(2024, 6, 2, 9))
        );
    }

    #[test]
    fn next_occurrence_must_be_after_now() {
        let current = at(2024, 1, 1, 0);
        let now = at(2024, 6, 1, 0);
        assert_eq!(next_occurrence(current, RepeatRule::Monthly, now), None);
        assert_eq!(
            next_occurrence(current, RepeatRule::Yearly, now),
            Some(at(2025, 1, 1, 0))
        );
        // Equal to now is not strictly after
        assert_eq!(next_occurrence(current, RepeatRule::Daily, at(2024, 1, 2, 0)), None);
    }

    #[test]
    fn next_occurrence_date_form() {
        let now = at(2024, 1, 1, 12);
        assert_eq!(
            next_occurrence_date(date(2024, 1, 1), RepeatRule::Weekly, now),
            Some(date(2024, 1, 8))
        );
        assert_eq!(next_occurrence_date(date(2024, 1, 1), RepeatRule::None, now), None);
    }

    #[test]
    fn serde_uses_upper_case_names() {
        let json = serde_json::to_string(&RepeatRule::Monthly).unwrap();
        assert_eq!(json, "\"MONTHLY\"");
        let rule: RepeatRule = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(rule, RepeatRule::None);
    }
}
