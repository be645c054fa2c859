//! Signed day offsets between solar dates.
//!
//! Every offset is computed on whole dates. Values carrying a time of day are
//! truncated to midnight first, each one from its own fields, so two moments
//! on the same calendar day are always zero days apart.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// `target - today` in whole days.
///
/// Positive means the target is in the future, negative in the past, zero is
/// today.
pub fn days_between(today: NaiveDate, target: NaiveDate) -> i64 {
    (target - today).num_days()
}

/// Like [`days_between`], truncating both moments to midnight first.
pub fn days_between_at(today: NaiveDateTime, target: NaiveDateTime) -> i64 {
    days_between(today.date(), target.date())
}

/// The current local date.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// A signed day offset from today to some target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayOffset(pub i64);

impl DayOffset {
    pub fn between(today: NaiveDate, target: NaiveDate) -> Self {
        DayOffset(days_between(today, target))
    }

    pub fn days(self) -> i64 {
        self.0
    }

    /// Days elapsed since the target (the negated offset).
    pub fn days_since(self) -> i64 {
        -self.0
    }

    pub fn is_past(self) -> bool {
        self.0 < 0
    }

    pub fn is_today(self) -> bool {
        self.0 == 0
    }

    pub fn is_tomorrow(self) -> bool {
        self.0 == 1
    }

    /// Between one and seven days ahead.
    pub fn is_within_week(self) -> bool {
        (1..=7).contains(&self.0)
    }

    /// Between one and thirty days ahead.
    pub fn is_within_month(self) -> bool {
        (1..=30).contains(&self.0)
    }

    /// Count the start day itself for past targets, so an anniversary set
    /// yesterday reads as two days rather than one. Future offsets are left
    /// alone.
    pub fn including_start_day(self) -> Self {
        if self.is_past() {
            DayOffset(self.0 - 1)
        } else {
            self
        }
    }
}

impl From<DayOffset> for i64 {
    fn from(offset: DayOffset) -> i64 {
        offset.0
    }
}
