//! Display strings and urgency tiers derived from a day offset.

use std::fmt;

use serde::Serialize;

/// Short relative label, e.g. "today" or "3 days ago".
///
/// The week and month buckets produce the same wording as far-future offsets.
pub fn display_text(offset: i64) -> String {
    match offset {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        o if o < 0 => format!("{} days ago", o.unsigned_abs()),
        o if o <= 7 => format!("{} days later", o),
        o if o <= 30 => format!("{} days later", o),
        o => format!("{} days later", o),
    }
}

/// Countdown sentence, e.g. "3 days left" or "10 days have passed".
pub fn countdown_text(offset: i64) -> String {
    match offset {
        o if o < 0 => format!("{} days have passed", o.unsigned_abs()),
        0 => "it's today".to_string(),
        1 => "1 day left".to_string(),
        o if o <= 7 => format!("{} days left", o),
        o if o <= 30 => format!("{} days left", o),
        o => format!("{} days left", o),
    }
}

/// Colour bucket for an offset. Presentation decides the actual colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Past,
    Today,
    /// One to three days ahead
    Soon,
    /// Four to seven days ahead
    ThisWeek,
    Future,
}

/// Classify an offset into its urgency tier.
pub fn urgency(offset: i64) -> Urgency {
    match offset {
        o if o < 0 => Urgency::Past,
        0 => Urgency::Today,
        o if o <= 3 => Urgency::Soon,
        o if o <= 7 => Urgency::ThisWeek,
        _ => Urgency::Future,
    }
}

impl Urgency {
    /// Reference hex colour for the tier.
    pub fn hex(self) -> &'static str {
        match self {
            Urgency::Past => "#757575",
            Urgency::Today => "#4CAF50",
            Urgency::Soon => "#FF9800",
            Urgency::ThisWeek => "#2196F3",
            Urgency::Future => "#9C27B0",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Urgency::Past => "past",
            Urgency::Today => "today",
            Urgency::Soon => "soon",
            Urgency::ThisWeek => "this week",
            Urgency::Future => "future",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_tiers() {
        assert_eq!(display_text(0), "today");
        assert_eq!(display_text(1), "tomorrow");
        assert_eq!(display_text(-5), "5 days ago");
        assert_eq!(display_text(7), "7 days later");
        assert_eq!(display_text(30), "30 days later");
        assert_eq!(display_text(400), "400 days later");
    }

    #[test]
    fn countdown_text_tiers() {
        assert_eq!(countdown_text(0), "it's today");
        assert_eq!(countdown_text(1), "1 day left");
        assert_eq!(countdown_text(-10), "10 days have passed");
        assert_eq!(countdown_text(2), "2 days left");
        assert_eq!(countdown_text(45), "45 days left");
    }

    #[test]
    fn urgency_boundaries() {
        assert_eq!(urgency(-1), Urgency::Past);
        assert_eq!(urgency(0), Urgency::Today);
        assert_eq!(urgency(1), Urgency::Soon);
        assert_eq!(urgency(3), Urgency::Soon);
        assert_eq!(urgency(4), Urgency::ThisWeek);
        assert_eq!(urgency(7), Urgency::ThisWeek);
        assert_eq!(urgency(8), Urgency::Future);
    }

    #[test]
    fn extreme_offsets_do_not_overflow() {
        assert_eq!(
            display_text(i64::MIN),
            format!("{} days ago", i64::MIN.unsigned_abs())
        );
        assert_eq!(urgency(i64::MAX), Urgency::Future);
    }
}
