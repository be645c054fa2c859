//! Approximate Chinese lunar calendar.
//!
//! This is a linear approximation anchored at one known new year (solar
//! 2024-02-10 is lunar 2024-01-01), stepping by mean synodic month and mean
//! lunar year lengths. It has no leap months and drifts for dates far from the
//! anchor. Lunar dates are a display aid only; the solar date is always the
//! canonical one.
//!
//! Conversions never fail. Out-of-range fields are clamped, and arithmetic
//! that cannot be represented falls back to a fixed value (the anchor lunar
//! date, or today's solar date) with a warning logged.

use std::fmt;

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::date_math::local_today;
use crate::error::{DaymarkError, DaymarkResult};

/// Mean synodic month length in days.
pub const LUNAR_MONTH_DAYS: f64 = 29.53059;

/// Mean length of twelve lunar months in days.
pub const LUNAR_YEAR_DAYS: f64 = 354.36708;

const ANCHOR_YEAR: i32 = 2024;

const MONTH_NAMES: [&str; 12] = [
    "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月", "腊月",
];

const DAY_NAMES: [&str; 30] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", "十一", "十二",
    "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十", "廿一", "廿二", "廿三", "廿四",
    "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
];

/// Solar date of the anchor lunar new year.
pub fn anchor_solar_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 10).unwrap_or_default()
}

/// A lunar calendar date. `month` is always in `1..=12` and `day` in `1..=30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "LunarFields")]
pub struct LunarDate {
    year: i32,
    month: u32,
    day: u32,
}

/// Unchecked wire form, clamped on the way in.
#[derive(Deserialize)]
struct LunarFields {
    year: i32,
    month: i64,
    day: i64,
}

impl From<LunarFields> for LunarDate {
    fn from(fields: LunarFields) -> Self {
        LunarDate::new(fields.year, fields.month, fields.day)
    }
}

impl LunarDate {
    /// Lunar 2024-01-01, the fallback for failed conversions.
    pub const ANCHOR: LunarDate = LunarDate {
        year: ANCHOR_YEAR,
        month: 1,
        day: 1,
    };

    /// Build a lunar date, clamping month and day into range.
    pub fn new(year: i32, month: i64, day: i64) -> Self {
        LunarDate {
            year,
            month: month.clamp(1, 12) as u32,
            day: day.clamp(1, 30) as u32,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month as i64)
    }

    pub fn day_name(&self) -> &'static str {
        day_name(self.day as i64)
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format_lunar_date(self))
    }
}

/// Convert a solar date to its approximate lunar date.
///
/// Falls back to [`LunarDate::ANCHOR`] if the year cannot be represented.
pub fn solar_to_lunar(date: NaiveDate) -> LunarDate {
    match try_solar_to_lunar(date) {
        Ok(lunar) => lunar,
        Err(e) => {
            warn!(%date, error = %e, "lunar conversion failed, using anchor date");
            LunarDate::ANCHOR
        }
    }
}

/// Fallible form of [`solar_to_lunar`].
pub fn try_solar_to_lunar(date: NaiveDate) -> DaymarkResult<LunarDate> {
    let diff_days = (date - anchor_solar_date()).num_days();
    let overflow = || DaymarkError::DateOutOfRange(format!("lunar year for {}", date));

    let mut year = ANCHOR_YEAR;
    let mut month: i64 = 1;
    let mut day: i64 = 1;

    if diff_days > 0 {
        let mut remaining = diff_days;

        let years = (remaining as f64 / LUNAR_YEAR_DAYS) as i64;
        year = add_years(year, years).ok_or_else(overflow)?;
        remaining -= (years as f64 * LUNAR_YEAR_DAYS) as i64;

        let months = (remaining as f64 / LUNAR_MONTH_DAYS) as i64;
        month = (month + months - 1) % 12 + 1;
        remaining -= (months as f64 * LUNAR_MONTH_DAYS) as i64;

        day = (remaining + 1).max(1);
    } else if diff_days < 0 {
        let mut remaining = -diff_days;

        let years = (remaining as f64 / LUNAR_YEAR_DAYS) as i64;
        year = add_years(year, -years).ok_or_else(overflow)?;
        remaining -= (years as f64 * LUNAR_YEAR_DAYS) as i64;

        let months = (remaining as f64 / LUNAR_MONTH_DAYS) as i64;
        month = (12 - months) % 12 + 1;
        remaining -= (months as f64 * LUNAR_MONTH_DAYS) as i64;

        day = ((LUNAR_MONTH_DAYS - remaining as f64) as i64).max(1);
    }

    Ok(LunarDate::new(year, month, day))
}

fn add_years(year: i32, years: i64) -> Option<i32> {
    i32::try_from(years).ok().and_then(|y| year.checked_add(y))
}

/// Convert a lunar date back to an approximate solar date.
///
/// Month and day are clamped first. Falls back to today's local date if the
/// result is outside the representable range.
pub fn lunar_to_solar(year: i32, month: i64, day: i64) -> NaiveDate {
    let lunar = LunarDate::new(year, month, day);
    match try_lunar_to_solar(lunar) {
        Ok(date) => date,
        Err(e) => {
            warn!(%lunar, error = %e, "solar conversion failed, using today");
            local_today()
        }
    }
}

/// Fallible form of [`lunar_to_solar`].
pub fn try_lunar_to_solar(lunar: LunarDate) -> DaymarkResult<NaiveDate> {
    let lunar = LunarDate::new(lunar.year, lunar.month as i64, lunar.day as i64);
    let year_diff = (lunar.year as i64 - ANCHOR_YEAR as i64) as f64;
    let month_diff = (lunar.month as i64 - 1) as f64;
    let day_diff = (lunar.day as i64 - 1) as f64;

    let total_days =
        (year_diff * LUNAR_YEAR_DAYS + month_diff * LUNAR_MONTH_DAYS + day_diff) as i64;

    TimeDelta::try_days(total_days)
        .and_then(|delta| anchor_solar_date().checked_add_signed(delta))
        .ok_or_else(|| DaymarkError::DateOutOfRange(format!("solar date for lunar {}", lunar)))
}

/// Render a lunar date as e.g. `2024年正月初一`.
pub fn format_lunar_date(lunar: &LunarDate) -> String {
    format!("{}年{}{}", lunar.year, lunar.month_name(), lunar.day_name())
}

/// Traditional month name; out-of-range values fall back to 正月.
pub fn month_name(month: i64) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        _ => MONTH_NAMES[0],
    }
}

/// Traditional day name; out-of-range values fall back to 初一.
pub fn day_name(day: i64) -> &'static str {
    match day {
        1..=30 => DAY_NAMES[(day - 1) as usize],
        _ => DAY_NAMES[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn anchor_converts_both_ways() {
        assert_eq!(solar_to_lunar(date(2024, 2, 10)), LunarDate::ANCHOR);
        assert_eq!(lunar_to_solar(2024, 1, 1), date(2024, 2, 10));
    }

    #[test]
    fn forward_within_first_month() {
        assert_eq!(solar_to_lunar(date(2024, 2, 20)), LunarDate::new(2024, 1, 11));
    }

    #[test]
    fn forward_into_second_month() {
        // 30 days after the anchor: one whole month (29 days) plus one
        assert_eq!(solar_to_lunar(date(2024, 3, 11)), LunarDate::new(2024, 2, 2));
        assert_eq!(lunar_to_solar(2024, 2, 2), date(2024, 3, 11));
    }

    #[test]
    fn forward_across_a_year() {
        assert_eq!(solar_to_lunar(date(2025, 2, 10)), LunarDate::new(2025, 1, 13));
        assert_eq!(lunar_to_solar(2025, 1, 1), date(2025, 1, 29));
    }

    #[test]
    fn backward_walks_months_from_the_end() {
        // 31 days before the anchor
        assert_eq!(solar_to_lunar(date(2024, 1, 10)), LunarDate::new(2024, 12, 27));
        // One day before the anchor stays in the anchor month
        assert_eq!(solar_to_lunar(date(2024, 2, 9)), LunarDate::new(2024, 1, 28));
    }

    #[test]
    fn backward_solar_conversion() {
        assert_eq!(lunar_to_solar(2023, 1, 1), date(2023, 2, 21));
    }

    #[test]
    fn clamps_out_of_range_fields() {
        let lunar = LunarDate::new(2024, 15, 0);
        assert_eq!(lunar.month, 12);
        assert_eq!(lunar.day, 1);
        assert_eq!(lunar_to_solar(2024, 0, 99), lunar_to_solar(2024, 1, 30));
    }

    #[test]
    fn deserializing_clamps_fields() {
        let lunar: LunarDate =
            serde_json::from_str(r#"{"year":2024,"month":40,"day":0}"#).unwrap();
        assert_eq!(lunar, LunarDate::new(2024, 12, 1));
        assert_eq!(
            try_lunar_to_solar(lunar).unwrap(),
            lunar_to_solar(2024, 12, 1)
        );
    }

    #[test]
    fn far_dates_stay_in_range() {
        for d in [date(1900, 1, 1), date(1970, 6, 15), date(2100, 12, 31)] {
            let lunar = solar_to_lunar(d);
            assert!((1..=12).contains(&lunar.month), "{d}: {lunar:?}");
            assert!((1..=30).contains(&lunar.day), "{d}: {lunar:?}");
        }
    }

    #[test]
    fn unrepresentable_year_is_an_error_in_try_form() {
        let lunar = LunarDate::new(i32::MAX, 1, 1);
        assert!(try_lunar_to_solar(lunar).is_err());
    }

    #[test]
    fn formats_with_traditional_names() {
        assert_eq!(format_lunar_date(&LunarDate::ANCHOR), "2024年正月初一");
        assert_eq!(format_lunar_date(&LunarDate::new(2025, 12, 30)), "2025年腊月三十");
        assert_eq!(LunarDate::new(2024, 11, 21).to_string(), "2024年十一月廿一");
    }

    #[test]
    fn name_lookup_falls_back() {
        assert_eq!(month_name(0), "正月");
        assert_eq!(month_name(13), "正月");
        assert_eq!(day_name(31), "初一");
        assert_eq!(day_name(-2), "初一");
        assert_eq!(day_name(20), "二十");
    }
}
