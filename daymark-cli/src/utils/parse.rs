//! Parsing of command-line date, time and duration arguments.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveTime};
use daymark_core::lunar::LunarDate;

/// Parse `YYYY-MM-DD`, or one of `today` / `tomorrow` / `yesterday`.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    match input.trim().to_lowercase().as_str() {
        "today" => return Ok(today),
        "tomorrow" => return Ok(today + Duration::days(1)),
        "yesterday" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .with_context(|| format!("Could not parse date: \"{}\" (expected YYYY-MM-DD)", input))
}

/// Parse a lunar date written `Y-M-D`, e.g. `2024-1-1` for 正月初一.
///
/// Month and day are clamped into range by the converter, so only the shape
/// is checked here.
pub fn parse_lunar(input: &str) -> Result<LunarDate> {
    let parts: Vec<&str> = input.trim().split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        anyhow::bail!("Could not parse lunar date: \"{}\" (expected Y-M-D)", input);
    };

    let year: i32 = year
        .parse()
        .with_context(|| format!("Invalid lunar year: \"{}\"", year))?;
    let month: i64 = month
        .parse()
        .with_context(|| format!("Invalid lunar month: \"{}\"", month))?;
    let day: i64 = day
        .parse()
        .with_context(|| format!("Invalid lunar day: \"{}\"", day))?;

    Ok(LunarDate::new(year, month, day))
}

/// Parse a time of day as `HH:MM`.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .with_context(|| format!("Could not parse time: \"{}\" (expected HH:MM)", input))
}

/// Parse a reminder lead time into minutes.
///
/// Accepts a bare number of minutes or a humantime duration (`1d`, `2h 30m`).
pub fn parse_lead(input: &str) -> Result<i64> {
    if let Ok(minutes) = input.trim().parse::<i64>() {
        if minutes < 0 {
            anyhow::bail!("Reminder lead time cannot be negative");
        }
        return Ok(minutes);
    }

    let std_dur = humantime::parse_duration(input)
        .map_err(|e| anyhow::anyhow!("Could not parse reminder lead \"{}\": {}", input, e))?;
    let minutes = Duration::from_std(std_dur)
        .context("Reminder lead time too large")?
        .num_minutes();

    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn absolute_and_relative_dates() {
        let today = date(2024, 2, 28);
        assert_eq!(parse_date("2024-03-01", today).unwrap(), date(2024, 3, 1));
        assert_eq!(parse_date("Tomorrow", today).unwrap(), date(2024, 2, 29));
        assert_eq!(parse_date("yesterday", today).unwrap(), date(2024, 2, 27));
        assert!(parse_date("next friday", today).is_err());
    }

    #[test]
    fn lunar_dates_clamp() {
        assert_eq!(parse_lunar("2024-1-1").unwrap(), LunarDate::ANCHOR);

        let clamped = parse_lunar("2024-13-31").unwrap();
        assert_eq!((clamped.month(), clamped.day()), (12, 30));

        assert!(parse_lunar("2024-1").is_err());
        assert!(parse_lunar("year-1-1").is_err());
    }

    #[test]
    fn times() {
        assert_eq!(parse_time("09:30").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn lead_times() {
        assert_eq!(parse_lead("90").unwrap(), 90);
        assert_eq!(parse_lead("1d").unwrap(), 1440);
        assert_eq!(parse_lead("2h 30m").unwrap(), 150);
        assert!(parse_lead("-5").is_err());
        assert!(parse_lead("soon").is_err());
    }
}
