use anyhow::{Context, Result};
use chrono::NaiveDate;
use daymark_core::config::DaymarkConfig;
use daymark_core::event::Event;
use daymark_core::lunar;
use daymark_core::recurrence::RepeatRule;
use daymark_core::store::Store;
use owo_colors::OwoColorize;

use crate::commands::{now, resolve_category, resolve_notebook};
use crate::render::colorize_urgency;
use crate::utils::parse::{parse_date, parse_lead, parse_lunar, parse_time};

pub struct AddArgs {
    pub title: String,
    pub date: Option<String>,
    pub lunar: Option<String>,
    pub repeat: Option<String>,
    pub remind: Option<String>,
    pub time: Option<String>,
    pub category: Option<String>,
    pub notebook: Option<String>,
    pub description: Option<String>,
    pub end: Option<String>,
    pub count_up: bool,
    pub plus_one: bool,
    pub pin: bool,
}

pub fn run(store: &mut Store, config: &DaymarkConfig, args: AddArgs) -> Result<()> {
    let now = now();
    let today = now.date();

    let Some((date, is_lunar)) = resolve_target(args.date.as_deref(), args.lunar.as_deref(), today)?
    else {
        anyhow::bail!(
            "Missing target date.\n\n\
            Give a solar date:\n  \
            daymark add \"{title}\" --date 2025-10-01\n\n\
            or a lunar one:\n  \
            daymark add \"{title}\" --lunar 2025-8-15",
            title = args.title
        );
    };

    let category_id = match args.category.as_deref().or(config.default_category.as_deref()) {
        Some(name) => resolve_category(store, name)?,
        None => store
            .categories()
            .iter()
            .find(|c| c.is_default)
            .map(|c| c.id)
            .context("No categories found")?,
    };

    let mut event = Event::new(args.title, date, category_id);
    event.lunar = is_lunar;
    event.description = args.description.unwrap_or_default();
    event.pinned = args.pin;
    event.plus_one_day = args.plus_one;
    event.counting_up = args.count_up || date < today;
    event.reminder_minutes = config.default_reminder_minutes;

    if let Some(repeat) = args.repeat {
        event.repeat = parse_repeat(&repeat)?;
    }
    if let Some(remind) = args.remind {
        event.reminder_enabled = true;
        event.reminder_minutes = parse_lead(&remind)?;
    }
    if let Some(time) = args.time {
        event.precise_time = Some(parse_time(&time)?);
    }
    if let Some(end) = args.end {
        let end = parse_date(&end, today)?;
        if end < date {
            anyhow::bail!("End date {} is before the event date {}", end, date);
        }
        event.end_date = Some(end);
    }
    if let Some(notebook) = args.notebook {
        event.notebook_id = Some(resolve_notebook(store, &notebook)?);
    }

    let title = event.title.clone();
    let offset = colorize_urgency(event.urgency(today), &event.display_text(today));
    let label = event.date_label();

    let (id, next_id) = store.insert_event_with_repeat(event, now)?;

    println!("{}", format!("  Created: {}", title).green());
    println!("  {} {}", offset, format!("({}, #{})", label, id).dimmed());

    if let Some(next_id) = next_id {
        let next = store.event(next_id)?;
        println!(
            "  {}",
            format!("Next occurrence: {} (#{})", next.date, next_id).dimmed()
        );
    }

    Ok(())
}

/// Work out the solar target date from `--date` or `--lunar`.
///
/// Returns the date and whether it was entered as a lunar date, or `None`
/// when neither was given.
pub fn resolve_target(
    date: Option<&str>,
    lunar_date: Option<&str>,
    today: NaiveDate,
) -> Result<Option<(NaiveDate, bool)>> {
    if let Some(input) = lunar_date {
        let lunar_date = parse_lunar(input)?;
        let solar = lunar::try_lunar_to_solar(lunar_date)
            .with_context(|| format!("Lunar date {} has no solar equivalent", lunar_date))?;
        return Ok(Some((solar, true)));
    }

    date.map(|d| parse_date(d, today).map(|d| (d, false)))
        .transpose()
}

/// Parse a repeat rule, rejecting names that are not rules at all.
pub fn parse_repeat(input: &str) -> Result<RepeatRule> {
    let rule = RepeatRule::parse_lenient(input);
    if rule == RepeatRule::None && !input.trim().eq_ignore_ascii_case("none") {
        anyhow::bail!(
            "Unknown repeat rule: \"{}\" (expected none, daily, weekly, monthly or yearly)",
            input
        );
    }
    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn lunar_target_converts_to_solar() {
        let today = date(2024, 1, 1);
        let target = resolve_target(None, Some("2024-1-1"), today).unwrap();
        assert_eq!(target, Some((date(2024, 2, 10), true)));
    }

    #[test]
    fn solar_target_and_missing_target() {
        let today = date(2024, 1, 1);
        assert_eq!(
            resolve_target(Some("2024-05-01"), None, today).unwrap(),
            Some((date(2024, 5, 1), false))
        );
        assert_eq!(resolve_target(None, None, today).unwrap(), None);
        assert!(resolve_target(Some("May 1st"), None, today).is_err());
    }

    #[test]
    fn repeat_names() {
        assert_eq!(parse_repeat("Yearly").unwrap(), RepeatRule::Yearly);
        assert_eq!(parse_repeat("none").unwrap(), RepeatRule::None);
        assert!(parse_repeat("fortnightly").is_err());
    }
}
