//! iCalendar export.

use chrono::{Days, NaiveDate};
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger, ValueType};

use tracing::debug;

use crate::error::{DaymarkError, DaymarkResult};
use crate::event::Event;
use crate::lunar;

/// Build a calendar with one `VEVENT` per event.
///
/// Stored next occurrences of a repeating event are left out: the earliest
/// record's `RRULE` already covers their dates.
pub fn generate_calendar(events: &[Event]) -> DaymarkResult<String> {
    let mut cal = Calendar::new();
    cal.name("daymark");

    for event in events {
        if continues_series(event, events) {
            debug!(uid = %event.uid, date = %event.date, "covered by an earlier series");
            continue;
        }
        cal.push(build_event(event)?);
    }

    Ok(strip_ics_bloat(&cal.done().to_string()))
}

/// Standalone .ics content for a single event.
pub fn generate_ics(event: &Event) -> DaymarkResult<String> {
    generate_calendar(std::slice::from_ref(event))
}

/// File name for a single-event export, e.g. `2024-06-30__graduation.ics`.
pub fn filename_for(event: &Event) -> String {
    let slug = slug::slugify(&event.title);
    let slug = if slug.is_empty() { "event".to_string() } else { slug };
    format!("{}__{}.ics", event.date.format("%Y-%m-%d"), slug)
}

/// Whether `event` is the stored next occurrence of another event in `events`.
fn continues_series(event: &Event, events: &[Event]) -> bool {
    event.repeat.is_repeating()
        && events.iter().any(|prev| {
            prev.uid != event.uid
                && prev.title == event.title
                && prev.category_id == event.category_id
                && prev.repeat == event.repeat
                && prev.precise_time == event.precise_time
                && prev.repeat.advance(prev.date) == Some(event.date)
        })
}

fn build_event(event: &Event) -> DaymarkResult<icalendar::Event> {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.title);

    let dtstamp = event.updated_at.format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);
    ics_event.add_property("CREATED", event.created_at.format("%Y%m%dT%H%M%SZ").to_string());

    match event.precise_time {
        Some(time) => {
            let start = event.date.and_time(time);
            ics_event.add_property("DTSTART", start.format("%Y%m%dT%H%M%S").to_string());
        }
        None => {
            // All-day: DTEND is exclusive
            let last = event.end_date.unwrap_or(event.date).max(event.date);
            let end = last
                .checked_add_days(Days::new(1))
                .ok_or_else(|| DaymarkError::Ics(format!("End date out of range: {last}")))?;
            add_date_property(&mut ics_event, "DTSTART", event.date);
            add_date_property(&mut ics_event, "DTEND", end);
        }
    }

    if !event.description.is_empty() {
        ics_event.description(&event.description);
    }

    if let Some(freq) = event.repeat.ics_freq() {
        ics_event.add_property("RRULE", format!("FREQ={freq}"));
    }

    if event.reminder_enabled {
        let lead = chrono::Duration::try_minutes(event.reminder_minutes).ok_or_else(|| {
            DaymarkError::Ics(format!("Reminder lead out of range: {}", event.reminder_minutes))
        })?;
        ics_event.alarm(Alarm::display("Reminder", Trigger::before_start(lead)));
    }

    if event.lunar {
        ics_event.add_property(
            "X-DAYMARK-LUNAR",
            lunar::format_lunar_date(&event.lunar_date()),
        );
    }

    if event.pinned {
        ics_event.add_property("PRIORITY", "1");
    }

    Ok(ics_event.done())
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with DAYMARK
/// - Remove CALSCALE:GREGORIAN (it's the default)
/// - Remove DTSTAMP and UID inside VALARM sections
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:DAYMARK\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
