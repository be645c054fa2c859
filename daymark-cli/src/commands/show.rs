use anyhow::Result;
use chrono::TimeDelta;
use daymark_core::reminder;
use daymark_core::store::Store;
use owo_colors::OwoColorize;

use crate::commands::now;
use crate::render::colorize_urgency;

pub fn run(store: &Store, id: u64) -> Result<()> {
    let now = now();
    let today = now.date();
    let event = store.event(id)?;

    println!("{}", event.title.bold());
    println!(
        "  {}",
        colorize_urgency(event.urgency(today), &event.countdown_text(today))
    );
    println!();

    println!("  Date:       {}", event.date_label());
    println!("  Lunar:      {}", event.lunar_date());
    if let Some(time) = event.precise_time {
        println!("  Time:       {}", time.format("%H:%M"));
    }
    if let Some(end) = event.end_date {
        println!("  Until:      {}", end);
    }

    let category = store
        .category(event.category_id)
        .map(|c| c.name.as_str())
        .unwrap_or("-");
    println!("  Category:   {}", category);
    if let Some(notebook) = event.notebook_id.and_then(|id| store.notebook(id).ok()) {
        println!("  Notebook:   {} {}", notebook.icon, notebook.name);
    }

    if event.repeat.is_repeating() {
        let next = event
            .moment()
            .next_occurrence(now)
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  Repeats:    {} (next {})", event.repeat, next);
    }

    if event.reminder_enabled {
        let lead = format_lead(event.reminder_minutes);
        match reminder::plan_reminder(event, now) {
            Some(plan) => println!(
                "  Reminder:   {} before, at {}",
                lead,
                plan.fire_at.format("%Y-%m-%d %H:%M")
            ),
            None => println!("  Reminder:   {} before {}", lead, "(passed)".dimmed()),
        }
    }

    let mut flags = Vec::new();
    if event.pinned {
        flags.push("pinned");
    }
    if event.archived {
        flags.push("archived");
    }
    if event.locked {
        flags.push("locked");
    }
    if event.counting_up {
        flags.push("counting up");
    }
    if event.plus_one_day {
        flags.push("start day counted");
    }
    if !flags.is_empty() {
        println!("  Flags:      {}", flags.join(", "));
    }

    if !event.description.is_empty() {
        println!();
        for line in event.description.lines() {
            println!("  {}", line);
        }
    }

    Ok(())
}

/// Human-readable reminder lead; leads beyond what a duration can hold are
/// shown as raw minutes.
fn format_lead(minutes: i64) -> String {
    TimeDelta::try_minutes(minutes.max(0))
        .and_then(|lead| lead.to_std().ok())
        .map(|lead| humantime::format_duration(lead).to_string())
        .unwrap_or_else(|| format!("{} minutes", minutes))
}
