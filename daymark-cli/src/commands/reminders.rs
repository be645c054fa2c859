use anyhow::Result;
use daymark_core::reminder::{ReminderPlan, ReminderSink, reschedule_all};
use daymark_core::store::Store;
use owo_colors::OwoColorize;

use crate::commands::now;

/// Prints scheduled reminders instead of delivering them.
struct PrintSink;

impl ReminderSink for PrintSink {
    fn schedule(&mut self, plan: &ReminderPlan) {
        println!(
            "{}  {}",
            plan.fire_at.format("%Y-%m-%d %H:%M").dimmed(),
            plan.payload.title().bold()
        );
        println!("                  {}", plan.payload.text());
    }

    fn cancel(&mut self, _event_id: u64) {}
}

pub fn run(store: &Store) -> Result<()> {
    let now = now();
    let events = store.active_events(now.date());

    let mut sink = PrintSink;
    let scheduled = reschedule_all(&mut sink, &events, now);

    if scheduled == 0 {
        println!("{}", "No upcoming reminders".dimmed());
    }

    Ok(())
}
