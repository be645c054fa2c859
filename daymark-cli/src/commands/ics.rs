use anyhow::{Context, Result};
use daymark_core::ics;
use daymark_core::store::Store;
use owo_colors::OwoColorize;

use crate::commands::now;

const DEFAULT_PATH: &str = "daymark.ics";

pub fn run(store: &Store, path: Option<&str>, event: Option<u64>) -> Result<()> {
    let (content, count, default_path) = match event {
        Some(id) => {
            let event = store.event(id)?;
            (ics::generate_ics(event)?, 1, ics::filename_for(event))
        }
        None => {
            let events = store.active_events(now().date());
            (
                ics::generate_calendar(&events)?,
                events.len(),
                DEFAULT_PATH.to_string(),
            )
        }
    };

    let path = path.unwrap_or(&default_path);
    if path == "-" {
        print!("{}", content);
        return Ok(());
    }

    std::fs::write(path, content).with_context(|| format!("Could not write {}", path))?;
    println!(
        "{}",
        format!("  Exported {} events to {}", count, path).green()
    );

    Ok(())
}
