use anyhow::Result;
use daymark_core::store::Store;
use owo_colors::OwoColorize;

use crate::commands::add::{parse_repeat, resolve_target};
use crate::commands::{now, resolve_category};
use crate::utils::parse::{parse_lead, parse_time};

pub struct EditArgs {
    pub title: Option<String>,
    pub date: Option<String>,
    pub lunar: Option<String>,
    pub description: Option<String>,
    pub repeat: Option<String>,
    pub remind: Option<String>,
    pub no_remind: bool,
    pub time: Option<String>,
    pub category: Option<String>,
}

pub fn run(store: &mut Store, id: u64, args: EditArgs) -> Result<()> {
    let today = now().date();
    let mut event = store.event(id)?.clone();
    let mut changed = Vec::new();

    if let Some(title) = args.title {
        event.title = title;
        changed.push("title");
    }
    if let Some((date, is_lunar)) =
        resolve_target(args.date.as_deref(), args.lunar.as_deref(), today)?
    {
        event.date = date;
        event.lunar = is_lunar;
        changed.push("date");
    }
    if let Some(description) = args.description {
        event.description = description;
        changed.push("description");
    }
    if let Some(repeat) = args.repeat {
        event.repeat = parse_repeat(&repeat)?;
        changed.push("repeat");
    }
    if let Some(remind) = args.remind {
        event.reminder_enabled = true;
        event.reminder_minutes = parse_lead(&remind)?;
        changed.push("reminder");
    }
    if args.no_remind {
        event.reminder_enabled = false;
        changed.push("reminder");
    }
    if let Some(time) = args.time {
        event.precise_time = Some(parse_time(&time)?);
        changed.push("time");
    }
    if let Some(category) = args.category {
        event.category_id = resolve_category(store, &category)?;
        changed.push("category");
    }

    if changed.is_empty() {
        println!("{}", "Nothing to change".dimmed());
        return Ok(());
    }

    let title = event.title.clone();
    store.update_event(event)?;

    println!("{}", format!("  Updated: {}", title).yellow());
    println!("  {}", format!("Changed {}", changed.join(", ")).dimmed());

    Ok(())
}
