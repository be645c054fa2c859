use anyhow::Result;
use chrono::NaiveDate;
use daymark_core::event::Event;
use daymark_core::store::Store;
use owo_colors::OwoColorize;

use crate::commands::{now, resolve_category, resolve_notebook};
use crate::render::RenderOn;

pub struct ListFilter {
    pub category: Option<String>,
    pub notebook: Option<String>,
    pub archived: bool,
    pub pinned: bool,
    pub search: Option<String>,
}

pub fn run(store: &Store, filter: ListFilter, json: bool) -> Result<()> {
    let today = now().date();

    let mut events: Vec<Event> = if filter.archived {
        store.archived_events()
    } else if let Some(query) = filter.search.as_deref() {
        store.search(query, today)
    } else if let Some(category) = filter.category.as_deref() {
        store.events_by_category(resolve_category(store, category)?, today)
    } else if let Some(notebook) = filter.notebook.as_deref() {
        store.events_by_notebook(resolve_notebook(store, notebook)?, today)
    } else if filter.pinned {
        store.pinned_events(today)
    } else {
        store.active_events(today)
    };

    // Filters beyond the first one narrow the result further
    if let Some(category) = filter.category.as_deref() {
        let id = resolve_category(store, category)?;
        events.retain(|e| e.category_id == id);
    }
    if let Some(notebook) = filter.notebook.as_deref() {
        let id = resolve_notebook(store, notebook)?;
        events.retain(|e| e.notebook_id == Some(id));
    }
    if filter.pinned {
        events.retain(|e| e.pinned);
    }

    if json {
        let rows = events
            .iter()
            .map(|event| json_row(event, today))
            .collect::<Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in &events {
        println!("{}", event.render_on(today));
    }

    Ok(())
}

/// An event as JSON, with its offset and urgency tier as of `today`.
fn json_row(event: &Event, today: NaiveDate) -> Result<serde_json::Value> {
    let urgency = event.urgency(today);
    let mut row = serde_json::to_value(event)?;
    if let Some(fields) = row.as_object_mut() {
        fields.insert("days_until".into(), event.days_until(today).into());
        fields.insert("urgency".into(), serde_json::to_value(urgency)?);
        fields.insert("urgency_color".into(), urgency.hex().into());
    }
    Ok(row)
}
