pub mod add;
pub mod backup;
pub mod calc;
pub mod categories;
pub mod config;
pub mod delete;
pub mod edit;
pub mod flags;
pub mod ics;
pub mod list;
pub mod lunar;
pub mod notebooks;
pub mod reminders;
pub mod show;

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use daymark_core::store::Store;

/// Current local date and time, as naive wall-clock time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Resolve a category given by name (case-insensitive) or id.
pub fn resolve_category(store: &Store, name_or_id: &str) -> Result<u64> {
    if let Some(category) = store.category_by_name(name_or_id) {
        return Ok(category.id);
    }

    if let Ok(id) = name_or_id.parse::<u64>() {
        if store.category(id).is_ok() {
            return Ok(id);
        }
    }

    let available: Vec<_> = store.categories().iter().map(|c| c.name.as_str()).collect();
    anyhow::bail!(
        "Category '{}' not found. Available: {}",
        name_or_id,
        available.join(", ")
    )
}

/// Resolve a notebook given by name (case-insensitive) or id.
pub fn resolve_notebook(store: &Store, name_or_id: &str) -> Result<u64> {
    if let Some(notebook) = store.notebook_by_name(name_or_id) {
        return Ok(notebook.id);
    }

    if let Ok(id) = name_or_id.parse::<u64>() {
        if store.notebook(id).is_ok() {
            return Ok(id);
        }
    }

    let available: Vec<_> = store.notebooks().into_iter().map(|n| n.name.as_str()).collect();
    if available.is_empty() {
        anyhow::bail!(
            "Notebook '{}' not found.\n\n\
            Create one with:\n  \
            daymark notebooks add {}",
            name_or_id,
            name_or_id
        );
    }
    anyhow::bail!(
        "Notebook '{}' not found. Available: {}",
        name_or_id,
        available.join(", ")
    )
}
