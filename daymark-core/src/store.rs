//! JSON record store for events, categories and notebooks.
//!
//! The whole store is one JSON document, rewritten atomically (temp file then
//! rename) after every mutation. A fresh store is seeded with the default
//! categories.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DaymarkError, DaymarkResult};
use crate::event::{Category, Event, Notebook, sort_for_display};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    notebooks: Vec<Notebook>,
}

pub struct Store {
    path: PathBuf,
    data: StoreData,
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

impl Store {
    /// Open the store at `path`, creating and seeding it if missing.
    pub fn open(path: impl Into<PathBuf>) -> DaymarkResult<Self> {
        let path = path.into();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let data: StoreData = serde_json::from_str(&content)?;
            debug!(path = %path.display(), events = data.events.len(), "opened store");
            return Ok(Store { path, data });
        }

        let mut store = Store {
            path,
            data: StoreData::default(),
        };
        for category in Category::defaults() {
            store.push_category(category);
        }
        store.save()?;
        debug!(path = %store.path.display(), "created store");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> DaymarkResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.data)?;
        let temp = self.path.with_extension("json.tmp");

        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        debug!(path = %self.path.display(), "saved store");
        Ok(())
    }

    // EVENTS:

    pub fn events(&self) -> &[Event] {
        &self.data.events
    }

    pub fn event(&self, id: u64) -> DaymarkResult<&Event> {
        self.data
            .events
            .iter()
            .find(|e| e.id == id)
            .ok_or(DaymarkError::EventNotFound(id))
    }

    fn check_references(&self, event: &Event) -> DaymarkResult<()> {
        self.category(event.category_id)?;
        if let Some(notebook_id) = event.notebook_id {
            self.notebook(notebook_id)?;
        }
        Ok(())
    }

    /// Insert a new event, assigning its id. Returns the id.
    pub fn insert_event(&mut self, mut event: Event) -> DaymarkResult<u64> {
        self.check_references(&event)?;

        event.id = next_id(self.data.events.iter().map(|e| e.id));
        let id = event.id;
        self.data.events.push(event);
        self.save()?;
        Ok(id)
    }

    /// Insert an event and, for repeating events, its next occurrence after
    /// `now` as a separate record. Returns both ids.
    pub fn insert_event_with_repeat(
        &mut self,
        event: Event,
        now: NaiveDateTime,
    ) -> DaymarkResult<(u64, Option<u64>)> {
        let next = event.next_repeat(now);
        let id = self.insert_event(event)?;

        let next_id = match next {
            Some(next) => Some(self.insert_event(next)?),
            None => None,
        };
        Ok((id, next_id))
    }

    /// Replace the stored event with the same id.
    pub fn update_event(&mut self, mut event: Event) -> DaymarkResult<()> {
        self.check_references(&event)?;

        let slot = self
            .data
            .events
            .iter_mut()
            .find(|e| e.id == event.id)
            .ok_or(DaymarkError::EventNotFound(event.id))?;
        event.touch();
        *slot = event;
        self.save()
    }

    pub fn delete_event(&mut self, id: u64) -> DaymarkResult<Event> {
        let index = self
            .data
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(DaymarkError::EventNotFound(id))?;
        let removed = self.data.events.remove(index);
        self.save()?;
        Ok(removed)
    }

    fn modify(&mut self, id: u64, change: impl FnOnce(&mut Event)) -> DaymarkResult<()> {
        let event = self
            .data
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(DaymarkError::EventNotFound(id))?;
        change(event);
        event.touch();
        self.save()
    }

    pub fn archive(&mut self, id: u64) -> DaymarkResult<()> {
        self.modify(id, |e| e.archived = true)
    }

    pub fn unarchive(&mut self, id: u64) -> DaymarkResult<()> {
        self.modify(id, |e| e.archived = false)
    }

    pub fn set_pinned(&mut self, id: u64, pinned: bool) -> DaymarkResult<()> {
        self.modify(id, |e| e.pinned = pinned)
    }

    pub fn set_locked(&mut self, id: u64, locked: bool) -> DaymarkResult<()> {
        self.modify(id, |e| e.locked = locked)
    }

    // QUERIES:

    fn active_where(&self, today: NaiveDate, keep: impl Fn(&Event) -> bool) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .data
            .events
            .iter()
            .filter(|e| !e.archived && keep(e))
            .cloned()
            .collect();
        sort_for_display(&mut events, today);
        events
    }

    /// Non-archived events, pinned first then by day offset.
    pub fn active_events(&self, today: NaiveDate) -> Vec<Event> {
        self.active_where(today, |_| true)
    }

    /// Archived events, most recently changed first.
    pub fn archived_events(&self) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .data
            .events
            .iter()
            .filter(|e| e.archived)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        events
    }

    pub fn pinned_events(&self, today: NaiveDate) -> Vec<Event> {
        self.active_where(today, |e| e.pinned)
    }

    pub fn events_by_category(&self, category_id: u64, today: NaiveDate) -> Vec<Event> {
        self.active_where(today, |e| e.category_id == category_id)
    }

    pub fn events_by_notebook(&self, notebook_id: u64, today: NaiveDate) -> Vec<Event> {
        self.active_where(today, |e| e.notebook_id == Some(notebook_id))
    }

    /// Active events whose title or description contains `query`.
    pub fn search(&self, query: &str, today: NaiveDate) -> Vec<Event> {
        self.active_where(today, |e| e.matches(query))
    }

    /// Active events dated within `[from, to]`, in date order.
    pub fn events_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .data
            .events
            .iter()
            .filter(|e| !e.archived && e.date >= from && e.date <= to)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.date);
        events
    }

    // CATEGORIES:

    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    pub fn category(&self, id: u64) -> DaymarkResult<&Category> {
        self.data
            .categories
            .iter()
            .find(|c| c.id == id)
            .ok_or(DaymarkError::CategoryNotFound(id))
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.data
            .categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    fn push_category(&mut self, mut category: Category) -> u64 {
        category.id = next_id(self.data.categories.iter().map(|c| c.id));
        let id = category.id;
        self.data.categories.push(category);
        id
    }

    pub fn insert_category(&mut self, category: Category) -> DaymarkResult<u64> {
        let id = self.push_category(category);
        self.save()?;
        Ok(id)
    }

    /// Delete a custom category together with its events.
    pub fn delete_category(&mut self, id: u64) -> DaymarkResult<usize> {
        let category = self.category(id)?;
        if category.is_default {
            return Err(DaymarkError::DefaultCategory(category.name.clone()));
        }

        self.data.categories.retain(|c| c.id != id);
        let before = self.data.events.len();
        self.data.events.retain(|e| e.category_id != id);
        let removed = before - self.data.events.len();

        self.save()?;
        Ok(removed)
    }

    // NOTEBOOKS:

    /// Notebooks in display order.
    pub fn notebooks(&self) -> Vec<&Notebook> {
        let mut notebooks: Vec<&Notebook> = self.data.notebooks.iter().collect();
        notebooks.sort_by_key(|n| (n.sort_order, n.id));
        notebooks
    }

    pub fn notebook(&self, id: u64) -> DaymarkResult<&Notebook> {
        self.data
            .notebooks
            .iter()
            .find(|n| n.id == id)
            .ok_or(DaymarkError::NotebookNotFound(id))
    }

    pub fn notebook_by_name(&self, name: &str) -> Option<&Notebook> {
        self.data
            .notebooks
            .iter()
            .find(|n| n.name.eq_ignore_ascii_case(name))
    }

    pub fn insert_notebook(&mut self, mut notebook: Notebook) -> DaymarkResult<u64> {
        notebook.id = next_id(self.data.notebooks.iter().map(|n| n.id));
        let id = notebook.id;
        self.data.notebooks.push(notebook);
        self.save()?;
        Ok(id)
    }

    /// Delete a notebook. Its events stay, detached from any notebook.
    pub fn delete_notebook(&mut self, id: u64) -> DaymarkResult<()> {
        self.notebook(id)?;
        self.data.notebooks.retain(|n| n.id != id);
        for event in self
            .data
            .events
            .iter_mut()
            .filter(|e| e.notebook_id == Some(id))
        {
            event.notebook_id = None;
            event.touch();
        }
        self.save()
    }

    /// Each notebook with its number of active events.
    pub fn notebook_counts(&self) -> Vec<(&Notebook, usize)> {
        self.notebooks()
            .into_iter()
            .map(|n| {
                let count = self
                    .data
                    .events
                    .iter()
                    .filter(|e| !e.archived && e.notebook_id == Some(n.id))
                    .count();
                (n, count)
            })
            .collect()
    }
}
