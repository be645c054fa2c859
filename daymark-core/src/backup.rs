//! JSON backup export and import.
//!
//! The backup format is the mobile app's `version 1.0` document: camelCase
//! keys and `yyyy-MM-dd HH:mm:ss` timestamps. Colours are written as hex
//! strings; integer ARGB colours from older backups are accepted on import.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::error::{DaymarkError, DaymarkResult};
use crate::event::{Category, DEFAULT_REMINDER_MINUTES, Event, Notebook, new_uid};
use crate::recurrence::RepeatRule;
use crate::store::Store;

pub const BACKUP_VERSION: &str = "1.0";

const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TIME_FORMAT: &str = "%H:%M";

/// File name for a backup taken at `now`.
pub fn default_file_name(now: NaiveDateTime) -> String {
    format!("daymark_backup_{}.json", now.format("%Y%m%d_%H%M%S"))
}

fn format_stamp(moment: NaiveDateTime) -> String {
    moment.format(STAMP_FORMAT).to_string()
}

fn parse_stamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, STAMP_FORMAT).ok().or_else(|| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .map(|d| d.and_time(NaiveTime::MIN))
    })
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColor {
    Hex(String),
    Argb(i64),
}

impl From<RawColor> for String {
    fn from(raw: RawColor) -> Self {
        match raw {
            RawColor::Hex(s) => s,
            RawColor::Argb(v) => format!("#{:06X}", v & 0xFF_FFFF),
        }
    }
}

fn color<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    RawColor::deserialize(d).map(String::from)
}

fn optional_color<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawColor>::deserialize(d)?.map(String::from))
}

fn default_white() -> String {
    "#FFFFFF".to_string()
}

fn default_black() -> String {
    "#000000".to_string()
}

fn default_reminder_minutes() -> i64 {
    DEFAULT_REMINDER_MINUTES
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupEvent {
    #[serde(default)]
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    pub category_id: u64,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default, deserialize_with = "optional_color")]
    pub background_color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_white", deserialize_with = "color")]
    pub card_background_color: String,
    #[serde(default = "default_black", deserialize_with = "color")]
    pub text_color: String,
    #[serde(default)]
    pub reminder_enabled: bool,
    #[serde(default = "default_reminder_minutes")]
    pub reminder_minutes: i64,
    #[serde(default)]
    pub is_counting_up: bool,
    #[serde(default)]
    pub repeat_type: RepeatRule,
    #[serde(default)]
    pub is_lunar_calendar: bool,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub precise_time: Option<String>,
    #[serde(default)]
    pub plus_one_day: bool,
    #[serde(default, deserialize_with = "optional_color")]
    pub highlight_color: Option<String>,
    #[serde(default)]
    pub notebook_id: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl From<&Event> for BackupEvent {
    fn from(event: &Event) -> Self {
        BackupEvent {
            id: event.id,
            title: event.title.clone(),
            description: event.description.clone(),
            date: format_stamp(event.date.and_time(NaiveTime::MIN)),
            category_id: event.category_id,
            is_pinned: event.pinned,
            is_archived: event.archived,
            is_locked: event.locked,
            background_color: event.background_color.clone(),
            icon: event.icon.clone(),
            card_background_color: event.card_background_color.clone(),
            text_color: event.text_color.clone(),
            reminder_enabled: event.reminder_enabled,
            reminder_minutes: event.reminder_minutes,
            is_counting_up: event.counting_up,
            repeat_type: event.repeat,
            is_lunar_calendar: event.lunar,
            end_date: event.end_date.map(|d| format_stamp(d.and_time(NaiveTime::MIN))),
            precise_time: event.precise_time.map(|t| t.format(TIME_FORMAT).to_string()),
            plus_one_day: event.plus_one_day,
            highlight_color: event.highlight_color.clone(),
            notebook_id: event.notebook_id,
            created_at: Some(format_stamp(event.created_at.naive_utc())),
            updated_at: Some(format_stamp(event.updated_at.naive_utc())),
        }
    }
}

impl BackupEvent {
    /// Convert back into an event with no id and a fresh uid.
    ///
    /// Category and notebook ids are copied as-is; the caller remaps them.
    pub fn into_event(self) -> DaymarkResult<Event> {
        let date = parse_stamp(&self.date)
            .ok_or_else(|| DaymarkError::Serialization(format!("Invalid date '{}'", self.date)))?
            .date();
        let now = Utc::now();
        let stamp = |s: &Option<String>| {
            s.as_deref()
                .and_then(parse_stamp)
                .map(|dt| dt.and_utc())
                .unwrap_or(now)
        };

        Ok(Event {
            id: 0,
            uid: new_uid(),
            title: self.title,
            description: self.description,
            date,
            category_id: self.category_id,
            pinned: self.is_pinned,
            archived: self.is_archived,
            locked: self.is_locked,
            background_color: self.background_color,
            icon: self.icon,
            card_background_color: self.card_background_color,
            text_color: self.text_color,
            highlight_color: self.highlight_color,
            reminder_enabled: self.reminder_enabled,
            reminder_minutes: self.reminder_minutes,
            counting_up: self.is_counting_up,
            repeat: self.repeat_type,
            lunar: self.is_lunar_calendar,
            end_date: self.end_date.as_deref().and_then(parse_stamp).map(|dt| dt.date()),
            precise_time: self.precise_time.as_deref().and_then(parse_time),
            plus_one_day: self.plus_one_day,
            notebook_id: self.notebook_id,
            created_at: stamp(&self.created_at),
            updated_at: stamp(&self.updated_at),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupCategory {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(deserialize_with = "color")]
    pub color: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub is_default: bool,
}

impl From<&Category> for BackupCategory {
    fn from(category: &Category) -> Self {
        BackupCategory {
            id: category.id,
            name: category.name.clone(),
            color: category.color.clone(),
            icon: category.icon.clone(),
            is_default: category.is_default,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupNotebook {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "optional_color")]
    pub color: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl From<&Notebook> for BackupNotebook {
    fn from(notebook: &Notebook) -> Self {
        BackupNotebook {
            id: notebook.id,
            name: notebook.name.clone(),
            icon: Some(notebook.icon.clone()),
            color: Some(notebook.color.clone()),
            cover_image: notebook.cover_image.clone(),
            hidden: notebook.hidden,
            sort_order: notebook.sort_order,
        }
    }
}

impl BackupNotebook {
    fn into_notebook(self) -> Notebook {
        let mut notebook = Notebook::new(self.name);
        if let Some(icon) = self.icon {
            notebook.icon = icon;
        }
        if let Some(color) = self.color {
            notebook.color = color;
        }
        notebook.cover_image = self.cover_image;
        notebook.hidden = self.hidden;
        notebook.sort_order = self.sort_order;
        notebook
    }
}

/// A full backup as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub version: String,
    pub export_date: String,
    pub events: Vec<BackupEvent>,
    pub categories: Vec<BackupCategory>,
    #[serde(default)]
    pub notebooks: Vec<BackupNotebook>,
}

impl BackupDocument {
    pub fn to_json(&self) -> DaymarkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Snapshot every event (active and archived), category and notebook.
pub fn export(store: &Store, now: NaiveDateTime) -> BackupDocument {
    BackupDocument {
        version: BACKUP_VERSION.to_string(),
        export_date: format_stamp(now),
        events: store.events().iter().map(BackupEvent::from).collect(),
        categories: store.categories().iter().map(BackupCategory::from).collect(),
        notebooks: store
            .notebooks()
            .into_iter()
            .map(BackupNotebook::from)
            .collect(),
    }
}

/// What an import did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub events_imported: usize,
    pub events_skipped: usize,
    pub categories_imported: usize,
    pub notebooks_imported: usize,
}

/// Events are read loosely so one malformed entry does not sink the import.
#[derive(Deserialize)]
struct RawBackup {
    version: String,
    #[serde(default)]
    events: Vec<serde_json::Value>,
    #[serde(default)]
    categories: Vec<BackupCategory>,
    #[serde(default)]
    notebooks: Vec<BackupNotebook>,
}

/// Merge a backup into the store.
///
/// Categories and notebooks are matched by name; unknown ones are created.
/// Events get fresh ids, and events whose category cannot be resolved land in
/// the first default category.
pub fn import(store: &mut Store, json: &str) -> DaymarkResult<ImportSummary> {
    let raw: RawBackup = serde_json::from_str(json)?;
    if raw.version != BACKUP_VERSION {
        return Err(DaymarkError::UnsupportedBackupVersion(raw.version));
    }

    let mut summary = ImportSummary::default();

    let mut category_ids = HashMap::new();
    for backup in raw.categories {
        let id = match store.category_by_name(&backup.name) {
            Some(existing) => existing.id,
            None => {
                let mut category = Category::custom(backup.name, backup.color);
                if !backup.icon.is_empty() {
                    category.icon = backup.icon;
                }
                summary.categories_imported += 1;
                store.insert_category(category)?
            }
        };
        category_ids.insert(backup.id, id);
    }

    let mut notebook_ids = HashMap::new();
    for backup in raw.notebooks {
        let old_id = backup.id;
        let id = match store.notebook_by_name(&backup.name) {
            Some(existing) => existing.id,
            None => {
                summary.notebooks_imported += 1;
                store.insert_notebook(backup.into_notebook())?
            }
        };
        notebook_ids.insert(old_id, id);
    }

    let fallback_category = store
        .categories()
        .iter()
        .find(|c| c.is_default)
        .or_else(|| store.categories().first())
        .map(|c| c.id)
        .ok_or(DaymarkError::CategoryNotFound(0))?;

    for value in raw.events {
        let event = serde_json::from_value::<BackupEvent>(value)
            .map_err(DaymarkError::from)
            .and_then(BackupEvent::into_event);

        let mut event = match event {
            Ok(event) => event,
            Err(e) => {
                warn!("Skipping malformed backup event: {}", e);
                summary.events_skipped += 1;
                continue;
            }
        };

        event.category_id = category_ids
            .get(&event.category_id)
            .copied()
            .unwrap_or(fallback_category);
        event.notebook_id = event
            .notebook_id
            .and_then(|id| notebook_ids.get(&id).copied());

        store.insert_event(event)?;
        summary.events_imported += 1;
    }

    debug!(?summary, "imported backup");
    Ok(summary)
}
