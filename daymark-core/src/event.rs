//! Events, categories and notebooks.
//!
//! These are plain records owned by the store. Everything the date engine
//! needs from an event is exposed through [`EventMoment`]; the rest of the
//! fields are presentation and bookkeeping.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date_math::DayOffset;
use crate::display::{self, Urgency};
use crate::lunar::{self, LunarDate};
use crate::recurrence::{self, RepeatRule};

pub const DEFAULT_REMINDER_MINUTES: i64 = 1440;

fn default_reminder_minutes() -> i64 {
    DEFAULT_REMINDER_MINUTES
}

fn default_card_background() -> String {
    "#FFFFFF".to_string()
}

fn default_text_color() -> String {
    "#000000".to_string()
}

/// Generate a fresh iCalendar-style UID.
pub fn new_uid() -> String {
    format!("{}@daymark", uuid::Uuid::new_v4())
}

/// A dated event being counted down to (or up from).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Store-assigned id, 0 until inserted
    #[serde(default)]
    pub id: u64,
    /// Stable identifier used for iCalendar export
    #[serde(default = "new_uid")]
    pub uid: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Target date (always the canonical solar date)
    pub date: NaiveDate,
    pub category_id: u64,

    // Flags
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub archived: bool,
    /// Hidden behind the passcode gate in the mobile app
    #[serde(default)]
    pub locked: bool,

    // Appearance
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_card_background")]
    pub card_background_color: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default)]
    pub highlight_color: Option<String>,

    // Reminders
    #[serde(default)]
    pub reminder_enabled: bool,
    /// Minutes before the event moment to fire
    #[serde(default = "default_reminder_minutes")]
    pub reminder_minutes: i64,

    // Date semantics
    /// Counting up from a past date rather than down to a future one.
    /// Informational; the offset sign already says which way it goes.
    #[serde(default)]
    pub counting_up: bool,
    #[serde(default)]
    pub repeat: RepeatRule,
    /// Entered and shown as a lunar date
    #[serde(default)]
    pub lunar: bool,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub precise_time: Option<NaiveTime>,
    /// Count the start day itself when counting up
    #[serde(default)]
    pub plus_one_day: bool,

    #[serde(default)]
    pub notebook_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn new(title: impl Into<String>, date: NaiveDate, category_id: u64) -> Self {
        let now = Utc::now();
        Event {
            id: 0,
            uid: new_uid(),
            title: title.into(),
            description: String::new(),
            date,
            category_id,
            pinned: false,
            archived: false,
            locked: false,
            background_color: None,
            icon: None,
            card_background_color: default_card_background(),
            text_color: default_text_color(),
            highlight_color: None,
            reminder_enabled: false,
            reminder_minutes: DEFAULT_REMINDER_MINUTES,
            counting_up: false,
            repeat: RepeatRule::None,
            lunar: false,
            end_date: None,
            precise_time: None,
            plus_one_day: false,
            notebook_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The part of this event the date engine works on.
    pub fn moment(&self) -> EventMoment {
        EventMoment {
            date: self.date,
            lunar: self.lunar,
            repeat: self.repeat,
            counting_up: self.counting_up,
            plus_one_day: self.plus_one_day,
        }
    }

    /// Local date and time the event happens at (midnight without a precise time).
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.precise_time.unwrap_or(NaiveTime::MIN))
    }

    pub fn offset(&self, today: NaiveDate) -> DayOffset {
        self.moment().offset(today)
    }

    /// Signed days from `today` to this event.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        self.offset(today).days()
    }

    pub fn display_text(&self, today: NaiveDate) -> String {
        display::display_text(self.days_until(today))
    }

    pub fn countdown_text(&self, today: NaiveDate) -> String {
        display::countdown_text(self.days_until(today))
    }

    pub fn urgency(&self, today: NaiveDate) -> Urgency {
        display::urgency(self.days_until(today))
    }

    pub fn lunar_date(&self) -> LunarDate {
        lunar::solar_to_lunar(self.date)
    }

    /// Date label honouring the lunar flag.
    pub fn date_label(&self) -> String {
        if self.lunar {
            format!("{} ({})", lunar::format_lunar_date(&self.lunar_date()), self.date)
        } else {
            self.date.to_string()
        }
    }

    /// A copy of this event moved to its next occurrence, if that lies after `now`.
    ///
    /// The copy has no id and a fresh uid; the original is left untouched.
    pub fn next_repeat(&self, now: NaiveDateTime) -> Option<Event> {
        let next = recurrence::next_occurrence(self.starts_at(), self.repeat, now)?;
        let stamp = Utc::now();

        Some(Event {
            id: 0,
            uid: new_uid(),
            date: next.date(),
            created_at: stamp,
            updated_at: stamp,
            ..self.clone()
        })
    }

    /// Case-insensitive substring match on title or description.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Sort events for display: pinned first, then soonest (most negative offset first).
pub fn sort_for_display(events: &mut [Event], today: NaiveDate) {
    events.sort_by_key(|e| (!e.pinned, e.days_until(today)));
}

/// The date-engine view of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMoment {
    pub date: NaiveDate,
    pub lunar: bool,
    pub repeat: RepeatRule,
    pub counting_up: bool,
    pub plus_one_day: bool,
}

impl EventMoment {
    pub fn offset(&self, today: NaiveDate) -> DayOffset {
        let offset = DayOffset::between(today, self.date);
        if self.plus_one_day {
            offset.including_start_day()
        } else {
            offset
        }
    }

    pub fn next_occurrence(&self, now: NaiveDateTime) -> Option<NaiveDate> {
        recurrence::next_occurrence_date(self.date, self.repeat, now)
    }
}

/// A category events are filed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    /// Hex colour, e.g. `#FF6B9D`
    pub color: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_custom: bool,
}

impl Category {
    pub fn custom(name: impl Into<String>, color: impl Into<String>) -> Self {
        Category {
            id: 0,
            name: name.into(),
            color: color.into(),
            icon: "calendar".to_string(),
            is_default: false,
            is_custom: true,
        }
    }

    /// Categories seeded into a fresh store.
    pub fn defaults() -> Vec<Category> {
        [
            ("Anniversary", "#FF6B9D", "calendar"),
            ("Work", "#4ECDC4", "agenda"),
            ("Life", "#45B7D1", "compass"),
        ]
        .into_iter()
        .map(|(name, color, icon)| Category {
            id: 0,
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
            is_default: true,
            is_custom: false,
        })
        .collect()
    }
}

/// A countdown notebook: a user-ordered collection of events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default = "default_notebook_icon")]
    pub icon: String,
    #[serde(default = "default_notebook_color")]
    pub color: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_notebook_icon() -> String {
    "📔".to_string()
}

fn default_notebook_color() -> String {
    "#4A90E2".to_string()
}

impl Notebook {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Notebook {
            id: 0,
            name: name.into(),
            icon: default_notebook_icon(),
            color: default_notebook_color(),
            cover_image: None,
            is_default: false,
            hidden: false,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn upcoming_event_texts() {
        let event = Event::new("New Year", date(2025, 1, 1), 1);
        let today = date(2024, 12, 25);
        assert_eq!(event.days_until(today), 7);
        assert_eq!(event.display_text(today), "7 days later");
        assert_eq!(event.urgency(today), Urgency::ThisWeek);
    }

    #[test]
    fn past_event_counts_up() {
        let today = date(2024, 6, 20);
        let event = Event::new("Moved in", date(2024, 6, 10), 1);
        assert!(event.offset(today).is_past());
        assert_eq!(event.countdown_text(today), "10 days have passed");
    }

    #[test]
    fn plus_one_day_counts_start_day() {
        let today = date(2024, 6, 20);
        let mut event = Event::new("Together", date(2024, 6, 10), 1);
        event.plus_one_day = true;
        assert_eq!(event.days_until(today), -11);
    }

    #[test]
    fn precise_time_sets_start() {
        let mut event = Event::new("Flight", date(2024, 7, 1), 1);
        event.precise_time = NaiveTime::from_hms_opt(14, 30, 0);
        assert_eq!(
            event.starts_at(),
            date(2024, 7, 1).and_hms_opt(14, 30, 0).unwrap()
        );
    }

    #[test]
    fn next_repeat_copies_with_new_identity() {
        let mut event = Event::new("Birthday", date(2024, 3, 5), 1);
        event.id = 7;
        event.repeat = RepeatRule::Yearly;
        event.reminder_enabled = true;

        let now = date(2024, 3, 1).and_hms_opt(0, 0, 0).unwrap();
        let next = event.next_repeat(now).unwrap();

        assert_eq!(next.date, date(2025, 3, 5));
        assert_eq!(next.id, 0);
        assert_ne!(next.uid, event.uid);
        assert!(next.reminder_enabled);
        assert_eq!(event.date, date(2024, 3, 5));
    }

    #[test]
    fn next_repeat_none_without_rule() {
        let event = Event::new("Once", date(2024, 3, 5), 1);
        let now = date(2024, 3, 1).and_hms_opt(0, 0, 0).unwrap();
        assert!(event.next_repeat(now).is_none());
    }

    #[test]
    fn sorts_pinned_first_then_soonest() {
        let today = date(2024, 1, 1);
        let mut far = Event::new("far", date(2024, 12, 1), 1);
        far.pinned = true;
        let near = Event::new("near", date(2024, 1, 3), 1);
        let past = Event::new("past", date(2023, 12, 1), 1);

        let mut events = vec![near, past, far];
        sort_for_display(&mut events, today);

        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["far", "past", "near"]);
    }

    #[test]
    fn matches_title_or_description() {
        let mut event = Event::new("Wedding Anniversary", date(2024, 1, 1), 1);
        event.description = "Book the restaurant".to_string();
        assert!(event.matches("wedding"));
        assert!(event.matches("RESTAURANT"));
        assert!(!event.matches("birthday"));
    }

    #[test]
    fn lunar_label_includes_solar_date() {
        let mut event = Event::new("Spring Festival", date(2024, 2, 10), 1);
        event.lunar = true;
        assert_eq!(event.date_label(), "2024年正月初一 (2024-02-10)");
    }

    #[test]
    fn three_default_categories() {
        let defaults = Category::defaults();
        assert_eq!(defaults.len(), 3);
        assert!(defaults.iter().all(|c| c.is_default && !c.is_custom));
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{
            "title": "Minimal",
            "date": "2024-05-01",
            "category_id": 2,
            "repeat": "weekly",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.reminder_minutes, DEFAULT_REMINDER_MINUTES);
        assert_eq!(event.repeat, RepeatRule::Weekly);
        assert!(event.uid.ends_with("@daymark"));
    }
}
