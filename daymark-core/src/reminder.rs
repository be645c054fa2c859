//! Reminder planning.
//!
//! Delivery is someone else's job: this module only works out when a reminder
//! should fire and what it should say, and hands that to a [`ReminderSink`].

use chrono::{NaiveDateTime, TimeDelta};

use crate::event::Event;

/// A reminder ready to be scheduled.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderPlan {
    /// Local time the reminder should fire at
    pub fire_at: NaiveDateTime,
    pub payload: ReminderPayload,
}

/// What the notification shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderPayload {
    pub event_id: u64,
    pub event_title: String,
    pub description: String,
    /// Whole days from planning time to the event, truncated toward zero
    pub days_until: i64,
}

impl ReminderPayload {
    pub fn title(&self) -> String {
        notification_title(self.days_until, &self.event_title)
    }

    pub fn text(&self) -> String {
        notification_text(self.days_until)
    }
}

/// Notification headline for an event `days_until` days away.
pub fn notification_title(days_until: i64, title: &str) -> String {
    match days_until {
        0 => format!("Today: {}", title),
        1 => format!("Tomorrow: {}", title),
        d if d > 0 => format!("In {} days: {}", d, title),
        -1 => format!("Yesterday: {}", title),
        d => format!("{} days ago: {}", d.unsigned_abs(), title),
    }
}

/// Notification body for an event `days_until` days away.
pub fn notification_text(days_until: i64) -> String {
    match days_until {
        0 => "Today is the day!".to_string(),
        d if d > 0 => format!("{} days to go", d),
        d => format!("{} days have passed", d.unsigned_abs()),
    }
}

/// Plan the reminder for one event.
///
/// Returns `None` when reminders are off, the event is archived, or the fire
/// time is not in the future.
pub fn plan_reminder(event: &Event, now: NaiveDateTime) -> Option<ReminderPlan> {
    if !event.reminder_enabled || event.archived {
        return None;
    }

    let starts_at = event.starts_at();
    let lead = TimeDelta::try_minutes(event.reminder_minutes)?;
    let fire_at = starts_at.checked_sub_signed(lead)?;

    if fire_at <= now {
        return None;
    }

    Some(ReminderPlan {
        fire_at,
        payload: ReminderPayload {
            event_id: event.id,
            event_title: event.title.clone(),
            description: event.description.clone(),
            days_until: (starts_at - now).num_days(),
        },
    })
}

/// Plan reminders for every eligible event, earliest first.
pub fn plan_reminders<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    now: NaiveDateTime,
) -> Vec<ReminderPlan> {
    let mut plans: Vec<_> = events
        .into_iter()
        .filter_map(|event| plan_reminder(event, now))
        .collect();
    plans.sort_by_key(|plan| plan.fire_at);
    plans
}

/// Where planned reminders go.
pub trait ReminderSink {
    fn schedule(&mut self, plan: &ReminderPlan);
    fn cancel(&mut self, event_id: u64);
}

/// Cancel every event's reminder, then schedule whatever is still due.
///
/// Returns the number of reminders scheduled.
pub fn reschedule_all<S: ReminderSink>(sink: &mut S, events: &[Event], now: NaiveDateTime) -> usize {
    for event in events {
        sink.cancel(event.id);
    }

    let plans = plan_reminders(events, now);
    for plan in &plans {
        sink.schedule(plan);
    }
    plans.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reminding(title: &str, on: NaiveDate) -> Event {
        let mut event = Event::new(title, on, 1);
        event.reminder_enabled = true;
        event
    }

    #[derive(Default)]
    struct Recorder {
        scheduled: Vec<u64>,
        cancelled: Vec<u64>,
    }

    impl ReminderSink for Recorder {
        fn schedule(&mut self, plan: &ReminderPlan) {
            self.scheduled.push(plan.payload.event_id);
        }

        fn cancel(&mut self, event_id: u64) {
            self.cancelled.push(event_id);
        }
    }

    #[test]
    fn fires_lead_time_before_start() {
        let mut event = reminding("Exam", date(2024, 6, 10));
        event.precise_time = NaiveTime::from_hms_opt(9, 0, 0);
        event.reminder_minutes = 60;

        let now = date(2024, 6, 1).and_hms_opt(12, 0, 0).unwrap();
        let plan = plan_reminder(&event, now).unwrap();

        assert_eq!(plan.fire_at, date(2024, 6, 10).and_hms_opt(8, 0, 0).unwrap());
        assert_eq!(plan.payload.days_until, 8);
        assert_eq!(plan.payload.title(), "In 8 days: Exam");
        assert_eq!(plan.payload.text(), "8 days to go");
    }

    #[test]
    fn skips_disabled_archived_and_overdue() {
        let now = date(2024, 6, 1).and_hms_opt(12, 0, 0).unwrap();

        let mut disabled = reminding("a", date(2024, 7, 1));
        disabled.reminder_enabled = false;
        assert!(plan_reminder(&disabled, now).is_none());

        let mut archived = reminding("b", date(2024, 7, 1));
        archived.archived = true;
        assert!(plan_reminder(&archived, now).is_none());

        // Default lead is one day, so midnight tomorrow fires today at midnight
        let overdue = reminding("c", date(2024, 6, 2));
        assert!(plan_reminder(&overdue, now).is_none());
    }

    #[test]
    fn titles_and_texts() {
        assert_eq!(notification_title(0, "X"), "Today: X");
        assert_eq!(notification_title(1, "X"), "Tomorrow: X");
        assert_eq!(notification_title(-1, "X"), "Yesterday: X");
        assert_eq!(notification_title(-3, "X"), "3 days ago: X");
        assert_eq!(notification_text(0), "Today is the day!");
        assert_eq!(notification_text(-2), "2 days have passed");
    }

    #[test]
    fn reschedule_cancels_everything_first() {
        let now = date(2024, 6, 1).and_hms_opt(0, 0, 0).unwrap();
        let mut later = reminding("later", date(2024, 9, 1));
        later.id = 2;
        let mut sooner = reminding("sooner", date(2024, 8, 1));
        sooner.id = 3;
        let mut silent = Event::new("silent", date(2024, 8, 1), 1);
        silent.id = 4;

        let mut sink = Recorder::default();
        let count = reschedule_all(&mut sink, &[later, sooner, silent], now);

        assert_eq!(count, 2);
        assert_eq!(sink.cancelled, vec![2, 3, 4]);
        assert_eq!(sink.scheduled, vec![3, 2]);
    }
}
