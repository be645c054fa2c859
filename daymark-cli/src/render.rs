//! Terminal rendering for daymark types.
//!
//! Extension traits that add colored output to daymark-core types using
//! owo_colors.

use chrono::NaiveDate;
use daymark_core::calculator::Direction;
use daymark_core::display::Urgency;
use daymark_core::event::{Category, Event, Notebook};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

/// Colorize text according to its urgency tier
pub fn colorize_urgency(urgency: Urgency, text: &str) -> String {
    match urgency {
        Urgency::Past => text.dimmed().to_string(),
        Urgency::Today => text.green().bold().to_string(),
        Urgency::Soon => text.yellow().to_string(),
        Urgency::ThisWeek => text.blue().to_string(),
        Urgency::Future => text.magenta().to_string(),
    }
}

impl Render for Category {
    fn render(&self) -> String {
        let marker = if self.is_default { " (default)" } else { "" };
        format!("{:>3}  {} {}{}", self.id, self.name, self.color.dimmed(), marker.dimmed())
    }
}

impl Render for Notebook {
    fn render(&self) -> String {
        format!("{:>3}  {} {}", self.id, self.icon, self.name)
    }
}

impl Render for Direction {
    fn render(&self) -> String {
        match self {
            Direction::Forward => "later".to_string(),
            Direction::Backward => "earlier".to_string(),
            Direction::Same => "same day".to_string(),
        }
    }
}

/// Rendering that depends on what day it is.
pub trait RenderOn {
    fn render_on(&self, today: NaiveDate) -> String;
}

impl RenderOn for Event {
    /// One list row: id, title, offset and date.
    fn render_on(&self, today: NaiveDate) -> String {
        let mut markers = String::new();
        if self.pinned {
            markers.push_str("📌 ");
        }
        if self.locked {
            markers.push_str("🔒 ");
        }
        if self.repeat.is_repeating() {
            markers.push_str("↻ ");
        }

        let offset = colorize_urgency(self.urgency(today), &self.display_text(today));

        format!(
            "{:>4}  {}{}  {}  {}",
            self.id.dimmed(),
            markers,
            self.title,
            offset,
            self.date_label().dimmed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_contains_title_offset_and_markers() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        let mut event = Event::new("New Year", NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 1);
        event.id = 3;
        event.pinned = true;

        let row = event.render_on(today);
        assert!(row.contains("New Year"));
        assert!(row.contains("7 days later"));
        assert!(row.contains("📌"));
        assert!(row.contains("2025-01-01"));
    }

    #[test]
    fn direction_words() {
        assert_eq!(Direction::Backward.render(), "earlier");
        assert_eq!(Direction::Same.render(), "same day");
    }
}
