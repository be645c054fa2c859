//! Core types and date engine for daymark.
//!
//! This crate provides everything the `daymark` CLI builds on:
//! - `date_math`, `display`, `lunar` and `recurrence`: the pure date engine
//! - `event`: events, categories and notebooks
//! - `reminder` and `calculator`: derived views over events
//! - `store`, `backup`, `ics` and `config`: persistence and interchange

pub mod backup;
pub mod calculator;
pub mod config;
pub mod date_math;
pub mod display;
pub mod error;
pub mod event;
pub mod ics;
pub mod lunar;
pub mod recurrence;
pub mod reminder;
pub mod store;

pub use date_math::{DayOffset, days_between, days_between_at};
pub use display::{Urgency, countdown_text, display_text, urgency};
pub use error::{DaymarkError, DaymarkResult};
pub use event::{Category, Event, EventMoment, Notebook};
pub use lunar::{LunarDate, format_lunar_date, lunar_to_solar, solar_to_lunar};
pub use recurrence::{RepeatRule, next_occurrence};
