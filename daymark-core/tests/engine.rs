use chrono::{NaiveDate, NaiveTime};
use daymark_core::display::{Urgency, countdown_text, display_text, urgency};
use daymark_core::event::Event;
use daymark_core::lunar::{LunarDate, lunar_to_solar, solar_to_lunar, try_solar_to_lunar};
use daymark_core::recurrence::{RepeatRule, next_occurrence};
use daymark_core::{days_between, days_between_at};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn offsets_are_antisymmetric() {
    let pairs = [
        (date(2024, 1, 1), date(2024, 1, 1)),
        (date(2023, 12, 31), date(2024, 3, 1)),
        (date(2000, 2, 29), date(2100, 2, 28)),
    ];
    for (a, b) in pairs {
        assert_eq!(days_between(a, b), -days_between(b, a));
    }
    assert_eq!(days_between(date(2024, 5, 5), date(2024, 5, 5)), 0);
}

#[test]
fn offsets_ignore_time_of_day() {
    let late = date(2024, 3, 1).and_hms_opt(23, 59, 59).unwrap();
    let early = date(2024, 3, 2).and_hms_opt(0, 0, 1).unwrap();
    assert_eq!(days_between_at(late, early), 1);

    let morning = date(2024, 3, 1).and_time(NaiveTime::MIN);
    assert_eq!(days_between_at(morning, late), 0);
}

#[test]
fn display_wording() {
    assert_eq!(display_text(0), "today");
    assert_eq!(display_text(1), "tomorrow");
    assert_eq!(display_text(-5), "5 days ago");
    assert_eq!(countdown_text(0), "it's today");
}

#[test]
fn week_away_event() {
    let today = date(2024, 12, 25);
    let event = Event::new("New Year", date(2025, 1, 1), 1);

    assert_eq!(event.days_until(today), 7);
    assert_eq!(event.display_text(today), "7 days later");
    assert_eq!(event.urgency(today), Urgency::ThisWeek);
}

#[test]
fn ten_days_past_event() {
    let today = date(2024, 6, 20);
    let event = Event::new("Moved in", date(2024, 6, 10), 1);

    assert!(event.offset(today).is_past());
    assert_eq!(event.countdown_text(today), "10 days have passed");
    assert_eq!(urgency(-10), Urgency::Past);
}

#[test]
fn lunar_anchor_maps_to_spring_festival() {
    assert_eq!(lunar_to_solar(2024, 1, 1), date(2024, 2, 10));
    assert_eq!(solar_to_lunar(date(2024, 2, 10)), LunarDate::ANCHOR);
}

#[test]
fn lunar_round_trip_stays_in_range() {
    for (y, m, d) in [(2024, 1, 1), (2020, 6, 15), (2030, 12, 30), (1990, 0, 99), (2101, -3, 0)] {
        let lunar = solar_to_lunar(lunar_to_solar(y, m, d));
        assert!((1..=12).contains(&lunar.month()), "month out of range: {lunar:?}");
        assert!((1..=30).contains(&lunar.day()), "day out of range: {lunar:?}");
    }
}

#[test]
fn lunar_conversion_of_extreme_dates_does_not_panic() {
    let _ = solar_to_lunar(NaiveDate::MIN);
    let _ = solar_to_lunar(NaiveDate::MAX);
    assert!(try_solar_to_lunar(date(1900, 1, 1)).is_ok());
}

#[test]
fn yearly_repeat_keeps_month_and_day() {
    let start = date(2024, 3, 5).and_time(NaiveTime::MIN);
    let next = next_occurrence(start, RepeatRule::Yearly, start).unwrap();
    assert_eq!(next.date(), date(2025, 3, 5));
    assert!(next > start);
}

#[test]
fn yearly_repeat_from_leap_day_clamps() {
    let leap = date(2024, 2, 29).and_time(NaiveTime::MIN);
    let next = next_occurrence(leap, RepeatRule::Yearly, leap).unwrap();
    assert_eq!(next.date(), date(2025, 2, 28));
}

#[test]
fn no_repeat_has_no_next_occurrence() {
    let start = date(2024, 3, 5).and_time(NaiveTime::MIN);
    assert_eq!(next_occurrence(start, RepeatRule::None, start), None);
}
