//! Open/closed evaluation for listed businesses and events.
//!
//! Every decision is made against an injected "now" instant in local
//! wall-clock time; nothing here reads the system clock. Malformed or
//! missing input collapses to `false` (closed) — the single intentional
//! exception is a business with no schedule at all, which counts as
//! always open.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One day's opening window, as raw `H:MM`/`HH:MM` strings.
///
/// Fields stay strings because they arrive straight from listing forms;
/// validation happens at evaluation time, not on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayWindow {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

/// Seven optional day windows, indexed 0 = Sunday .. 6 = Saturday.
///
/// Absence of a whole schedule (`Business::schedule == None`) means the
/// business never closes; absence of a single day's entry means it is
/// closed that day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySchedule(pub [Option<DayWindow>; 7]);

impl WeeklySchedule {
    fn window_for(&self, day: Weekday) -> Option<&DayWindow> {
        self.0[day.num_days_from_sunday() as usize].as_ref()
    }
}

/// A listed business: open hours per weekday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    #[serde(default)]
    pub schedule: Option<WeeklySchedule>,
    /// Raw location value as submitted; see [`crate::geo::normalize`].
    #[serde(default)]
    pub location: Option<Value>,
}

/// A listed event: one dated occurrence, optionally bounded by an end
/// instant, optionally marked as the first of a repeating series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    /// `YYYY-MM-DD`. Required for any open evaluation.
    #[serde(default)]
    pub start_date: String,
    /// `H:MM`/`HH:MM`. Required for any open evaluation.
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    /// Marks the stored date as the first of a repeating series. Only the
    /// stored occurrence is evaluated; future occurrences are not
    /// projected.
    #[serde(default)]
    pub repeats: bool,
    #[serde(default)]
    pub location: Option<Value>,
}

/// Parse an `H:MM`/`HH:MM` time-of-day into minutes since midnight.
///
/// Hour is 1–2 digits in 0..=23, minute exactly 2 digits in 0..=59.
/// Anything else — wrong digit counts, out-of-range components, stray
/// characters — is rejected.
pub fn parse_time_of_day(s: &str) -> Option<u32> {
    let (hour_part, minute_part) = s.split_once(':')?;
    if hour_part.is_empty() || hour_part.len() > 2 || minute_part.len() != 2 {
        return None;
    }
    if !hour_part.bytes().all(|b| b.is_ascii_digit())
        || !minute_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let hour: u32 = hour_part.parse().ok()?;
    let minute: u32 = minute_part.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn minutes_of(now: NaiveDateTime) -> u32 {
    now.hour() * 60 + now.minute()
}

fn time_from_minutes(minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN)
}

/// Whether a business is open at `now`.
///
/// No schedule at all → open. A missing, blank, or malformed window for
/// `now`'s weekday → closed. A window whose end clock value is less than
/// its start crosses midnight and matches `now >= start || now <= end`;
/// otherwise both bounds are inclusive.
pub fn is_business_open(business: &Business, now: NaiveDateTime) -> bool {
    let schedule = match &business.schedule {
        Some(schedule) => schedule,
        None => return true,
    };
    let window = match schedule.window_for(now.weekday()) {
        Some(window) => window,
        None => return false,
    };
    if window.start.trim().is_empty() || window.end.trim().is_empty() {
        return false;
    }
    let (start, end) = match (
        parse_time_of_day(&window.start),
        parse_time_of_day(&window.end),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => return false,
    };

    let now_minutes = minutes_of(now);
    if end < start {
        // Overnight window, e.g. 22:00–06:00.
        now_minutes >= start || now_minutes <= end
    } else {
        start <= now_minutes && now_minutes <= end
    }
}

/// Whether an event is open at `now`.
///
/// With a well-formed end date and end time the comparison runs between
/// absolute instants and may span several calendar days. End fields that
/// are present but malformed close the event. Without an end instant the
/// stored occurrence alone governs — repeating or not — and the event
/// stays open from its start time until the date rolls over.
pub fn is_event_open(event: &Event, now: NaiveDateTime) -> bool {
    let start_date = match parse_date(&event.start_date) {
        Some(date) => date,
        None => return false,
    };
    let start_minutes = match parse_time_of_day(&event.start_time) {
        Some(minutes) => minutes,
        None => return false,
    };

    if let (Some(end_date), Some(end_time)) = (&event.end_date, &event.end_time) {
        let end = match (parse_date(end_date), parse_time_of_day(end_time)) {
            (Some(date), Some(minutes)) => date.and_time(time_from_minutes(minutes)),
            _ => return false,
        };
        let start = start_date.and_time(time_from_minutes(start_minutes));
        return start <= now && now <= end;
    }

    now.date() == start_date && minutes_of(now) >= start_minutes
}
