//! Event input: JSON/JSON5 documents and a line-based agenda format.
//!
//! Agenda lines look like
//!
//! ```text
//! # comment
//! 2024-05-01 09:00-10:00 Workout @ Tufteparken
//! 2024-05-01 23:30-01:00 Night shift
//! 2024-05-01 12:00 Reminder
//! ```
//!
//! An end before the start rolls over to the next day; a missing end makes a
//! point event.

use crate::calendar::resolve_local;
use crate::ir::{Event, EventInterval, EventKind};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

static AGENDA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4}-\d{2}-\d{2})\s+(\d{1,2}:\d{2})(?:\s*[-–]\s*(\d{1,2}:\d{2}))?\s+(.+?)(?:\s+@\s+(.+))?$",
    )
    .expect("agenda regex")
});

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid event document: {0}")]
    Document(#[from] json5::Error),
    #[error("event {index}: invalid timestamp '{value}'")]
    Timestamp { index: usize, value: String },
    #[error("event {index}: needs an end or durationMinutes")]
    MissingEnd { index: usize },
    #[error("line {line}: expected 'YYYY-MM-DD HH:MM[-HH:MM] Title [@ Location]'")]
    AgendaLine { line: usize },
    #[error("line {line}: invalid date or time")]
    AgendaTime { line: usize },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    id: Option<String>,
    start: String,
    end: Option<String>,
    duration_minutes: Option<i64>,
    #[serde(default)]
    title: String,
    location: Option<String>,
    color: Option<String>,
    #[serde(default)]
    all_day: bool,
    #[serde(default)]
    editable: bool,
    payload: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EventDocument {
    List(Vec<EventRecord>),
    Wrapped { events: Vec<EventRecord> },
}

/// Parses either format, picked by the first non-blank character.
pub fn parse_events(input: &str, zone: Tz) -> Result<Vec<Event>, ParseError> {
    match input.trim_start().chars().next() {
        Some('[') | Some('{') => parse_event_document(input, zone),
        _ => parse_agenda(input, zone),
    }
}

pub fn parse_event_document(input: &str, zone: Tz) -> Result<Vec<Event>, ParseError> {
    let records = match json5::from_str::<EventDocument>(input)? {
        EventDocument::List(records) => records,
        EventDocument::Wrapped { events } => events,
    };
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record_to_event(index, record, zone))
        .collect()
}

fn record_to_event(index: usize, record: EventRecord, zone: Tz) -> Result<Event, ParseError> {
    let start = parse_instant(&record.start, zone).ok_or_else(|| ParseError::Timestamp {
        index,
        value: record.start.clone(),
    })?;
    let end = match (&record.end, record.duration_minutes) {
        (Some(end), _) => parse_instant(end, zone).ok_or_else(|| ParseError::Timestamp {
            index,
            value: end.clone(),
        })?,
        (None, Some(minutes)) => start + Duration::minutes(minutes),
        (None, None) => return Err(ParseError::MissingEnd { index }),
    };
    Ok(Event {
        interval: EventInterval::new(record.id.unwrap_or_else(|| generated_id(index)), start, end),
        title: record.title,
        location: record.location,
        color: record.color,
        all_day: record.all_day,
        kind: if record.editable {
            EventKind::Editable
        } else {
            EventKind::Fixed
        },
        payload: record.payload,
    })
}

/// RFC 3339 with an offset, or a naive timestamp read in `zone`.
pub fn parse_instant(value: &str, zone: Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .and_then(|naive| resolve_local(zone, naive).ok())
}

pub fn parse_agenda(input: &str, zone: Tz) -> Result<Vec<Event>, ParseError> {
    let mut events = Vec::new();
    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let caps = AGENDA_RE
            .captures(line)
            .ok_or(ParseError::AgendaLine { line: line_no })?;
        let time_err = || ParseError::AgendaTime { line: line_no };

        let date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").map_err(|_| time_err())?;
        let start_time = NaiveTime::parse_from_str(&caps[2], "%H:%M").map_err(|_| time_err())?;
        let start = resolve_local(zone, date.and_time(start_time)).map_err(|_| time_err())?;
        let end = match caps.get(3) {
            Some(end) => {
                let end_time =
                    NaiveTime::parse_from_str(end.as_str(), "%H:%M").map_err(|_| time_err())?;
                let end_date = if end_time < start_time {
                    date.succ_opt().ok_or_else(time_err)?
                } else {
                    date
                };
                resolve_local(zone, end_date.and_time(end_time)).map_err(|_| time_err())?
            }
            None => start,
        };

        let mut event = Event::new(generated_id(events.len()), start, end, caps[4].trim());
        event.location = caps.get(5).map(|m| m.as_str().trim().to_string());
        events.push(event);
    }
    Ok(events)
}

fn generated_id(index: usize) -> String {
    format!("evt-{}", index + 1)
}
