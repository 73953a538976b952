//! Move, resize and tap-to-create helpers.
//!
//! Every operation returns a new interval. Nothing here remembers that an
//! edit is in progress; the UI applies the result to its event source and
//! relayouts.

use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};
use thiserror::Error;

use crate::calendar::DayWindow;
use crate::config::TimelineConfig;
use crate::ir::{Edge, Event, EventInterval};
use crate::layout::TimeMapper;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("event {0} is not editable")]
    NotEditable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    MoveTo(DateTime<Utc>),
    Resize(Edge, DateTime<Utc>),
}

/// Applies an edit to an editable event and returns the edited copy.
pub fn edit(event: &Event, action: EditAction) -> Result<Event, EditError> {
    if !event.is_editable() {
        return Err(EditError::NotEditable(event.id().to_string()));
    }
    let interval = match action {
        EditAction::MoveTo(start) => event.interval.moved_to(start),
        EditAction::Resize(edge, at) => event.interval.resized(edge, at),
    };
    Ok(Event {
        interval,
        ..event.clone()
    })
}

impl Event {
    pub fn edit(&self, action: EditAction) -> Result<Event, EditError> {
        edit(self, action)
    }
}

/// Floors `time` to a multiple of `split_minutes` within its hour.
pub fn snap_down(time: NaiveTime, split_minutes: u32) -> NaiveTime {
    let split = split_minutes.clamp(1, 60);
    let minute = (time.minute() / split) * split;
    NaiveTime::from_hms_opt(time.hour(), minute, 0).unwrap_or(time)
}

/// The interval a tap at `y` proposes: it starts at the snapped time under
/// the finger and lasts the configured new-event duration.
pub fn proposed_interval(
    id: impl Into<String>,
    window: &DayWindow,
    config: &TimelineConfig,
    y: f32,
) -> EventInterval {
    let mapper = TimeMapper::from_config(config);
    let time = snap_down(mapper.time_at(y), config.snap_minutes);
    let start = window.at(time);
    EventInterval::new(
        id,
        start,
        start + Duration::minutes(config.new_event_minutes as i64),
    )
}

/// The instant under `y` on the displayed day, for drag targets.
pub fn instant_at(window: &DayWindow, config: &TimelineConfig, y: f32) -> DateTime<Utc> {
    let mapper = TimeMapper::from_config(config);
    window.at(snap_down(mapper.time_at(y), config.snap_minutes.min(15)))
}
