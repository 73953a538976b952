use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Capability of an event as seen by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[default]
    Fixed,
    Editable,
}

/// Which edge of an interval a resize gesture drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// The part of an event the layout engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInterval {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl EventInterval {
    pub fn new(id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            start,
            end,
        }
    }

    /// Duration, zero when the end precedes the start.
    pub fn duration(&self) -> Duration {
        (self.end - self.start).max(Duration::zero())
    }

    pub fn is_point(&self) -> bool {
        self.end <= self.start
    }

    /// Half-open overlap; touching intervals do not overlap.
    pub fn overlaps(&self, other: &EventInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Same duration, new start.
    pub fn moved_to(&self, start: DateTime<Utc>) -> Self {
        Self {
            id: self.id.clone(),
            start,
            end: start + self.duration(),
        }
    }

    /// Moves one edge to `at`. The opposite edge wins when they would cross.
    pub fn resized(&self, edge: Edge, at: DateTime<Utc>) -> Self {
        let (start, end) = match edge {
            Edge::Start => (at.min(self.end), self.end),
            Edge::End => (self.start, at.max(self.start)),
        };
        Self {
            id: self.id.clone(),
            start,
            end,
        }
    }
}

/// A calendar event as handed to the day view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(flatten)]
    pub interval: EventInterval,
    #[serde(default)]
    pub title: String,
    pub location: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub kind: EventKind,
    /// Opaque caller data, never inspected.
    pub payload: Option<serde_json::Value>,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            interval: EventInterval::new(id, start, end),
            title: title.into(),
            location: None,
            color: None,
            all_day: false,
            kind: EventKind::Fixed,
            payload: None,
        }
    }

    pub fn editable(mut self) -> Self {
        self.kind = EventKind::Editable;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.interval.id
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.interval.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.interval.end
    }

    pub fn is_editable(&self) -> bool {
        self.kind == EventKind::Editable
    }
}

impl AsRef<EventInterval> for Event {
    fn as_ref(&self) -> &EventInterval {
        &self.interval
    }
}

impl AsRef<Event> for Event {
    fn as_ref(&self) -> &Event {
        self
    }
}

impl AsRef<EventInterval> for EventInterval {
    fn as_ref(&self) -> &EventInterval {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, m, 0).unwrap()
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a = EventInterval::new("a", at(9, 0), at(10, 0));
        let b = EventInterval::new("b", at(10, 0), at(11, 0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn point_inside_interval_overlaps() {
        let a = EventInterval::new("a", at(8, 0), at(10, 0));
        let p = EventInterval::new("p", at(9, 0), at(9, 0));
        assert!(a.overlaps(&p));
        assert!(p.is_point());
    }

    #[test]
    fn move_keeps_duration() {
        let a = EventInterval::new("a", at(9, 0), at(10, 30));
        let moved = a.moved_to(at(13, 0));
        assert_eq!(moved.start, at(13, 0));
        assert_eq!(moved.end, at(14, 30));
        assert_eq!(moved.id, "a");
    }

    #[test]
    fn resize_never_inverts() {
        let a = EventInterval::new("a", at(9, 0), at(10, 0));
        let shrunk = a.resized(Edge::End, at(8, 0));
        assert_eq!(shrunk.end, shrunk.start);
        let grown = a.resized(Edge::Start, at(7, 45));
        assert_eq!(grown.start, at(7, 45));
        assert_eq!(grown.end, at(10, 0));
    }
}
