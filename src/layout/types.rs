use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// One interval as seen by the clusterer and packer. `index` points back
/// into the caller's event slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<T> {
    pub index: usize,
    pub start: T,
    pub end: T,
}

impl<T: Ord + Copy> Span<T> {
    pub fn new(index: usize, start: T, end: T) -> Self {
        Self { index, start, end }
    }

    pub fn overlaps(&self, other: &Span<T>) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A maximal run of transitively overlapping spans, in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster<T> {
    pub spans: Vec<Span<T>>,
    /// Latest end of any member.
    pub end: T,
}

impl<T> Cluster<T> {
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Column assignment for one cluster; `columns[i]` belongs to `spans[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedCluster {
    pub columns: Vec<usize>,
    pub column_count: usize,
}

#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

/// Final placement of one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRect {
    pub id: String,
    pub index: usize,
    pub cluster: usize,
    pub column: usize,
    pub column_count: usize,
    pub top: f32,
    pub bottom: f32,
    pub x: f32,
    pub width: f32,
    /// Column slot before the horizontal event inset is taken off.
    pub slot_x: f32,
    pub slot_width: f32,
    pub start_hour: f32,
    pub end_hour: f32,
}

impl EventRect {
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourMark {
    pub hour: u32,
    pub y: f32,
    pub label: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowIndicator {
    pub time: NaiveTime,
    pub y: f32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub width: f32,
    pub height: f32,
    /// Rectangles in input order of the events that intersect the day.
    pub rects: Vec<EventRect>,
    pub cluster_count: usize,
    pub hours: Vec<HourMark>,
    pub now: Option<NowIndicator>,
}

impl DayLayout {
    pub fn rect(&self, id: &str) -> Option<&EventRect> {
        self.rects.iter().find(|rect| rect.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
