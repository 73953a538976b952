use crate::calendar::DayWindow;
use crate::layout::{DayLayout, EventRect, HourMark, NowIndicator};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump<'a> {
    pub date: String,
    pub zone: String,
    pub day_start: String,
    pub day_end: String,
    pub width: f32,
    pub height: f32,
    pub cluster_count: usize,
    pub events: &'a [EventRect],
    pub hours: &'a [HourMark],
    pub now: Option<&'a NowIndicator>,
    /// Events shown outside the timeline, such as all-day events.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub all_day: Vec<String>,
}

impl<'a> LayoutDump<'a> {
    pub fn from_layout(layout: &'a DayLayout, window: &DayWindow) -> Self {
        LayoutDump {
            date: layout.date.to_string(),
            zone: window.zone.name().to_string(),
            day_start: window.start.to_rfc3339(),
            day_end: window.end.to_rfc3339(),
            width: layout.width,
            height: layout.height,
            cluster_count: layout.cluster_count,
            events: &layout.rects,
            hours: &layout.hours,
            now: layout.now.as_ref(),
            all_day: Vec::new(),
        }
    }

    pub fn with_all_day(mut self, ids: Vec<String>) -> Self {
        self.all_day = ids;
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn write_layout_dump(path: &Path, dump: &LayoutDump<'_>) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, dump)?;
    Ok(())
}
