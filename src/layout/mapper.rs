use chrono::NaiveTime;

use crate::calendar::time_hours;
use crate::config::TimelineConfig;

const SECONDS_PER_DAY: u32 = 24 * 3600;

/// Maps hours since local midnight to a vertical offset and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeMapper {
    pub row_height: f32,
    pub top_inset: f32,
}

impl TimeMapper {
    pub fn new(row_height: f32, top_inset: f32) -> Self {
        Self {
            row_height,
            top_inset,
        }
    }

    pub fn from_config(config: &TimelineConfig) -> Self {
        Self::new(config.row_height, config.top_inset)
    }

    /// `hours` is clamped to `[0, 24]`.
    pub fn position_of(&self, hours: f32) -> f32 {
        self.top_inset + hours.clamp(0.0, 24.0) * self.row_height
    }

    pub fn position_of_time(&self, time: NaiveTime) -> f32 {
        self.position_of(time_hours(time))
    }

    pub fn hours_at(&self, y: f32) -> f32 {
        ((y - self.top_inset) / self.row_height).clamp(0.0, 24.0)
    }

    /// Wall-clock time under `y`, rounded to the second and kept inside the
    /// day.
    pub fn time_at(&self, y: f32) -> NaiveTime {
        let seconds = (self.hours_at(y) * 3600.0).round() as u32;
        NaiveTime::from_num_seconds_from_midnight_opt(seconds.min(SECONDS_PER_DAY - 1), 0)
            .unwrap_or(NaiveTime::MIN)
    }

    pub fn full_height(&self) -> f32 {
        self.top_inset * 2.0 + self.row_height * 24.0
    }
}
