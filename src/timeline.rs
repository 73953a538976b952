//! The day view's hold on its current layout.
//!
//! A relayout either swaps in a complete new `DayLayout` or leaves the
//! previous one in place; callers never observe a partial pass.

use chrono::{DateTime, Utc};

use crate::calendar::{CalendarError, DayWindow};
use crate::config::TimelineConfig;
use crate::ir::EventInterval;
use crate::layout::{DayLayout, compute_day_layout};

#[derive(Debug, Clone)]
pub struct DayTimeline {
    window: DayWindow,
    config: TimelineConfig,
    width: f32,
    now: Option<DateTime<Utc>>,
    layout: Option<DayLayout>,
}

impl DayTimeline {
    pub fn new(window: DayWindow, config: TimelineConfig, width: f32) -> Self {
        Self {
            window,
            config,
            width,
            now: None,
            layout: None,
        }
    }

    pub fn window(&self) -> &DayWindow {
        &self.window
    }

    pub fn layout(&self) -> Option<&DayLayout> {
        self.layout.as_ref()
    }

    /// Lays out a snapshot of the event source. `None` means the source could
    /// not provide one, and the previous layout stays.
    pub fn relayout<E: AsRef<EventInterval>>(&mut self, snapshot: Option<&[E]>) -> Option<&DayLayout> {
        let Some(events) = snapshot else {
            log::debug!("no event snapshot for {}, keeping previous layout", self.window.date);
            return self.layout.as_ref();
        };
        let mut layout = compute_day_layout(events, &self.window, &self.config, self.width);
        layout.refresh_now(self.now, &self.window, &self.config);
        self.layout = Some(layout);
        self.layout.as_ref()
    }

    /// Moves to another day. The old layout belongs to the old day and is
    /// dropped; the caller relayouts with the new day's events.
    pub fn move_to(&mut self, window: DayWindow) {
        if window != self.window {
            self.window = window;
            self.layout = None;
        }
    }

    pub fn next_day(&mut self) -> Result<(), CalendarError> {
        let next = self.window.next()?;
        self.move_to(next);
        Ok(())
    }

    pub fn previous_day(&mut self) -> Result<(), CalendarError> {
        let previous = self.window.previous()?;
        self.move_to(previous);
        Ok(())
    }

    /// New geometry invalidates the layout; the caller relayouts.
    pub fn resize(&mut self, width: f32) {
        if width != self.width {
            self.width = width;
            self.layout = None;
        }
    }

    pub fn set_config(&mut self, config: TimelineConfig) {
        self.config = config;
        self.layout = None;
    }

    /// Timer tick for the current-time line.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.now = Some(now);
        if let Some(layout) = self.layout.as_mut() {
            layout.refresh_now(self.now, &self.window, &self.config);
        }
    }
}
