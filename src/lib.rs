pub mod cache;
pub mod calendar;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod editing;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;
pub mod timeline;

pub use calendar::DayWindow;
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{ClockStyle, Config, ConfigError, TimelineConfig};
pub use ir::{Event, EventInterval, EventKind};
pub use layout::{DayLayout, EventRect, compute_day_layout};
pub use parser::parse_events;
pub use render::render_svg;
pub use theme::Theme;
pub use timeline::DayTimeline;

use chrono::{DateTime, NaiveDate, Utc};
use layout_dump::LayoutDump;

/// Everything needed to lay out and draw one day besides the events.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub timeline: TimelineConfig,
    pub width: f32,
    pub now: Option<DateTime<Utc>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            theme: config.theme.clone(),
            timeline: config.timeline.clone(),
            width: config.render.width,
            now: None,
        }
    }

    /// Checks the geometry with the same rules as a loaded config file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut config = Config {
            theme: self.theme.clone(),
            timeline: self.timeline.clone(),
            ..Config::default()
        };
        config.render.width = self.width;
        config.validate()
    }
}

/// A laid out day together with the events it was computed from.
#[derive(Debug, Clone)]
pub struct PreparedDay {
    pub window: DayWindow,
    pub events: Vec<Event>,
    pub all_day: Vec<String>,
    pub layout: DayLayout,
}

/// Validates `options`, parses `input`, drops all-day events and lays out
/// `date` in `zone`.
pub fn prepare_day(
    input: &str,
    date: NaiveDate,
    zone: &str,
    options: &RenderOptions,
) -> anyhow::Result<PreparedDay> {
    options.validate()?;
    let zone = calendar::parse_zone(zone)?;
    let window = DayWindow::new(date, zone)?;
    let (all_day, events): (Vec<Event>, Vec<Event>) = parser::parse_events(input, zone)?
        .into_iter()
        .partition(|event| event.all_day);
    if !all_day.is_empty() {
        log::info!("{} all-day event(s) kept off the timeline", all_day.len());
    }
    let mut layout = compute_day_layout(&events, &window, &options.timeline, options.width);
    layout.refresh_now(options.now, &window, &options.timeline);
    Ok(PreparedDay {
        window,
        events,
        all_day: all_day.iter().map(|event| event.id().to_string()).collect(),
        layout,
    })
}

pub fn render_day_with_options(
    input: &str,
    date: NaiveDate,
    zone: &str,
    options: &RenderOptions,
) -> anyhow::Result<String> {
    let day = prepare_day(input, date, zone, options)?;
    Ok(render_svg(&day.layout, &day.events, &options.theme, &options.timeline))
}

pub fn layout_day_with_options(
    input: &str,
    date: NaiveDate,
    zone: &str,
    options: &RenderOptions,
) -> anyhow::Result<String> {
    let day = prepare_day(input, date, zone, options)?;
    let dump = LayoutDump::from_layout(&day.layout, &day.window).with_all_day(day.all_day.clone());
    Ok(dump.to_json()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = r#"[
        {"id": "a", "start": "2024-05-01T09:00:00Z", "end": "2024-05-01T10:00:00Z", "title": "Workout"},
        {"id": "b", "start": "2024-05-01T09:30:00Z", "end": "2024-05-01T10:30:00Z", "title": "Standup"},
        {"id": "h", "start": "2024-05-01T00:00:00Z", "end": "2024-05-02T00:00:00Z", "title": "Holiday", "allDay": true}
    ]"#;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn prepare_day_splits_all_day_events() {
        let day = prepare_day(INPUT, date(), "UTC", &RenderOptions::default()).unwrap();
        assert_eq!(day.events.len(), 2);
        assert_eq!(day.all_day, vec!["h".to_string()]);
        assert_eq!(day.layout.rects.len(), 2);
        assert_eq!(day.layout.rects[1].column, 1);
    }

    #[test]
    fn layout_json_lists_all_day_ids() {
        let json = layout_day_with_options(INPUT, date(), "UTC", &RenderOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["allDay"][0], "h");
        assert_eq!(value["events"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn renders_events_with_malformed_colors() {
        let input = r##"[{"id": "x", "start": "2024-05-01T09:00:00Z", "end": "2024-05-01T10:00:00Z", "title": "Odd", "color": "#aébcd"}]"##;
        for theme in [Theme::light(), Theme::dark()] {
            let options = RenderOptions {
                theme,
                ..RenderOptions::default()
            };
            let svg = render_day_with_options(input, date(), "UTC", &options).unwrap();
            assert!(svg.contains("#aébcd"));
        }
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        let mut options = RenderOptions::default();
        options.timeline.row_height = 0.0;
        let err = layout_day_with_options(INPUT, date(), "UTC", &options).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::NotPositive {
                field: "rowHeight",
                value: 0.0
            })
        );

        let options = RenderOptions {
            width: -1.0,
            ..RenderOptions::default()
        };
        assert!(render_day_with_options(INPUT, date(), "UTC", &options).is_err());
    }

    #[test]
    fn unknown_zone_is_an_error() {
        let err = render_day_with_options(INPUT, date(), "Mars/Base", &RenderOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("Mars/Base"));
    }
}
