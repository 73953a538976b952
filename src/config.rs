use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClockStyle {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

/// Geometry of the day timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Vertical distance between two hour lines.
    pub row_height: f32,
    /// Space above the 00:00 line and below the 24:00 line.
    pub top_inset: f32,
    /// Width of the hour-label gutter; event columns start here.
    pub left_inset: f32,
    /// Gap kept on the right of every event box.
    pub horizontal_event_inset: f32,
    pub min_event_height: f32,
    pub clock: ClockStyle,
    pub snap_minutes: u32,
    pub new_event_minutes: u32,
    pub label_line_height: f32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            row_height: 45.0,
            top_inset: 10.0,
            left_inset: 53.0,
            horizontal_event_inset: 3.0,
            min_event_height: 12.0,
            clock: ClockStyle::TwentyFourHour,
            snap_minutes: 30,
            new_event_minutes: 60,
            label_line_height: 1.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 375.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub timeline: TimelineConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::light();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            timeline: TimelineConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("snapMinutes must divide 60 (got {0})")]
    InvalidSnap(u32),
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
}

impl Config {
    /// Rejects geometry the layout pass cannot use. The layout itself never
    /// validates; this runs where configuration enters the program.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timeline;
        positive("rowHeight", t.row_height)?;
        positive("leftInset", t.left_inset)?;
        positive("width", self.render.width)?;
        positive("fontSize", self.theme.font_size)?;
        positive("labelLineHeight", t.label_line_height)?;
        non_negative("topInset", t.top_inset)?;
        non_negative("horizontalEventInset", t.horizontal_event_inset)?;
        non_negative("minEventHeight", t.min_event_height)?;
        if t.snap_minutes == 0 || t.snap_minutes > 60 || 60 % t.snap_minutes != 0 {
            return Err(ConfigError::InvalidSnap(t.snap_minutes));
        }
        if t.new_event_minutes == 0 {
            return Err(ConfigError::NotPositive {
                field: "newEventMinutes",
                value: 0.0,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    time_color: Option<String>,
    line_color: Option<String>,
    now_color: Option<String>,
    event_text_color: Option<String>,
    event_palette: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TimelineConfigFile {
    row_height: Option<f32>,
    top_inset: Option<f32>,
    left_inset: Option<f32>,
    horizontal_event_inset: Option<f32>,
    min_event_height: Option<f32>,
    clock: Option<ClockStyle>,
    snap_minutes: Option<u32>,
    new_event_minutes: Option<u32>,
    label_line_height: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    timeline: Option<TimelineConfigFile>,
    width: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Parses a JSON (or JSON5) configuration document over the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    if let Some(name) = parsed.theme.as_deref() {
        config.theme =
            Theme::by_name(name).ok_or_else(|| ConfigError::UnknownTheme(name.to_string()))?;
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.time_color {
            config.theme.time_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.now_color {
            config.theme.now_color = v;
        }
        if let Some(v) = vars.event_text_color {
            config.theme.event_text_color = v;
        }
        if let Some(v) = vars.event_palette {
            config.theme.event_palette = v;
        }
    }

    if let Some(timeline) = parsed.timeline {
        let t = &mut config.timeline;
        if let Some(v) = timeline.row_height {
            t.row_height = v;
        }
        if let Some(v) = timeline.top_inset {
            t.top_inset = v;
        }
        if let Some(v) = timeline.left_inset {
            t.left_inset = v;
        }
        if let Some(v) = timeline.horizontal_event_inset {
            t.horizontal_event_inset = v;
        }
        if let Some(v) = timeline.min_event_height {
            t.min_event_height = v;
        }
        if let Some(v) = timeline.clock {
            t.clock = v;
        }
        if let Some(v) = timeline.snap_minutes {
            t.snap_minutes = v;
        }
        if let Some(v) = timeline.new_event_minutes {
            t.new_event_minutes = v;
        }
        if let Some(v) = timeline.label_line_height {
            t.label_line_height = v;
        }
    }

    if let Some(width) = parsed.width {
        config.render.width = width;
    }
    config.render.background = config.theme.background.clone();

    config.validate()?;
    Ok(config)
}
