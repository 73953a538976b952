use chrono::NaiveDate;
use dayline::calendar::parse_date;
use dayline::config::{ClockStyle, Config};
use dayline::parser::parse_instant;
use dayline::theme::Theme;
use dayline::{RenderOptions, layout_day_with_options, render_day_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    width: Option<f32>,
    row_height: Option<f32>,
    twelve_hour: Option<bool>,
    now: Option<String>,
}

fn build_render_options(options: DayRenderOptions, zone: &str) -> Result<RenderOptions, String> {
    let mut config = Config::default();
    if let Some(name) = options.theme.as_deref() {
        config.theme = Theme::by_name(name).ok_or_else(|| format!("unknown theme '{name}'"))?;
    }
    if let Some(font_family) = options.font_family {
        config.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        config.theme.font_size = font_size;
    }
    if let Some(width) = options.width {
        config.render.width = width;
    }
    if let Some(row_height) = options.row_height {
        config.timeline.row_height = row_height;
    }
    if options.twelve_hour == Some(true) {
        config.timeline.clock = ClockStyle::TwelveHour;
    }
    config.validate().map_err(|error| error.to_string())?;

    let mut render_options = RenderOptions::from_config(&config);
    if let Some(now) = options.now.as_deref() {
        let zone = dayline::calendar::parse_zone(zone).map_err(|error| error.to_string())?;
        render_options.now =
            Some(parse_instant(now, zone).ok_or_else(|| format!("invalid now '{now}'"))?);
    }
    Ok(render_options)
}

fn prepare(
    date: &str,
    zone: &str,
    options_json: Option<&str>,
) -> Result<(NaiveDate, RenderOptions), String> {
    let options = match options_json {
        Some(raw_options) => serde_json::from_str::<DayRenderOptions>(raw_options)
            .map_err(|error| error.to_string())?,
        None => DayRenderOptions::default(),
    };
    let date = parse_date(date).map_err(|error| error.to_string())?;
    let options = build_render_options(options, zone)?;
    Ok((date, options))
}

/// Lays out `date` and returns the layout dump as JSON.
#[wasm_bindgen]
pub fn layout_day_json(
    events: &str,
    date: &str,
    zone: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let (date, options) =
        prepare(date, zone, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))?;
    layout_day_with_options(events, date, zone, &options)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

#[wasm_bindgen]
pub fn render_day_svg(
    events: &str,
    date: &str,
    zone: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let (date, options) =
        prepare(date, zone, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))?;
    render_day_with_options(events, date, zone, &options)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
