use crate::calendar::{parse_date, parse_zone};
use crate::config::{ClockStyle, Config, load_config};
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::parser::parse_instant;
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::{RenderOptions, prepare_day};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "dayline", version, about = "Day timeline layout and renderer")]
pub struct Args {
    /// Events file (JSON, JSON5 or agenda text) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/json). Defaults to stdout for SVG and JSON.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON/JSON5 file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Width; overrides the config file
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Day to show (YYYY-MM-DD). Defaults to today in the zone.
    #[arg(short = 'd', long = "date")]
    pub date: Option<String>,

    /// IANA time zone of the display calendar
    #[arg(short = 'z', long = "zone", default_value = "UTC")]
    pub zone: String,

    /// Current time for the now indicator. Defaults to the system clock.
    #[arg(long = "now")]
    pub now: Option<String>,

    /// Label hours as "1 PM" instead of "13:00"
    #[arg(long = "twelve-hour")]
    pub twelve_hour: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let config = apply_args(config, &args)?;

    let zone = parse_zone(&args.zone)?;
    let now = resolve_now(args.now.as_deref(), &args.zone)?;
    let date = match args.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => today(now, &args.zone)?,
    };

    let input = read_input(args.input.as_deref())?;
    let options = RenderOptions {
        theme: config.theme.clone(),
        timeline: config.timeline.clone(),
        width: config.render.width,
        now: Some(now),
    };
    let day = prepare_day(&input, date, zone.name(), &options)
        .with_context(|| format!("failed to lay out {date}"))?;
    log::info!(
        "{date} in {}: {} rectangle(s) in {} cluster(s)",
        zone.name(),
        day.layout.rects.len(),
        day.layout.cluster_count
    );

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&day.layout, &day.events, &config.theme, &config.timeline);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&day.layout, &day.events, &config.theme, &config.timeline);
            write_output_png(&svg, &output, &config.render, &config.theme)?;
        }
        OutputFormat::Json => {
            let dump =
                LayoutDump::from_layout(&day.layout, &day.window).with_all_day(day.all_day.clone());
            match args.output.as_deref() {
                Some(path) => write_layout_dump(path, &dump)?,
                None => println!("{}", dump.to_json()?),
            }
        }
    }

    Ok(())
}

/// Folds command-line overrides into the loaded config and revalidates.
fn apply_args(mut config: Config, args: &Args) -> Result<Config> {
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if args.twelve_hour {
        config.timeline.clock = ClockStyle::TwelveHour;
    }
    config.validate()?;
    Ok(config)
}

fn resolve_now(value: Option<&str>, zone: &str) -> Result<DateTime<Utc>> {
    let Some(value) = value else {
        return Ok(Utc::now());
    };
    let zone = parse_zone(zone)?;
    parse_instant(value, zone).ok_or_else(|| anyhow::anyhow!("invalid --now value '{value}'"))
}

fn today(now: DateTime<Utc>, zone: &str) -> Result<NaiveDate> {
    let zone = parse_zone(zone)?;
    Ok(now.with_timezone(&zone).date_naive())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["dayline"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn parses_flags() {
        let args = args(&[
            "-i",
            "events.json",
            "-d",
            "2024-05-01",
            "-z",
            "Europe/Oslo",
            "-e",
            "json",
            "--twelve-hour",
        ]);
        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.zone, "Europe/Oslo");
        assert_eq!(args.date.as_deref(), Some("2024-05-01"));
        assert!(args.twelve_hour);
    }

    #[test]
    fn overrides_width_and_clock() {
        let config = apply_args(Config::default(), &args(&["-w", "420", "--twelve-hour"])).unwrap();
        assert_eq!(config.render.width, 420.0);
        assert_eq!(config.timeline.clock, ClockStyle::TwelveHour);
    }

    #[test]
    fn rejects_zero_width() {
        assert!(apply_args(Config::default(), &args(&["-w", "0"])).is_err());
    }

    #[test]
    fn today_follows_the_zone() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 23, 30, 0).unwrap();
        assert_eq!(today(now, "UTC").unwrap(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(
            today(now, "Europe/Oslo").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
        );
    }

    #[test]
    fn now_accepts_local_and_offset_times() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(resolve_now(Some("2024-05-01T14:00"), "Europe/Oslo").unwrap(), expected);
        assert_eq!(resolve_now(Some("2024-05-01T12:00:00Z"), "UTC").unwrap(), expected);
        assert!(resolve_now(Some("noon"), "UTC").is_err());
    }

    #[test]
    fn png_needs_an_output_path() {
        assert!(ensure_output(&None, "png").is_err());
    }
}
