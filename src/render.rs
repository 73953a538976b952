use crate::config::{RenderConfig, TimelineConfig};
use crate::ir::Event;
use crate::layout::text::fit_label;
use crate::layout::{DayLayout, EventRect, TextBlock};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const ACCENT_WIDTH: f32 = 3.0;
const TEXT_PAD_X: f32 = 6.0;
const TEXT_PAD_Y: f32 = 3.0;
const HOUR_LABEL_GAP: f32 = 8.0;
const NOW_LABEL_WIDTH: f32 = 44.0;

/// Renders a laid out day. `events` is the slice the layout was computed
/// from; rectangles find their event through `EventRect::index`.
pub fn render_svg<E: AsRef<Event>>(
    layout: &DayLayout,
    events: &[E],
    theme: &Theme,
    config: &TimelineConfig,
) -> String {
    let mut svg = String::new();
    let width = layout.width.max(config.left_inset + 1.0);
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    // Hour grid and labels. Lines sit on half pixels to stay crisp.
    for mark in &layout.hours {
        let y = mark.y + 0.5;
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{y:.2}\" x2=\"{width:.2}\" y2=\"{y:.2}\" stroke=\"{}\" stroke-width=\"0.5\"/>",
            config.left_inset, theme.line_color
        ));
        if mark.hidden {
            continue;
        }
        let label_x = config.left_inset - HOUR_LABEL_GAP;
        let label_y = mark.y + theme.font_size * 0.35;
        svg.push_str(&format!(
            "<text x=\"{label_x:.2}\" y=\"{label_y:.2}\" text-anchor=\"end\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.time_color,
            escape_xml(&mark.label)
        ));
    }

    for rect in &layout.rects {
        let Some(event) = events.get(rect.index) else {
            continue;
        };
        svg.push_str(&event_svg(rect, event.as_ref(), theme, config));
    }

    if let Some(now) = &layout.now {
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{width:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
            config.left_inset, now.y, now.y, theme.now_color
        ));
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"3\" fill=\"{}\"/>",
            config.left_inset, now.y, theme.now_color
        ));
        let label_x = config.left_inset - HOUR_LABEL_GAP;
        svg.push_str(&format!(
            "<text x=\"{label_x:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" textLength=\"{}\" lengthAdjust=\"spacingAndGlyphs\">{}</text>",
            now.y + theme.font_size * 0.35,
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.now_color,
            NOW_LABEL_WIDTH.min(config.left_inset - HOUR_LABEL_GAP).max(1.0),
            escape_xml(&now.label)
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn event_svg(rect: &EventRect, event: &Event, theme: &Theme, config: &TimelineConfig) -> String {
    let base = event
        .color
        .clone()
        .unwrap_or_else(|| theme.palette_color(rect.index).to_string());
    let colors = theme.event_colors(&base);
    let height = rect.height();
    let mut out = String::new();

    out.push_str(&format!(
        "<g data-event-id=\"{}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{height:.2}\" fill=\"{}\" fill-opacity=\"{}\"/>",
        escape_xml(&rect.id),
        rect.x,
        rect.top,
        rect.width,
        escape_xml(&colors.fill),
        colors.fill_opacity
    ));
    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{ACCENT_WIDTH}\" height=\"{height:.2}\" fill=\"{}\"/>",
        rect.x,
        rect.top,
        escape_xml(&colors.accent)
    ));

    let mut text = event.title.clone();
    if let Some(location) = event.location.as_deref() {
        text.push('\n');
        text.push_str(location);
    }
    let text_width = (rect.width - ACCENT_WIDTH - TEXT_PAD_X * 2.0).max(1.0);
    let text_height = (height - TEXT_PAD_Y * 2.0).max(0.0);
    let label = fit_label(
        &text,
        text_width,
        text_height,
        theme.font_size,
        config.label_line_height,
    );
    let text_x = rect.x + ACCENT_WIDTH + TEXT_PAD_X;
    out.push_str(&text_block_svg(
        text_x,
        rect.top + TEXT_PAD_Y,
        &label,
        theme,
        config,
        &escape_xml(&colors.text),
    ));
    out.push_str("</g>");
    out
}

fn text_block_svg(
    x: f32,
    top: f32,
    label: &TextBlock,
    theme: &Theme,
    config: &TimelineConfig,
    fill: &str,
) -> String {
    if label.lines.is_empty() {
        return String::new();
    }
    let mut text = String::new();
    let first_y = top + theme.font_size;
    text.push_str(&format!(
        "<text x=\"{x:.2}\" y=\"{first_y:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">",
        escape_xml(&theme.font_family),
        theme.font_size,
        fill
    ));
    for (idx, line) in label.lines.iter().enumerate() {
        let dy = if idx == 0 {
            0.0
        } else {
            theme.font_size * config.label_line_height
        };
        // The first line is the title.
        let weight = if idx == 0 { " font-weight=\"bold\"" } else { "" };
        text.push_str(&format!(
            "<tspan x=\"{x:.2}\" dy=\"{dy:.2}\"{weight}>{}</tspan>",
            escape_xml(line)
        ));
    }
    text.push_str("</text>");
    text
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|family| family.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "Inter".to_string());
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;
    if let Some(color) = parse_background(&render_cfg.background) {
        pixmap.fill(color);
    }

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig, _theme: &Theme) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the 'png' feature"))
}

#[cfg(feature = "png")]
fn parse_background(color: &str) -> Option<resvg::tiny_skia::Color> {
    let hex = color.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(resvg::tiny_skia::Color::from_rgba8(r, g, b, 255))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
