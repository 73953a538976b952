use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub time_color: String,
    /// Hour grid lines.
    pub line_color: String,
    pub now_color: String,
    pub event_text_color: String,
    pub event_palette: Vec<String>,
    /// Dark variants mute the event text and fill.
    pub dark: bool,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            background: "#FFFFFF".to_string(),
            time_color: "#AAAAAA".to_string(),
            line_color: "#D3D3D3".to_string(),
            now_color: "#FF3B30".to_string(),
            event_text_color: "#1C2430".to_string(),
            event_palette: default_palette(),
            dark: false,
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            background: "#1C1C1E".to_string(),
            time_color: "#8E8E93".to_string(),
            line_color: "#48484A".to_string(),
            now_color: "#FF453A".to_string(),
            event_text_color: "#F2F2F7".to_string(),
            event_palette: default_palette(),
            dark: true,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" | "default" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }

    /// Base color of the event at `index` when it carries none of its own.
    pub fn palette_color(&self, index: usize) -> &str {
        if self.event_palette.is_empty() {
            return "#0A84FF";
        }
        &self.event_palette[index % self.event_palette.len()]
    }

    /// Fill, opacity, and text color for an event box.
    pub fn event_colors(&self, base: &str) -> EventColors {
        if self.dark {
            let text = match parse_color_to_hsl(base) {
                Some((h, s, l)) => hsl_color(h, s * 0.3, l.max(70.0)),
                None => self.event_text_color.clone(),
            };
            EventColors {
                fill: base.to_string(),
                fill_opacity: 0.6,
                accent: base.to_string(),
                text,
            }
        } else {
            EventColors {
                fill: adjust_color(base, 0.0, 0.0, 35.0),
                fill_opacity: 0.3,
                accent: base.to_string(),
                text: self.event_text_color.clone(),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventColors {
    pub fill: String,
    pub fill_opacity: f32,
    pub accent: String,
    pub text: String,
}

fn default_palette() -> Vec<String> {
    vec![
        "#0A84FF".to_string(), // blue
        "#FFD60A".to_string(), // yellow
        "#30D158".to_string(), // green
        "#FF453A".to_string(), // red
    ]
}

pub fn hsl_color(h: f32, s: f32, l: f32) -> String {
    format!("hsl({:.2}, {:.2}%, {:.2}%)", h, s, l)
}

/// Parses `#rgb`, `#rrggbb` and `hsl(h, s%, l%)` into hue degrees and
/// saturation/lightness percentages.
pub fn parse_color_to_hsl(color: &str) -> Option<(f32, f32, f32)> {
    let color = color.trim();
    if let Some(inner) = color
        .strip_prefix("hsl(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<f32> = inner
            .split(',')
            .map(|part| part.trim().trim_end_matches('%').parse::<f32>())
            .collect::<Result<_, _>>()
            .ok()?;
        if parts.len() != 3 {
            return None;
        }
        return Some((parts[0], parts[1], parts[2]));
    }
    let hex = color.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let (r, g, b) = match hex.len() {
        3 => {
            let mut channels = hex.chars().map(|c| c.to_digit(16).map(|v| (v * 17) as u8));
            (channels.next()??, channels.next()??, channels.next()??)
        }
        6 => (
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        ),
        _ => return None,
    };
    Some(rgb_to_hsl(r, g, b))
}

fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if (max - min).abs() < f32::EPSILON {
        return (0.0, 0.0, l * 100.0);
    }
    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h * 60.0, s * 100.0, l * 100.0)
}

/// Shifts hue (degrees) and saturation/lightness (percentage points).
pub fn adjust_color(color: &str, hue: f32, saturation: f32, lightness: f32) -> String {
    let Some((h, s, l)) = parse_color_to_hsl(color) else {
        return color.to_string();
    };
    let h = (h + hue).rem_euclid(360.0);
    let s = (s + saturation).clamp(0.0, 100.0);
    let l = (l + lightness).clamp(0.0, 100.0);
    hsl_color(h, s, l)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        let (h, s, l) = parse_color_to_hsl("#FF0000").unwrap();
        assert!(h.abs() < 0.01);
        assert!((s - 100.0).abs() < 0.01);
        assert!((l - 50.0).abs() < 0.01);
        assert_eq!(parse_color_to_hsl("#fff"), Some((0.0, 0.0, 100.0)));
        assert!(parse_color_to_hsl("tomato").is_none());
    }

    #[test]
    fn non_ascii_hex_is_not_a_color() {
        assert_eq!(parse_color_to_hsl("#aébcd"), None);
        assert_eq!(parse_color_to_hsl("#+f+f+f"), None);
        assert_eq!(adjust_color("#aébcd", 0.0, 0.0, 35.0), "#aébcd");
        let colors = Theme::dark().event_colors("#aébcd");
        assert_eq!(colors.accent, "#aébcd");
        assert_eq!(colors.text, Theme::dark().event_text_color);
    }

    #[test]
    fn dark_theme_desaturates_text() {
        let colors = Theme::dark().event_colors("hsl(210, 80%, 50%)");
        assert_eq!(colors.text, "hsl(210.00, 24.00%, 70.00%)");
        assert_eq!(colors.fill_opacity, 0.6);
    }

    #[test]
    fn unknown_colors_pass_through() {
        assert_eq!(adjust_color("tomato", 10.0, 0.0, 0.0), "tomato");
    }
}
