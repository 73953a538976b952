use super::TextBlock;

// Average advance per character class as a fraction of the font size.
fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.3,
        'i' | 'j' | 'l' | 'I' | '.' | ',' | ':' | ';' | '|' | '!' | '\'' => 0.25,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' => 0.35,
        'm' | 'w' => 0.85,
        'M' | 'W' | '@' | '%' => 0.95,
        c if c.is_ascii_uppercase() => 0.68,
        c if c.is_ascii_digit() => 0.58,
        c if c.is_ascii() => 0.55,
        // Emoji and CJK glyphs are roughly square.
        _ => 1.0,
    }
}

pub(crate) fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

/// Greedy word wrap. Words wider than `max_width` are split by character.
pub(crate) fn wrap_line(line: &str, max_width: f32, font_size: f32) -> Vec<String> {
    if text_width(line, font_size) <= max_width {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, font_size) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if text_width(word, font_size) <= max_width {
            current.push_str(word);
            continue;
        }
        for ch in word.chars() {
            current.push(ch);
            if text_width(&current, font_size) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wraps `text` into a box and drops the lines that do not fit its height;
/// the last kept line ends in an ellipsis when anything was dropped.
pub(crate) fn fit_label(
    text: &str,
    max_width: f32,
    max_height: f32,
    font_size: f32,
    line_height: f32,
) -> TextBlock {
    let mut lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .flat_map(|line| wrap_line(line, max_width, font_size))
        .collect();

    let step = font_size * line_height;
    let capacity = ((max_height / step).floor() as usize).max(1);
    if lines.len() > capacity {
        lines.truncate(capacity);
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }

    let width = lines
        .iter()
        .map(|line| text_width(line, font_size))
        .fold(0.0, f32::max);
    let height = lines.len() as f32 * step;
    TextBlock {
        lines,
        width,
        height,
    }
}
