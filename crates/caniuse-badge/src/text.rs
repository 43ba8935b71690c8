//! Text width estimation for badge layout.
//!
//! Approximates the advance widths of a proportional sans-serif face by
//! glyph class, in ems. Close enough to size badge rows without shipping a
//! font file.

/// Default font size of badge labels, in px.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

fn glyph_width(c: char) -> f64 {
    match c {
        ' ' => 0.25,
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.25,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '-' | '[' | ']' => 0.35,
        'm' | 'w' => 0.85,
        'M' | 'W' => 0.9,
        '0'..='9' => 0.56,
        c if c.is_ascii_lowercase() => 0.54,
        c if c.is_ascii_uppercase() => 0.65,
        _ => 0.6,
    }
}

/// Estimated rendered width of `text` at `font_size` px.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().map(glyph_width).sum::<f64>() * font_size
}

/// Format a pixel value for an SVG attribute.
pub fn px(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}
