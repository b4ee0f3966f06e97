//! CSS-like theme values → terminal colors.
//!
//! Theme values are opaque strings meant for a browser. The terminal can
//! show a flat color, so: hex and `rgb()/rgba()` map directly, gradients use
//! their first color stop, `transparent` lets the parent show through, and
//! anything unrecognised (`url(...)`, `var(...)`) falls back.

use ratatui::style::Color;

/// Resolve a value, or `fallback` when it cannot be shown in a terminal.
pub fn color_or(value: &str, fallback: Color) -> Color {
    css_color(value).unwrap_or(fallback)
}

/// Best-effort parse of a CSS color or gradient.
pub fn css_color(value: &str) -> Option<Color> {
    let v = value.trim().to_ascii_lowercase();
    if v.is_empty() {
        return None;
    }
    if v == "transparent" {
        return Some(Color::Reset);
    }
    if let Some(hex) = v.strip_prefix('#') {
        return parse_hex(hex);
    }
    if v.starts_with("rgb") {
        return parse_rgb(&v);
    }
    if v.contains("gradient(") {
        return first_color_stop(&v);
    }
    named(&v)
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    match digits.len() {
        // #rgb / #rgba
        3 | 4 => {
            if digits.len() == 4 && digits[3] == 0 {
                return Some(Color::Reset);
            }
            Some(Color::Rgb(digits[0] * 17, digits[1] * 17, digits[2] * 17))
        }
        // #rrggbb / #rrggbbaa
        6 | 8 => {
            let byte = |i: usize| digits[i] * 16 + digits[i + 1];
            if digits.len() == 8 && byte(6) == 0 {
                return Some(Color::Reset);
            }
            Some(Color::Rgb(byte(0), byte(2), byte(4)))
        }
        _ => None,
    }
}

fn parse_rgb(v: &str) -> Option<Color> {
    let open = v.find('(')?;
    let close = v.rfind(')')?;
    let parts: Vec<&str> = v
        .get(open + 1..close)?
        .split(|c| c == ',' || c == '/' || c == ' ')
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() < 3 {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        match s.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok().map(|p| (p.clamp(0.0, 100.0) * 2.55).round() as u8),
            None => s.parse::<f64>().ok().map(|c| c.clamp(0.0, 255.0).round() as u8),
        }
    };
    if let Some(alpha) = parts.get(3).and_then(|a| a.parse::<f64>().ok()) {
        if alpha <= 0.0 {
            return Some(Color::Reset);
        }
    }
    Some(Color::Rgb(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?))
}

/// First argument of a gradient that parses as a color (skips the angle
/// or direction).
fn first_color_stop(v: &str) -> Option<Color> {
    let open = v.find('(')?;
    let inner = v.get(open + 1..v.rfind(')')?)?;
    split_top_level(inner)
        .into_iter()
        .find_map(|arg| {
            // A stop may carry a position: "#fff 40%".
            let arg = arg.trim();
            css_color(arg).or_else(|| arg.rsplit_once(' ').and_then(|(c, _)| css_color(c)))
        })
}

/// Split on commas that are not inside parentheses.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

fn named(v: &str) -> Option<Color> {
    let rgb = match v {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "orange" => (255, 165, 0),
        "gold" => (255, 215, 0),
        "purple" => (128, 0, 128),
        "pink" => (255, 192, 203),
        "navy" => (0, 0, 128),
        "teal" => (0, 128, 128),
        "silver" => (192, 192, 192),
        "gray" | "grey" => (128, 128, 128),
        _ => return None,
    };
    Some(Color::Rgb(rgb.0, rgb.1, rgb.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!(css_color("#333"), Some(Color::Rgb(0x33, 0x33, 0x33)));
        assert_eq!(css_color("#4CAF50"), Some(Color::Rgb(0x4c, 0xaf, 0x50)));
        assert_eq!(css_color("#4caf5000"), Some(Color::Reset));
        assert_eq!(css_color("#12"), None);
        assert_eq!(css_color("#zzz"), None);
    }

    #[test]
    fn rgb_and_rgba() {
        assert_eq!(css_color("rgba(255, 255, 255, 0.8)"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(css_color("rgb(76,175,80)"), Some(Color::Rgb(76, 175, 80)));
        assert_eq!(css_color("rgb(100%, 0%, 0%)"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(css_color("rgba(0,0,0,0)"), Some(Color::Reset));
        assert_eq!(css_color("rgb(1, 2)"), None);
    }

    #[test]
    fn gradient_uses_first_stop() {
        assert_eq!(
            css_color("linear-gradient(135deg, #f6d365, #fda085)"),
            Some(Color::Rgb(0xf6, 0xd3, 0x65))
        );
        assert_eq!(
            css_color("linear-gradient(to right, rgba(1, 2, 3, 0.5) 10%, white)"),
            Some(Color::Rgb(1, 2, 3))
        );
    }

    #[test]
    fn transparent_and_unknown() {
        assert_eq!(css_color("transparent"), Some(Color::Reset));
        assert_eq!(css_color("url('bg.jpg')"), None);
        assert_eq!(color_or("", Color::Blue), Color::Blue);
        assert_eq!(color_or("Gold", Color::Blue), Color::Rgb(255, 215, 0));
    }
}
