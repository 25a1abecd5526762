// File: crates/overlay-core/src/color.rs
// Summary: CSS color string parsing into Skia colors, plus small alpha helpers.

use skia_safe as skia;

/// Parse a CSS color string. Supports `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`,
/// `rgb(...)`, `rgba(...)`, `transparent` and a handful of named colors.
pub fn parse_css(input: &str) -> Option<skia::Color> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower.strip_prefix("rgba(").or_else(|| lower.strip_prefix("rgb(")) {
        return parse_rgb_args(args.strip_suffix(')')?);
    }
    named(&lower)
}

/// Parse `value` or fall back to `default` when absent or unparsable.
pub fn css_or(value: Option<&str>, default: skia::Color) -> skia::Color {
    value.and_then(parse_css).unwrap_or(default)
}

/// Replace the alpha channel with `alpha` in `[0, 1]`.
pub fn with_alpha(color: skia::Color, alpha: f32) -> skia::Color {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    skia::Color::from_argb(a, color.r(), color.g(), color.b())
}

fn parse_hex(hex: &str) -> Option<skia::Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(skia::Color::from_argb(255, nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(skia::Color::from_argb(nibble(3)?, nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(skia::Color::from_argb(255, byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(skia::Color::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<skia::Color> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |p: &str| p.parse::<f32>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = match parts.get(3) {
        Some(p) => (p.parse::<f32>().ok()?.clamp(0.0, 1.0) * 255.0).round() as u8,
        None => 255,
    };
    Some(skia::Color::from_argb(a, r, g, b))
}

fn named(name: &str) -> Option<skia::Color> {
    let c = match name {
        "transparent" => skia::Color::from_argb(0, 0, 0, 0),
        "black" => skia::Color::from_argb(255, 0, 0, 0),
        "white" => skia::Color::from_argb(255, 255, 255, 255),
        "red" => skia::Color::from_argb(255, 255, 0, 0),
        "green" => skia::Color::from_argb(255, 0, 128, 0),
        "lime" => skia::Color::from_argb(255, 0, 255, 0),
        "blue" => skia::Color::from_argb(255, 0, 0, 255),
        "yellow" => skia::Color::from_argb(255, 255, 255, 0),
        "orange" => skia::Color::from_argb(255, 255, 165, 0),
        "purple" => skia::Color::from_argb(255, 128, 0, 128),
        "gray" | "grey" => skia::Color::from_argb(255, 128, 128, 128),
        "cyan" | "aqua" => skia::Color::from_argb(255, 0, 255, 255),
        "magenta" | "fuchsia" => skia::Color::from_argb(255, 255, 0, 255),
        _ => return None,
    };
    Some(c)
}
