// File: crates/overlay-core/src/theme.rs
// Summary: Light/Dark theming for the host canvas and the overlay renderers.

use skia_safe as skia;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub text: skia::Color,
    pub line_stroke: skia::Color,
    pub candle_up: skia::Color,
    pub candle_down: skia::Color,
    /// Footprint buy-side cells and positive delta.
    pub buy: skia::Color,
    /// Footprint sell-side cells and negative delta.
    pub sell: skia::Color,
    pub neutral_cell: skia::Color,
    pub poc: skia::Color,
    pub value_area: skia::Color,
    pub table_background: skia::Color,
    pub fill: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            text: skia::Color::from_argb(255, 235, 235, 245),
            line_stroke: skia::Color::from_argb(255, 64, 160, 255),
            candle_up: skia::Color::from_argb(255, 40, 200, 120),
            candle_down: skia::Color::from_argb(255, 220, 80, 80),
            buy: skia::Color::from_argb(255, 38, 166, 154),
            sell: skia::Color::from_argb(255, 239, 83, 80),
            neutral_cell: skia::Color::from_argb(60, 120, 123, 134),
            poc: skia::Color::from_argb(255, 255, 230, 70),
            value_area: skia::Color::from_argb(120, 149, 117, 205),
            table_background: skia::Color::from_argb(230, 24, 24, 28),
            fill: skia::Color::from_argb(48, 64, 160, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            text: skia::Color::from_argb(255, 20, 20, 30),
            line_stroke: skia::Color::from_argb(255, 32, 120, 200),
            candle_up: skia::Color::from_argb(255, 20, 160, 90),
            candle_down: skia::Color::from_argb(255, 200, 60, 60),
            buy: skia::Color::from_argb(255, 0, 137, 123),
            sell: skia::Color::from_argb(255, 211, 47, 47),
            neutral_cell: skia::Color::from_argb(50, 120, 123, 134),
            poc: skia::Color::from_argb(255, 230, 150, 0),
            value_area: skia::Color::from_argb(100, 103, 58, 183),
            table_background: skia::Color::from_argb(235, 240, 240, 244),
            fill: skia::Color::from_argb(40, 32, 120, 200),
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::dark()
}
