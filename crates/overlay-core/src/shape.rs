// File: crates/overlay-core/src/shape.rs
// Summary: Wire contracts for box/arrow/marker annotations and their resolved style defaults.
// Notes:
// - Geometry fields are optional on the wire: a shape missing them still
//   decodes and is later skipped as malformed instead of failing the response.
// - Unknown enum strings decode to the default variant.

use serde::{Deserialize, Serialize};
use skia_safe as skia;

use crate::color::css_or;
use crate::types::Time;

pub const DEFAULT_ARROW_SIZE: f32 = 8.0;
pub const DEFAULT_MARKER_SIZE: f32 = 6.0;
pub const DEFAULT_BORDER_WIDTH: f32 = 1.0;

pub fn default_box_background() -> skia::Color { skia::Color::from_argb(51, 33, 150, 243) }
pub fn default_box_border() -> skia::Color { skia::Color::from_argb(255, 33, 150, 243) }
pub fn default_box_text() -> skia::Color { skia::Color::from_argb(255, 255, 255, 255) }
pub fn default_arrow_color() -> skia::Color { skia::Color::from_argb(255, 38, 166, 154) }
pub fn default_marker_color() -> skia::Color { skia::Color::from_argb(255, 33, 150, 243) }

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Dashed,
    Dotted,
    #[default]
    #[serde(other)]
    Solid,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrowDirection {
    #[default]
    #[serde(other)]
    Up,
    Down,
    Left,
    Right,
    ArrowUp,
    ArrowDown,
}

impl ArrowDirection {
    /// Unit vector (screen space, y down) the glyph points along.
    pub fn unit(self) -> (f32, f32) {
        match self {
            ArrowDirection::Up | ArrowDirection::ArrowUp => (0.0, -1.0),
            ArrowDirection::Down | ArrowDirection::ArrowDown => (0.0, 1.0),
            ArrowDirection::Left => (-1.0, 0.0),
            ArrowDirection::Right => (1.0, 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    #[default]
    #[serde(other)]
    Circle,
    Square,
    Diamond,
    Triangle,
    TriangleDown,
    Cross,
    X,
    Star,
}

/// Rectangle between two times and two prices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxShape {
    #[serde(default, deserialize_with = "crate::types::wire_time::optional")]
    pub time1: Option<Time>,
    #[serde(default, deserialize_with = "crate::types::wire_time::optional")]
    pub time2: Option<Time>,
    #[serde(default, deserialize_with = "crate::types::wire_number::optional_f64")]
    pub price1: Option<f64>,
    #[serde(default, deserialize_with = "crate::types::wire_number::optional_f64")]
    pub price2: Option<f64>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default, deserialize_with = "crate::types::wire_number::optional_f32")]
    pub border_width: Option<f32>,
    #[serde(default)]
    pub border_style: BorderStyle,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

impl BoxShape {
    pub fn new(time1: Time, time2: Time, price1: f64, price2: f64) -> Self {
        Self { time1: Some(time1), time2: Some(time2), price1: Some(price1), price2: Some(price2), ..Self::default() }
    }

    /// Both prices, when present.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        Some((self.price1?, self.price2?))
    }

    pub fn style(&self) -> BoxStyle {
        BoxStyle {
            background: css_or(self.background_color.as_deref(), default_box_background()),
            border: css_or(self.border_color.as_deref(), default_box_border()),
            border_width: self.border_width.filter(|w| w.is_finite() && *w >= 0.0).unwrap_or(DEFAULT_BORDER_WIDTH),
            border_style: self.border_style,
            text: self.text.clone().filter(|t| !t.is_empty()),
            text_color: css_or(self.text_color.as_deref(), default_box_text()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoxStyle {
    pub background: skia::Color,
    pub border: skia::Color,
    pub border_width: f32,
    pub border_style: BorderStyle,
    pub text: Option<String>,
    pub text_color: skia::Color,
}

/// Directional glyph anchored at one time/price.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowShape {
    #[serde(default, deserialize_with = "crate::types::wire_time::optional")]
    pub time: Option<Time>,
    #[serde(default, deserialize_with = "crate::types::wire_number::optional_f64")]
    pub price: Option<f64>,
    #[serde(default)]
    pub direction: ArrowDirection,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "crate::types::wire_number::optional_f32")]
    pub size: Option<f32>,
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default, deserialize_with = "crate::types::wire_number::optional_f32")]
    pub border_width: Option<f32>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

impl ArrowShape {
    pub fn new(time: Time, price: f64, direction: ArrowDirection) -> Self {
        Self { time: Some(time), price: Some(price), direction, ..Self::default() }
    }

    pub fn style(&self) -> GlyphStyle {
        GlyphStyle::resolve(
            self.color.as_deref(),
            default_arrow_color(),
            self.size,
            DEFAULT_ARROW_SIZE,
            self.border_color.as_deref(),
            self.border_width,
            self.text.as_deref(),
            self.text_color.as_deref(),
        )
    }
}

/// Shape marker anchored at one time/price.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerShape {
    #[serde(default, deserialize_with = "crate::types::wire_time::optional")]
    pub time: Option<Time>,
    #[serde(default, deserialize_with = "crate::types::wire_number::optional_f64")]
    pub price: Option<f64>,
    #[serde(default)]
    pub shape: MarkerKind,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "crate::types::wire_number::optional_f32")]
    pub size: Option<f32>,
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default, deserialize_with = "crate::types::wire_number::optional_f32")]
    pub border_width: Option<f32>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

impl MarkerShape {
    pub fn new(time: Time, price: f64, shape: MarkerKind) -> Self {
        Self { time: Some(time), price: Some(price), shape, ..Self::default() }
    }

    pub fn style(&self) -> GlyphStyle {
        GlyphStyle::resolve(
            self.color.as_deref(),
            default_marker_color(),
            self.size,
            DEFAULT_MARKER_SIZE,
            self.border_color.as_deref(),
            self.border_width,
            self.text.as_deref(),
            self.text_color.as_deref(),
        )
    }
}

/// Resolved style shared by arrows and markers. Sizes are media pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphStyle {
    pub color: skia::Color,
    pub size: f32,
    /// Present only when the wire shape asked for a border.
    pub border: Option<(skia::Color, f32)>,
    pub text: Option<String>,
    pub text_color: skia::Color,
}

impl GlyphStyle {
    #[allow(clippy::too_many_arguments)]
    fn resolve(
        color: Option<&str>,
        default_color: skia::Color,
        size: Option<f32>,
        default_size: f32,
        border_color: Option<&str>,
        border_width: Option<f32>,
        text: Option<&str>,
        text_color: Option<&str>,
    ) -> Self {
        let color = css_or(color, default_color);
        let border = match (border_color, border_width) {
            (None, None) => None,
            (c, w) => Some((
                css_or(c, color),
                w.filter(|w| w.is_finite() && *w >= 0.0).unwrap_or(DEFAULT_BORDER_WIDTH),
            )),
        };
        Self {
            color,
            size: size.filter(|s| s.is_finite() && *s > 0.0).unwrap_or(default_size),
            border,
            text: text.filter(|t| !t.is_empty()).map(str::to_string),
            text_color: css_or(text_color, color),
        }
    }
}
