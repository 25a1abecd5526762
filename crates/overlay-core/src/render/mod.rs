// File: crates/overlay-core/src/render/mod.rs
// Summary: Drawing surface wrapper and the renderer family painting resolved geometry.
// Notes:
// - Renderers receive media-pixel coordinates and scale every linear measure
//   by the surface's device-pixel ratio before touching the canvas.

use skia_safe as skia;

use crate::shape::BorderStyle;
use crate::text::{Anchor, TextShaper};

pub mod arrow;
pub mod boxes;
pub mod delta_table;
pub mod footprint;
pub mod line;
pub mod marker;

pub use arrow::{ArrowRenderer, ResolvedArrow};
pub use boxes::{BoxRenderer, ResolvedBox};
pub use delta_table::{DeltaColumn, DeltaTableRenderer};
pub use footprint::{FootprintColumn, FootprintRenderer, ResolvedLevel};
pub use line::{FillRenderer, LineRenderer, ResolvedFill, ResolvedLine};
pub use marker::{MarkerRenderer, ResolvedMarker};

/// Canvas plus the scale between media and bitmap pixels.
pub struct BitmapTarget<'a> {
    pub canvas: &'a skia::Canvas,
    pub pixel_ratio: f32,
    /// Pane size in media pixels.
    pub media_width: f32,
    pub media_height: f32,
    pub text: &'a TextShaper,
}

impl<'a> BitmapTarget<'a> {
    pub fn new(canvas: &'a skia::Canvas, pixel_ratio: f32, media_width: f32, media_height: f32, text: &'a TextShaper) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        Self { canvas, pixel_ratio, media_width, media_height, text }
    }

    /// Media → bitmap.
    #[inline]
    pub fn px(&self, v: f32) -> f32 { v * self.pixel_ratio }

    #[inline]
    pub fn pt(&self, x: f32, y: f32) -> (f32, f32) { (x * self.pixel_ratio, y * self.pixel_ratio) }

    /// Label at media position; font size is in media pixels.
    pub fn label(&self, text: &str, x: f32, y: f32, size: f32, color: skia::Color, anchor: Anchor) {
        let (bx, by) = self.pt(x, y);
        self.text.draw(self.canvas, text, bx, by, self.px(size), color, anchor, false);
    }

    /// Numeric label; uses tabular fonts so columns line up.
    pub fn number(&self, text: &str, x: f32, y: f32, size: f32, color: skia::Color, anchor: Anchor) {
        let (bx, by) = self.pt(x, y);
        self.text.draw(self.canvas, text, bx, by, self.px(size), color, anchor, true);
    }
}

/// Paints one view's resolved cache.
pub trait PaneRenderer {
    fn draw(&self, target: &BitmapTarget<'_>);
}

/// Renderer that draws nothing; returned while a view has no cache.
pub struct NoopRenderer;

impl PaneRenderer for NoopRenderer {
    fn draw(&self, _target: &BitmapTarget<'_>) {}
}

pub(crate) fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

/// Stroke paint; `width` is already in bitmap pixels.
pub(crate) fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width.max(0.0));
    paint.set_color(color);
    paint
}

/// Dash intervals in media pixels for a border style.
pub fn dash_pattern(style: BorderStyle) -> Option<[f32; 2]> {
    match style {
        BorderStyle::Solid => None,
        BorderStyle::Dashed => Some([6.0, 4.0]),
        BorderStyle::Dotted => Some([2.0, 2.0]),
    }
}

pub(crate) fn apply_dash(paint: &mut skia::Paint, style: BorderStyle, ratio: f32) {
    if let Some([on, off]) = dash_pattern(style) {
        paint.set_path_effect(skia::PathEffect::dash(&[on * ratio, off * ratio], 0.0));
    }
}

/// Compact volume text: 950, 1.2K, 3.4M.
pub fn abbreviate(v: f64) -> String {
    let a = v.abs();
    if a >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if a >= 10_000.0 {
        format!("{:.0}K", v / 1_000.0)
    } else if a >= 1_000.0 {
        format!("{:.1}K", v / 1_000.0)
    } else if a.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}
