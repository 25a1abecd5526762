// File: crates/overlay-core/src/render/delta_table.rs
// Summary: Three-row footer strip (Delta / Cumulative Delta / Delta Change) under each candle.

use skia_safe as skia;

use crate::color::with_alpha;
use crate::geometry::RectF32;
use crate::text::Anchor;

use super::{abbreviate, fill_paint, BitmapTarget, PaneRenderer};

pub const ROW_LABELS: [&str; 3] = ["Delta", "Cum. Delta", "Delta Chg"];
const CELL_ALPHA: f32 = 0.35;
const CELL_GAP: f32 = 1.0;

#[derive(Clone, Debug, PartialEq)]
pub struct DeltaColumn {
    pub x: f32,
    pub half_width: f32,
    pub delta: f64,
    pub cumulative: f64,
    /// `None` for the first column, which has no predecessor.
    pub change: Option<f64>,
}

impl DeltaColumn {
    pub fn values(&self) -> [Option<f64>; 3] {
        [Some(self.delta), Some(self.cumulative), self.change]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeltaTableStyle {
    pub positive: skia::Color,
    pub negative: skia::Color,
    pub zero: skia::Color,
    pub background: skia::Color,
    pub text: skia::Color,
    pub row_height: f32,
    pub font_size: f32,
    pub label_width: f32,
}

/// Cell fill for a signed value.
pub fn sign_color(value: f64, style: &DeltaTableStyle) -> skia::Color {
    if value > 0.0 {
        with_alpha(style.positive, CELL_ALPHA)
    } else if value < 0.0 {
        with_alpha(style.negative, CELL_ALPHA)
    } else {
        style.zero
    }
}

pub struct DeltaTableRenderer<'a> {
    pub columns: &'a [DeltaColumn],
    pub style: DeltaTableStyle,
}

impl PaneRenderer for DeltaTableRenderer<'_> {
    fn draw(&self, target: &BitmapTarget<'_>) {
        if self.columns.is_empty() {
            return;
        }
        let ratio = target.pixel_ratio;
        let st = &self.style;
        let strip_top = target.media_height - st.row_height * ROW_LABELS.len() as f32;
        if strip_top < 0.0 {
            return;
        }
        let strip = RectF32::from_ltwh(0.0, strip_top, target.media_width, st.row_height * 3.0);
        target.canvas.draw_rect(strip.to_bitmap(ratio), &fill_paint(st.background));

        for col in self.columns {
            let left = col.x - col.half_width + CELL_GAP;
            let right = col.x + col.half_width - CELL_GAP;
            if right <= st.label_width || right <= left {
                continue;
            }
            for (row, value) in col.values().into_iter().enumerate() {
                let top = strip_top + row as f32 * st.row_height;
                let cell = RectF32::from_corners(left.max(st.label_width), top + CELL_GAP, right, top + st.row_height - CELL_GAP);
                let Some(v) = value else { continue };
                target.canvas.draw_rect(cell.to_bitmap(ratio), &fill_paint(sign_color(v, st)));
                if cell.width() >= st.font_size * 2.5 {
                    target.number(&abbreviate(v), col.x, top + st.row_height * 0.5, st.font_size, st.text, Anchor::Center);
                }
            }
        }

        // captions last so they sit above cells scrolled under the label column
        let caption_bg = RectF32::from_ltwh(0.0, strip_top, st.label_width, st.row_height * 3.0);
        target.canvas.draw_rect(caption_bg.to_bitmap(ratio), &fill_paint(st.background));
        for (row, caption) in ROW_LABELS.iter().enumerate() {
            let cy = strip_top + (row as f32 + 0.5) * st.row_height;
            target.label(caption, 4.0, cy, st.font_size, st.text, Anchor::Start);
        }
    }
}
