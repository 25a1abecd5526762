// File: crates/overlay-core/src/render/boxes.rs
// Summary: Filled price/time rectangles with optional styled border and inset label.

use crate::geometry::RectF32;
use crate::shape::BoxStyle;
use crate::text::Anchor;

use super::{apply_dash, fill_paint, stroke_paint, BitmapTarget, PaneRenderer};

const LABEL_PADDING: f32 = 4.0;
const LABEL_FONT_SIZE: f32 = 11.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedBox {
    pub x1: Option<f32>,
    pub x2: Option<f32>,
    pub y1: Option<f32>,
    pub y2: Option<f32>,
    pub style: BoxStyle,
}

impl ResolvedBox {
    /// Normalized rectangle when every corner resolved.
    pub fn rect(&self) -> Option<RectF32> {
        Some(RectF32::from_corners(self.x1?, self.y1?, self.x2?, self.y2?))
    }
}

pub struct BoxRenderer<'a> {
    pub boxes: &'a [ResolvedBox],
}

impl PaneRenderer for BoxRenderer<'_> {
    fn draw(&self, target: &BitmapTarget<'_>) {
        let ratio = target.pixel_ratio;
        for b in self.boxes {
            let Some(rect) = b.rect() else { continue };
            let r = rect.to_bitmap(ratio);
            target.canvas.draw_rect(r, &fill_paint(b.style.background));

            if b.style.border_width > 0.0 {
                let mut border = stroke_paint(b.style.border, b.style.border_width * ratio);
                apply_dash(&mut border, b.style.border_style, ratio);
                target.canvas.draw_rect(r, &border);
            }

            if let Some(text) = &b.style.text {
                // top-left inset; skipped when the box is too small to hold a line
                if rect.height() >= LABEL_FONT_SIZE {
                    target.label(
                        text,
                        rect.left + LABEL_PADDING,
                        rect.top + LABEL_PADDING + LABEL_FONT_SIZE * 0.5,
                        LABEL_FONT_SIZE,
                        b.style.text_color,
                        Anchor::Start,
                    );
                }
            }
        }
    }
}
