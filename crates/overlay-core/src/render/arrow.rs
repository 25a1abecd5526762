// File: crates/overlay-core/src/render/arrow.rs
// Summary: Directional triangle and arrow glyphs with an optional label beyond the tip.

use crate::geometry::polygon;
use crate::shape::{ArrowDirection, GlyphStyle};
use crate::text::Anchor;

use super::{fill_paint, stroke_paint, BitmapTarget, PaneRenderer};

const LABEL_GAP: f32 = 4.0;
const LABEL_FONT_SIZE: f32 = 11.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedArrow {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub direction: ArrowDirection,
    pub style: GlyphStyle,
}

/// Glyph outline in media pixels around anchor `(x, y)`; `s` is the half-extent.
pub fn arrow_outline(x: f32, y: f32, s: f32, direction: ArrowDirection) -> Vec<(f32, f32)> {
    let (ux, uy) = direction.unit();
    // perpendicular
    let (px, py) = (-uy, ux);
    let at = |along: f32, across: f32| (x + ux * along + px * across, y + uy * along + py * across);
    match direction {
        ArrowDirection::Up | ArrowDirection::Down | ArrowDirection::Left | ArrowDirection::Right => {
            vec![at(s, 0.0), at(-s * 0.6, s * 0.8), at(-s * 0.6, -s * 0.8)]
        }
        ArrowDirection::ArrowUp | ArrowDirection::ArrowDown => {
            let shaft = s * 0.3;
            vec![
                at(s, 0.0),
                at(0.0, s * 0.9),
                at(0.0, shaft),
                at(-s * 1.2, shaft),
                at(-s * 1.2, -shaft),
                at(0.0, -shaft),
                at(0.0, -s * 0.9),
            ]
        }
    }
}

pub struct ArrowRenderer<'a> {
    pub arrows: &'a [ResolvedArrow],
}

impl PaneRenderer for ArrowRenderer<'_> {
    fn draw(&self, target: &BitmapTarget<'_>) {
        let ratio = target.pixel_ratio;
        for a in self.arrows {
            let (Some(x), Some(y)) = (a.x, a.y) else { continue };
            let s = a.style.size;
            let pts: Vec<(f32, f32)> = arrow_outline(x, y, s, a.direction)
                .into_iter()
                .map(|(px, py)| target.pt(px, py))
                .collect();
            let path = polygon(&pts);
            target.canvas.draw_path(&path, &fill_paint(a.style.color));
            if let Some((color, width)) = a.style.border {
                if width > 0.0 {
                    target.canvas.draw_path(&path, &stroke_paint(color, width * ratio));
                }
            }

            if let Some(text) = &a.style.text {
                let (ux, uy) = a.direction.unit();
                let reach = s + LABEL_GAP + LABEL_FONT_SIZE * 0.5;
                let anchor = match a.direction {
                    ArrowDirection::Left => Anchor::End,
                    ArrowDirection::Right => Anchor::Start,
                    _ => Anchor::Center,
                };
                let lx = x + ux * (s + LABEL_GAP);
                let ly = y + uy * reach;
                target.label(text, lx, ly, LABEL_FONT_SIZE, a.style.text_color, anchor);
            }
        }
    }
}
