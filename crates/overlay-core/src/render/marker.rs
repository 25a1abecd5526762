// File: crates/overlay-core/src/render/marker.rs
// Summary: Point markers (circle, square, diamond, triangles, cross, x, star).

use std::f32::consts::PI;

use skia_safe as skia;

use crate::geometry::polygon;
use crate::shape::{GlyphStyle, MarkerKind};
use crate::text::Anchor;

use super::{fill_paint, stroke_paint, BitmapTarget, PaneRenderer};

const LABEL_GAP: f32 = 4.0;
const LABEL_FONT_SIZE: f32 = 11.0;
/// Stroke width of the `x` glyph as a share of its size.
const X_STROKE_SHARE: f32 = 0.3;

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedMarker {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub kind: MarkerKind,
    pub style: GlyphStyle,
}

/// Five-pointed star outline, media pixels, first point straight up.
pub fn star_outline(x: f32, y: f32, outer: f32) -> Vec<(f32, f32)> {
    let inner = outer * 0.45;
    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let a = -PI / 2.0 + i as f32 * PI / 5.0;
            (x + r * a.cos(), y + r * a.sin())
        })
        .collect()
}

/// Outline for every filled kind; `None` for circle (drawn natively) and `x` (stroke only).
pub fn marker_outline(x: f32, y: f32, s: f32, kind: MarkerKind) -> Option<Vec<(f32, f32)>> {
    let pts = match kind {
        MarkerKind::Circle | MarkerKind::X => return None,
        MarkerKind::Square => vec![(x - s, y - s), (x + s, y - s), (x + s, y + s), (x - s, y + s)],
        MarkerKind::Diamond => vec![(x, y - s), (x + s, y), (x, y + s), (x - s, y)],
        MarkerKind::Triangle => vec![(x, y - s), (x + s, y + s * 0.8), (x - s, y + s * 0.8)],
        MarkerKind::TriangleDown => vec![(x, y + s), (x - s, y - s * 0.8), (x + s, y - s * 0.8)],
        MarkerKind::Cross => {
            let t = s * 0.3;
            vec![
                (x - t, y - s), (x + t, y - s), (x + t, y - t), (x + s, y - t),
                (x + s, y + t), (x + t, y + t), (x + t, y + s), (x - t, y + s),
                (x - t, y + t), (x - s, y + t), (x - s, y - t), (x - t, y - t),
            ]
        }
        MarkerKind::Star => star_outline(x, y, s * 1.2),
    };
    Some(pts)
}

pub struct MarkerRenderer<'a> {
    pub markers: &'a [ResolvedMarker],
}

impl PaneRenderer for MarkerRenderer<'_> {
    fn draw(&self, target: &BitmapTarget<'_>) {
        let ratio = target.pixel_ratio;
        for m in self.markers {
            let (Some(x), Some(y)) = (m.x, m.y) else { continue };
            let s = m.style.size;
            match m.kind {
                MarkerKind::X => {
                    let (bx, by) = target.pt(x, y);
                    let d = s * ratio;
                    let mut paint = stroke_paint(m.style.color, (s * X_STROKE_SHARE).max(1.0) * ratio);
                    paint.set_stroke_cap(skia::paint::Cap::Round);
                    target.canvas.draw_line((bx - d, by - d), (bx + d, by + d), &paint);
                    target.canvas.draw_line((bx - d, by + d), (bx + d, by - d), &paint);
                }
                MarkerKind::Circle => {
                    let center = target.pt(x, y);
                    target.canvas.draw_circle(center, s * ratio, &fill_paint(m.style.color));
                    if let Some((color, width)) = m.style.border.filter(|(_, w)| *w > 0.0) {
                        target.canvas.draw_circle(center, s * ratio, &stroke_paint(color, width * ratio));
                    }
                }
                kind => {
                    let Some(outline) = marker_outline(x, y, s, kind) else { continue };
                    let pts: Vec<(f32, f32)> = outline.into_iter().map(|(px, py)| target.pt(px, py)).collect();
                    let path = polygon(&pts);
                    target.canvas.draw_path(&path, &fill_paint(m.style.color));
                    if let Some((color, width)) = m.style.border.filter(|(_, w)| *w > 0.0) {
                        target.canvas.draw_path(&path, &stroke_paint(color, width * ratio));
                    }
                }
            }

            if let Some(text) = &m.style.text {
                let ly = y - s - LABEL_GAP - LABEL_FONT_SIZE * 0.5;
                target.label(text, x, ly, LABEL_FONT_SIZE, m.style.text_color, Anchor::Center);
            }
        }
    }
}
