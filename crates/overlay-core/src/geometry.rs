// File: crates/overlay-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

use skia_safe as skia;

/// Axis-aligned rectangle in media (CSS) pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF32 {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF32 {
    /// Rectangle spanning two arbitrary corners; the result is always normalized.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { left: x1.min(x2), top: y1.min(y2), right: x1.max(x2), bottom: y1.max(y2) }
    }
    pub const fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }

    /// Convert to a bitmap-space Skia rect by scaling every edge with `ratio`.
    pub fn to_bitmap(&self, ratio: f32) -> skia::Rect {
        skia::Rect::from_ltrb(self.left * ratio, self.top * ratio, self.right * ratio, self.bottom * ratio)
    }
}

/// Closed polygon path through bitmap-space points.
pub fn polygon(points: &[(f32, f32)]) -> skia::Path {
    let mut path = skia::Path::new();
    if let Some((&first, rest)) = points.split_first() {
        path.move_to(first);
        for &p in rest {
            path.line_to(p);
        }
        path.close();
    }
    path
}
