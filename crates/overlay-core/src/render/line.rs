// File: crates/overlay-core/src/render/line.rs
// Summary: Indicator line series and the band fill between two of them.

use skia_safe as skia;

use super::{fill_paint, stroke_paint, BitmapTarget, PaneRenderer};

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedLine {
    /// One entry per data point; unresolved points break the line.
    pub points: Vec<Option<(f32, f32)>>,
    pub color: skia::Color,
    pub width: f32,
}

/// Band between two lines as contiguous runs of `(x, y_a, y_b)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedFill {
    pub runs: Vec<Vec<(f32, f32, f32)>>,
    pub color: skia::Color,
}

pub struct LineRenderer<'a> {
    pub line: &'a ResolvedLine,
}

impl PaneRenderer for LineRenderer<'_> {
    fn draw(&self, target: &BitmapTarget<'_>) {
        let mut path = skia::Path::new();
        let mut pen_down = false;
        let mut segments = 0usize;
        for p in &self.line.points {
            match p {
                Some((x, y)) => {
                    let pt = target.pt(*x, *y);
                    if pen_down {
                        path.line_to(pt);
                        segments += 1;
                    } else {
                        path.move_to(pt);
                        pen_down = true;
                    }
                }
                None => pen_down = false,
            }
        }
        if segments > 0 {
            let mut stroke = stroke_paint(self.line.color, self.line.width * target.pixel_ratio);
            stroke.set_stroke_join(skia::paint::Join::Round);
            target.canvas.draw_path(&path, &stroke);
        }

        // Points with no resolved neighbour get a dot so single samples stay visible.
        let pts = &self.line.points;
        let dot = fill_paint(self.line.color);
        let radius = self.line.width.max(1.0) * target.pixel_ratio;
        for (i, p) in pts.iter().enumerate() {
            let Some((x, y)) = p else { continue };
            let alone_left = i == 0 || pts[i - 1].is_none();
            let alone_right = pts.get(i + 1).map_or(true, Option::is_none);
            if alone_left && alone_right {
                target.canvas.draw_circle(target.pt(*x, *y), radius, &dot);
            }
        }
    }
}

pub struct FillRenderer<'a> {
    pub fill: &'a ResolvedFill,
}

impl PaneRenderer for FillRenderer<'_> {
    fn draw(&self, target: &BitmapTarget<'_>) {
        let paint = fill_paint(self.fill.color);
        for run in &self.fill.runs {
            if run.len() < 2 {
                continue;
            }
            let mut path = skia::Path::new();
            path.move_to(target.pt(run[0].0, run[0].1));
            for &(x, ya, _) in &run[1..] {
                path.line_to(target.pt(x, ya));
            }
            for &(x, _, yb) in run.iter().rev() {
                path.line_to(target.pt(x, yb));
            }
            path.close();
            target.canvas.draw_path(&path, &paint);
        }
    }
}
