// File: crates/overlay-core/src/render/footprint.rs
// Summary: Footprint columns: OHLC body/wick lane plus a grid of buy/sell volume cells.

use skia_safe as skia;

use crate::color::with_alpha;
use crate::footprint::{cell_alpha, LevelStat, Side, HIGHLIGHT_ALPHA};
use crate::geometry::RectF32;
use crate::text::Anchor;
use crate::theme::Theme;

use super::{abbreviate, fill_paint, stroke_paint, BitmapTarget, PaneRenderer};

/// Share of the column width reserved for the candle lane on the left.
pub const CANDLE_LANE_SHARE: f32 = 0.2;
const VALUE_AREA_BAR: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FootprintPalette {
    pub candle_up: skia::Color,
    pub candle_down: skia::Color,
    pub buy: skia::Color,
    pub sell: skia::Color,
    pub neutral: skia::Color,
    pub text: skia::Color,
    pub poc: skia::Color,
    pub value_area: skia::Color,
}

impl From<&Theme> for FootprintPalette {
    fn from(t: &Theme) -> Self {
        Self {
            candle_up: t.candle_up,
            candle_down: t.candle_down,
            buy: t.buy,
            sell: t.sell,
            neutral: t.neutral_cell,
            text: t.text,
            poc: t.poc,
            value_area: t.value_area,
        }
    }
}

/// One displayed row; `top`/`bottom` are media-pixel y bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedLevel {
    pub stat: LevelStat,
    pub top: f32,
    pub bottom: f32,
    pub is_poc: bool,
    pub in_value_area: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FootprintColumn {
    pub x: f32,
    pub half_width: f32,
    pub open: f32,
    pub high: f32,
    pub low: f32,
    pub close: f32,
    pub up: bool,
    pub levels: Vec<ResolvedLevel>,
}

impl FootprintColumn {
    /// Left edge of the cell grid.
    pub fn cells_left(&self) -> f32 {
        self.x - self.half_width + 2.0 * self.half_width * CANDLE_LANE_SHARE
    }
    pub fn right(&self) -> f32 {
        self.x + self.half_width
    }
}

/// Background color of a cell.
pub fn cell_color(stat: &LevelStat, palette: &FootprintPalette) -> skia::Color {
    let base = match stat.side() {
        Side::Neutral => return palette.neutral,
        Side::Buy => palette.buy,
        Side::Sell => palette.sell,
    };
    if stat.big_imbalance {
        with_alpha(base, HIGHLIGHT_ALPHA)
    } else {
        with_alpha(base, cell_alpha(stat.imbalance_ratio))
    }
}

pub struct FootprintRenderer<'a> {
    pub columns: &'a [FootprintColumn],
    pub palette: FootprintPalette,
    pub font_size: f32,
}

impl FootprintRenderer<'_> {
    fn draw_candle(&self, target: &BitmapTarget<'_>, col: &FootprintColumn) {
        let ratio = target.pixel_ratio;
        let color = if col.up { self.palette.candle_up } else { self.palette.candle_down };
        let lane = 2.0 * col.half_width * CANDLE_LANE_SHARE;
        let cx = col.x - col.half_width + lane * 0.5;

        let wick = stroke_paint(with_alpha(color, 0.6), ratio);
        target.canvas.draw_line(target.pt(cx, col.high), target.pt(cx, col.low), &wick);

        let body_half = (lane * 0.3).max(1.0);
        let top = col.open.min(col.close);
        let bottom = col.open.max(col.close).max(top + 1.0);
        let body = RectF32::from_corners(cx - body_half, top, cx + body_half, bottom);
        target.canvas.draw_rect(body.to_bitmap(ratio), &fill_paint(color));
    }

    fn draw_cells(&self, target: &BitmapTarget<'_>, col: &FootprintColumn) {
        let ratio = target.pixel_ratio;
        let left = col.cells_left();
        let right = col.right();
        if right - left < 1.0 {
            return;
        }
        for lv in &col.levels {
            let rect = RectF32::from_corners(left, lv.top, right, lv.bottom);
            let r = rect.to_bitmap(ratio);
            target.canvas.draw_rect(r, &fill_paint(cell_color(&lv.stat, &self.palette)));

            if lv.in_value_area {
                let bar = RectF32::from_ltwh(right - VALUE_AREA_BAR, lv.top, VALUE_AREA_BAR, rect.height());
                target.canvas.draw_rect(bar.to_bitmap(ratio), &fill_paint(self.palette.value_area));
            }
            if lv.is_poc {
                target.canvas.draw_rect(r, &stroke_paint(self.palette.poc, ratio));
            }

            let fits = rect.height() >= self.font_size && rect.width() >= self.font_size * 4.0;
            if fits {
                let text = format!("{} x {}", abbreviate(lv.stat.sell), abbreviate(lv.stat.buy));
                let cy = (lv.top + lv.bottom) * 0.5;
                target.number(&text, (left + right) * 0.5, cy, self.font_size, self.palette.text, Anchor::Center);
            }
        }
    }
}

impl PaneRenderer for FootprintRenderer<'_> {
    fn draw(&self, target: &BitmapTarget<'_>) {
        for col in self.columns {
            self.draw_candle(target, col);
            self.draw_cells(target, col);
        }
    }
}
