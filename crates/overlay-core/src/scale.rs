// File: crates/overlay-core/src/scale.rs
// Summary: Time (X) and Value (Y) scale transforms of the reference host, exposed through the scale APIs.

use crate::candle::Candle;
use crate::resolver::{PriceScaleApi, TimeScaleApi};
use crate::types::Time;

/// Logical X coordinate (bar index, fractional between bars).
pub type Logical = f64;
/// Value Y coordinate (price).
pub type Value = f64;

/// Horizontal time scale controlled via logical start and bar spacing (px per logical).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub left_px: f32,
    pub start_logical: Logical,
    pub bar_spacing: f32,
}

impl TimeScale {
    pub fn new(left_px: f32, start_logical: Logical, bar_spacing: f32) -> Self {
        Self { left_px, start_logical, bar_spacing: bar_spacing.max(0.01) }
    }

    /// Fit `first..=last` into `width` pixels, half a bar of room on both sides.
    pub fn fit(left_px: f32, width: f32, first: usize, last: usize) -> Self {
        let bars = (last.saturating_sub(first) + 1) as f32;
        let spacing = width.max(1.0) / bars;
        Self::new(left_px, first as f64 - 0.5, spacing)
    }

    #[inline]
    pub fn to_px(&self, x: Logical) -> f32 {
        self.left_px + ((x - self.start_logical) as f32) * self.bar_spacing
    }
}

/// Vertical value scale mapping data range to [top, bottom] pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: Value,
    pub vmax: Value,
}

impl ValueScale {
    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: Value, vmax: Value) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    #[inline]
    pub fn to_px(&self, y: Value) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }
}

/// Time scale bound to the host's loaded candles. Only times that exist in
/// the data map directly; anything else is left to the index fallback.
#[derive(Clone, Copy)]
pub struct CandleTimeScale<'a> {
    pub scale: TimeScale,
    pub candles: &'a [Candle],
}

impl<'a> CandleTimeScale<'a> {
    pub fn new(scale: TimeScale, candles: &'a [Candle]) -> Self {
        Self { scale, candles }
    }
}

impl TimeScaleApi for CandleTimeScale<'_> {
    fn time_to_coordinate(&self, time: Time) -> Option<f32> {
        let idx = self.candles.binary_search_by_key(&time, |c| c.time).ok()?;
        // leftmost duplicate, matching the fallback rule
        let idx = self.candles[..idx].iter().rposition(|c| c.time != time).map_or(0, |p| p + 1);
        Some(self.scale.to_px(idx as Logical))
    }

    fn logical_to_coordinate(&self, logical: f64) -> Option<f32> {
        logical.is_finite().then(|| self.scale.to_px(logical))
    }

    fn bar_spacing(&self) -> f32 {
        self.scale.bar_spacing
    }
}

impl PriceScaleApi for ValueScale {
    fn price_to_coordinate(&self, price: f64) -> Option<f32> {
        price.is_finite().then(|| self.to_px(price))
    }
}
