// File: crates/overlay-core/src/view.rs
// Visible bar window of the reference host and price autoscale over candles plus overlays.

use std::ops::RangeInclusive;

use crate::candle::Candle;
use crate::primitive::SeriesPrimitive;
use crate::types::AutoscaleInfo;

/// Share of the price span added above and below the autoscaled range.
const AUTOSCALE_MARGIN: f64 = 0.02;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub first_bar: usize,
    pub last_bar: usize,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// The last `visible_bars` candles, priced to fit them and every
    /// primitive's autoscale range. `None` with no candles loaded.
    pub fn fit<'p>(
        candles: &[Candle],
        visible_bars: usize,
        primitives: impl IntoIterator<Item = &'p dyn SeriesPrimitive>,
    ) -> Option<Self> {
        let bars = visible_range(candles.len(), visible_bars)?;
        let candle_range = AutoscaleInfo::from_ranges(candles[bars.clone()].iter().map(|c| (c.low, c.high)));
        let range = primitives
            .into_iter()
            .filter_map(|p| p.autoscale_info())
            .fold(candle_range, |acc, info| Some(acc.map_or(info, |a| a.merge(info))));

        let (mut y_min, mut y_max) = range.map_or((0.0, 1.0), |r| (r.min_value, r.max_value));
        if (y_max - y_min).abs() < 1e-9 { y_max = y_min + 1.0; }
        let m = (y_max - y_min) * AUTOSCALE_MARGIN;
        y_min -= m;
        y_max += m;
        Some(Self { first_bar: *bars.start(), last_bar: *bars.end(), y_min, y_max })
    }
}

/// Index range of the last `visible_bars` of `len` bars.
pub fn visible_range(len: usize, visible_bars: usize) -> Option<RangeInclusive<usize>> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    Some(last.saturating_sub(visible_bars.max(1) - 1)..=last)
}
