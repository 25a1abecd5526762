// File: crates/overlay-core/src/resolver.rs
// Summary: Host scale capabilities and time/price → pixel resolution with an index fallback.

use crate::candle::Candle;
use crate::types::Time;

/// Horizontal mapping the host chart exposes.
pub trait TimeScaleApi {
    /// Pixel x of a time the host has loaded; `None` when the time is not
    /// part of its data or the scale is not laid out yet.
    fn time_to_coordinate(&self, time: Time) -> Option<f32>;
    /// Pixel x of a logical (bar index) position.
    fn logical_to_coordinate(&self, logical: f64) -> Option<f32>;
    /// Distance between adjacent bars in media pixels.
    fn bar_spacing(&self) -> f32;
}

/// Vertical mapping of the series the overlays are attached to.
pub trait PriceScaleApi {
    fn price_to_coordinate(&self, price: f64) -> Option<f32>;
}

/// Host capabilities as seen by a primitive during one redraw tick.
/// Absent members mean the host is not ready; views then resolve nothing.
#[derive(Clone, Copy, Default)]
pub struct HostContext<'a> {
    pub time_scale: Option<&'a dyn TimeScaleApi>,
    pub price_scale: Option<&'a dyn PriceScaleApi>,
}

impl<'a> HostContext<'a> {
    pub fn new(time_scale: &'a dyn TimeScaleApi, price_scale: &'a dyn PriceScaleApi) -> Self {
        Self { time_scale: Some(time_scale), price_scale: Some(price_scale) }
    }

    /// A context with neither scale.
    pub fn not_ready() -> Self {
        Self::default()
    }

    /// Resolver over `candles`, or `None` while either scale is missing.
    pub fn resolver<'c>(&self, candles: &'c [Candle]) -> Option<CoordinateResolver<'c>>
    where
        'a: 'c,
    {
        Some(CoordinateResolver {
            time_scale: self.time_scale?,
            price_scale: self.price_scale?,
            candles,
        })
    }
}

/// Left-bound insertion index of `time` in an ascending candle slice, clamped
/// to the last index. Exact matches return the leftmost duplicate.
/// `None` only for an empty slice.
pub fn fallback_index(candles: &[Candle], time: Time) -> Option<usize> {
    if candles.is_empty() {
        return None;
    }
    let idx = candles.partition_point(|c| c.time < time);
    Some(idx.min(candles.len() - 1))
}

/// Resolves domain coordinates for one cycle. Cheap to build; borrows the host scales.
#[derive(Clone, Copy)]
pub struct CoordinateResolver<'a> {
    time_scale: &'a dyn TimeScaleApi,
    price_scale: &'a dyn PriceScaleApi,
    candles: &'a [Candle],
}

impl<'a> CoordinateResolver<'a> {
    pub fn new(time_scale: &'a dyn TimeScaleApi, price_scale: &'a dyn PriceScaleApi, candles: &'a [Candle]) -> Self {
        Self { time_scale, price_scale, candles }
    }

    /// Host mapping first, then the nearest loaded bar by index.
    pub fn x(&self, time: Time) -> Option<f32> {
        self.time_scale
            .time_to_coordinate(time)
            .or_else(|| {
                let idx = fallback_index(self.candles, time)?;
                self.time_scale.logical_to_coordinate(idx as f64)
            })
            .filter(|x| x.is_finite())
    }

    pub fn y(&self, price: f64) -> Option<f32> {
        if !price.is_finite() {
            return None;
        }
        self.price_scale.price_to_coordinate(price).filter(|y| y.is_finite())
    }

    pub fn x_opt(&self, time: Option<Time>) -> Option<f32> {
        time.and_then(|t| self.x(t))
    }

    pub fn y_opt(&self, price: Option<f64>) -> Option<f32> {
        price.and_then(|p| self.y(p))
    }

    pub fn bar_spacing(&self) -> f32 {
        self.time_scale.bar_spacing()
    }

    pub fn candles(&self) -> &'a [Candle] {
        self.candles
    }
}
