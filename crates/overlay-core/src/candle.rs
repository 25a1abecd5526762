// File: crates/overlay-core/src/candle.rs
// Summary: Domain candle model, volume-by-price levels and footprint aggregates.
// Notes:
// - Candle sequences handed to the engine are ascending by time; `sort_candles`
//   restores that for inputs coming from unordered sources.

use serde::{Deserialize, Serialize};

use crate::types::Time;

/// One traded price level inside a candle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLevel {
    pub price: f64,
    #[serde(default)]
    pub buy_volume: f64,
    #[serde(default)]
    pub sell_volume: f64,
}

impl PriceLevel {
    pub fn new(price: f64, buy_volume: f64, sell_volume: f64) -> Self {
        Self { price, buy_volume, sell_volume }
    }
    /// Volumes are clamped at zero so a bad feed cannot produce negative cells.
    pub fn buy(&self) -> f64 { self.buy_volume.max(0.0) }
    pub fn sell(&self) -> f64 { self.sell_volume.max(0.0) }
    pub fn total(&self) -> f64 { self.buy() + self.sell() }
    pub fn delta(&self) -> f64 { self.buy() - self.sell() }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    #[serde(deserialize_with = "crate::types::wire_time::required")]
    pub time: Time,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_by_price: Vec<PriceLevel>,
}

impl Candle {
    pub fn new(time: Time, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { time, open, high, low, close, volume: None, volume_by_price: Vec::new() }
    }

    /// Try to construct a candle enforcing OHLC invariants:
    /// l <= min(o,c) and h >= max(o,c), and l <= h.
    pub fn try_new(time: Time, open: f64, high: f64, low: f64, close: f64) -> Result<Self, &'static str> {
        let lo = open.min(close);
        let hi = open.max(close);
        if low > lo { return Err("low above min(open,close)"); }
        if high < hi { return Err("high below max(open,close)"); }
        if low > high { return Err("low above high"); }
        Ok(Self::new(time, open, high, low, close))
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_levels(mut self, levels: Vec<PriceLevel>) -> Self {
        self.volume_by_price = levels;
        self
    }

    pub fn is_up(&self) -> bool { self.close >= self.open }
}

/// Stable sort by time so duplicate timestamps keep their delivery order.
pub fn sort_candles(candles: &mut [Candle]) {
    candles.sort_by_key(|c| c.time);
}

/// Candle with order-flow detail. Aggregates the API supplies take precedence
/// over the computed ones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootprintCandle {
    #[serde(flatten)]
    pub candle: Candle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_area_high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_area_low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_of_control: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
}

impl From<Candle> for FootprintCandle {
    fn from(candle: Candle) -> Self {
        Self { candle, value_area_high: None, value_area_low: None, point_of_control: None, delta: None }
    }
}

impl FootprintCandle {
    pub fn levels(&self) -> &[PriceLevel] { &self.candle.volume_by_price }

    /// Net delta: supplied value, else sum of per-level buy minus sell.
    pub fn delta(&self) -> f64 {
        self.delta.unwrap_or_else(|| self.levels().iter().map(PriceLevel::delta).sum())
    }

    pub fn point_of_control(&self) -> Option<f64> {
        self.point_of_control.or_else(|| computed_poc(self.levels()))
    }

    /// `(high, low)` of the value area.
    pub fn value_area(&self, share: f64) -> Option<(f64, f64)> {
        match (self.value_area_high, self.value_area_low) {
            (Some(h), Some(l)) => Some((h.max(l), h.min(l))),
            _ => computed_value_area(self.levels(), share),
        }
    }
}

/// Price of the highest-volume level; on ties the higher price wins.
pub fn computed_poc(levels: &[PriceLevel]) -> Option<f64> {
    let mut best: Option<&PriceLevel> = None;
    for lv in levels {
        best = match best {
            None => Some(lv),
            Some(b) if lv.total() > b.total() || (lv.total() == b.total() && lv.price > b.price) => Some(lv),
            keep => keep,
        };
    }
    best.filter(|b| b.total() > 0.0).map(|b| b.price)
}

/// Grow outward from the POC, taking the heavier neighbour each step, until
/// `share` of the total volume is covered. Returns `(high, low)`.
pub fn computed_value_area(levels: &[PriceLevel], share: f64) -> Option<(f64, f64)> {
    let mut sorted: Vec<&PriceLevel> = levels.iter().filter(|l| l.price.is_finite()).collect();
    sorted.sort_by(|a, b| a.price.total_cmp(&b.price));
    let total: f64 = sorted.iter().map(|l| l.total()).sum();
    if sorted.is_empty() || total <= 0.0 {
        return None;
    }
    let poc = computed_poc(levels)?;
    let start = sorted.iter().position(|l| l.price == poc)?;
    let target = total * share.clamp(0.0, 1.0);

    let (mut lo, mut hi) = (start, start);
    let mut covered = sorted[start].total();
    while covered < target && (lo > 0 || hi + 1 < sorted.len()) {
        let up = sorted.get(hi + 1).map(|l| l.total());
        let down = if lo > 0 { Some(sorted[lo - 1].total()) } else { None };
        match (up, down) {
            (Some(u), Some(d)) if d > u => { lo -= 1; covered += d; }
            (Some(u), _) => { hi += 1; covered += u; }
            (None, Some(d)) => { lo -= 1; covered += d; }
            (None, None) => break,
        }
    }
    Some((sorted[hi].price, sorted[lo].price))
}
