// File: crates/overlay-core/src/footprint.rs
// Summary: Footprint level analysis: per-level imbalance stats and top-K importance selection.
// Notes:
// - Importance score is totalVolume * (1 + 2 * imbalanceRatio); keep it as is,
//   the visual tuning of existing charts depends on it.

use std::cmp::Ordering;

use crate::candle::PriceLevel;

/// Levels with |buy - sell| below this are neutral.
pub const NEUTRAL_DELTA_EPSILON: f64 = 0.001;
/// Big-imbalance highlight: |delta| must reach this share of the heaviest level...
pub const BIG_IMBALANCE_VOLUME_SHARE: f64 = 0.5;
/// ...and the level's own imbalance ratio must exceed this.
pub const BIG_IMBALANCE_MIN_RATIO: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelStat {
    pub price: f64,
    pub buy: f64,
    pub sell: f64,
    pub total: f64,
    pub delta: f64,
    /// |buy - sell| / (buy + sell), 0 for an empty level.
    pub imbalance_ratio: f64,
    pub score: f64,
    pub big_imbalance: bool,
}

impl LevelStat {
    pub fn from_level(level: &PriceLevel) -> Self {
        let (buy, sell) = (level.buy(), level.sell());
        let total = buy + sell;
        let delta = buy - sell;
        let imbalance_ratio = if total > 0.0 { delta.abs() / total } else { 0.0 };
        Self {
            price: level.price,
            buy,
            sell,
            total,
            delta,
            imbalance_ratio,
            score: total * (1.0 + 2.0 * imbalance_ratio),
            big_imbalance: false,
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.delta.abs() < NEUTRAL_DELTA_EPSILON
    }

    pub fn side(&self) -> Side {
        if self.is_neutral() {
            Side::Neutral
        } else if self.delta > 0.0 {
            Side::Buy
        } else {
            Side::Sell
        }
    }
}

/// Rows a footprint cell column can hold at a given bar spacing.
pub fn visible_level_count(bar_spacing: f32) -> usize {
    if bar_spacing <= 25.0 {
        5
    } else if bar_spacing <= 40.0 {
        7
    } else {
        10
    }
}

/// Stats for every level at or above `min_display_volume`, with the big
/// imbalance flag computed against the heaviest retained level.
pub fn analyse_levels(levels: &[PriceLevel], min_display_volume: f64) -> Vec<LevelStat> {
    let mut stats: Vec<LevelStat> = levels
        .iter()
        .filter(|l| l.price.is_finite())
        .map(LevelStat::from_level)
        .filter(|s| s.total.is_finite() && s.total >= min_display_volume)
        .collect();
    let max_level_volume = stats.iter().map(|s| s.total).fold(0.0, f64::max);
    for s in &mut stats {
        s.big_imbalance = s.delta.abs() >= BIG_IMBALANCE_VOLUME_SHARE * max_level_volume
            && s.imbalance_ratio > BIG_IMBALANCE_MIN_RATIO;
    }
    stats
}

/// Top-K levels by importance (ties broken by higher price), returned
/// descending by price for display.
pub fn select_levels(levels: &[PriceLevel], bar_spacing: f32, min_display_volume: f64) -> Vec<LevelStat> {
    let mut stats = analyse_levels(levels, min_display_volume);
    stats.sort_by(|a, b| match b.score.total_cmp(&a.score) {
        Ordering::Equal => b.price.total_cmp(&a.price),
        other => other,
    });
    stats.truncate(visible_level_count(bar_spacing));
    stats.sort_by(|a, b| b.price.total_cmp(&a.price));
    stats
}

/// Cell background alpha for a non-highlighted level.
pub fn cell_alpha(imbalance_ratio: f64) -> f32 {
    0.15 + 0.6 * imbalance_ratio.clamp(0.0, 1.0) as f32
}

/// Alpha used for big-imbalance highlights.
pub const HIGHLIGHT_ALPHA: f32 = 0.9;
