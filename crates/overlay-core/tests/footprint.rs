// File: crates/overlay-core/tests/footprint.rs
// Purpose: Level importance selection, imbalance flags, POC and value area.

use overlay_core::candle::{computed_poc, computed_value_area};
use overlay_core::footprint::{analyse_levels, cell_alpha, select_levels, visible_level_count, LevelStat, Side};
use overlay_core::{Candle, FootprintCandle, PriceLevel};

#[test]
fn row_budget_follows_bar_spacing() {
    assert_eq!(visible_level_count(10.0), 5);
    assert_eq!(visible_level_count(25.0), 5);
    assert_eq!(visible_level_count(25.5), 7);
    assert_eq!(visible_level_count(40.0), 7);
    assert_eq!(visible_level_count(41.0), 10);
}

#[test]
fn wide_bars_show_ten_levels_sorted_by_price() {
    let levels: Vec<PriceLevel> = (0..12).map(|i| PriceLevel::new(100.0 + i as f64, 10.0 + i as f64, 5.0)).collect();
    let picked = select_levels(&levels, 50.0, 0.0);
    assert_eq!(picked.len(), 10);
    assert!(picked.windows(2).all(|w| w[0].price > w[1].price));
}

#[test]
fn importance_prefers_imbalanced_levels() {
    let levels = vec![
        PriceLevel::new(100.0, 50.0, 50.0), // score 100
        PriceLevel::new(101.0, 60.0, 0.0),  // score 60 * 3 = 180
        PriceLevel::new(102.0, 40.0, 40.0), // score 80
        PriceLevel::new(103.0, 10.0, 10.0),
        PriceLevel::new(104.0, 9.0, 9.0),
        PriceLevel::new(105.0, 8.0, 8.0),
    ];
    let picked = select_levels(&levels, 20.0, 0.0);
    let prices: Vec<f64> = picked.iter().map(|s| s.price).collect();
    assert_eq!(prices, vec![104.0, 103.0, 102.0, 101.0, 100.0]);
    let s = LevelStat::from_level(&levels[1]);
    assert_eq!(s.score, 180.0);
}

#[test]
fn equal_scores_keep_the_higher_price() {
    let levels: Vec<PriceLevel> = (0..6).map(|i| PriceLevel::new(100.0 + i as f64, 5.0, 5.0)).collect();
    let picked = select_levels(&levels, 20.0, 0.0);
    assert_eq!(picked.len(), 5);
    assert_eq!(picked.last().map(|s| s.price), Some(101.0));
}

#[test]
fn balanced_level_is_neutral() {
    let s = LevelStat::from_level(&PriceLevel::new(100.0, 5.0, 5.0));
    assert_eq!(s.side(), Side::Neutral);
    assert_eq!(s.imbalance_ratio, 0.0);
    assert!(!s.big_imbalance);

    let tiny = LevelStat::from_level(&PriceLevel::new(100.0, 5.0005, 5.0));
    assert_eq!(tiny.side(), Side::Neutral);
    assert_eq!(LevelStat::from_level(&PriceLevel::new(1.0, 6.0, 5.0)).side(), Side::Buy);
    assert_eq!(LevelStat::from_level(&PriceLevel::new(1.0, 4.0, 5.0)).side(), Side::Sell);
}

#[test]
fn big_imbalance_needs_share_and_ratio() {
    let stats = analyse_levels(
        &[
            PriceLevel::new(100.0, 75.0, 25.0), // delta 50 of max 100, ratio .5
            PriceLevel::new(101.0, 30.0, 0.0),  // delta 30 < 50
            PriceLevel::new(102.0, 60.0, 40.0), // delta 20
            PriceLevel::new(103.0, 0.0, 60.0),  // delta -60, ratio 1
        ],
        0.0,
    );
    let flags: Vec<bool> = stats.iter().map(|s| s.big_imbalance).collect();
    assert_eq!(flags, vec![true, false, false, true]);
}

#[test]
fn min_display_volume_filters_before_max_is_taken() {
    let stats = analyse_levels(&[PriceLevel::new(100.0, 1000.0, 0.0), PriceLevel::new(101.0, 8.0, 2.0)], 0.0);
    assert!(!stats[1].big_imbalance);

    let stats = analyse_levels(&[PriceLevel::new(100.0, 1.0, 0.0), PriceLevel::new(101.0, 8.0, 2.0)], 5.0);
    assert_eq!(stats.len(), 1);
    assert!(stats[0].big_imbalance, "max is taken over retained levels only");
}

#[test]
fn zero_volume_levels_survive_without_threshold() {
    let stats = analyse_levels(&[PriceLevel::new(100.0, 0.0, 0.0)], 0.0);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].side(), Side::Neutral);
}

#[test]
fn alpha_scales_with_ratio() {
    assert!((cell_alpha(0.0) - 0.15).abs() < 1e-6);
    assert!((cell_alpha(1.0) - 0.75).abs() < 1e-6);
    assert!((cell_alpha(4.0) - 0.75).abs() < 1e-6);
}

#[test]
fn poc_ties_go_to_higher_price() {
    let levels = [PriceLevel::new(100.0, 5.0, 5.0), PriceLevel::new(101.0, 10.0, 0.0), PriceLevel::new(99.0, 1.0, 1.0)];
    assert_eq!(computed_poc(&levels), Some(101.0));
    assert_eq!(computed_poc(&[PriceLevel::new(1.0, 0.0, 0.0)]), None);
    assert_eq!(computed_poc(&[]), None);
}

#[test]
fn value_area_grows_towards_heavier_side() {
    let levels = [
        PriceLevel::new(100.0, 5.0, 5.0),
        PriceLevel::new(101.0, 20.0, 20.0),
        PriceLevel::new(102.0, 15.0, 15.0),
        PriceLevel::new(103.0, 2.0, 3.0),
        PriceLevel::new(104.0, 1.0, 1.0),
    ];
    // total 87, target 60.9: 40 at 101, +30 at 102 = 70
    assert_eq!(computed_value_area(&levels, 0.7), Some((102.0, 101.0)));
    assert_eq!(computed_value_area(&levels, 1.0), Some((104.0, 100.0)));
}

#[test]
fn supplied_aggregates_take_precedence() {
    let candle = Candle::new(1, 100.0, 104.0, 100.0, 103.0)
        .with_levels(vec![PriceLevel::new(101.0, 20.0, 10.0), PriceLevel::new(102.0, 4.0, 6.0)]);
    let mut fc = FootprintCandle::from(candle);
    assert_eq!(fc.delta(), 8.0);
    assert_eq!(fc.point_of_control(), Some(101.0));

    fc.delta = Some(-3.0);
    fc.point_of_control = Some(103.0);
    fc.value_area_high = Some(101.0);
    fc.value_area_low = Some(103.0);
    assert_eq!(fc.delta(), -3.0);
    assert_eq!(fc.point_of_control(), Some(103.0));
    assert_eq!(fc.value_area(0.7), Some((103.0, 101.0)));
}
