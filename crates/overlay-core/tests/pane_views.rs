// File: crates/overlay-core/tests/pane_views.rs
// Purpose: Pane view update cycles: cache replacement, host readiness, per-family resolution.

use std::sync::Arc;

use overlay_core::primitive::{FillPrimitive, LinePrimitive, LineSeriesSpec, LineStyle};
use overlay_core::{
    ArrowDirection, ArrowPrimitive, ArrowShape, BoxPrimitive, BoxShape, Candle, DeltaTableOptions, DeltaTablePrimitive,
    FootprintCandle, FootprintOptions, FootprintPrimitive, HostContext, LinePoint, PriceLevel, PriceScaleApi, SeriesPrimitive,
    Theme, Time, TimeScaleApi,
};

/// Bars at x = 10 * index for the given times.
struct Bars(Vec<Time>);

impl TimeScaleApi for Bars {
    fn time_to_coordinate(&self, time: Time) -> Option<f32> {
        self.0.iter().position(|t| *t == time).map(|i| i as f32 * 10.0)
    }
    fn logical_to_coordinate(&self, logical: f64) -> Option<f32> {
        Some(logical as f32 * 10.0)
    }
    fn bar_spacing(&self) -> f32 {
        10.0
    }
}

struct Inverted;

impl PriceScaleApi for Inverted {
    fn price_to_coordinate(&self, price: f64) -> Option<f32> {
        Some((200.0 - price) as f32)
    }
}

fn candles() -> Arc<[Candle]> {
    vec![
        Candle::new(100, 100.0, 110.0, 100.0, 108.0),
        Candle::new(200, 108.0, 112.0, 104.0, 105.0),
        Candle::new(300, 105.0, 106.0, 101.0, 102.0),
    ]
    .into()
}

fn bars() -> Bars {
    Bars(vec![100, 200, 300])
}

#[test]
fn repeated_updates_give_identical_caches() {
    let ts = bars();
    let host = HostContext::new(&ts, &Inverted);
    let mut p = BoxPrimitive::new(vec![BoxShape::new(100, 300, 110.0, 105.0)], candles());
    p.update_all_views(&host);
    let first = p.view().resolved().to_vec();
    p.update_all_views(&host);
    assert_eq!(first, p.view().resolved());
    assert_eq!(first.len(), 1);
    assert_eq!((first[0].x1, first[0].x2), (Some(0.0), Some(20.0)));
    assert_eq!((first[0].y1, first[0].y2), (Some(90.0), Some(95.0)));
}

#[test]
fn host_not_ready_clears_previous_cache() {
    let ts = bars();
    let mut p = BoxPrimitive::new(vec![BoxShape::new(100, 300, 110.0, 105.0)], candles());
    p.update_all_views(&HostContext::new(&ts, &Inverted));
    assert_eq!(p.view().resolved().len(), 1);
    p.update_all_views(&HostContext::not_ready());
    assert!(p.view().resolved().is_empty());
}

#[test]
fn incomplete_shapes_are_dropped_silently() {
    let ts = bars();
    let host = HostContext::new(&ts, &Inverted);
    let mut missing_price = BoxShape::new(100, 200, 1.0, 2.0);
    missing_price.price1 = None;
    let mut bad_price = BoxShape::new(100, 200, 1.0, 2.0);
    bad_price.price2 = Some(f64::NAN);
    let mut p = BoxPrimitive::new(vec![missing_price, bad_price, BoxShape::new(100, 200, 1.0, 2.0)], candles());
    p.update_all_views(&host);
    assert_eq!(p.view().resolved().len(), 1);

    let mut no_time = ArrowShape::new(100, 105.0, ArrowDirection::Down);
    no_time.time = None;
    let mut arrows = ArrowPrimitive::new(vec![no_time, ArrowShape::new(250, 105.0, ArrowDirection::ArrowUp)], candles());
    arrows.update_all_views(&host);
    let resolved = arrows.view().resolved();
    assert_eq!(resolved.len(), 1);
    // 250 is not a bar: snapped to the insertion index 2
    assert_eq!(resolved[0].x, Some(20.0));
}

#[test]
fn footprint_rows_split_the_candle_range() {
    let fc = FootprintCandle::from(Candle::new(100, 100.0, 110.0, 100.0, 108.0).with_levels(vec![
        PriceLevel::new(101.0, 5.0, 3.0),
        PriceLevel::new(109.0, 2.0, 9.0),
        PriceLevel::new(105.0, 20.0, 1.0),
    ]));
    let ts = bars();
    let mut p = FootprintPrimitive::new(vec![fc], candles(), FootprintOptions::default(), &Theme::dark());
    p.update_all_views(&HostContext::new(&ts, &Inverted));

    let cols = p.view().resolved();
    assert_eq!(cols.len(), 1);
    let col = &cols[0];
    assert_eq!((col.high, col.low), (90.0, 100.0));
    let prices: Vec<f64> = col.levels.iter().map(|l| l.stat.price).collect();
    assert_eq!(prices, vec![109.0, 105.0, 101.0]);
    // 10px span over 3 rows is below the 10px floor, so rows are 10px centred on the body
    assert_eq!(col.levels[0].top, 80.0);
    assert!(col.levels.windows(2).all(|w| w[0].bottom == w[1].top));
    assert!(col.levels.iter().any(|l| l.is_poc && l.stat.price == 105.0));
}

#[test]
fn delta_table_accumulates_in_input_order() {
    let fp: Vec<FootprintCandle> = candles()
        .iter()
        .zip([10.0, -4.0, 6.0])
        .map(|(c, d)| {
            let mut fc = FootprintCandle::from(c.clone());
            fc.delta = Some(d);
            fc
        })
        .collect();
    let ts = bars();
    let mut p = DeltaTablePrimitive::new(fp, candles(), &DeltaTableOptions::default(), &Theme::dark());
    p.update_all_views(&HostContext::new(&ts, &Inverted));

    let cols = p.view().resolved();
    let cumulative: Vec<f64> = cols.iter().map(|c| c.cumulative).collect();
    let change: Vec<Option<f64>> = cols.iter().map(|c| c.change).collect();
    assert_eq!(cumulative, vec![10.0, 6.0, 12.0]);
    assert_eq!(change, vec![None, Some(-14.0), Some(10.0)]);
}

#[test]
fn line_breaks_on_unresolvable_points() {
    let ts = bars();
    let mut line = LinePrimitive::new(LineSeriesSpec {
        key: "ema:EMA".into(),
        points: vec![LinePoint::new(100, 101.0), LinePoint::new(200, f64::NAN), LinePoint::new(300, 103.0)].into(),
        style: LineStyle { color: Theme::dark().line_stroke, width: 1.5 },
        candles: candles(),
    });
    line.update_all_views(&HostContext::new(&ts, &Inverted));
    let resolved = line.view().resolved().expect("host ready");
    assert_eq!(resolved.points, vec![Some((0.0, 99.0)), None, Some((20.0, 97.0))]);

    line.update_all_views(&HostContext::not_ready());
    assert!(line.view().resolved().is_none());
}

#[test]
fn fill_joins_on_common_times() {
    let ts = bars();
    let upper: Arc<[LinePoint]> = vec![LinePoint::new(100, 110.0), LinePoint::new(200, 111.0), LinePoint::new(300, 112.0)].into();
    let lower: Arc<[LinePoint]> = vec![LinePoint::new(100, 100.0), LinePoint::new(300, 102.0)].into();
    let mut fill = FillPrimitive::new(upper, lower, candles(), Theme::dark().fill);
    fill.update_all_views(&HostContext::new(&ts, &Inverted));
    let runs = &fill.view().resolved().expect("host ready").runs;
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0], vec![(0.0, 90.0, 100.0)]);
    assert_eq!(runs[1], vec![(20.0, 88.0, 98.0)]);
}
