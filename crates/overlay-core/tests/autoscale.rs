// File: crates/overlay-core/tests/autoscale.rs
// Purpose: Validate primitive autoscale ranges and the host's merged price range.

use std::sync::Arc;

use overlay_core::primitive::{FillPrimitive, LinePrimitive, LineSeriesSpec, LineStyle};
use overlay_core::view::{visible_range, ViewState};
use overlay_core::{
    AutoscaleInfo, BoxPrimitive, BoxShape, Candle, DeltaTableOptions, DeltaTablePrimitive, FootprintCandle, FootprintOptions,
    FootprintPrimitive, LinePoint, MarkerKind, MarkerPrimitive, MarkerShape, SeriesPrimitive, Theme,
};

fn candles() -> Arc<[Candle]> {
    vec![Candle::new(10, 2.0, 6.0, 1.5, 4.0), Candle::new(20, 4.0, 5.5, 2.0, 2.5)].into()
}

#[test]
fn empty_family_has_no_range() {
    let p = BoxPrimitive::new(Vec::<BoxShape>::new(), candles());
    assert_eq!(p.autoscale_info(), None);
}

#[test]
fn box_prices_span_in_either_order() {
    let p = BoxPrimitive::new(vec![BoxShape::new(10, 20, 100.0, 80.0)], candles());
    assert_eq!(p.autoscale_info(), Some(AutoscaleInfo { min_value: 80.0, max_value: 100.0 }));
}

#[test]
fn incomplete_boxes_are_ignored() {
    let mut partial = BoxShape::new(10, 20, 500.0, 0.0);
    partial.price2 = None;
    let p = BoxPrimitive::new(vec![partial, BoxShape::new(10, 20, 3.0, 4.0)], candles());
    assert_eq!(p.autoscale_info(), Some(AutoscaleInfo { min_value: 3.0, max_value: 4.0 }));
}

#[test]
fn markers_contribute_their_price() {
    let p = MarkerPrimitive::new(
        vec![MarkerShape::new(10, 7.0, MarkerKind::Star), MarkerShape::new(20, -1.0, MarkerKind::X)],
        candles(),
    );
    assert_eq!(p.autoscale_info(), Some(AutoscaleInfo::spanning(7.0, -1.0)));
}

#[test]
fn footprint_spans_candle_extremes_and_table_takes_no_part() {
    let fp: Vec<FootprintCandle> = candles().iter().cloned().map(FootprintCandle::from).collect();
    let theme = Theme::dark();
    let footprint = FootprintPrimitive::new(fp.clone(), candles(), FootprintOptions::default(), &theme);
    assert_eq!(footprint.autoscale_info(), Some(AutoscaleInfo { min_value: 1.5, max_value: 6.0 }));
    let table = DeltaTablePrimitive::new(fp, candles(), &DeltaTableOptions::default(), &theme);
    assert_eq!(table.autoscale_info(), None);
}

#[test]
fn lines_and_fills_skip_non_finite_values() {
    let points: Arc<[LinePoint]> = vec![LinePoint::new(10, 3.0), LinePoint::new(20, f64::NAN), LinePoint::new(30, 9.0)].into();
    let line = LinePrimitive::new(LineSeriesSpec {
        key: "sma:SMA".into(),
        points: Arc::clone(&points),
        style: LineStyle { color: Theme::dark().line_stroke, width: 2.0 },
        candles: candles(),
    });
    assert_eq!(line.autoscale_info(), Some(AutoscaleInfo { min_value: 3.0, max_value: 9.0 }));

    let lower: Arc<[LinePoint]> = vec![LinePoint::new(10, -2.0)].into();
    let fill = FillPrimitive::new(points, lower, candles(), Theme::dark().fill);
    assert_eq!(fill.autoscale_info(), Some(AutoscaleInfo { min_value: -2.0, max_value: 9.0 }));
}

#[test]
fn host_range_merges_overlays_with_candles() {
    let cs = candles();
    let boxes = BoxPrimitive::new(vec![BoxShape::new(10, 20, 100.0, 80.0)], Arc::clone(&cs));
    let prims: [&dyn SeriesPrimitive; 1] = [&boxes];
    let view = ViewState::fit(&cs, 120, prims).expect("candles loaded");
    assert!(view.y_min <= 1.5);
    assert!(view.y_max >= 100.0);
    assert_eq!((view.first_bar, view.last_bar), (0, 1));

    assert!(ViewState::fit(&[], 120, std::iter::empty()).is_none());
}

#[test]
fn visible_window_keeps_the_latest_bars() {
    assert_eq!(visible_range(0, 10), None);
    assert_eq!(visible_range(5, 10), Some(0..=4));
    assert_eq!(visible_range(50, 10), Some(40..=49));
    assert_eq!(visible_range(3, 0), Some(2..=2));
}
