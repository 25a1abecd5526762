// File: crates/overlay-core/tests/smoke.rs
// Purpose: End-to-end render smoke tests: orchestrated overlays drawn by the headless host.

use overlay_core::{
    ArrowDirection, ArrowShape, BorderStyle, BoxPrimitive, BoxShape, Candle, EngineConfig, IndicatorParams, IndicatorResponse,
    LinePrimitive, OverlayChart, RenderOptions, SeriesOrchestrator,
};

fn chart_with_candles(n: i64) -> OverlayChart {
    let mut chart = OverlayChart::new(EngineConfig::default());
    chart.set_candles(
        (0..n)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.7).sin() * 5.0;
                Candle::new(1_000 + i * 60, base, base + 2.0, base - 2.0, base + 0.5)
            })
            .collect(),
    );
    chart
}

fn quiet() -> RenderOptions {
    RenderOptions { draw_labels: false, ..RenderOptions::default() }
}

#[test]
fn render_smoke_png() {
    let mut chart = chart_with_candles(40);
    let mut orch = SeriesOrchestrator::new(chart.config());
    let response = IndicatorResponse::from_json_str(
        r#"{
            "series": [{"name": "SMA", "data": [{"time": 1000, "value": 100}, {"time": "1060", "value": 101.5}, {"time": 1120.0, "value": 102}]}],
            "boxes": [{"time1": 1000, "time2": 1300, "price1": 104, "price2": 98, "borderStyle": "dashed", "text": "zone"}],
            "arrows": [{"time": 1180, "price": 97, "direction": "arrow-up", "text": "buy"}],
            "markers": [{"time": 1240, "price": 106, "shape": "star"}]
        }"#,
    )
    .expect("valid response");

    let token = orch.begin_apply(&mut chart);
    orch.add_from_api_response(&mut chart, token, "demo", &response, &IndicatorParams::default(), LinePrimitive::boxed);
    orch.flush(&mut chart);
    assert_eq!(chart.families(), vec!["line", "boxes", "arrows", "markers"]);

    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    chart.render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let bytes = chart.render_to_png_bytes(&quiet()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn box_outside_loaded_range_still_draws() {
    let mut chart = chart_with_candles(10);
    let mut orch = SeriesOrchestrator::new(chart.config());
    let mut zone = BoxShape::new(1_000, 2_000, 50.0, 60.0);
    zone.border_style = BorderStyle::Dashed;
    orch.add_boxes(&mut chart, vec![zone], BoxPrimitive::boxed);
    chart.update_views(&quiet());
    let bytes = chart.render_to_png_bytes(&quiet()).expect("render bytes");
    assert!(!bytes.is_empty());
}

#[test]
fn overlays_without_candles_render_nothing() {
    let mut chart = OverlayChart::new(EngineConfig::default());
    let mut orch = SeriesOrchestrator::new(chart.config());
    orch.add_arrows(&mut chart, vec![ArrowShape::new(10, 1.0, ArrowDirection::Down)], overlay_core::ArrowPrimitive::boxed);
    assert!(chart.layout(&quiet()).is_none());
    let bytes = chart.render_to_png_bytes(&quiet()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
}

#[test]
fn footprint_and_delta_table_render() {
    let mut chart = chart_with_candles(12);
    let mut orch = SeriesOrchestrator::new(chart.config());
    let response = IndicatorResponse::from_json_str(
        r#"{"footprint": [
            {"time": 1600, "open": 100, "high": 103, "low": 99, "close": 102,
             "volumeByPrice": [
                {"price": 99, "buyVolume": 3, "sellVolume": 9},
                {"price": 100, "buyVolume": 12, "sellVolume": 10},
                {"price": 101, "buyVolume": 40, "sellVolume": 5},
                {"price": 102, "buyVolume": 8, "sellVolume": 8},
                {"price": 103, "buyVolume": 1, "sellVolume": 0}
             ]},
            {"time": 1660, "open": 102, "high": 104, "low": 101, "close": 101, "delta": -12,
             "volumeByPrice": [{"price": 101, "buyVolume": 4, "sellVolume": 16}]}
        ]}"#,
    )
    .expect("valid footprint response");

    let token = orch.begin_apply(&mut chart);
    orch.add_from_api_response(&mut chart, token, "fp", &response, &IndicatorParams::default(), LinePrimitive::boxed);
    assert_eq!(orch.flush(&mut chart), 1);
    assert_eq!(chart.families(), vec!["footprint", "delta-table"]);

    let opts = RenderOptions { pixel_ratio: 2.0, ..quiet() };
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!((img.width() as i32, img.height() as i32), (opts.width * 2, opts.height * 2));
}
