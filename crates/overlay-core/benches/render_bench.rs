use anyhow::Result;
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use overlay_core::{
    ArrowDirection, ArrowShape, BoxShape, Candle, EngineConfig, IndicatorParams, IndicatorResponse, LinePoint, LinePrimitive,
    LineSeriesData, OverlayChart, RenderOptions, SeriesOrchestrator,
};

fn build_chart(n: i64, shapes: usize) -> OverlayChart {
    let mut ch = OverlayChart::new(EngineConfig { default_visible_bars: n as usize, ..EngineConfig::default() });
    ch.set_candles(
        (0..n)
            .map(|i| {
                let y = (i as f64 * 0.05).sin() * 10.0 + 100.0;
                Candle::new(i * 60, y, y + 1.5, y - 1.5, y + 0.4)
            })
            .collect(),
    );
    let step = (n as usize / shapes.max(1)).max(1) as i64;
    let response = IndicatorResponse {
        series: vec![LineSeriesData {
            name: "SMA".into(),
            data: (0..n).map(|i| LinePoint::new(i * 60, (i as f64 * 0.05).sin() * 9.0 + 100.0)).collect(),
            ..Default::default()
        }],
        boxes: (0..shapes as i64).map(|k| BoxShape::new(k * step * 60, (k * step + 5) * 60, 105.0, 103.0)).collect(),
        arrows: (0..shapes as i64).map(|k| ArrowShape::new(k * step * 60, 95.0, ArrowDirection::Up)).collect(),
        ..Default::default()
    };
    let mut orch = SeriesOrchestrator::new(ch.config());
    let token = orch.begin_apply(&mut ch);
    orch.add_from_api_response(&mut ch, token, "bench", &response, &IndicatorParams::default(), LinePrimitive::boxed);
    orch.flush(&mut ch);
    ch
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    for &(n, shapes) in &[(200i64, 50usize), (1_000, 500)] {
        group.bench_function(format!("bars_{n}_shapes_{shapes}"), |b| {
            let mut ch = build_chart(n, shapes);
            let opts = RenderOptions { width: 800, height: 500, draw_labels: false, ..RenderOptions::default() };
            b.iter(|| -> Result<()> {
                let bytes = ch.render_to_png_bytes(&opts)?;
                black_box(bytes);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
