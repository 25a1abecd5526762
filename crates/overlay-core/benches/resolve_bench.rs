use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion, black_box};
use overlay_core::scale::{CandleTimeScale, TimeScale, ValueScale};
use overlay_core::{BoxPrimitive, BoxShape, Candle, HostContext, SeriesPrimitive};

fn candles(n: i64) -> Arc<[Candle]> {
    (0..n).map(|i| Candle::new(i * 60, 10.0, 11.0, 9.0, 10.5)).collect::<Vec<_>>().into()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("box_update_cycle");
    for &n in &[10_000i64, 100_000] {
        let cs = candles(n);
        // half the boxes start between bars and go through the index fallback
        let boxes: Vec<BoxShape> = (0..1_000).map(|k| BoxShape::new(k * 97 + (k % 2) * 7, k * 97 + 600, 10.5, 9.5)).collect();
        let mut prim = BoxPrimitive::new(boxes, Arc::clone(&cs));
        let ts = CandleTimeScale::new(TimeScale::fit(0.0, 1_000.0, 0, n as usize - 1), &cs);
        let price = ValueScale::new_linear(0.0, 600.0, 9.0, 11.0);
        group.bench_function(format!("candles_{n}"), |b| {
            b.iter(|| {
                prim.update_all_views(&HostContext::new(&ts, &price));
                black_box(prim.view().resolved().len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
