// File: crates/overlay-core/tests/resolver.rs
// Purpose: Time/price resolution against host scales, including the nearest-bar fallback.

use overlay_core::resolver::fallback_index;
use overlay_core::{Candle, CoordinateResolver, HostContext, PriceScaleApi, Time, TimeScaleApi};

/// Host that only knows the times it was given; bar i sits at 10 + i * spacing.
struct KnownTimes {
    times: Vec<Time>,
    spacing: f32,
}

impl TimeScaleApi for KnownTimes {
    fn time_to_coordinate(&self, time: Time) -> Option<f32> {
        self.times.iter().position(|t| *t == time).and_then(|i| self.logical_to_coordinate(i as f64))
    }
    fn logical_to_coordinate(&self, logical: f64) -> Option<f32> {
        Some(10.0 + logical as f32 * self.spacing)
    }
    fn bar_spacing(&self) -> f32 {
        self.spacing
    }
}

struct Inverted;

impl PriceScaleApi for Inverted {
    fn price_to_coordinate(&self, price: f64) -> Option<f32> {
        Some((200.0 - price) as f32)
    }
}

fn candles(times: &[Time]) -> Vec<Candle> {
    times.iter().map(|t| Candle::new(*t, 1.0, 2.0, 0.5, 1.5)).collect()
}

#[test]
fn fallback_index_is_left_bound_and_clamped() {
    let cs = candles(&[100, 200, 200, 300]);
    assert_eq!(fallback_index(&cs, 100), Some(0));
    assert_eq!(fallback_index(&cs, 200), Some(1), "leftmost duplicate");
    assert_eq!(fallback_index(&cs, 250), Some(3));
    assert_eq!(fallback_index(&cs, 50), Some(0));
    assert_eq!(fallback_index(&cs, 10_000), Some(3), "past the end clamps to last bar");
    assert_eq!(fallback_index(&[], 100), None);
}

#[test]
fn host_mapping_wins_over_fallback() {
    let cs = candles(&[100, 200, 300]);
    // host lays out bars in a different order than the candle slice
    let ts = KnownTimes { times: vec![300, 200, 100], spacing: 8.0 };
    let r = CoordinateResolver::new(&ts, &Inverted, &cs);
    assert_eq!(r.x(300), Some(10.0));
    assert_eq!(r.x(100), Some(26.0));
}

#[test]
fn unknown_time_snaps_to_insertion_bar() {
    let cs = candles(&[100, 200, 300]);
    let ts = KnownTimes { times: vec![100, 200, 300], spacing: 8.0 };
    let r = CoordinateResolver::new(&ts, &Inverted, &cs);
    assert_eq!(r.x(150), Some(18.0));
    assert_eq!(r.x(5_000), Some(26.0));
    assert_eq!(r.bar_spacing(), 8.0);
}

#[test]
fn empty_candles_leave_unknown_times_unresolved() {
    let ts = KnownTimes { times: vec![], spacing: 8.0 };
    let r = CoordinateResolver::new(&ts, &Inverted, &[]);
    assert_eq!(r.x(150), None);
}

#[test]
fn non_finite_prices_do_not_resolve() {
    let cs = candles(&[100]);
    let ts = KnownTimes { times: vec![100], spacing: 8.0 };
    let r = CoordinateResolver::new(&ts, &Inverted, &cs);
    assert_eq!(r.y(150.0), Some(50.0));
    assert_eq!(r.y(f64::NAN), None);
    assert_eq!(r.y(f64::INFINITY), None);
    assert_eq!(r.y_opt(None), None);
    assert_eq!(r.x_opt(Some(100)), Some(10.0));
}

#[test]
fn host_not_ready_yields_no_resolver() {
    let cs = candles(&[100]);
    assert!(HostContext::not_ready().resolver(&cs).is_none());
    let ts = KnownTimes { times: vec![100], spacing: 8.0 };
    let half = HostContext { time_scale: Some(&ts), price_scale: None };
    assert!(half.resolver(&cs).is_none());
    assert!(HostContext::new(&ts, &Inverted).resolver(&cs).is_some());
}
