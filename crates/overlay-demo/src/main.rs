// File: crates/overlay-demo/src/main.rs
// Summary: Demo loads an OHLC CSV, applies indicator overlays through the orchestrator and renders a PNG.
// Usage: overlay-demo <candles.csv> [indicator.json] [config.json]
// Without an indicator file a moving-average band with crossover arrows is derived from the candles.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use overlay_core::indicator::FillSpec;
use overlay_core::{
    ArrowDirection, ArrowShape, BoxShape, Candle, EngineConfig, IndicatorParams, IndicatorResponse, LinePoint, LinePrimitive,
    LineSeriesData, MarkerKind, MarkerShape, OverlayChart, RenderOptions, SeriesOrchestrator,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let csv_path = PathBuf::from(args.next().unwrap_or_else(|| "candles.csv".to_string()));
    let indicator_path = args.next().map(PathBuf::from);
    let config_path = args.next().map(PathBuf::from);

    let config = match &config_path {
        Some(p) => {
            let text = std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            EngineConfig::from_json_str(&text)?
        }
        None => EngineConfig::default(),
    };

    let candles = load_ohlc_csv(&csv_path).with_context(|| format!("failed to load CSV '{}'", csv_path.display()))?;
    if candles.is_empty() {
        anyhow::bail!("no candles loaded, check headers/delimiter.");
    }
    info!(count = candles.len(), path = %csv_path.display(), "candles loaded");

    let response = match &indicator_path {
        Some(p) => {
            let text = std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            IndicatorResponse::from_json_str(&text)?
        }
        None => derived_indicator(&candles, 20),
    };

    let mut chart = OverlayChart::new(config);
    chart.set_candles(candles);
    let mut orch = SeriesOrchestrator::new(chart.config());
    let token = orch.begin_apply(&mut chart);
    orch.add_from_api_response(&mut chart, token, "demo", &response, &IndicatorParams::default(), LinePrimitive::boxed);
    let stages = orch.flush(&mut chart);
    info!(stages, primitives = chart.primitive_count(), "overlays applied");

    let out = out_name(&csv_path);
    chart.render_to_png(&RenderOptions::default(), &out)?;
    info!(path = %out.display(), "wrote chart");
    Ok(())
}

/// Output file name like target/out/overlay_<stem>.png
fn out_name(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    PathBuf::from("target/out").join(format!("overlay_{stem}.png"))
}

/// Load OHLC(V) CSV into candles; rows that fail to parse are skipped.
fn load_ohlc_csv(path: &Path) -> Result<Vec<Candle>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"]);
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "adj_close", "close_price"]);
    let i_volume = idx(&["volume", "vol", "v"]);
    if i_open.is_none() || i_high.is_none() || i_low.is_none() || i_close.is_none() {
        warn!(?headers, "could not find one of open/high/low/close columns");
    }

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let parse = |i: Option<usize>| -> Option<f64> { i.and_then(|ix| rec.get(ix)).and_then(|s| s.trim().parse::<f64>().ok()) };
        // rows without a usable time column are spaced one minute apart
        let time = i_time.and_then(|ix| rec.get(ix)).and_then(parse_time).unwrap_or(row as i64 * 60);
        match (parse(i_open), parse(i_high), parse(i_low), parse(i_close)) {
            (Some(o), Some(h), Some(l), Some(c)) => match Candle::try_new(time, o, h, l, c) {
                Ok(candle) => out.push(match parse(i_volume) {
                    Some(v) => candle.with_volume(v),
                    None => candle,
                }),
                Err(_) => skipped += 1,
            },
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, "rows skipped");
    }
    Ok(out)
}

/// Epoch seconds or milliseconds, RFC 3339, `YYYY-MM-DD HH:MM:SS` or a bare date.
fn parse_time(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        // epoch ms -> sec
        return Some(if n > 10_i64.pow(12) { n / 1000 } else { n });
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

/// Moving-average band with a fill, close/average crossover arrows, a box
/// around the last `period` bars and markers on the extreme closes.
fn derived_indicator(candles: &[Candle], period: usize) -> IndicatorResponse {
    let period = period.max(2).min(candles.len().max(2));
    let mut mid = Vec::new();
    let mut upper = Vec::new();
    let mut lower = Vec::new();
    for w in candles.windows(period) {
        let n = w.len() as f64;
        let mean = w.iter().map(|c| c.close).sum::<f64>() / n;
        let sd = (w.iter().map(|c| (c.close - mean).powi(2)).sum::<f64>() / n).sqrt();
        let t = w[w.len() - 1].time;
        mid.push(LinePoint::new(t, mean));
        upper.push(LinePoint::new(t, mean + 2.0 * sd));
        lower.push(LinePoint::new(t, mean - 2.0 * sd));
    }

    let closes = &candles[period - 1..];
    let arrows = closes
        .windows(2)
        .zip(mid.windows(2))
        .filter_map(|(c, m)| {
            let (was_above, is_above) = (c[0].close > m[0].value, c[1].close > m[1].value);
            (was_above != is_above).then(|| {
                let mut a = if is_above {
                    ArrowShape::new(c[1].time, c[1].low, ArrowDirection::ArrowUp)
                } else {
                    ArrowShape::new(c[1].time, c[1].high, ArrowDirection::ArrowDown)
                };
                a.color = Some(if is_above { "#26a69a" } else { "#ef5350" }.to_string());
                a
            })
        })
        .collect();

    let tail = &candles[candles.len().saturating_sub(period)..];
    let boxes = match (tail.first(), tail.last()) {
        (Some(first), Some(last)) => {
            let hi = tail.iter().map(|c| c.high).fold(f64::MIN, f64::max);
            let lo = tail.iter().map(|c| c.low).fold(f64::MAX, f64::min);
            let mut range = BoxShape::new(first.time, last.time, hi, lo);
            range.text = Some(format!("last {period}"));
            vec![range]
        }
        _ => Vec::new(),
    };

    let markers = [
        candles.iter().max_by(|a, b| a.close.total_cmp(&b.close)).map(|c| MarkerShape::new(c.time, c.high, MarkerKind::TriangleDown)),
        candles.iter().min_by(|a, b| a.close.total_cmp(&b.close)).map(|c| MarkerShape::new(c.time, c.low, MarkerKind::Triangle)),
    ]
    .into_iter()
    .flatten()
    .collect();

    IndicatorResponse {
        series: vec![
            LineSeriesData { name: "basis".into(), color: Some("#ffb300".into()), line_width: Some(1.5), data: mid },
            LineSeriesData { name: "upper".into(), data: upper, ..Default::default() },
            LineSeriesData { name: "lower".into(), data: lower, ..Default::default() },
        ],
        boxes,
        arrows,
        markers,
        fills: vec![FillSpec { series1: "upper".into(), series2: "lower".into(), color: None }],
        footprint: Vec::new(),
    }
}
