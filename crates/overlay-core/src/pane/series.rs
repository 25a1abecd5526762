// File: crates/overlay-core/src/pane/series.rs
// Summary: Views for indicator lines and the band fill between two lines.

use std::sync::Arc;

use skia_safe as skia;

use crate::candle::Candle;
use crate::indicator::LinePoint;
use crate::render::{FillRenderer, LineRenderer, NoopRenderer, PaneRenderer, ResolvedFill, ResolvedLine};
use crate::resolver::HostContext;
use crate::types::Time;

use super::PaneView;

pub struct LinePaneView {
    points: Arc<[LinePoint]>,
    candles: Arc<[Candle]>,
    color: skia::Color,
    width: f32,
    cache: Option<ResolvedLine>,
}

impl LinePaneView {
    pub fn new(points: Arc<[LinePoint]>, candles: Arc<[Candle]>, color: skia::Color, width: f32) -> Self {
        Self { points, candles, color, width, cache: None }
    }

    pub fn resolved(&self) -> Option<&ResolvedLine> {
        self.cache.as_ref()
    }
}

impl PaneView for LinePaneView {
    fn update(&mut self, host: &HostContext<'_>) {
        self.cache = host.resolver(&self.candles).map(|r| ResolvedLine {
            points: self
                .points
                .iter()
                .map(|p| Some((r.x(p.time)?, r.y(p.value)?)))
                .collect(),
            color: self.color,
            width: self.width,
        });
    }

    fn renderer(&self) -> Box<dyn PaneRenderer + '_> {
        match &self.cache {
            Some(line) => Box::new(LineRenderer { line }),
            None => Box::new(NoopRenderer),
        }
    }
}

pub struct FillPaneView {
    upper: Arc<[LinePoint]>,
    lower: Arc<[LinePoint]>,
    candles: Arc<[Candle]>,
    color: skia::Color,
    cache: Option<ResolvedFill>,
}

impl FillPaneView {
    pub fn new(upper: Arc<[LinePoint]>, lower: Arc<[LinePoint]>, candles: Arc<[Candle]>, color: skia::Color) -> Self {
        Self { upper, lower, candles, color, cache: None }
    }

    pub fn resolved(&self) -> Option<&ResolvedFill> {
        self.cache.as_ref()
    }
}

/// Value of `points` (ascending by time) at exactly `time`.
fn value_at(points: &[LinePoint], time: Time) -> Option<f64> {
    let i = points.partition_point(|p| p.time < time);
    points.get(i).filter(|p| p.time == time).map(|p| p.value)
}

impl PaneView for FillPaneView {
    fn update(&mut self, host: &HostContext<'_>) {
        let Some(r) = host.resolver(&self.candles) else {
            self.cache = None;
            return;
        };
        let mut runs = Vec::new();
        let mut run: Vec<(f32, f32, f32)> = Vec::new();
        for p in self.upper.iter() {
            let resolved = value_at(&self.lower, p.time)
                .and_then(|lower| Some((r.x(p.time)?, r.y(p.value)?, r.y(lower)?)));
            match resolved {
                Some(pt) => run.push(pt),
                None if !run.is_empty() => runs.push(std::mem::take(&mut run)),
                None => {}
            }
        }
        if !run.is_empty() {
            runs.push(run);
        }
        self.cache = Some(ResolvedFill { runs, color: self.color });
    }

    fn renderer(&self) -> Box<dyn PaneRenderer + '_> {
        match &self.cache {
            Some(fill) => Box::new(FillRenderer { fill }),
            None => Box::new(NoopRenderer),
        }
    }
}
