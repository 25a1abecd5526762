// File: crates/overlay-core/src/orchestrator.rs
// Summary: Reconciles indicator responses into line series and per-family overlay primitives.
// Notes:
// - One apply request is current at a time. `begin_apply` hands out a token;
//   responses carrying an older token are ignored.
// - Shape families are inserted through an ordered stage queue that the host
//   pumps once per redraw tick. Queued stages remember the generation that
//   queued them and are dropped once that generation is superseded.
// - Every family is replaced wholesale; families never block each other.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::candle::{Candle, FootprintCandle};
use crate::color::css_or;
use crate::config::{DeltaTableOptions, EngineConfig, FootprintOptions};
use crate::indicator::{IndicatorParams, IndicatorResponse, LinePoint};
use crate::primitive::{
    ArrowPrimitive, BoxPrimitive, DeltaTablePrimitive, FillGroupPrimitive, FillPrimitive, FootprintPrimitive,
    LineSeriesSpec, LineStyle, MarkerPrimitive, SeriesPrimitive,
};
use crate::shape::{ArrowShape, BoxShape, MarkerShape};
use crate::theme::Theme;

const DEFAULT_LINE_WIDTH: f32 = 2.0;

/// Handle of a primitive attached to a host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrimitiveId(pub u64);

/// Host chart surface the orchestrator drives.
pub trait ChartHost {
    fn attach_primitive(&mut self, primitive: Box<dyn SeriesPrimitive>) -> PrimitiveId;
    /// `false` when `id` was not attached.
    fn detach_primitive(&mut self, id: PrimitiveId) -> bool;
    /// Domain candles of the main series, used for index fallback.
    fn candles(&self) -> Arc<[Candle]>;
}

/// Deferred insertion steps, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Footprint,
    Boxes,
    Arrows,
    Markers,
    Fills,
}

impl Stage {
    pub const ALL: [Stage; 5] = [Stage::Footprint, Stage::Boxes, Stage::Arrows, Stage::Markers, Stage::Fills];
}

/// Identifies one "apply indicator set" request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApplyToken {
    generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The token was superseded by a newer `begin_apply`; nothing changed.
    Superseded,
}

struct PendingFill {
    upper: Arc<[LinePoint]>,
    lower: Arc<[LinePoint]>,
    color: skia_safe::Color,
}

/// Shapes one indicator key contributed to the current generation.
#[derive(Default)]
struct Contribution {
    footprint: Vec<FootprintCandle>,
    boxes: Vec<BoxShape>,
    arrows: Vec<ArrowShape>,
    markers: Vec<MarkerShape>,
    fills: Vec<PendingFill>,
}

impl Contribution {
    /// Stages with something to draw for this key.
    fn stages(&self) -> Vec<Stage> {
        [
            (Stage::Footprint, self.footprint.is_empty()),
            (Stage::Boxes, self.boxes.is_empty()),
            (Stage::Arrows, self.arrows.is_empty()),
            (Stage::Markers, self.markers.is_empty()),
            (Stage::Fills, self.fills.is_empty()),
        ]
        .into_iter()
        .filter(|(_, empty)| !empty)
        .map(|(stage, _)| stage)
        .collect()
    }
}

/// Contributions of the current generation by indicator key, in first-apply
/// order. Re-applying a key overwrites its entry.
#[derive(Default)]
struct Cycle {
    by_key: Vec<(String, Contribution)>,
}

impl Cycle {
    /// Store `contribution` under `key`; returns what it replaced.
    fn put(&mut self, key: &str, contribution: Contribution) -> Option<Contribution> {
        match self.by_key.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, contribution)),
            None => {
                self.by_key.push((key.to_string(), contribution));
                None
            }
        }
    }

    /// Drop every key for which `matches` holds; returns the dropped entries.
    fn take_matching(&mut self, matches: impl Fn(&str) -> bool) -> Vec<Contribution> {
        let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.by_key).into_iter().partition(|(k, _)| matches(k.as_str()));
        self.by_key = kept;
        gone.into_iter().map(|(_, c)| c).collect()
    }

    /// One family flattened across keys.
    fn gather<T: Clone>(&self, pick: impl Fn(&Contribution) -> &[T]) -> Vec<T> {
        self.by_key.iter().flat_map(|(_, c)| pick(c).iter().cloned()).collect()
    }
}

pub type ShapeCtor<S> = Box<dyn Fn(Vec<S>, Arc<[Candle]>) -> Box<dyn SeriesPrimitive>>;

pub struct SeriesOrchestrator {
    generation: u64,
    lines: BTreeMap<String, PrimitiveId>,
    families: BTreeMap<Stage, Vec<PrimitiveId>>,
    cycle: Cycle,
    pending: BTreeSet<(u64, Stage)>,
    box_ctor: ShapeCtor<BoxShape>,
    arrow_ctor: ShapeCtor<ArrowShape>,
    marker_ctor: ShapeCtor<MarkerShape>,
    footprint_options: FootprintOptions,
    delta_table_options: DeltaTableOptions,
    theme: Theme,
}

impl SeriesOrchestrator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            generation: 0,
            lines: BTreeMap::new(),
            families: BTreeMap::new(),
            cycle: Cycle::default(),
            pending: BTreeSet::new(),
            box_ctor: Box::new(BoxPrimitive::boxed),
            arrow_ctor: Box::new(ArrowPrimitive::boxed),
            marker_ctor: Box::new(MarkerPrimitive::boxed),
            footprint_options: config.footprint.clone(),
            delta_table_options: config.delta_table.clone(),
            theme: config.theme(),
        }
    }

    pub fn with_box_ctor(mut self, ctor: impl Fn(Vec<BoxShape>, Arc<[Candle]>) -> Box<dyn SeriesPrimitive> + 'static) -> Self {
        self.box_ctor = Box::new(ctor);
        self
    }

    pub fn with_arrow_ctor(mut self, ctor: impl Fn(Vec<ArrowShape>, Arc<[Candle]>) -> Box<dyn SeriesPrimitive> + 'static) -> Self {
        self.arrow_ctor = Box::new(ctor);
        self
    }

    pub fn with_marker_ctor(mut self, ctor: impl Fn(Vec<MarkerShape>, Arc<[Candle]>) -> Box<dyn SeriesPrimitive> + 'static) -> Self {
        self.marker_ctor = Box::new(ctor);
        self
    }

    /// Start a new indicator set: supersedes any in-flight request, tears
    /// down all lines and shapes, and returns the token for its responses.
    pub fn begin_apply(&mut self, host: &mut dyn ChartHost) -> ApplyToken {
        self.generation += 1;
        self.cycle = Cycle::default();
        self.clear_all_shapes(host);
        self.remove_lines(host, "");
        debug!(generation = self.generation, "begin indicator set");
        ApplyToken { generation: self.generation }
    }

    pub fn is_current(&self, token: ApplyToken) -> bool {
        token.generation == self.generation
    }

    /// Apply one indicator response: lines immediately, shape families via the stage queue.
    pub fn add_from_api_response<L>(
        &mut self,
        host: &mut dyn ChartHost,
        token: ApplyToken,
        key: &str,
        response: &IndicatorResponse,
        params: &IndicatorParams,
        mut line_ctor: L,
    ) -> ApplyOutcome
    where
        L: FnMut(LineSeriesSpec) -> Box<dyn SeriesPrimitive>,
    {
        if !self.is_current(token) {
            debug!(key, stale = token.generation, current = self.generation, "ignoring superseded indicator response");
            return ApplyOutcome::Superseded;
        }

        let candles = host.candles();
        let key_prefix = format!("{key}:");
        self.remove_lines(host, &key_prefix);
        if params.visible {
            for series in &response.series {
                let style = LineStyle {
                    color: css_or(series.color.as_deref().or(params.color.as_deref()), self.theme.line_stroke),
                    width: series.line_width.or(params.line_width).filter(|w| *w > 0.0).unwrap_or(DEFAULT_LINE_WIDTH),
                };
                let line_key = format!("{key_prefix}{}", series.name);
                let spec = LineSeriesSpec {
                    key: line_key.clone(),
                    points: sorted_points(&series.data),
                    style,
                    candles: Arc::clone(&candles),
                };
                let id = host.attach_primitive(line_ctor(spec));
                self.lines.insert(line_key, id);
            }
        }

        let mut contribution = Contribution {
            footprint: response.footprint.clone(),
            boxes: response.boxes.clone(),
            arrows: response.arrows.clone(),
            markers: response.markers.clone(),
            fills: Vec::new(),
        };
        for fill in &response.fills {
            match (response.series_named(&fill.series1), response.series_named(&fill.series2)) {
                (Some(a), Some(b)) => contribution.fills.push(PendingFill {
                    upper: sorted_points(&a.data),
                    lower: sorted_points(&b.data),
                    color: css_or(fill.color.as_deref(), self.theme.fill),
                }),
                _ => debug!(key, series1 = %fill.series1, series2 = %fill.series2, "fill references unknown series"),
            }
        }
        // Re-applying a key replaces its shapes, so families it used to fill are rebuilt too.
        let mut touched = contribution.stages();
        if let Some(previous) = self.cycle.put(key, contribution) {
            touched.extend(previous.stages());
        }
        self.queue(touched);
        debug!(key, lines = response.series.len(), pending = self.pending.len(), "indicator response applied");
        ApplyOutcome::Applied
    }

    fn queue(&mut self, stages: impl IntoIterator<Item = Stage>) {
        for stage in stages {
            self.pending.insert((self.generation, stage));
        }
    }

    /// Run the next queued stage of the current generation. Stale stages are
    /// discarded on the way. Returns the stage that ran.
    pub fn pump(&mut self, host: &mut dyn ChartHost) -> Option<Stage> {
        while let Some((generation, stage)) = self.pending.pop_first() {
            if generation != self.generation {
                debug!(?stage, generation, current = self.generation, "dropping stage of superseded request");
                continue;
            }
            self.run_stage(host, stage);
            return Some(stage);
        }
        None
    }

    /// Run every queued stage; returns how many ran.
    pub fn flush(&mut self, host: &mut dyn ChartHost) -> usize {
        let mut ran = 0;
        while self.pump(host).is_some() {
            ran += 1;
        }
        ran
    }

    /// Stages still queued for the current generation, in run order.
    pub fn pending_stages(&self) -> Vec<Stage> {
        self.pending
            .iter()
            .filter(|(g, _)| *g == self.generation)
            .map(|(_, s)| *s)
            .collect()
    }

    fn run_stage(&mut self, host: &mut dyn ChartHost, stage: Stage) {
        let candles = host.candles();
        let primitives: Vec<Box<dyn SeriesPrimitive>> = match stage {
            Stage::Footprint => {
                let footprint: Arc<[FootprintCandle]> = self.cycle.gather(|c| &c.footprint).into();
                if footprint.is_empty() {
                    Vec::new()
                } else {
                    vec![
                        Box::new(FootprintPrimitive::new(Arc::clone(&footprint), Arc::clone(&candles), self.footprint_options.clone(), &self.theme))
                            as Box<dyn SeriesPrimitive>,
                        Box::new(DeltaTablePrimitive::new(footprint, candles, &self.delta_table_options, &self.theme)),
                    ]
                }
            }
            Stage::Boxes => single(self.cycle.gather(|c| &c.boxes), |v| (self.box_ctor)(v, candles)),
            Stage::Arrows => single(self.cycle.gather(|c| &c.arrows), |v| (self.arrow_ctor)(v, candles)),
            Stage::Markers => single(self.cycle.gather(|c| &c.markers), |v| (self.marker_ctor)(v, candles)),
            Stage::Fills => {
                let fills: Vec<FillPrimitive> = self
                    .cycle
                    .by_key
                    .iter()
                    .flat_map(|(_, c)| c.fills.iter())
                    .map(|f| FillPrimitive::new(Arc::clone(&f.upper), Arc::clone(&f.lower), Arc::clone(&candles), f.color))
                    .collect();
                if fills.is_empty() {
                    Vec::new()
                } else {
                    vec![Box::new(FillGroupPrimitive::new(fills)) as Box<dyn SeriesPrimitive>]
                }
            }
        };
        self.replace_family(host, stage, primitives);
    }

    /// Detach whatever `stage` currently has on the host and attach `primitives`.
    fn replace_family(&mut self, host: &mut dyn ChartHost, stage: Stage, primitives: Vec<Box<dyn SeriesPrimitive>>) {
        let old = self.families.remove(&stage).unwrap_or_default();
        for id in &old {
            host.detach_primitive(*id);
        }
        let ids: Vec<PrimitiveId> = primitives.into_iter().map(|p| host.attach_primitive(p)).collect();
        trace!(?stage, removed = old.len(), attached = ids.len(), "family replaced");
        if !ids.is_empty() {
            self.families.insert(stage, ids);
        }
    }

    /// Replace the box family with one primitive built by `ctor`.
    pub fn add_boxes<C>(&mut self, host: &mut dyn ChartHost, boxes: Vec<BoxShape>, ctor: C)
    where
        C: FnOnce(Vec<BoxShape>, Arc<[Candle]>) -> Box<dyn SeriesPrimitive>,
    {
        let candles = host.candles();
        let primitives = single(boxes, |v| ctor(v, candles));
        self.replace_family(host, Stage::Boxes, primitives);
    }

    pub fn add_arrows<C>(&mut self, host: &mut dyn ChartHost, arrows: Vec<ArrowShape>, ctor: C)
    where
        C: FnOnce(Vec<ArrowShape>, Arc<[Candle]>) -> Box<dyn SeriesPrimitive>,
    {
        let candles = host.candles();
        let primitives = single(arrows, |v| ctor(v, candles));
        self.replace_family(host, Stage::Arrows, primitives);
    }

    pub fn add_marker_shapes<C>(&mut self, host: &mut dyn ChartHost, markers: Vec<MarkerShape>, ctor: C)
    where
        C: FnOnce(Vec<MarkerShape>, Arc<[Candle]>) -> Box<dyn SeriesPrimitive>,
    {
        let candles = host.candles();
        let primitives = single(markers, |v| ctor(v, candles));
        self.replace_family(host, Stage::Markers, primitives);
    }

    /// Remove everything an indicator contributed: its line series now, and
    /// its shapes from the families, which are rebuilt through the stage
    /// queue. `prefix` names the indicator key; `"bb"` and `"bb:"` both mean
    /// indicator `bb` and never touch `bbw`. An empty prefix matches every
    /// indicator. Returns how many line series went.
    pub fn remove_series_by_prefix(&mut self, host: &mut dyn ChartHost, prefix: &str) -> usize {
        let prefix = match prefix {
            "" => String::new(),
            p if p.ends_with(':') => p.to_string(),
            p => format!("{p}:"),
        };
        let dropped = self.cycle.take_matching(|key| format!("{key}:").starts_with(&prefix));
        let touched: Vec<Stage> = dropped.iter().flat_map(Contribution::stages).collect();
        self.queue(touched);
        self.remove_lines(host, &prefix)
    }

    /// Detach line series whose key starts with `prefix`.
    fn remove_lines(&mut self, host: &mut dyn ChartHost, prefix: &str) -> usize {
        let doomed: Vec<String> = self.lines.keys().filter(|k| k.starts_with(prefix)).cloned().collect();
        for key in &doomed {
            if let Some(id) = self.lines.remove(key) {
                host.detach_primitive(id);
            }
        }
        if !doomed.is_empty() {
            debug!(prefix, removed = doomed.len(), "removed line series");
        }
        doomed.len()
    }

    /// Detach every shape-family primitive. Line series stay.
    pub fn clear_all_shapes(&mut self, host: &mut dyn ChartHost) {
        let families = std::mem::take(&mut self.families);
        let mut removed = 0usize;
        for id in families.into_values().flatten() {
            host.detach_primitive(id);
            removed += 1;
        }
        if removed > 0 {
            debug!(removed, "cleared shape primitives");
        }
    }

    pub fn line_keys(&self) -> impl Iterator<Item = &str> {
        self.lines.keys().map(String::as_str)
    }

    /// Primitives currently attached for `stage`.
    pub fn family_ids(&self, stage: Stage) -> &[PrimitiveId] {
        self.families.get(&stage).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Line data ascending by time; the wire does not promise an order.
fn sorted_points(points: &[LinePoint]) -> Arc<[LinePoint]> {
    let mut points = points.to_vec();
    points.sort_by_key(|p| p.time);
    points.into()
}

/// Zero or one primitive for a collection; empty collections build nothing.
fn single<S>(items: Vec<S>, build: impl FnOnce(Vec<S>) -> Box<dyn SeriesPrimitive>) -> Vec<Box<dyn SeriesPrimitive>> {
    if items.is_empty() {
        Vec::new()
    } else {
        vec![build(items)]
    }
}
