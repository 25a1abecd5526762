// File: crates/overlay-core/src/primitive.rs
// Summary: Overlay primitives: own a data array, drive their pane views, report autoscale ranges.

use std::sync::Arc;

use skia_safe as skia;

use crate::candle::{Candle, FootprintCandle};
use crate::config::{DeltaTableOptions, FootprintOptions};
use crate::indicator::LinePoint;
use crate::pane::{DeltaTablePaneView, FillPaneView, FootprintPaneView, LinePaneView, PaneView, ShapeFamily, ShapePaneView};
use crate::resolver::HostContext;
use crate::shape::{ArrowShape, BoxShape, MarkerShape};
use crate::theme::Theme;
use crate::types::AutoscaleInfo;

/// Object the host attaches to a series and redraws every tick.
pub trait SeriesPrimitive {
    /// Family name used for logging and bookkeeping ("boxes", "line", ...).
    fn family(&self) -> &'static str;
    /// Run `update` on every owned view.
    fn update_all_views(&mut self, host: &HostContext<'_>);
    /// Views in paint order.
    fn pane_views(&self) -> Vec<&dyn PaneView>;
    /// Price range this primitive needs visible; `None` when it has no data.
    fn autoscale_info(&self) -> Option<AutoscaleInfo>;
}

/// Primitive over one point-anchored shape family.
pub struct ShapePrimitive<F: ShapeFamily> {
    shapes: Arc<[F]>,
    view: ShapePaneView<F>,
}

pub type BoxPrimitive = ShapePrimitive<BoxShape>;
pub type ArrowPrimitive = ShapePrimitive<ArrowShape>;
pub type MarkerPrimitive = ShapePrimitive<MarkerShape>;

impl<F: ShapeFamily> ShapePrimitive<F> {
    pub fn new(shapes: impl Into<Arc<[F]>>, candles: Arc<[Candle]>) -> Self {
        let shapes = shapes.into();
        let view = ShapePaneView::new(Arc::clone(&shapes), candles);
        Self { shapes, view }
    }

    /// Default constructor in the shape the orchestrator expects.
    pub fn boxed(shapes: Vec<F>, candles: Arc<[Candle]>) -> Box<dyn SeriesPrimitive> {
        Box::new(Self::new(shapes, candles))
    }

    pub fn shapes(&self) -> &[F] {
        &self.shapes
    }

    pub fn view(&self) -> &ShapePaneView<F> {
        &self.view
    }
}

impl<F: ShapeFamily> SeriesPrimitive for ShapePrimitive<F> {
    fn family(&self) -> &'static str {
        F::FAMILY
    }

    fn update_all_views(&mut self, host: &HostContext<'_>) {
        self.view.update(host);
    }

    fn pane_views(&self) -> Vec<&dyn PaneView> {
        vec![&self.view]
    }

    fn autoscale_info(&self) -> Option<AutoscaleInfo> {
        AutoscaleInfo::from_ranges(self.shapes.iter().filter_map(F::price_range))
    }
}

/// Order-flow footprint columns.
pub struct FootprintPrimitive {
    footprint: Arc<[FootprintCandle]>,
    view: FootprintPaneView,
}

impl FootprintPrimitive {
    pub fn new(footprint: impl Into<Arc<[FootprintCandle]>>, candles: Arc<[Candle]>, options: FootprintOptions, theme: &Theme) -> Self {
        let footprint = footprint.into();
        let view = FootprintPaneView::new(Arc::clone(&footprint), candles, options, theme);
        Self { footprint, view }
    }

    pub fn view(&self) -> &FootprintPaneView {
        &self.view
    }
}

impl SeriesPrimitive for FootprintPrimitive {
    fn family(&self) -> &'static str {
        "footprint"
    }

    fn update_all_views(&mut self, host: &HostContext<'_>) {
        self.view.update(host);
    }

    fn pane_views(&self) -> Vec<&dyn PaneView> {
        vec![&self.view]
    }

    fn autoscale_info(&self) -> Option<AutoscaleInfo> {
        AutoscaleInfo::from_ranges(self.footprint.iter().map(|f| (f.candle.low, f.candle.high)))
    }
}

/// Footer strip with per-candle delta figures. Takes no part in autoscale.
pub struct DeltaTablePrimitive {
    view: DeltaTablePaneView,
}

impl DeltaTablePrimitive {
    pub fn new(footprint: impl Into<Arc<[FootprintCandle]>>, candles: Arc<[Candle]>, options: &DeltaTableOptions, theme: &Theme) -> Self {
        Self { view: DeltaTablePaneView::new(footprint.into(), candles, options, theme) }
    }

    pub fn view(&self) -> &DeltaTablePaneView {
        &self.view
    }
}

impl SeriesPrimitive for DeltaTablePrimitive {
    fn family(&self) -> &'static str {
        "delta-table"
    }

    fn update_all_views(&mut self, host: &HostContext<'_>) {
        self.view.update(host);
    }

    fn pane_views(&self) -> Vec<&dyn PaneView> {
        vec![&self.view]
    }

    fn autoscale_info(&self) -> Option<AutoscaleInfo> {
        None
    }
}

/// Resolved style of a line series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: skia::Color,
    pub width: f32,
}

/// Everything a line constructor needs to build one line series.
#[derive(Clone, Debug)]
pub struct LineSeriesSpec {
    pub key: String,
    pub points: Arc<[LinePoint]>,
    pub style: LineStyle,
    pub candles: Arc<[Candle]>,
}

/// Indicator line drawn as an overlay polyline.
pub struct LinePrimitive {
    points: Arc<[LinePoint]>,
    view: LinePaneView,
}

impl LinePrimitive {
    pub fn new(spec: LineSeriesSpec) -> Self {
        let view = LinePaneView::new(Arc::clone(&spec.points), spec.candles, spec.style.color, spec.style.width);
        Self { points: spec.points, view }
    }

    pub fn boxed(spec: LineSeriesSpec) -> Box<dyn SeriesPrimitive> {
        Box::new(Self::new(spec))
    }

    pub fn view(&self) -> &LinePaneView {
        &self.view
    }
}

impl SeriesPrimitive for LinePrimitive {
    fn family(&self) -> &'static str {
        "line"
    }

    fn update_all_views(&mut self, host: &HostContext<'_>) {
        self.view.update(host);
    }

    fn pane_views(&self) -> Vec<&dyn PaneView> {
        vec![&self.view]
    }

    fn autoscale_info(&self) -> Option<AutoscaleInfo> {
        AutoscaleInfo::from_ranges(self.points.iter().map(|p| (p.value, p.value)))
    }
}

/// Shaded band between two lines.
pub struct FillPrimitive {
    upper: Arc<[LinePoint]>,
    lower: Arc<[LinePoint]>,
    view: FillPaneView,
}

impl FillPrimitive {
    pub fn new(upper: Arc<[LinePoint]>, lower: Arc<[LinePoint]>, candles: Arc<[Candle]>, color: skia::Color) -> Self {
        let view = FillPaneView::new(Arc::clone(&upper), Arc::clone(&lower), candles, color);
        Self { upper, lower, view }
    }

    pub fn view(&self) -> &FillPaneView {
        &self.view
    }
}

impl SeriesPrimitive for FillPrimitive {
    fn family(&self) -> &'static str {
        "fills"
    }

    fn update_all_views(&mut self, host: &HostContext<'_>) {
        self.view.update(host);
    }

    fn pane_views(&self) -> Vec<&dyn PaneView> {
        vec![&self.view]
    }

    fn autoscale_info(&self) -> Option<AutoscaleInfo> {
        AutoscaleInfo::from_ranges(self.upper.iter().chain(self.lower.iter()).map(|p| (p.value, p.value)))
    }
}

/// Several fills attached as one primitive, so a cycle replaces them together.
pub struct FillGroupPrimitive {
    fills: Vec<FillPrimitive>,
}

impl FillGroupPrimitive {
    pub fn new(fills: Vec<FillPrimitive>) -> Self {
        Self { fills }
    }

    pub fn fills(&self) -> &[FillPrimitive] {
        &self.fills
    }
}

impl SeriesPrimitive for FillGroupPrimitive {
    fn family(&self) -> &'static str {
        "fills"
    }

    fn update_all_views(&mut self, host: &HostContext<'_>) {
        for f in &mut self.fills {
            f.update_all_views(host);
        }
    }

    fn pane_views(&self) -> Vec<&dyn PaneView> {
        self.fills.iter().flat_map(|f| f.pane_views()).collect()
    }

    fn autoscale_info(&self) -> Option<AutoscaleInfo> {
        self.fills.iter().filter_map(|f| f.autoscale_info()).reduce(AutoscaleInfo::merge)
    }
}
