// File: crates/overlay-core/src/pane/mod.rs
// Summary: Pane views: per-redraw adapters turning domain data into resolved screen caches.
// Notes:
// - `update` fully replaces the cache; nothing survives from the previous tick.
// - An empty cache is the only representation of "nothing to draw".

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::candle::Candle;
use crate::render::PaneRenderer;
use crate::resolver::{CoordinateResolver, HostContext};

pub mod footprint;
pub mod series;
pub mod shapes;

pub use footprint::{DeltaTablePaneView, FootprintPaneView};
pub use series::{FillPaneView, LinePaneView};

pub trait PaneView {
    /// Recompute the resolved cache from domain data and current host scales.
    fn update(&mut self, host: &HostContext<'_>);
    /// Renderer bound to the cache computed by the last `update`.
    fn renderer(&self) -> Box<dyn PaneRenderer + '_>;
}

/// A point-anchored annotation family (box, arrow, marker).
pub trait ShapeFamily: Clone + fmt::Debug + 'static {
    type Resolved: Clone + PartialEq + fmt::Debug;
    const FAMILY: &'static str;

    /// `None` when required geometry is missing.
    fn resolve(&self, resolver: &CoordinateResolver<'_>) -> Option<Self::Resolved>;
    /// True when every coordinate of the resolved shape is present.
    fn drawable(resolved: &Self::Resolved) -> bool;
    /// Prices this shape spans, when its geometry is complete.
    fn price_range(&self) -> Option<(f64, f64)>;
    fn renderer(resolved: &[Self::Resolved]) -> Box<dyn PaneRenderer + '_>;
}

/// View shared by every [`ShapeFamily`].
pub struct ShapePaneView<F: ShapeFamily> {
    shapes: Arc<[F]>,
    candles: Arc<[Candle]>,
    cache: Vec<F::Resolved>,
}

impl<F: ShapeFamily> ShapePaneView<F> {
    pub fn new(shapes: Arc<[F]>, candles: Arc<[Candle]>) -> Self {
        Self { shapes, candles, cache: Vec::new() }
    }

    /// Resolved shapes from the last update, in input order.
    pub fn resolved(&self) -> &[F::Resolved] {
        &self.cache
    }
}

impl<F: ShapeFamily> PaneView for ShapePaneView<F> {
    fn update(&mut self, host: &HostContext<'_>) {
        self.cache.clear();
        let Some(resolver) = host.resolver(&self.candles) else {
            trace!(family = F::FAMILY, "host not ready, nothing resolved");
            return;
        };
        let mut skipped = 0usize;
        for shape in self.shapes.iter() {
            match shape.resolve(&resolver) {
                Some(r) if F::drawable(&r) => self.cache.push(r),
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            trace!(family = F::FAMILY, skipped, total = self.shapes.len(), "dropped unresolvable shapes");
        }
    }

    fn renderer(&self) -> Box<dyn PaneRenderer + '_> {
        F::renderer(&self.cache)
    }
}
