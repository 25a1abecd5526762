// File: crates/overlay-core/src/pane/shapes.rs
// Summary: Box/arrow/marker resolution into screen space.

use crate::render::{ArrowRenderer, BoxRenderer, MarkerRenderer, PaneRenderer, ResolvedArrow, ResolvedBox, ResolvedMarker};
use crate::resolver::CoordinateResolver;
use crate::shape::{ArrowShape, BoxShape, MarkerShape};

use super::ShapeFamily;

impl ShapeFamily for BoxShape {
    type Resolved = ResolvedBox;
    const FAMILY: &'static str = "boxes";

    fn resolve(&self, r: &CoordinateResolver<'_>) -> Option<ResolvedBox> {
        if self.time1.is_none() || self.time2.is_none() || self.price1.is_none() || self.price2.is_none() {
            return None;
        }
        Some(ResolvedBox {
            x1: r.x_opt(self.time1),
            x2: r.x_opt(self.time2),
            y1: r.y_opt(self.price1),
            y2: r.y_opt(self.price2),
            style: self.style(),
        })
    }

    fn drawable(b: &ResolvedBox) -> bool {
        b.x1.is_some() && b.x2.is_some() && b.y1.is_some() && b.y2.is_some()
    }

    fn price_range(&self) -> Option<(f64, f64)> {
        BoxShape::price_range(self)
    }

    fn renderer(resolved: &[ResolvedBox]) -> Box<dyn PaneRenderer + '_> {
        Box::new(BoxRenderer { boxes: resolved })
    }
}

impl ShapeFamily for ArrowShape {
    type Resolved = ResolvedArrow;
    const FAMILY: &'static str = "arrows";

    fn resolve(&self, r: &CoordinateResolver<'_>) -> Option<ResolvedArrow> {
        let (time, price) = (self.time?, self.price?);
        Some(ResolvedArrow { x: r.x(time), y: r.y(price), direction: self.direction, style: self.style() })
    }

    fn drawable(a: &ResolvedArrow) -> bool {
        a.x.is_some() && a.y.is_some()
    }

    fn price_range(&self) -> Option<(f64, f64)> {
        self.price.map(|p| (p, p))
    }

    fn renderer(resolved: &[ResolvedArrow]) -> Box<dyn PaneRenderer + '_> {
        Box::new(ArrowRenderer { arrows: resolved })
    }
}

impl ShapeFamily for MarkerShape {
    type Resolved = ResolvedMarker;
    const FAMILY: &'static str = "markers";

    fn resolve(&self, r: &CoordinateResolver<'_>) -> Option<ResolvedMarker> {
        let (time, price) = (self.time?, self.price?);
        Some(ResolvedMarker { x: r.x(time), y: r.y(price), kind: self.shape, style: self.style() })
    }

    fn drawable(m: &ResolvedMarker) -> bool {
        m.x.is_some() && m.y.is_some()
    }

    fn price_range(&self) -> Option<(f64, f64)> {
        self.price.map(|p| (p, p))
    }

    fn renderer(resolved: &[ResolvedMarker]) -> Box<dyn PaneRenderer + '_> {
        Box::new(MarkerRenderer { markers: resolved })
    }
}
