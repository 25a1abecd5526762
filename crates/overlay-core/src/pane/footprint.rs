// File: crates/overlay-core/src/pane/footprint.rs
// Summary: Footprint grid layout and delta-table column resolution.

use std::sync::Arc;

use tracing::trace;

use crate::candle::{Candle, FootprintCandle};
use crate::config::{DeltaTableOptions, FootprintOptions};
use crate::footprint::select_levels;
use crate::render::delta_table::DeltaTableStyle;
use crate::render::footprint::FootprintPalette;
use crate::render::{DeltaColumn, DeltaTableRenderer, FootprintColumn, FootprintRenderer, PaneRenderer, ResolvedLevel};
use crate::resolver::{CoordinateResolver, HostContext};
use crate::theme::Theme;

use super::PaneView;

/// Share of the bar spacing a column occupies.
const COLUMN_WIDTH_SHARE: f32 = 0.9;
const PRICE_EPSILON: f64 = 1e-9;

pub struct FootprintPaneView {
    footprint: Arc<[FootprintCandle]>,
    candles: Arc<[Candle]>,
    options: FootprintOptions,
    palette: FootprintPalette,
    cache: Vec<FootprintColumn>,
}

impl FootprintPaneView {
    pub fn new(footprint: Arc<[FootprintCandle]>, candles: Arc<[Candle]>, options: FootprintOptions, theme: &Theme) -> Self {
        Self { footprint, candles, options, palette: FootprintPalette::from(theme), cache: Vec::new() }
    }

    pub fn resolved(&self) -> &[FootprintColumn] {
        &self.cache
    }

    fn column(&self, fc: &FootprintCandle, r: &CoordinateResolver<'_>, bar_spacing: f32) -> Option<FootprintColumn> {
        let c = &fc.candle;
        let x = r.x(c.time)?;
        let (open, high, low, close) = (r.y(c.open)?, r.y(c.high)?, r.y(c.low)?, r.y(c.close)?);

        let stats = select_levels(fc.levels(), bar_spacing, self.options.min_display_volume);
        let poc = if self.options.show_poc { fc.point_of_control() } else { None };
        let value_area = if self.options.show_value_area { fc.value_area(self.options.value_area_share) } else { None };

        // rows split the high..low span evenly, never thinner than the floor
        let (top_px, bottom_px) = (high.min(low), high.max(low));
        let n = stats.len().max(1) as f32;
        let row_h = ((bottom_px - top_px) / n).max(self.options.min_row_height);
        let grid_top = (top_px + bottom_px) * 0.5 - row_h * stats.len() as f32 * 0.5;

        let levels = stats
            .into_iter()
            .enumerate()
            .map(|(i, stat)| {
                let top = grid_top + i as f32 * row_h;
                ResolvedLevel {
                    is_poc: poc.is_some_and(|p| (p - stat.price).abs() < PRICE_EPSILON),
                    in_value_area: value_area.is_some_and(|(vah, val)| stat.price <= vah && stat.price >= val),
                    stat,
                    top,
                    bottom: top + row_h,
                }
            })
            .collect();

        Some(FootprintColumn {
            x,
            half_width: bar_spacing * COLUMN_WIDTH_SHARE * 0.5,
            open,
            high,
            low,
            close,
            up: c.is_up(),
            levels,
        })
    }
}

impl PaneView for FootprintPaneView {
    fn update(&mut self, host: &HostContext<'_>) {
        let Some(r) = host.resolver(&self.candles) else {
            self.cache.clear();
            return;
        };
        let bar_spacing = r.bar_spacing();
        let columns: Vec<FootprintColumn> = self
            .footprint
            .iter()
            .filter_map(|fc| self.column(fc, &r, bar_spacing))
            .collect();
        if columns.len() < self.footprint.len() {
            trace!(skipped = self.footprint.len() - columns.len(), "footprint candles outside resolvable range");
        }
        self.cache = columns;
    }

    fn renderer(&self) -> Box<dyn PaneRenderer + '_> {
        Box::new(FootprintRenderer { columns: &self.cache, palette: self.palette, font_size: self.options.font_size })
    }
}

pub struct DeltaTablePaneView {
    footprint: Arc<[FootprintCandle]>,
    candles: Arc<[Candle]>,
    style: DeltaTableStyle,
    cache: Vec<DeltaColumn>,
}

impl DeltaTablePaneView {
    pub fn new(footprint: Arc<[FootprintCandle]>, candles: Arc<[Candle]>, options: &DeltaTableOptions, theme: &Theme) -> Self {
        let style = DeltaTableStyle {
            positive: theme.buy,
            negative: theme.sell,
            zero: theme.neutral_cell,
            background: theme.table_background,
            text: theme.text,
            row_height: options.row_height,
            font_size: options.font_size,
            label_width: options.label_width,
        };
        Self { footprint, candles, style, cache: Vec::new() }
    }

    pub fn resolved(&self) -> &[DeltaColumn] {
        &self.cache
    }
}

impl PaneView for DeltaTablePaneView {
    fn update(&mut self, host: &HostContext<'_>) {
        self.cache.clear();
        let Some(r) = host.resolver(&self.candles) else { return };
        let half_width = r.bar_spacing() * 0.5;
        let mut cumulative = 0.0;
        let mut previous: Option<f64> = None;
        // running totals cover every candle, drawn or not
        for fc in self.footprint.iter() {
            let delta = fc.delta();
            cumulative += delta;
            let change = previous.map(|p| delta - p);
            previous = Some(delta);
            if let Some(x) = r.x(fc.candle.time) {
                self.cache.push(DeltaColumn { x, half_width, delta, cumulative, change });
            }
        }
    }

    fn renderer(&self) -> Box<dyn PaneRenderer + '_> {
        Box::new(DeltaTableRenderer { columns: &self.cache, style: self.style })
    }
}
