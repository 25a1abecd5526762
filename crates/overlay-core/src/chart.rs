// File: crates/overlay-core/src/chart.rs
// Summary: Headless reference host: candles plus attached primitives, rendered through Skia CPU raster surfaces.
// Notes:
// - Every render is one redraw tick: primitives update their views against
//   the freshly laid out scales, then draw in attach order.
// - With no candles loaded the scales are absent and overlays draw nothing.

use std::sync::Arc;

use anyhow::{Context, Result};
use skia_safe as skia;
use tracing::{debug, trace};

use crate::candle::{sort_candles, Candle};
use crate::config::EngineConfig;
use crate::error::{OverlayError, OverlayResult};
use crate::grid::{format_price, linspace, price_ticks};
use crate::orchestrator::{ChartHost, PrimitiveId};
use crate::primitive::SeriesPrimitive;
use crate::render::BitmapTarget;
use crate::resolver::HostContext;
use crate::scale::{CandleTimeScale, TimeScale, ValueScale};
use crate::text::{Anchor, TextShaper};
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, WIDTH};
use crate::view::ViewState;

const CANDLE_BODY_SHARE: f32 = 0.7;
const PRICE_LABEL_SIZE: f32 = 11.0;

pub struct RenderOptions {
    /// Surface size in media pixels.
    pub width: i32,
    pub height: i32,
    /// Bitmap pixels per media pixel.
    pub pixel_ratio: f32,
    pub insets: Insets,
    /// Overrides the theme background.
    pub background: Option<skia::Color>,
    pub draw_labels: bool,
    pub draw_candles: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            pixel_ratio: 1.0,
            insets: Insets::default(),
            background: None,
            draw_labels: true,
            draw_candles: true,
        }
    }
}

impl RenderOptions {
    fn bitmap_size(&self) -> (i32, i32) {
        let ratio = self.ratio();
        (
            ((self.width.max(1) as f32) * ratio).round() as i32,
            ((self.height.max(1) as f32) * ratio).round() as i32,
        )
    }

    fn ratio(&self) -> f32 {
        if self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0 { self.pixel_ratio } else { 1.0 }
    }
}

/// Scales of one laid-out frame, in media pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub view: ViewState,
    pub time: TimeScale,
    pub price: ValueScale,
}

pub struct OverlayChart {
    config: EngineConfig,
    theme: Theme,
    candles: Arc<[Candle]>,
    primitives: Vec<(PrimitiveId, Box<dyn SeriesPrimitive>)>,
    next_id: u64,
    text: TextShaper,
}

impl OverlayChart {
    pub fn new(config: EngineConfig) -> Self {
        let theme = config.theme();
        Self {
            config,
            theme,
            candles: Arc::from(Vec::new()),
            primitives: Vec::new(),
            next_id: 1,
            text: TextShaper::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the main series. Candles are stored ascending by time.
    pub fn set_candles(&mut self, mut candles: Vec<Candle>) {
        sort_candles(&mut candles);
        debug!(count = candles.len(), "candles loaded");
        self.candles = candles.into();
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn primitive(&self, id: PrimitiveId) -> Option<&dyn SeriesPrimitive> {
        self.primitives.iter().find(|(pid, _)| *pid == id).map(|(_, p)| p.as_ref())
    }

    /// Family names of attached primitives, in attach order.
    pub fn families(&self) -> Vec<&'static str> {
        self.primitives.iter().map(|(_, p)| p.family()).collect()
    }

    /// Lay out the scales for `opts`; `None` while no candles are loaded.
    pub fn layout(&self, opts: &RenderOptions) -> Option<Layout> {
        let view = ViewState::fit(
            &self.candles,
            self.config.default_visible_bars,
            self.primitives.iter().map(|(_, p)| p.as_ref()),
        )?;
        let (l, t, r, b) = plot_rect(opts);
        Some(Layout {
            view,
            time: TimeScale::fit(l, r - l, view.first_bar, view.last_bar),
            price: ValueScale::new_linear(t, b, view.y_min, view.y_max),
        })
    }

    /// Run one update cycle on every attached primitive without drawing.
    pub fn update_views(&mut self, opts: &RenderOptions) {
        let layout = self.layout(opts);
        let candles = Arc::clone(&self.candles);
        let time = layout.map(|l| CandleTimeScale::new(l.time, &candles));
        let host = match (&time, &layout) {
            (Some(ts), Some(l)) => HostContext::new(ts, &l.price),
            _ => HostContext::not_ready(),
        };
        for (_, p) in &mut self.primitives {
            p.update_all_views(&host);
        }
    }

    fn draw(&mut self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let ratio = opts.ratio();
        canvas.clear(opts.background.unwrap_or(self.theme.background));

        let layout = self.layout(opts);
        let candles = Arc::clone(&self.candles);
        let (l, t, r, b) = plot_rect(opts);

        draw_grid(canvas, ratio, (l, t, r, b), self.theme.grid);
        if let Some(lay) = &layout {
            if opts.draw_candles {
                draw_candles(canvas, ratio, lay, &candles, &self.theme);
            }
            if opts.draw_labels {
                self.draw_price_labels(canvas, ratio, lay, r, opts.width as f32);
            }
        }

        let time = layout.map(|lay| CandleTimeScale::new(lay.time, &candles));
        let host = match (&time, &layout) {
            (Some(ts), Some(lay)) => HostContext::new(ts, &lay.price),
            _ => HostContext::not_ready(),
        };

        canvas.save();
        canvas.clip_rect(skia::Rect::from_ltrb(0.0, 0.0, r * ratio, opts.height as f32 * ratio), skia::ClipOp::Intersect, true);
        let target = BitmapTarget::new(canvas, ratio, opts.width as f32, opts.height as f32, &self.text);
        for (id, p) in &mut self.primitives {
            p.update_all_views(&host);
            for view in p.pane_views() {
                view.renderer().draw(&target);
            }
            trace!(id = id.0, family = p.family(), "primitive drawn");
        }
        canvas.restore();
    }

    fn draw_price_labels(&self, canvas: &skia::Canvas, ratio: f32, lay: &Layout, right: f32, width: f32) {
        let x = (right + width) * 0.5 * ratio;
        for price in price_ticks(lay.view.y_min, lay.view.y_max, 6) {
            let y = lay.price.to_px(price) * ratio;
            self.text.draw(canvas, &format_price(price), x, y, PRICE_LABEL_SIZE * ratio, self.theme.text, Anchor::Center, true);
        }
    }

    /// Render to a PNG-encoded byte buffer.
    pub fn render_to_png_bytes(&mut self, opts: &RenderOptions) -> OverlayResult<Vec<u8>> {
        let (w, h) = opts.bitmap_size();
        let mut surface = skia::surfaces::raster_n32_premul((w, h)).ok_or(OverlayError::Surface { width: w, height: h })?;
        self.draw(surface.canvas(), opts);

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(OverlayError::Encode)?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(&mut self, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Render into an unpremultiplied RGBA8 buffer: `(pixels, width, height, stride)`.
    pub fn render_to_rgba8(&mut self, opts: &RenderOptions) -> OverlayResult<(Vec<u8>, i32, i32, usize)> {
        let (w, h) = opts.bitmap_size();
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut surface = skia::surfaces::raster(&info, stride, None).ok_or(OverlayError::Surface { width: w, height: h })?;
        self.draw(surface.canvas(), opts);

        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(OverlayError::ReadPixels);
        }
        Ok((pixels, w, h, stride))
    }
}

impl ChartHost for OverlayChart {
    fn attach_primitive(&mut self, primitive: Box<dyn SeriesPrimitive>) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        trace!(id = id.0, family = primitive.family(), "primitive attached");
        self.primitives.push((id, primitive));
        id
    }

    fn detach_primitive(&mut self, id: PrimitiveId) -> bool {
        let before = self.primitives.len();
        self.primitives.retain(|(pid, _)| *pid != id);
        before != self.primitives.len()
    }

    fn candles(&self) -> Arc<[Candle]> {
        Arc::clone(&self.candles)
    }
}

// ---- helpers ----------------------------------------------------------------

/// Plot rectangle in media pixels: (left, top, right, bottom).
fn plot_rect(opts: &RenderOptions) -> (f32, f32, f32, f32) {
    let l = opts.insets.left as f32;
    let t = opts.insets.top as f32;
    let r = (opts.width - opts.insets.right as i32) as f32;
    let b = (opts.height - opts.insets.bottom as i32) as f32;
    (l, t, r.max(l + 1.0), b.max(t + 1.0))
}

fn draw_grid(canvas: &skia::Canvas, ratio: f32, (l, t, r, b): (f32, f32, f32, f32), color: skia::Color) {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint.set_stroke_width(ratio);

    for x in linspace(l as f64, r as f64, 10) {
        let x = x as f32 * ratio;
        canvas.draw_line((x, t * ratio), (x, b * ratio), &paint);
    }
    for y in linspace(t as f64, b as f64, 6) {
        let y = y as f32 * ratio;
        canvas.draw_line((l * ratio, y), (r * ratio, y), &paint);
    }
}

fn draw_candles(canvas: &skia::Canvas, ratio: f32, lay: &Layout, candles: &[Candle], theme: &Theme) {
    let Some(visible) = candles.get(lay.view.first_bar..=lay.view.last_bar) else { return };

    let mut wick = skia::Paint::default();
    wick.set_anti_alias(true);
    wick.set_style(skia::paint::Style::Stroke);
    wick.set_stroke_width(ratio);

    let mut body = skia::Paint::default();
    body.set_anti_alias(true);
    body.set_style(skia::paint::Style::Fill);

    let half = (lay.time.bar_spacing * CANDLE_BODY_SHARE).max(1.0) * 0.5;
    for (i, c) in visible.iter().enumerate() {
        let x = lay.time.to_px((lay.view.first_bar + i) as f64);
        let (y_o, y_h, y_l, y_c) = (lay.price.to_px(c.open), lay.price.to_px(c.high), lay.price.to_px(c.low), lay.price.to_px(c.close));

        let color = if c.is_up() { theme.candle_up } else { theme.candle_down };
        wick.set_color(color);
        body.set_color(color);

        canvas.draw_line((x * ratio, y_h * ratio), (x * ratio, y_l * ratio), &wick);
        let top = y_o.min(y_c);
        let bot = y_o.max(y_c).max(top + 1.0);
        canvas.draw_rect(skia::Rect::from_ltrb((x - half) * ratio, top * ratio, (x + half) * ratio, bot * ratio), &body);
    }
}
