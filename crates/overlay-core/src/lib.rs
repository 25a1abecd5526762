// File: crates/overlay-core/src/lib.rs
// Summary: Overlay engine entry point; exports domain types, primitives, the orchestrator and the reference host.

pub mod candle;
pub mod chart;
pub mod color;
pub mod config;
pub mod error;
pub mod footprint;
pub mod geometry;
pub mod grid;
pub mod indicator;
pub mod orchestrator;
pub mod pane;
pub mod primitive;
pub mod render;
pub mod resolver;
pub mod scale;
pub mod shape;
pub mod text;
pub mod theme;
pub mod types;
pub mod view;

pub use candle::{Candle, FootprintCandle, PriceLevel};
pub use chart::{OverlayChart, RenderOptions};
pub use config::{DeltaTableOptions, EngineConfig, FootprintOptions};
pub use error::{OverlayError, OverlayResult};
pub use indicator::{IndicatorParams, IndicatorResponse, LinePoint, LineSeriesData};
pub use orchestrator::{ApplyOutcome, ApplyToken, ChartHost, PrimitiveId, SeriesOrchestrator, Stage};
pub use primitive::{
    ArrowPrimitive, BoxPrimitive, DeltaTablePrimitive, FootprintPrimitive, LinePrimitive, MarkerPrimitive, SeriesPrimitive,
};
pub use resolver::{CoordinateResolver, HostContext, PriceScaleApi, TimeScaleApi};
pub use shape::{ArrowDirection, ArrowShape, BorderStyle, BoxShape, MarkerKind, MarkerShape};
pub use theme::Theme;
pub use text::TextShaper;
pub use types::{AutoscaleInfo, Insets, Time};
