// File: crates/overlay-core/src/config.rs
// Summary: Engine configuration handed to the host constructor; every field has a default.

use serde::Deserialize;

use crate::error::{OverlayError, OverlayResult};
use crate::theme::{self, Theme};

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Number of bars the time scale shows before any user zoom.
    pub default_visible_bars: usize,
    /// Theme preset name, see [`theme::find`].
    pub theme: String,
    pub footprint: FootprintOptions,
    pub delta_table: DeltaTableOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_visible_bars: 120,
            theme: "dark".to_string(),
            footprint: FootprintOptions::default(),
            delta_table: DeltaTableOptions::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> OverlayResult<Self> {
        serde_json::from_str(json).map_err(OverlayError::Config)
    }

    pub fn theme(&self) -> Theme {
        theme::find(&self.theme)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FootprintOptions {
    /// Levels whose total volume is below this are never displayed.
    pub min_display_volume: f64,
    /// Share of a candle's volume the computed value area must cover.
    pub value_area_share: f64,
    /// Row height floor in media pixels.
    pub min_row_height: f32,
    pub font_size: f32,
    pub show_poc: bool,
    pub show_value_area: bool,
}

impl Default for FootprintOptions {
    fn default() -> Self {
        Self {
            min_display_volume: 0.0,
            value_area_share: 0.7,
            min_row_height: 10.0,
            font_size: 9.0,
            show_poc: true,
            show_value_area: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeltaTableOptions {
    pub row_height: f32,
    pub font_size: f32,
    /// Width of the caption column at the left edge of the strip.
    pub label_width: f32,
}

impl Default for DeltaTableOptions {
    fn default() -> Self {
        Self { row_height: 16.0, font_size: 10.0, label_width: 64.0 }
    }
}
