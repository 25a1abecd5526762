// File: crates/overlay-core/src/indicator.rs
// Summary: Indicator API response contract consumed by the orchestrator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::candle::FootprintCandle;
use crate::error::{OverlayError, OverlayResult};
use crate::shape::{ArrowShape, BoxShape, MarkerShape};
use crate::types::Time;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    #[serde(deserialize_with = "crate::types::wire_time::required")]
    pub time: Time,
    pub value: f64,
}

impl LinePoint {
    pub fn new(time: Time, value: f64) -> Self {
        Self { time, value }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSeriesData {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub line_width: Option<f32>,
    #[serde(default)]
    pub data: Vec<LinePoint>,
}

/// Shade the band between two named series of the same response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillSpec {
    pub series1: String,
    pub series2: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndicatorResponse {
    pub series: Vec<LineSeriesData>,
    pub boxes: Vec<BoxShape>,
    pub arrows: Vec<ArrowShape>,
    pub markers: Vec<MarkerShape>,
    pub fills: Vec<FillSpec>,
    pub footprint: Vec<FootprintCandle>,
}

impl IndicatorResponse {
    pub fn from_json_str(json: &str) -> OverlayResult<Self> {
        serde_json::from_str(json).map_err(OverlayError::Response)
    }

    pub fn series_named(&self, name: &str) -> Option<&LineSeriesData> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
            && self.boxes.is_empty()
            && self.arrows.is_empty()
            && self.markers.is_empty()
            && self.fills.is_empty()
            && self.footprint.is_empty()
    }
}

/// Caller-side parameters of one indicator request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndicatorParams {
    /// Line color used when a series does not carry its own.
    pub color: Option<String>,
    pub line_width: Option<f32>,
    /// `false` suppresses line series; shapes are still applied.
    pub visible: bool,
    /// Indicator-specific inputs (period, source, ...) passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self { color: None, line_width: None, visible: true, extra: BTreeMap::new() }
    }
}
