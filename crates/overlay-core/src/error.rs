// File: crates/overlay-core/src/error.rs
// Summary: Error type for the few fallible edges of the engine (decoding input, producing surfaces).
// Notes:
// - Coordinate resolution and drawing never fail; they skip the shape instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("malformed indicator response: {0}")]
    Response(#[source] serde_json::Error),
    #[error("invalid engine configuration: {0}")]
    Config(#[source] serde_json::Error),
    #[error("failed to create raster surface {width}x{height}")]
    Surface { width: i32, height: i32 },
    #[error("failed to encode surface as PNG")]
    Encode,
    #[error("failed to read back surface pixels")]
    ReadPixels,
}

pub type OverlayResult<T> = Result<T, OverlayError>;
