// File: crates/overlay-core/src/types.rs
// Summary: Shared types and constants (time, sizes, paddings).

/// Domain time: UNIX timestamp in seconds, as delivered by the indicator API.
pub type Time = i64;

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 640;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(8, 64, 16, 16)
    }
}

/// Price range an overlay asks the host to keep visible when autoscaling.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoscaleInfo {
    pub min_value: f64,
    pub max_value: f64,
}

impl AutoscaleInfo {
    /// Range spanning both values, whichever order they come in.
    pub fn spanning(a: f64, b: f64) -> Self {
        Self { min_value: a.min(b), max_value: a.max(b) }
    }

    /// Widen to include `other`.
    pub fn merge(self, other: AutoscaleInfo) -> Self {
        Self {
            min_value: self.min_value.min(other.min_value),
            max_value: self.max_value.max(other.max_value),
        }
    }

    /// Fold an iterator of finite `(lo, hi)` pairs; `None` when nothing finite was seen.
    pub fn from_ranges(ranges: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        ranges
            .into_iter()
            .filter(|(lo, hi)| lo.is_finite() && hi.is_finite())
            .map(|(lo, hi)| Self::spanning(lo, hi))
            .reduce(Self::merge)
    }
}

/// Lenient decoding of wire timestamps: integers, floats (truncated toward
/// negative infinity) and numeric strings are all accepted.
pub(crate) mod wire_time {
    use serde::{Deserialize, Deserializer};

    use super::Time;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireTime {
        Int(i64),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    impl WireTime {
        fn into_time(self) -> Option<Time> {
            match self {
                WireTime::Int(t) => Some(t),
                WireTime::Float(f) if f.is_finite() => Some(f.floor() as Time),
                WireTime::Float(_) => None,
                WireTime::Text(s) => {
                    let s = s.trim();
                    s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.floor() as Time))
                }
                WireTime::Other(_) => None,
            }
        }
    }

    pub fn required<'de, D: Deserializer<'de>>(d: D) -> Result<Time, D::Error> {
        WireTime::deserialize(d)?
            .into_time()
            .ok_or_else(|| serde::de::Error::custom("time is not a finite number"))
    }

    /// Unparsable values become `None` so the owning shape is skipped, not the whole response.
    pub fn optional<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Time>, D::Error> {
        Ok(Option::<WireTime>::deserialize(d)?.and_then(WireTime::into_time))
    }
}

/// Lenient decoding of optional wire numbers (prices, sizes, widths): numbers
/// and numeric strings are accepted, anything else becomes `None`.
pub(crate) mod wire_number {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireNumber {
        Num(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    impl WireNumber {
        fn into_f64(self) -> Option<f64> {
            match self {
                WireNumber::Num(v) => Some(v),
                WireNumber::Text(s) => s.trim().parse::<f64>().ok(),
                WireNumber::Other(_) => None,
            }
        }
    }

    pub fn optional_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(Option::<WireNumber>::deserialize(d)?.and_then(WireNumber::into_f64))
    }

    pub fn optional_f32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f32>, D::Error> {
        Ok(optional_f64(d)?.map(|v| v as f32))
    }
}
