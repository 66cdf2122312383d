#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One parsed subtitle block from a drone telemetry SRT file.
///
/// Every field is optional because a block may lack any given line type.
/// When a block contains more than one line matching the same pattern, the
/// later line overwrites the earlier values.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameRecord {
    /// Sequence ordinal from the digit-only line at the top of a block
    pub frame_number: Option<u64>,
    /// Display interval start, stored verbatim (e.g. "00:00:00,000")
    pub start_time: Option<String>,
    /// Display interval end, stored verbatim
    pub end_time: Option<String>,
    pub frame_cnt: Option<u64>,
    /// Inter-frame delta, stored verbatim (e.g. "33ms")
    pub diff_time: Option<String>,
    /// Wall-clock timestamp, stored verbatim ("YYYY-MM-DD HH:MM:SS.mmm")
    pub date_time: Option<String>,
    pub iso: Option<u32>,
    /// Shutter speed text, e.g. "1/500"
    pub shutter_speed: Option<String>,
    pub f_num: Option<f64>,
    pub ev: Option<f64>,
    pub color_mode: Option<String>,
    pub focal_length: Option<f64>,
    /// Signed degrees
    pub latitude: Option<f64>,
    /// Signed degrees
    pub longitude: Option<f64>,
    /// Altitude relative to the takeoff point, meters
    pub rel_alt: Option<f64>,
    /// Absolute altitude, meters
    pub abs_alt: Option<f64>,
    /// Color temperature, Kelvin
    pub ct: Option<u32>,
}

impl FrameRecord {
    /// True when no line in the block has contributed a field yet.
    /// A blank-line delimiter only emits non-empty records.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The GPS coordinate pair, when the block carried a camera-parameter line.
    pub fn coordinate(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}
