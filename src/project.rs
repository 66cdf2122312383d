//! Track projection from geographic coordinates to pixel space
//!
//! Flattens a (latitude, longitude) sequence into a local plane relative to
//! the first coordinate (no spherical correction), then translates and
//! scales it so the larger axis span fills a fixed target extent with a
//! margin wide enough that no marker is clipped at the canvas edge.

use crate::error::SrtError;
use crate::types::{FrameRecord, ProjectedPoint, TrackProjection};
use crate::Result;

/// The larger axis span of the track maps to this many pixels
pub const TARGET_EXTENT: f64 = 500.0;

const MIN_DOT_RADIUS: f64 = 2.0;
const MAX_DOT_RADIUS: f64 = 6.0;

/// The margin must cover the largest marker the renderer draws (the
/// highlight circle at 2.2 radii), so it is wider than one dot radius.
const MARGIN_RADII: f64 = 2.5;

/// Collect the (latitude, longitude) pairs of all records that carry one.
pub fn track_coordinates(records: &[FrameRecord]) -> Vec<(f64, f64)> {
    records.iter().filter_map(FrameRecord::coordinate).collect()
}

/// Project an ordered (latitude, longitude) sequence into pixel space.
///
/// The first pair is the origin. Longitude grows to the right; the latitude
/// axis is inverted so that north maps to a smaller vertical pixel
/// coordinate, matching image orientation. Fails with an input error when
/// the sequence is empty.
pub fn project_track(coords: &[(f64, f64)]) -> Result<TrackProjection> {
    if coords.is_empty() {
        return Err(SrtError::Input("no GPS coordinates to project".to_string()).into());
    }

    let (lat0, lon0) = coords[0];
    let relative: Vec<(f64, f64)> = coords
        .iter()
        .map(|&(lat, lon)| (lon - lon0, lat0 - lat))
        .collect();

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(x, y) in &relative {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let span_x = max_x - min_x;
    let span_y = max_y - min_y;
    let largest_span = span_x.max(span_y);

    // Single distinct point: both spans collapse to zero, so the scale is
    // pinned to 1.0 instead of dividing by zero. The canvas degenerates to
    // the margins and the lone marker sits at (margin, margin).
    let scale = if largest_span > 0.0 {
        TARGET_EXTENT / largest_span
    } else {
        1.0
    };

    let extent_x = scale * span_x;
    let extent_y = scale * span_y;
    let dot_radius = (extent_x.min(extent_y) / 60.0).clamp(MIN_DOT_RADIUS, MAX_DOT_RADIUS);
    let margin = dot_radius * MARGIN_RADII;

    let points = relative
        .iter()
        .map(|&(x, y)| ProjectedPoint {
            x: scale * (x - min_x) + margin,
            y: scale * (y - min_y) + margin,
        })
        .collect();

    Ok(TrackProjection {
        points,
        width: extent_x + 2.0 * margin,
        height: extent_y + 2.0 * margin,
        dot_radius,
    })
}
