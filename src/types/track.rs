#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A track coordinate flattened into pixel space, origin-relative and scaled
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

/// Projected track points plus the canvas geometry the renderer needs
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackProjection {
    pub points: Vec<ProjectedPoint>,
    pub width: f64,
    pub height: f64,
    /// Breadcrumb marker radius, derived from the canvas extent
    pub dot_radius: f64,
}
