//! Track renderer — converts a projected track into SVG output
//!
//! The base path (breadcrumb circles, connecting polyline, start/end
//! markers) is rendered once per coordinate sequence and memoized; the
//! optional highlight marker lives in its own overlay group so scrubbing
//! through frames never re-runs the projector.

use crate::error::SrtError;
use crate::project::project_track;
use crate::types::{ProjectedPoint, TrackProjection};
use crate::Result;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const BACKGROUND_COLOR: &str = "#ffffff";
const PATH_COLOR: &str = "#4a90d9";
const POINT_COLOR: &str = "#2d6ca2";
const START_COLOR: &str = "#2faf64";
const END_COLOR: &str = "#d94f4f";
const HIGHLIGHT_COLOR: &str = "#9e9e9e";

const START_END_RADIUS_FACTOR: f64 = 1.6;
const HIGHLIGHT_RADIUS_FACTOR: f64 = 2.2;
const STROKE_WIDTH_FACTOR: f64 = 0.5;

/// Minimal SVG element builder
struct SvgBuilder {
    elements: Vec<String>,
}

impl SvgBuilder {
    fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.elements.push(format!(
            r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{fill}"/>"#
        ));
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        self.elements.push(format!(
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{fill}"/>"#
        ));
    }

    fn polyline(&mut self, points: &[ProjectedPoint], stroke: &str, stroke_width: f64) {
        let coords: Vec<String> = points
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect();
        self.elements.push(format!(
            r#"<polyline points="{}" fill="none" stroke="{stroke}" stroke-width="{stroke_width:.2}"/>"#,
            coords.join(" ")
        ));
    }

    fn open_group(&mut self, id: &str) {
        self.elements.push(format!(r#"<g id="{id}">"#));
    }

    fn close_group(&mut self) {
        self.elements.push("</g>".to_string());
    }

    fn finish(self) -> String {
        self.elements.join("\n")
    }
}

/// The rendered vector document: canvas geometry, a memoizable base path
/// group, and an optional highlight overlay that can be swapped without
/// re-running the projector.
#[derive(Debug, Clone, PartialEq)]
pub struct PathDocument {
    pub width: f64,
    pub height: f64,
    base: String,
    highlight: Option<String>,
}

impl PathDocument {
    /// Serialize to a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.2} {:.2}">"#,
            self.width.ceil(),
            self.height.ceil(),
            self.width,
            self.height
        );
        svg.push('\n');
        svg.push_str(&self.base);
        if let Some(overlay) = &self.highlight {
            svg.push('\n');
            svg.push_str(overlay);
        }
        svg.push_str("\n</svg>\n");
        svg
    }

    /// Base64 data URI for display contexts that cannot render SVG markup
    /// directly.
    pub fn to_data_uri(&self) -> String {
        format!("data:image/svg+xml;base64,{}", BASE64.encode(self.to_svg()))
    }

    /// Inline HTML `<img>` tag with the document embedded as a data URI.
    pub fn to_html_img(&self) -> String {
        format!(
            r#"<img width="{:.0}" height="{:.0}" alt="GPS track" src="{}"/>"#,
            self.width.ceil(),
            self.height.ceil(),
            self.to_data_uri()
        )
    }

    /// True when the document carries a highlight overlay.
    pub fn has_highlight(&self) -> bool {
        self.highlight.is_some()
    }
}

/// Render a projected track into a vector document.
///
/// A highlight index outside the point sequence is ignored rather than
/// rejected, so a stale slider position never breaks a re-render.
pub fn render_track(projection: &TrackProjection, highlight: Option<usize>) -> PathDocument {
    PathDocument {
        width: projection.width,
        height: projection.height,
        base: render_base(projection),
        highlight: highlight.and_then(|index| render_highlight(projection, index)),
    }
}

fn render_base(projection: &TrackProjection) -> String {
    let r = projection.dot_radius;
    let points = &projection.points;
    let mut svg = SvgBuilder::new();

    svg.open_group("track");
    svg.rect(0.0, 0.0, projection.width, projection.height, BACKGROUND_COLOR);
    svg.polyline(points, PATH_COLOR, r * STROKE_WIDTH_FACTOR);

    // Interior breadcrumbs; first and last get their own markers below
    svg.open_group("points");
    if points.len() > 2 {
        for p in &points[1..points.len() - 1] {
            svg.circle(p.x, p.y, r, POINT_COLOR);
        }
    }
    svg.close_group();

    if let Some(first) = points.first() {
        svg.circle(first.x, first.y, r * START_END_RADIUS_FACTOR, START_COLOR);
    }
    if points.len() > 1 {
        if let Some(last) = points.last() {
            svg.circle(last.x, last.y, r * START_END_RADIUS_FACTOR, END_COLOR);
        }
    }
    svg.close_group();

    svg.finish()
}

fn render_highlight(projection: &TrackProjection, index: usize) -> Option<String> {
    let p = projection.points.get(index)?;
    let mut svg = SvgBuilder::new();
    svg.open_group("highlight");
    svg.circle(
        p.x,
        p.y,
        projection.dot_radius * HIGHLIGHT_RADIUS_FACTOR,
        HIGHLIGHT_COLOR,
    );
    svg.close_group();
    Some(svg.finish())
}

/// Memoizes the projection and base document keyed by the coordinate
/// sequence, so changing only the highlight index re-uses the cached base.
#[derive(Debug, Default)]
pub struct TrackRenderCache {
    key: Option<u64>,
    cached: Option<(TrackProjection, String)>,
    misses: u64,
}

impl TrackRenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the projector actually ran.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Produce the document for `coords`, projecting and rendering the base
    /// path only when the coordinate sequence changed since the last call.
    pub fn document(
        &mut self,
        coords: &[(f64, f64)],
        highlight: Option<usize>,
    ) -> Result<PathDocument> {
        let key = coordinate_key(coords);
        if self.key != Some(key) {
            let projection = project_track(coords)?;
            let base = render_base(&projection);
            self.cached = Some((projection, base));
            self.key = Some(key);
            self.misses += 1;
        }

        let Some((projection, base)) = self.cached.as_ref() else {
            return Err(SrtError::Input("render cache holds no projection".to_string()).into());
        };

        Ok(PathDocument {
            width: projection.width,
            height: projection.height,
            base: base.clone(),
            highlight: highlight.and_then(|index| render_highlight(projection, index)),
        })
    }
}

fn coordinate_key(coords: &[(f64, f64)]) -> u64 {
    let mut hasher = DefaultHasher::new();
    coords.len().hash(&mut hasher);
    for &(lat, lon) in coords {
        lat.to_bits().hash(&mut hasher);
        lon.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> Vec<(f64, f64)> {
        vec![
            (12.3450, 98.7650),
            (12.3452, 98.7655),
            (12.3456, 98.7658),
            (12.3460, 98.7660),
        ]
    }

    #[test]
    fn test_document_structure() {
        let projection = project_track(&coords()).unwrap();
        let doc = render_track(&projection, None);
        let svg = doc.to_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("<polyline"));
        assert!(svg.contains(START_COLOR));
        assert!(svg.contains(END_COLOR));
        // Two interior breadcrumbs for four points
        assert_eq!(svg.matches(POINT_COLOR).count(), 2);
        assert!(!doc.has_highlight());
    }

    #[test]
    fn test_highlight_is_a_separate_overlay() {
        let projection = project_track(&coords()).unwrap();
        let plain = render_track(&projection, None);
        let highlighted = render_track(&projection, Some(2));

        assert!(highlighted.has_highlight());
        assert!(highlighted.to_svg().contains(r#"<g id="highlight">"#));
        assert!(highlighted.to_svg().contains(HIGHLIGHT_COLOR));
        // Base content is identical either way
        assert_eq!(plain.base, highlighted.base);
    }

    #[test]
    fn test_out_of_range_highlight_is_ignored() {
        let projection = project_track(&coords()).unwrap();
        let doc = render_track(&projection, Some(999));
        assert!(!doc.has_highlight());
    }

    #[test]
    fn test_single_point_document() {
        let projection = project_track(&[(12.345, 98.765)]).unwrap();
        let doc = render_track(&projection, None);
        let svg = doc.to_svg();
        assert!(svg.contains(START_COLOR));
        assert!(!svg.contains(END_COLOR));
    }

    #[test]
    fn test_data_uri_embedding() {
        let projection = project_track(&coords()).unwrap();
        let doc = render_track(&projection, None);

        let uri = doc.to_data_uri();
        assert!(uri.starts_with("data:image/svg+xml;base64,"));
        let encoded = uri.trim_start_matches("data:image/svg+xml;base64,");
        let decoded = BASE64.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), doc.to_svg());

        assert!(doc.to_html_img().starts_with("<img "));
    }

    #[test]
    fn test_cache_reuses_base_across_highlight_changes() {
        let coords = coords();
        let mut cache = TrackRenderCache::new();

        let a = cache.document(&coords, None).unwrap();
        let b = cache.document(&coords, Some(1)).unwrap();
        let c = cache.document(&coords, Some(3)).unwrap();
        assert_eq!(cache.misses(), 1);
        assert_eq!(a.base, b.base);
        assert_eq!(b.base, c.base);
        assert!(b.has_highlight() && c.has_highlight());
        assert_ne!(b.to_svg(), c.to_svg());
    }

    #[test]
    fn test_cache_invalidates_when_coordinates_change() {
        let mut cache = TrackRenderCache::new();
        cache.document(&coords(), None).unwrap();

        let mut moved = coords();
        moved.push((12.3470, 98.7670));
        cache.document(&moved, None).unwrap();
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_cache_propagates_empty_input_error() {
        let mut cache = TrackRenderCache::new();
        assert!(cache.document(&[], None).is_err());
    }
}
