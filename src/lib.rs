//! SRT Telemetry Parser Library
//!
//! A Rust library for parsing drone SRT telemetry subtitle files into
//! structured frame records, projecting the GPS track into pixel space, and
//! rendering it as an SVG path. Exports to CSV, SVG, and inline-HTML form.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export functionality
//! - **`cli`** (default): Build the command-line interface binary
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Parse an SRT file and access frame records:
//! ```rust,no_run
//! use srt_parser::SrtParser;
//!
//! let parser = SrtParser::new();
//! let records = parser.parse_file("flight.srt").unwrap();
//! println!("Parsed {} records", records.len());
//! ```
//!
//! Render the GPS track as SVG:
//! ```rust,no_run
//! use srt_parser::{project_track, render_track, track_coordinates, SrtParser};
//!
//! let records = SrtParser::new().parse_file("flight.srt").unwrap();
//! let coords = track_coordinates(&records);
//! let projection = project_track(&coords).unwrap();
//! let document = render_track(&projection, None);
//! println!("{}", document.to_svg());
//! ```
//!
//! # Public API
//!
//! ## Parsing
//! - [`SrtParser`] - Block parser with precompiled field patterns
//! - [`FrameRecord`] - One parsed subtitle block, all fields optional
//!
//! ## Track projection and rendering
//! - [`track_coordinates`] - Collect (lat, lon) pairs from records
//! - [`project_track`] - Flatten and scale coordinates into pixel space
//! - [`render_track`] - Produce a [`PathDocument`] from a projection
//! - [`TrackRenderCache`] - Memoizes the base document across highlight changes
//!
//! ## Export
//! - [`export_records`] - Run all requested exports for one file
//! - [`export_to_csv`] - Tabular export with the fixed column order
//! - [`compute_export_paths`] - Helper for consistent path computation

// Module declarations
pub mod error;
pub mod export;
pub mod parser;
pub mod project;
pub mod render;
pub mod types;

// Re-export everything from modules for convenience
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use project::*;
#[allow(ambiguous_glob_reexports)]
pub use render::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;

// Re-export Result type for convenience
pub use anyhow::Result;
