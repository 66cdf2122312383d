//! Integration tests for export functionality
//!
//! Tests the export layer across different scenarios:
//! - Output directory creation
//! - Output directory defaulting to the input file's parent
//! - SVG and HTML artifacts with and without a highlight index
//! - Error handling for coordinate-free input

use srt_parser::{compute_export_paths, export_records, ExportOptions, FrameRecord, SrtParser};
use std::fs;
use tempfile::TempDir;

const SAMPLE_SRT: &str = "1\n\
00:00:00,000 --> 00:00:00,033\n\
FrameCnt: 1, DiffTime: 33ms\n\
[iso: 100] [shutter: 1/500] [fnum: 2.8] [ev: 0] [color_md: default] [focal_len: 24.0] [latitude: 12.3450] [longitude: 98.7650] [rel_alt: 10.5 abs_alt: 100.2] [ct: 5500]\n\
\n\
2\n\
00:00:00,033 --> 00:00:00,066\n\
FrameCnt: 2, DiffTime: 33ms\n\
[iso: 100] [shutter: 1/500] [fnum: 2.8] [ev: 0] [color_md: default] [focal_len: 24.0] [latitude: 12.3455] [longitude: 98.7658] [rel_alt: 11.0 abs_alt: 100.7] [ct: 5500]\n\
\n\
3\n\
00:00:00,066 --> 00:00:00,100\n\
FrameCnt: 3, DiffTime: 34ms\n\
[iso: 100] [shutter: 1/500] [fnum: 2.8] [ev: 0] [color_md: default] [focal_len: 24.0] [latitude: 12.3460] [longitude: 98.7660] [rel_alt: 11.5 abs_alt: 101.2] [ct: 5500]\n\
\n";

fn sample_records() -> Vec<FrameRecord> {
    SrtParser::new()
        .parse_content(SAMPLE_SRT)
        .expect("Failed to parse sample SRT content")
}

#[test]
fn test_export_creates_output_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let nonexistent_dir = temp_dir.path().join("nonexistent").join("output");
    let input_path = temp_dir.path().join("flight.srt");

    let export_opts = ExportOptions {
        csv: true,
        svg: true,
        html: false,
        highlight: None,
        output_dir: Some(nonexistent_dir.to_str().unwrap().to_string()),
    };

    let report = export_records(&sample_records(), &input_path, &export_opts)
        .expect("Export should succeed and create directories");

    assert!(nonexistent_dir.exists(), "Output directory should be created");
    assert_eq!(report.csv_path, Some(nonexistent_dir.join("flight.csv")));
    assert_eq!(report.svg_path, Some(nonexistent_dir.join("flight.track.svg")));
    assert!(report.html_path.is_none());
    assert!(nonexistent_dir.join("flight.csv").exists());
    assert!(nonexistent_dir.join("flight.track.svg").exists());
}

#[test]
fn test_output_dir_defaults_to_input_parent() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("flight.srt");

    let (csv_path, svg_path, html_path) =
        compute_export_paths(&input_path, &ExportOptions::default());
    assert_eq!(csv_path, temp_dir.path().join("flight.csv"));
    assert_eq!(svg_path, temp_dir.path().join("flight.track.svg"));
    assert_eq!(html_path, temp_dir.path().join("flight.track.html"));
}

#[test]
fn test_svg_export_contains_track_elements() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("flight.srt");

    let export_opts = ExportOptions {
        csv: false,
        svg: true,
        html: false,
        highlight: None,
        output_dir: Some(temp_dir.path().to_str().unwrap().to_string()),
    };

    export_records(&sample_records(), &input_path, &export_opts).expect("SVG export failed");

    let svg = fs::read_to_string(temp_dir.path().join("flight.track.svg"))
        .expect("Failed to read SVG file");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("<polyline"));
    assert!(svg.contains(r#"<g id="track">"#));
    assert!(!svg.contains(r#"<g id="highlight">"#));
}

#[test]
fn test_svg_export_with_highlight_overlay() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("flight.srt");

    let export_opts = ExportOptions {
        csv: false,
        svg: true,
        html: false,
        highlight: Some(1),
        output_dir: Some(temp_dir.path().to_str().unwrap().to_string()),
    };

    export_records(&sample_records(), &input_path, &export_opts).expect("SVG export failed");

    let svg = fs::read_to_string(temp_dir.path().join("flight.track.svg"))
        .expect("Failed to read SVG file");
    assert!(svg.contains(r#"<g id="highlight">"#));
}

#[test]
fn test_html_export_embeds_base64_data_uri() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("flight.srt");

    let export_opts = ExportOptions {
        csv: false,
        svg: false,
        html: true,
        highlight: None,
        output_dir: Some(temp_dir.path().to_str().unwrap().to_string()),
    };

    let report =
        export_records(&sample_records(), &input_path, &export_opts).expect("HTML export failed");

    let html_path = report.html_path.expect("HTML path should be reported");
    let html = fs::read_to_string(html_path).expect("Failed to read HTML file");
    assert!(html.contains("<img "));
    assert!(html.contains("data:image/svg+xml;base64,"));
}

#[test]
fn test_svg_export_without_coordinates_fails_csv_alone_succeeds() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("flight.srt");

    // Blocks with no camera-parameter lines carry no coordinates
    let records = SrtParser::new()
        .parse_content("1\n00:00:00,000 --> 00:00:00,033\n\n")
        .unwrap();

    let csv_only = ExportOptions {
        csv: true,
        svg: false,
        html: false,
        highlight: None,
        output_dir: Some(temp_dir.path().to_str().unwrap().to_string()),
    };
    export_records(&records, &input_path, &csv_only)
        .expect("CSV export without coordinates should succeed");

    let with_svg = ExportOptions {
        svg: true,
        ..csv_only
    };
    let result = export_records(&records, &input_path, &with_svg);
    assert!(result.is_err(), "SVG export with no coordinates must fail");
}
