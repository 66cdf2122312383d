//! Export functionality for parsed SRT telemetry
//!
//! Contains functions for exporting parsed records to CSV and the projected
//! GPS track to SVG and inline-HTML form.

use crate::project::{project_track, track_coordinates};
use crate::render::render_track;
use crate::types::FrameRecord;
use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Export options for controlling output formats
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub csv: bool,
    pub svg: bool,
    pub html: bool,
    /// Frame index to mark with the highlight circle in SVG/HTML output
    pub highlight: Option<usize>,
    pub output_dir: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            csv: true,
            svg: false,
            html: false,
            highlight: None,
            output_dir: None,
        }
    }
}

/// Paths written by an export run
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub csv_path: Option<PathBuf>,
    pub svg_path: Option<PathBuf>,
    pub html_path: Option<PathBuf>,
}

/// CSV column order of the tabular export. LAT/LON mirror Latitude and
/// Longitude, matching the columns the recorder's own converter appends
/// before download.
pub const CSV_COLUMNS: [&str; 19] = [
    "FrameNumber",
    "StartTime",
    "EndTime",
    "FrameCnt",
    "DiffTime",
    "DateTime",
    "ISO",
    "ShutterSpeed",
    "FNum",
    "EV",
    "ColorMode",
    "FocalLength",
    "Latitude",
    "Longitude",
    "RelAlt",
    "AbsAlt",
    "CT",
    "LAT",
    "LON",
];

/// Compute the output paths for a given input file and options.
///
/// Returns (csv, svg, html) paths. The output directory defaults to the
/// input file's parent.
pub fn compute_export_paths(
    input_path: &Path,
    export_options: &ExportOptions,
) -> (PathBuf, PathBuf, PathBuf) {
    let base_name = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("telemetry");

    let output_dir = export_options
        .output_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| input_path.parent().unwrap_or(Path::new(".")).to_path_buf());

    (
        output_dir.join(format!("{base_name}.csv")),
        output_dir.join(format!("{base_name}.track.svg")),
        output_dir.join(format!("{base_name}.track.html")),
    )
}

/// Run all requested exports for one parsed file and report what was written.
pub fn export_records(
    records: &[FrameRecord],
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<ExportReport> {
    let (csv_path, svg_path, html_path) = compute_export_paths(input_path, export_options);
    let mut report = ExportReport::default();

    #[cfg(feature = "csv")]
    if export_options.csv {
        export_to_csv(records, &csv_path)?;
        println!("Exported telemetry data to: {}", csv_path.display());
        report.csv_path = Some(csv_path);
    }

    if export_options.svg || export_options.html {
        let coords = track_coordinates(records);
        let projection = project_track(&coords)?;
        let document = render_track(&projection, export_options.highlight);

        if export_options.svg {
            ensure_parent_dir(&svg_path)?;
            fs::write(&svg_path, document.to_svg())
                .with_context(|| format!("Failed to write SVG file: {svg_path:?}"))?;
            println!("Exported track to: {}", svg_path.display());
            report.svg_path = Some(svg_path);
        }

        if export_options.html {
            ensure_parent_dir(&html_path)?;
            let html = format!(
                "<!DOCTYPE html>\n<html><body>\n{}\n</body></html>\n",
                document.to_html_img()
            );
            fs::write(&html_path, html)
                .with_context(|| format!("Failed to write HTML file: {html_path:?}"))?;
            println!("Exported track preview to: {}", html_path.display());
            report.html_path = Some(html_path);
        }
    }

    Ok(report)
}

/// Export frame records to CSV with a header row, one row per record, no
/// index column. Absent fields become empty cells.
#[cfg(feature = "csv")]
pub fn export_to_csv(records: &[FrameRecord], output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("Failed to create CSV file: {output_path:?}"))?;

    writer.write_record(CSV_COLUMNS)?;
    for record in records {
        writer.write_record(csv_row(record))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file: {output_path:?}"))?;

    Ok(())
}

#[cfg(feature = "csv")]
fn csv_row(record: &FrameRecord) -> Vec<String> {
    fn cell<T: ToString>(value: &Option<T>) -> String {
        value.as_ref().map(T::to_string).unwrap_or_default()
    }

    vec![
        cell(&record.frame_number),
        cell(&record.start_time),
        cell(&record.end_time),
        cell(&record.frame_cnt),
        cell(&record.diff_time),
        cell(&record.date_time),
        cell(&record.iso),
        cell(&record.shutter_speed),
        cell(&record.f_num),
        cell(&record.ev),
        cell(&record.color_mode),
        cell(&record.focal_length),
        cell(&record.latitude),
        cell(&record.longitude),
        cell(&record.rel_alt),
        cell(&record.abs_alt),
        cell(&record.ct),
        cell(&record.latitude),
        cell(&record.longitude),
    ]
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {parent:?}"))?;
        }
    }
    Ok(())
}
