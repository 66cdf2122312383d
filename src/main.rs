use anyhow::Result;
use clap::{Arg, Command};
use glob::glob;
use srt_parser::{export_records, ExportOptions, SrtParser};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum recursion depth to prevent stack overflow
const MAX_RECURSION_DEPTH: usize = 100;

/// Expand input paths to a list of SRT files.
/// If a path is a file, add it directly (filtered later for the .srt
/// extension). If a path is a directory, recursively find all SRT files
/// within it. If a path contains glob patterns, expand them first.
fn expand_input_paths(input_paths: &[String], visited: &mut HashSet<PathBuf>) -> Result<Vec<PathBuf>> {
    expand_input_paths_with_depth(input_paths, visited, 0)
}

fn expand_input_paths_with_depth(
    input_paths: &[String],
    visited: &mut HashSet<PathBuf>,
    depth: usize,
) -> Result<Vec<PathBuf>> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(anyhow::anyhow!(
            "Maximum recursion depth exceeded ({})",
            MAX_RECURSION_DEPTH
        ));
    }

    let mut srt_files = Vec::new();

    for input_path_str in input_paths {
        if input_path_str.contains('*') || input_path_str.contains('?') {
            let glob_iter = glob(input_path_str).map_err(|e| {
                anyhow::Error::new(e).context(format!("Invalid glob pattern '{input_path_str}'"))
            })?;
            let paths = glob_iter
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| {
                    anyhow::Error::new(e)
                        .context(format!("Error expanding glob pattern '{input_path_str}'"))
                })?;
            for path in paths {
                if let Some(path_str) = path.to_str() {
                    let mut sub =
                        expand_input_paths_with_depth(&[path_str.to_string()], visited, depth + 1)?;
                    srt_files.append(&mut sub);
                }
            }
            continue;
        }

        let input_path = Path::new(input_path_str);
        match input_path.canonicalize() {
            Ok(canonical_path) => {
                if canonical_path.is_file() {
                    srt_files.push(canonical_path);
                } else if canonical_path.is_dir() {
                    let mut dir_files =
                        find_srt_files_in_dir_with_depth(&canonical_path, visited, depth + 1)?;
                    srt_files.append(&mut dir_files);
                } else {
                    eprintln!("Warning: Path not found or not accessible: {input_path_str}");
                }
            }
            Err(e) => {
                eprintln!("Warning: Failed to canonicalize path '{input_path_str}': {e}");
            }
        }
    }

    Ok(srt_files)
}

/// Recursively find all SRT files in a directory, protecting against
/// symlink cycles and depth overflow
fn find_srt_files_in_dir_with_depth(
    dir_path: &Path,
    visited: &mut HashSet<PathBuf>,
    depth: usize,
) -> Result<Vec<PathBuf>> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(anyhow::anyhow!(
            "Maximum recursion depth exceeded in directory traversal ({})",
            MAX_RECURSION_DEPTH
        ));
    }

    let mut srt_files = Vec::new();

    if visited.contains(dir_path) {
        return Ok(srt_files);
    }
    visited.insert(dir_path.to_path_buf());

    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Warning: Cannot read directory '{}': {e}", dir_path.display());
            return Ok(srt_files);
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!(
                    "Warning: Cannot read entry in directory '{}': {e}",
                    dir_path.display()
                );
                continue;
            }
        };

        let path = match entry.path().canonicalize() {
            Ok(path) => path,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to canonicalize path '{}': {e}",
                    entry.path().display()
                );
                continue;
            }
        };

        if path.is_dir() {
            let mut sub = find_srt_files_in_dir_with_depth(&path, visited, depth + 1)?;
            srt_files.append(&mut sub);
        } else if path.is_file() && has_srt_extension(&path) {
            srt_files.push(path);
        }
    }

    Ok(srt_files)
}

fn has_srt_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("srt"))
        .unwrap_or(false)
}

fn build_command() -> Command {
    Command::new("SRT Parser")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read and parse drone SRT telemetry subtitle files. Exports to CSV by default (optionally SVG/HTML track renders).")
        .arg(
            Arg::new("files")
                .help("SRT files or directories to parse. Directories are searched recursively for .srt files (case-insensitive). Supports globbing.")
                .required(false)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed parsing information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("svg")
                .long("svg")
                .help("Render the GPS track to an SVG file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .help("Render the GPS track to an HTML file with the SVG embedded as a base64 data URI")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("highlight")
                .long("highlight")
                .help("Frame index to mark with the highlight circle in SVG/HTML output")
                .value_name("INDEX")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("flush-trailing")
                .long("flush-trailing")
                .help("Emit a trailing block that lacks a terminating blank line instead of dropping it")
                .action(clap::ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    let export_svg = matches.get_flag("svg");
    let export_html = matches.get_flag("html");
    let flush_trailing = matches.get_flag("flush-trailing");
    let highlight = matches.get_one::<usize>("highlight").copied();
    let output_dir = matches.get_one::<String>("output-dir").cloned();

    // Check if no files were provided and show help
    let file_patterns: Vec<String> = match matches.get_many::<String>("files") {
        Some(files) => files.cloned().collect(),
        None => {
            build_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let export_options = ExportOptions {
        csv: true, // CSV export is always enabled for the CLI binary
        svg: export_svg,
        html: export_html,
        highlight,
        output_dir,
    };

    if debug {
        println!("Input patterns: {file_patterns:?}");
    }

    let mut visited = HashSet::new();
    let input_files = match expand_input_paths(&file_patterns, &mut visited) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error expanding input paths: {e}");
            std::process::exit(1);
        }
    };

    let valid_paths: Vec<PathBuf> = input_files
        .into_iter()
        .filter(|path| {
            if has_srt_extension(path) {
                true
            } else {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("none");
                eprintln!("Warning: Skipping file with unsupported extension '{ext}': {path:?}");
                false
            }
        })
        .collect();

    if valid_paths.is_empty() {
        eprintln!("Error: No valid .srt files found in the specified input paths.");
        std::process::exit(1);
    }

    if debug {
        println!("Found {} valid files to process", valid_paths.len());
    }

    let parser = if flush_trailing {
        SrtParser::new().flush_trailing()
    } else {
        SrtParser::new()
    };

    let mut processed_files = 0;
    for (index, path) in valid_paths.iter().enumerate() {
        if index > 0 {
            println!();
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        println!("Processing: {filename}");

        match process_file(&parser, path, &export_options, debug) {
            Ok(record_count) => {
                println!("Parsed {record_count} records");
                processed_files += 1;
            }
            Err(e) => {
                eprintln!("Error processing {filename}: {e}");
                eprintln!("Continuing with next file...");
            }
        }
    }

    if processed_files == 0 {
        eprintln!(
            "Error: No files were successfully processed out of {} files found.",
            valid_paths.len()
        );
        eprintln!("Use --debug flag for more detailed error information.");
        std::process::exit(1);
    }

    Ok(())
}

fn process_file(
    parser: &SrtParser,
    path: &Path,
    export_options: &ExportOptions,
    debug: bool,
) -> Result<usize> {
    let records = parser.parse_file(path)?;

    if debug {
        let with_gps = records.iter().filter(|r| r.coordinate().is_some()).count();
        println!("Records with GPS coordinates: {with_gps}/{}", records.len());
    }

    export_records(&records, path, export_options)?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_srt_extension_validation() {
        assert!(has_srt_extension(Path::new("flight.srt")));
        assert!(has_srt_extension(Path::new("flight.SRT")));
        assert!(!has_srt_extension(Path::new("flight.txt")));
        assert!(!has_srt_extension(Path::new("flight")));
    }

    #[test]
    fn test_directory_expansion_finds_nested_srt_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let mut f = fs::File::create(nested.join("flight.srt")).unwrap();
        writeln!(f, "1").unwrap();
        fs::File::create(nested.join("notes.txt")).unwrap();

        let mut visited = HashSet::new();
        let files = expand_input_paths(
            &[temp_dir.path().to_str().unwrap().to_string()],
            &mut visited,
        )
        .unwrap();

        assert_eq!(files.len(), 1);
        assert!(has_srt_extension(&files[0]));
    }
}
