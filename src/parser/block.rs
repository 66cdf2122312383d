//! Blank-line-delimited block parsing for SRT telemetry files
//!
//! A subtitle block looks like:
//!
//! ```text
//! 1
//! 00:00:00,000 --> 00:00:00,033
//! FrameCnt: 1, DiffTime: 33ms
//! 2024-05-01 10:15:00.123
//! [iso: 100] [shutter: 1/500] [fnum: 2.8] [ev: 0] [color_md: default] ...
//! ```
//!
//! Lines are matched non-exclusively against the field patterns; anything
//! that matches nothing is silently ignored. A blank line terminates the
//! block and emits the accumulated record if it is non-empty.

use crate::error::SrtError;
use crate::types::FrameRecord;
use crate::Result;
use anyhow::Context;
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::Path;

/// Stateless SRT block parser with precompiled field patterns.
///
/// Safe to reuse across files; each parse call starts from a fresh record.
pub struct SrtParser {
    frame_pattern: Regex,
    datetime_pattern: Regex,
    parameters_pattern: Regex,
    flush_trailing: bool,
}

impl SrtParser {
    pub fn new() -> Self {
        Self {
            frame_pattern: Regex::new(r"FrameCnt: (\d+), DiffTime: (\d+ms)").unwrap(),
            datetime_pattern: Regex::new(r"(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3})").unwrap(),
            // One multi-capture pattern: all eleven camera fields match
            // atomically or the line contributes nothing.
            parameters_pattern: Regex::new(
                r"\[iso: (\d+)\] \[shutter: ([\d/\.]+)\] \[fnum: ([\d\.]+)\] \[ev: ([\d\-\.]+)\] \[color_md: (\w+)\] \[focal_len: ([\d\.]+)\] \[latitude: ([\d\.\-]+)\] \[longitude: ([\d\.\-]+)\] \[rel_alt: ([\d\.\-]+) abs_alt: ([\d\.\-]+)\] \[ct: (\d+)\]",
            )
            .unwrap(),
            flush_trailing: false,
        }
    }

    /// Emit a non-empty trailing block that never received a terminating
    /// blank line. The default drops it, matching the delimiter-driven
    /// behavior of the recorder's own converter.
    pub fn flush_trailing(mut self) -> Self {
        self.flush_trailing = true;
        self
    }

    /// Parse an SRT file from disk.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<FrameRecord>> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read SRT file: {:?}", path.as_ref()))?;
        self.parse_content(&content)
    }

    /// Parse the full text content of an SRT file into frame records.
    ///
    /// Records are produced in file order and never reordered. A malformed
    /// numeric token inside a matched pattern aborts the whole parse; no
    /// partial results are returned.
    pub fn parse_content(&self, content: &str) -> Result<Vec<FrameRecord>> {
        let mut records = Vec::new();
        let mut current = FrameRecord::default();

        for raw_line in content.lines() {
            let line = raw_line.trim();

            // Block delimiter: emit if anything accumulated, reset regardless
            if line.is_empty() {
                if !current.is_empty() {
                    records.push(current.clone());
                }
                current = FrameRecord::default();
                continue;
            }

            if line.bytes().all(|b| b.is_ascii_digit()) {
                current.frame_number = Some(parse_field(line, "frame number")?);
                continue;
            }

            if line.contains("-->") {
                let parts: Vec<&str> = line.split(" --> ").collect();
                if parts.len() != 2 {
                    return Err(SrtError::Parse(format!(
                        "malformed display interval line: '{line}'"
                    ))
                    .into());
                }
                current.start_time = Some(parts[0].to_string());
                current.end_time = Some(parts[1].to_string());
                continue;
            }

            self.match_content_line(line, &mut current)?;
        }

        if self.flush_trailing && !current.is_empty() {
            records.push(current);
        }

        Ok(records)
    }

    /// Test a content line against the three field patterns. Matches are
    /// non-exclusive; a line carrying both a timestamp and a frame counter
    /// contributes both.
    fn match_content_line(&self, line: &str, record: &mut FrameRecord) -> Result<()> {
        if let Some(caps) = self.frame_pattern.captures(line) {
            record.frame_cnt = Some(parse_field(&caps[1], "FrameCnt")?);
            record.diff_time = Some(caps[2].to_string());
        }

        if let Some(caps) = self.datetime_pattern.captures(line) {
            record.date_time = Some(caps[1].to_string());
        }

        if let Some(caps) = self.parameters_pattern.captures(line) {
            record.iso = Some(parse_field(&caps[1], "iso")?);
            record.shutter_speed = Some(caps[2].to_string());
            record.f_num = Some(parse_field(&caps[3], "fnum")?);
            record.ev = Some(parse_field(&caps[4], "ev")?);
            record.color_mode = Some(caps[5].to_string());
            record.focal_length = Some(parse_field(&caps[6], "focal_len")?);
            record.latitude = Some(parse_field(&caps[7], "latitude")?);
            record.longitude = Some(parse_field(&caps[8], "longitude")?);
            record.rel_alt = Some(parse_field(&caps[9], "rel_alt")?);
            record.abs_alt = Some(parse_field(&caps[10], "abs_alt")?);
            record.ct = Some(parse_field(&caps[11], "ct")?);
        }

        Ok(())
    }
}

impl Default for SrtParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_field<T>(token: &str, field: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    token.parse().map_err(|e| {
        anyhow::Error::from(SrtError::Parse(format!(
            "invalid {field} value '{token}': {e}"
        )))
    })
}
