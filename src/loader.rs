//! Log Loading and File Discovery
//!
//! Reads raw entry/exit log files into [`VisitRecord`]s and discovers ticket
//! categories along the way.
//!
//! ## File Format
//!
//! Logs are CSV files with the columns `plate, category, entry_date,
//! entry_time, exit_date, exit_time`. Dates are `YYYY-MM-DD` (a `/`-separated
//! fallback is accepted), times are `HH:MM:SS` with an `HH:MM` fallback.
//!
//! ## Degradation Rules
//!
//! Malformed individual date/time fields degrade to absent values and never
//! abort a batch. A row whose entry timestamp cannot be composed is skipped
//! (its category is still discovered); a row whose exit cannot be composed
//! becomes an open visit. Timestamps are composed from exact calendar date +
//! time-of-day, with no timezone conversion.
//!
//! ## Discovery
//!
//! Facility log files are matched by name: every `*.csv` in the data directory
//! whose file stem contains the facility name, loaded in sorted order so the
//! first-seen category order is reproducible run to run.

use crate::models::{CategorySet, VisitRecord};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use glob::glob;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One raw CSV row, before timestamp composition.
#[derive(Debug, Deserialize)]
struct RawVisitRow {
    #[serde(default)]
    plate: Option<String>,
    category: String,
    #[serde(default)]
    entry_date: String,
    #[serde(default)]
    entry_time: String,
    #[serde(default)]
    exit_date: String,
    #[serde(default)]
    exit_time: String,
}

/// Find the log files for a facility under `data_dir`, sorted by path.
pub fn discover_log_files(data_dir: &Path, facility: &str) -> Result<Vec<PathBuf>> {
    let pattern = data_dir.join("*.csv");
    let mut files = Vec::new();
    for entry in glob(&pattern.to_string_lossy())
        .with_context(|| format!("bad data directory pattern: {}", pattern.display()))?
        .flatten()
    {
        let stem_matches = entry
            .file_stem()
            .map(|stem| stem.to_string_lossy().contains(facility))
            .unwrap_or(false);
        if stem_matches {
            files.push(entry);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every log file for a facility, returning the record set and the
/// categories discovered across all files in first-seen order.
pub fn load_facility(data_dir: &Path, facility: &str) -> Result<(Vec<VisitRecord>, CategorySet)> {
    let files = discover_log_files(data_dir, facility)?;
    if files.is_empty() {
        warn!(
            facility,
            data_dir = %data_dir.display(),
            "no log files match facility"
        );
    }

    let mut records = Vec::new();
    let mut categories = CategorySet::new();
    for file in &files {
        let mut loaded = load_log_file(file, &mut categories)?;
        info!(file = %file.display(), records = loaded.len(), "loaded log file");
        records.append(&mut loaded);
    }
    Ok((records, categories))
}

/// Load one CSV log file, discovering categories into `categories`.
pub fn load_log_file(path: &Path, categories: &mut CategorySet) -> Result<Vec<VisitRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open log file: {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header row: {}", path.display()))?
        .clone();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                debug!(file = %path.display(), %err, "skipping unreadable row");
                continue;
            }
        };
        // 1-based file line of the record, as an operator would see it.
        let line = record.position().map_or(0, |p| p.line());

        let row: RawVisitRow = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(err) => {
                debug!(file = %path.display(), line, %err, "skipping unreadable row");
                continue;
            }
        };

        // Categories are discovered from every data row, even ones whose
        // timestamps turn out to be unusable.
        categories.insert(&row.category);

        let Some(entry_ts) = compose_timestamp(&row.entry_date, &row.entry_time) else {
            debug!(file = %path.display(), line, "skipping row without a parseable entry timestamp");
            continue;
        };
        let exit_ts = compose_timestamp(&row.exit_date, &row.exit_time);

        records.push(VisitRecord::new(
            row.plate.filter(|p| !p.is_empty()),
            row.category,
            entry_ts,
            exit_ts,
        ));
    }
    Ok(records)
}

/// Compose a date field and a time-of-day field into one naive timestamp.
/// Either field failing to parse yields `None`.
fn compose_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    Some(parse_date(date)?.and_time(parse_time(time)?))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .ok()
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}
