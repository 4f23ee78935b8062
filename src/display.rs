//! Terminal Summary Output
//!
//! Renders the end-of-run summary either as colored human-readable text or as
//! structured JSON for programmatic consumption. The tables themselves are
//! persisted by the report writer; this is the operator-facing recap.

use crate::config::get_config;
use crate::models::DateRange;
use crate::report::ParkingReport;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// Everything the summary prints, serializable for `--json`.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub facility: String,
    pub range: DateRange,
    #[serde(rename = "filesLoaded")]
    pub files_loaded: usize,
    #[serde(rename = "recordsLoaded")]
    pub records_loaded: usize,
    #[serde(rename = "recordsInRange")]
    pub records_in_range: usize,
    pub categories: Vec<String>,
    pub tables: Vec<TableSummary>,
    #[serde(rename = "outputDir")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}

impl RunSummary {
    pub fn table_summaries(report: &ParkingReport) -> Vec<TableSummary> {
        let mut tables = vec![&report.occupancy, &report.flow, &report.histogram];
        if let Some(period_table) = &report.period_occupancy {
            tables.insert(1, period_table);
        }
        tables
            .into_iter()
            .map(|t| TableSummary {
                name: t.name().to_string(),
                rows: t.n_rows(),
                columns: t.n_cols(),
            })
            .collect()
    }
}

pub struct SummaryDisplay;

impl Default for SummaryDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryDisplay {
    pub fn new() -> Self {
        Self
    }

    pub fn print(&self, summary: &RunSummary, json_output: bool) {
        if json_output {
            let rendered = if get_config().output.json_pretty {
                serde_json::to_string_pretty(summary)
            } else {
                serde_json::to_string(summary)
            };
            match rendered {
                Ok(text) => println!("{text}"),
                Err(err) => eprintln!("Failed to serialize summary: {err}"),
            }
            return;
        }

        println!();
        println!(
            "{} {}",
            "Parking report for".bold(),
            summary.facility.cyan().bold()
        );
        println!(
            "  {} {} to {}",
            "Range:".bold(),
            summary.range.start.to_string().yellow(),
            summary.range.end.to_string().yellow()
        );
        println!(
            "  {} {} files, {} records ({} in range)",
            "Input:".bold(),
            summary.files_loaded,
            summary.records_loaded,
            summary.records_in_range
        );
        println!(
            "  {} {}",
            "Categories:".bold(),
            summary.categories.join(", ")
        );
        for table in &summary.tables {
            println!(
                "  {} {} ({} rows x {} cols)",
                "Table:".bold(),
                table.name.green(),
                table.rows,
                table.columns
            );
        }
        println!(
            "  {} {}",
            "Written to:".bold(),
            summary.output_dir.display().to_string().cyan()
        );
    }
}
