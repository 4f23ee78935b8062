//! Report Persistence
//!
//! Writes a finished [`ParkingReport`] as one directory per run, holding one
//! CSV file per table ("sheet") plus the raw filtered records. Row and column
//! labels pass through unchanged.
//!
//! Tables whose columns carry weekday group labels are written with two header
//! rows: the weekday row first (each weekday repeated across its columns, a
//! flat rendition of a merged spreadsheet header), then the column label row.

use crate::models::DateRange;
use crate::report::ParkingReport;
use crate::table::Table;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes report artifacts under a fixed output directory.
pub struct ReportWriter {
    out_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Persist every table of `report`, returning the created run directory
    /// `<facility>_report_<YYYYMMDD>-<YYYYMMDD>/`.
    pub fn write_report(
        &self,
        facility: &str,
        range: &DateRange,
        report: &ParkingReport,
    ) -> Result<PathBuf> {
        let run_dir = self.out_dir.join(format!(
            "{facility}_report_{}-{}",
            range.start.format("%Y%m%d"),
            range.end.format("%Y%m%d"),
        ));
        fs::create_dir_all(&run_dir)
            .with_context(|| format!("failed to create report directory: {}", run_dir.display()))?;

        write_table(&run_dir.join("avg_max_vehicles.csv"), &report.occupancy)?;
        if let Some(period_table) = &report.period_occupancy {
            write_table(&run_dir.join("max_vehicles_in_period.csv"), period_table)?;
        }
        write_table(&run_dir.join("vehicle_in_out_by_hour.csv"), &report.flow)?;
        write_table(
            &run_dir.join("longest_continuous_stay.csv"),
            &report.histogram,
        )?;
        self.write_records(&run_dir.join("parking_data.csv"), report)?;

        info!(dir = %run_dir.display(), "report written");
        Ok(run_dir)
    }

    fn write_records(&self, path: &Path, report: &ParkingReport) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        writer.write_record(["plate", "category", "entry_ts", "exit_ts", "stay_hours"])?;
        for record in &report.records {
            writer.write_record([
                record.plate.clone().unwrap_or_default(),
                record.category.clone(),
                record.entry_ts.format(TIMESTAMP_FORMAT).to_string(),
                record
                    .exit_ts
                    .map(|e| e.format(TIMESTAMP_FORMAT).to_string())
                    .unwrap_or_default(),
                format_cell(record.stay_hours),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    if table.has_groups() {
        let mut group_row = vec![String::new()];
        group_row.extend(
            table
                .columns()
                .iter()
                .map(|c| c.group.clone().unwrap_or_default()),
        );
        writer.write_record(&group_row)?;
    }

    let mut header = vec![String::new()];
    header.extend(table.columns().iter().map(|c| c.label.clone()));
    writer.write_record(&header)?;

    for (ri, row_label) in table.row_labels().iter().enumerate() {
        let mut row = vec![row_label.clone()];
        row.extend(table.row(ri).iter().map(|v| format_cell(*v)));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render a cell without a trailing `.0` on whole numbers.
fn format_cell(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cell_trims_whole_numbers() {
        assert_eq!(format_cell(2.0), "2");
        assert_eq!(format_cell(2.5), "2.5");
        assert_eq!(format_cell(0.0), "0");
    }
}
