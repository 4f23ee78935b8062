//! Report Assembler
//!
//! Orchestrates the aggregation engines over one immutable record set and a
//! validated query, producing the finished table set. Pure composition: the
//! record set is filtered once to the queried range, the category index is
//! built once, and every table is computed independently from it.

use crate::buckets::{hourly_occupancy_table, period_occupancy_table};
use crate::flow::flow_table;
use crate::histogram::duration_histogram;
use crate::models::{CategorySet, DateRange, TimePeriod, VisitRecord};
use crate::overlap::CategoryIndex;
use crate::table::Table;
use tracing::info;

/// The finished table set for one report run.
#[derive(Debug)]
pub struct ParkingReport {
    /// Average peak occupancy per hour of day.
    pub occupancy: Table,
    /// Peak occupancy for the caller's time periods; `None` when no periods
    /// were requested (not an error).
    pub period_occupancy: Option<Table>,
    /// Entry/exit counts per hour of day.
    pub flow: Table,
    /// Stay-duration band counts.
    pub histogram: Table,
    /// The range-filtered records the tables were computed from, kept for the
    /// raw-data sheet.
    pub records: Vec<VisitRecord>,
}

/// Build every report table for `range` from `records`.
///
/// A record is in scope when its visit overlaps the range: entry at or before
/// the range end, and exit either absent (still inside) or at or after the
/// range start. No input is mutated.
pub fn build_report(
    records: &[VisitRecord],
    categories: &CategorySet,
    range: &DateRange,
    periods: &[TimePeriod],
) -> ParkingReport {
    let window = range.window();
    let in_range: Vec<VisitRecord> = records
        .iter()
        .filter(|r| r.overlaps(&window))
        .cloned()
        .collect();
    info!(
        total = records.len(),
        in_range = in_range.len(),
        start = %range.start,
        end = %range.end,
        "filtered records to query range"
    );

    let index = CategoryIndex::build(&in_range);

    let occupancy = hourly_occupancy_table(&index, categories, range);
    let period_occupancy = if periods.is_empty() {
        None
    } else {
        Some(period_occupancy_table(&index, categories, range, periods))
    };
    let flow = flow_table(&index, categories, range);
    let histogram = duration_histogram(&in_range, categories);

    ParkingReport {
        occupancy,
        period_occupancy,
        flow,
        histogram,
        records: in_range,
    }
}
