//! Time Bucketing Driver
//!
//! Replicates a set of sub-day buckets across every calendar day of a queried
//! date range, runs the overlap engine's peak-concurrency sweep per
//! `(day, bucket, category)` cell, and reduces the per-weekday samples to
//! arithmetic means.
//!
//! Two bucket shapes share the one driver: the 24 fixed hour-of-day buckets
//! (`00:00:00-00:59:59` .. `23:00:00-23:59:59`) and arbitrary caller-supplied
//! time periods, where an end of `24:00` rolls the window into midnight of the
//! following day.
//!
//! Days are fanned out across rayon workers; every day's queries hit the same
//! immutable [`CategoryIndex`] and accumulate into a concurrent map keyed by
//! `(weekday, bucket, category)`. A key that never receives a sample (no day of
//! that weekday fell inside the range) reduces to 0, not NaN.

use crate::models::{at, CategorySet, DateRange, QueryWindow, TimePeriod, weekday_index, WEEKDAYS};
use crate::overlap::CategoryIndex;
use crate::table::{Column, Table};
use chrono::NaiveDate;
use dashmap::DashMap;
use rayon::prelude::*;
use tracing::debug;

/// One sub-day slice of a calendar day.
#[derive(Debug, Clone)]
enum Bucket {
    /// Fixed hour of day, `HH:00:00 ..= HH:59:59`.
    Hour(u32),
    Period(TimePeriod),
}

impl Bucket {
    fn label(&self) -> String {
        match self {
            Bucket::Hour(h) => format!("{h:02}:00:00"),
            Bucket::Period(p) => p.label(),
        }
    }

    fn window_on(&self, date: NaiveDate) -> QueryWindow {
        match self {
            Bucket::Hour(h) => QueryWindow::new(at(date, *h, 0, 0), at(date, *h, 59, 59)),
            Bucket::Period(p) => p.window_on(date),
        }
    }
}

/// Average peak occupancy per hour of day, per weekday, per category.
pub fn hourly_occupancy_table(
    index: &CategoryIndex,
    categories: &CategorySet,
    range: &DateRange,
) -> Table {
    let buckets: Vec<Bucket> = (0..24).map(Bucket::Hour).collect();
    occupancy_table("Avg Max Vehicles", &buckets, index, categories, range)
}

/// Average peak occupancy for caller-supplied time periods, per weekday, per
/// category.
pub fn period_occupancy_table(
    index: &CategoryIndex,
    categories: &CategorySet,
    range: &DateRange,
    periods: &[TimePeriod],
) -> Table {
    let buckets: Vec<Bucket> = periods.iter().copied().map(Bucket::Period).collect();
    occupancy_table("Max Vehicles in Period", &buckets, index, categories, range)
}

fn occupancy_table(
    name: &str,
    buckets: &[Bucket],
    index: &CategoryIndex,
    categories: &CategorySet,
    range: &DateRange,
) -> Table {
    let labels = categories.labels();
    let days = range.days();
    debug!(
        table = name,
        days = days.len(),
        buckets = buckets.len(),
        categories = labels.len(),
        "sweeping occupancy buckets"
    );

    // (weekday, bucket, category) -> (sum of per-day peaks, day count)
    let acc: DashMap<(usize, usize, usize), (u64, u32)> = DashMap::new();

    days.par_iter().for_each(|&day| {
        let wd = weekday_index(day);
        for (bi, bucket) in buckets.iter().enumerate() {
            let window = bucket.window_on(day);
            for (ci, category) in labels.iter().enumerate() {
                let peak = index.max_concurrent(category, &window);
                let mut slot = acc.entry((wd, bi, ci)).or_insert((0, 0));
                slot.0 += u64::from(peak);
                slot.1 += 1;
            }
        }
    });

    let mut table = Table::new(
        name,
        buckets.iter().map(Bucket::label).collect(),
        weekday_category_columns(labels),
    );
    for wd in 0..WEEKDAYS.len() {
        for bi in 0..buckets.len() {
            for ci in 0..labels.len() {
                let mean = acc
                    .get(&(wd, bi, ci))
                    .map_or(0.0, |slot| slot.0 as f64 / f64::from(slot.1));
                table.set(bi, wd * labels.len() + ci, mean);
            }
        }
    }
    table
}

/// Columns in weekday-major order: all categories under Mon, then Tue, and so
/// on. Category order inside each weekday is the first-seen discovery order.
fn weekday_category_columns(labels: &[String]) -> Vec<Column> {
    WEEKDAYS
        .iter()
        .flat_map(|day| labels.iter().map(|cat| Column::grouped(cat.as_str(), *day)))
        .collect()
}
