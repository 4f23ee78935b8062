//! Flow Counter
//!
//! Counts entry and exit *events* per hour of day - not simultaneous presence.
//! A vehicle is counted once for entering and once for exiting, in whichever
//! hourly buckets those instants land, independently of each other; an open
//! visit contributes an entry but never an exit. Counts are averaged across
//! matching weekdays exactly like the occupancy tables.

use crate::models::{at, CategorySet, DateRange, QueryWindow, weekday_index, WEEKDAYS};
use crate::overlap::CategoryIndex;
use crate::table::{Column, Table};
use dashmap::DashMap;
use rayon::prelude::*;
use tracing::debug;

const DIRECTIONS: [&str; 2] = ["In", "Out"];

/// Average entry/exit counts per hour of day, per weekday, per category.
///
/// Columns are weekday-major, then direction, then category: all `In` columns
/// of a weekday, then its `Out` columns, labeled `<category>_In` /
/// `<category>_Out` under the weekday group header.
pub fn flow_table(index: &CategoryIndex, categories: &CategorySet, range: &DateRange) -> Table {
    let labels = categories.labels();
    let days = range.days();
    debug!(days = days.len(), categories = labels.len(), "counting hourly flow");

    // (weekday, direction, hour, category) -> (count sum, day count)
    let acc: DashMap<(usize, usize, usize, usize), (u64, u32)> = DashMap::new();

    days.par_iter().for_each(|&day| {
        let wd = weekday_index(day);
        for hour in 0..24usize {
            let window = QueryWindow::new(at(day, hour as u32, 0, 0), at(day, hour as u32, 59, 59));
            for (ci, category) in labels.iter().enumerate() {
                for (di, _) in DIRECTIONS.iter().enumerate() {
                    let count = if di == 0 {
                        index.count_entries_in(category, &window)
                    } else {
                        index.count_exits_in(category, &window)
                    };
                    let mut slot = acc.entry((wd, di, hour, ci)).or_insert((0, 0));
                    slot.0 += u64::from(count);
                    slot.1 += 1;
                }
            }
        }
    });

    let columns: Vec<Column> = WEEKDAYS
        .iter()
        .flat_map(|day| {
            DIRECTIONS.iter().flat_map(move |dir| {
                labels
                    .iter()
                    .map(move |cat| Column::grouped(format!("{cat}_{dir}"), *day))
            })
        })
        .collect();

    let mut table = Table::new(
        "Vehicle In_Out by Hour",
        (0..24).map(|h| format!("{h:02}:00:00")).collect(),
        columns,
    );
    let per_day = DIRECTIONS.len() * labels.len();
    for wd in 0..WEEKDAYS.len() {
        for (di, _) in DIRECTIONS.iter().enumerate() {
            for hour in 0..24usize {
                for ci in 0..labels.len() {
                    let mean = acc
                        .get(&(wd, di, hour, ci))
                        .map_or(0.0, |slot| slot.0 as f64 / f64::from(slot.1));
                    table.set(hour, wd * per_day + di * labels.len() + ci, mean);
                }
            }
        }
    }
    table
}
