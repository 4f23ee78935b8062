//! Interval Overlap Engine
//!
//! Answers the two questions every report table is built from: how many visits
//! of a category overlap a closed time window, and what was the peak number of
//! vehicles simultaneously present inside it.
//!
//! ## Sweep Algorithm
//!
//! `max_concurrent` clamps each overlapping visit to the window, emits a `+1`
//! event at its effective start and a `-1` event at its effective end, sorts the
//! events, and tracks the running sum's maximum. At equal timestamps `+1`
//! events are processed before `-1` events: a vehicle entering at the exact
//! instant another exits is counted as simultaneously present at that instant.
//! That tie-break determines boundary counts and must not change.
//!
//! ## Indexing
//!
//! Records are grouped per category and sorted by entry timestamp once, at
//! construction. Each window query then binary-searches the `entry_ts <=
//! window.end` bound instead of rescanning the whole record set, which matters
//! because the bucketing driver issues `O(days x buckets x categories)` queries
//! against the same immutable index. A parallel sorted exit-timestamp list
//! backs the flow counter's exit queries the same way.

use crate::models::{QueryWindow, VisitRecord};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Per-category sorted indexes over an immutable record set.
#[derive(Debug, Default)]
pub struct CategoryIndex {
    /// Records per category, sorted ascending by `entry_ts`.
    by_entry: HashMap<String, Vec<VisitRecord>>,
    /// Present exit timestamps per category, sorted ascending.
    exits: HashMap<String, Vec<NaiveDateTime>>,
}

impl CategoryIndex {
    /// Build the index from a record set. Records are copied in; the source is
    /// left untouched.
    pub fn build(records: &[VisitRecord]) -> Self {
        let mut by_entry: HashMap<String, Vec<VisitRecord>> = HashMap::new();
        let mut exits: HashMap<String, Vec<NaiveDateTime>> = HashMap::new();

        for record in records {
            by_entry
                .entry(record.category.clone())
                .or_default()
                .push(record.clone());
            if let Some(exit) = record.exit_ts {
                exits.entry(record.category.clone()).or_default().push(exit);
            }
        }

        for list in by_entry.values_mut() {
            list.sort_by_key(|r| r.entry_ts);
        }
        for list in exits.values_mut() {
            list.sort();
        }

        Self { by_entry, exits }
    }

    /// Visits of `category` whose entry is at or before the window end,
    /// narrowed by binary search on the sorted entry list.
    fn candidates(&self, category: &str, window: &QueryWindow) -> &[VisitRecord] {
        match self.by_entry.get(category) {
            Some(list) => {
                let upper = list.partition_point(|r| r.entry_ts <= window.end);
                &list[..upper]
            }
            None => &[],
        }
    }

    /// Count of visits overlapping the closed window. This is plain interval
    /// overlap, not peak concurrency.
    pub fn count_overlapping(&self, category: &str, window: &QueryWindow) -> u32 {
        self.candidates(category, window)
            .iter()
            .filter(|r| r.exit_ts.map_or(true, |exit| exit >= window.start))
            .count() as u32
    }

    /// Peak simultaneous presence inside the closed window, via the event
    /// sweep. Returns 0 when nothing overlaps.
    pub fn max_concurrent(&self, category: &str, window: &QueryWindow) -> u32 {
        let mut events: Vec<(NaiveDateTime, i32)> = Vec::new();

        for record in self.candidates(category, window) {
            match record.exit_ts {
                Some(exit) if exit < window.start => continue,
                _ => {}
            }
            let effective_start = record.entry_ts.max(window.start);
            let effective_end = record
                .exit_ts
                .map_or(window.end, |exit| exit.min(window.end));
            events.push((effective_start, 1));
            events.push((effective_end, -1));
        }

        // Ascending by time; at equal timestamps +1 sorts before -1.
        events.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut current = 0i32;
        let mut peak = 0i32;
        for (_, delta) in events {
            current += delta;
            peak = peak.max(current);
        }
        peak as u32
    }

    /// Count of visits whose entry timestamp lies inside the closed window.
    pub fn count_entries_in(&self, category: &str, window: &QueryWindow) -> u32 {
        match self.by_entry.get(category) {
            Some(list) => {
                let lower = list.partition_point(|r| r.entry_ts < window.start);
                let upper = list.partition_point(|r| r.entry_ts <= window.end);
                (upper - lower) as u32
            }
            None => 0,
        }
    }

    /// Count of visits with a recorded exit timestamp inside the closed
    /// window. Open visits never count here.
    pub fn count_exits_in(&self, category: &str, window: &QueryWindow) -> u32 {
        match self.exits.get(category) {
            Some(list) => {
                let lower = list.partition_point(|e| *e < window.start);
                let upper = list.partition_point(|e| *e <= window.end);
                (upper - lower) as u32
            }
            None => 0,
        }
    }
}
