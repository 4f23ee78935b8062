//! Core Data Models
//!
//! This module defines the primary data structures used throughout the parking
//! statistics system. These models represent the complete pipeline from raw log
//! rows to aggregated report tables.
//!
//! ## Data Flow
//!
//! 1. **Raw Data**: [`VisitRecord`] - One vehicle visit parsed from a log file
//! 2. **Querying**: [`QueryWindow`], [`DateRange`], [`TimePeriod`] - The shapes
//!    a report query is expressed in
//! 3. **Categorization**: [`CategorySet`] - Ticket categories in first-seen order
//!
//! ## Timestamp Semantics
//!
//! All timestamps are naive civil datetimes: an entry date and a time-of-day are
//! composed exactly as written in the log, with no timezone conversion. An absent
//! `exit_ts` means the vehicle had not exited when the log was collected; overlap
//! computations clamp such visits to the queried window's end rather than
//! extrapolating to any "now".

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Weekday column order used by every per-weekday report table.
pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One vehicle's stay, from entry to exit (or still open).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitRecord {
    /// License plate, when the log carried one. Informational only.
    pub plate: Option<String>,
    /// Ticket category label, verbatim from the log.
    pub category: String,
    /// Entry timestamp. Fixed at construction, never mutated.
    pub entry_ts: NaiveDateTime,
    /// Exit timestamp, `None` while the vehicle is still inside.
    pub exit_ts: Option<NaiveDateTime>,
    /// Continuous stay length in hours. `0.0` when the exit is absent; that
    /// value deliberately conflates "unknown" with "instant stay" because the
    /// duration histogram depends on it (see the histogram module).
    pub stay_hours: f64,
}

impl VisitRecord {
    pub fn new(
        plate: Option<String>,
        category: String,
        entry_ts: NaiveDateTime,
        exit_ts: Option<NaiveDateTime>,
    ) -> Self {
        let stay_hours = match exit_ts {
            Some(exit) if exit >= entry_ts => (exit - entry_ts).num_seconds() as f64 / 3600.0,
            _ => 0.0,
        };
        Self {
            plate,
            category,
            entry_ts,
            exit_ts,
            stay_hours,
        }
    }

    /// True when this visit overlaps the closed window, with an absent exit
    /// treated as extending at least to the window end.
    pub fn overlaps(&self, window: &QueryWindow) -> bool {
        self.entry_ts <= window.end && self.exit_ts.map_or(true, |exit| exit >= window.start)
    }
}

/// A closed time window `[start, end]`, `start <= end`. Zero duration is valid
/// and still produces correct single-instant counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl QueryWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        debug_assert!(start <= end, "query window start must not exceed end");
        Self { start, end }
    }
}

/// An inclusive calendar date range for a report query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Every calendar day in the range, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .collect()
    }

    /// The whole-range filter window: midnight of the first day through the
    /// last second of the last day.
    pub fn window(&self) -> QueryWindow {
        QueryWindow::new(at(self.start, 0, 0, 0), at(self.end, 23, 59, 59))
    }
}

/// End boundary of a user-supplied time period. `24:00` is a distinguished
/// value meaning midnight at the end of the day - the window rolls into 00:00
/// of the following calendar day - and is distinct from `00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodEnd {
    At(NaiveTime),
    EndOfDay,
}

/// A user-supplied sub-day window, replicated across every day of the queried
/// range by the bucketing driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePeriod {
    pub start: NaiveTime,
    pub end: PeriodEnd,
}

impl TimePeriod {
    /// Row label, e.g. `08:00:00-17:00:00` or `22:00:00-24:00:00`.
    pub fn label(&self) -> String {
        match self.end {
            PeriodEnd::At(end) => format!(
                "{}-{}",
                self.start.format("%H:%M:%S"),
                end.format("%H:%M:%S")
            ),
            PeriodEnd::EndOfDay => format!("{}-24:00:00", self.start.format("%H:%M:%S")),
        }
    }

    /// Anchor this period on a concrete calendar day.
    pub fn window_on(&self, date: NaiveDate) -> QueryWindow {
        let start = date.and_time(self.start);
        let end = match self.end {
            PeriodEnd::At(end) => date.and_time(end),
            PeriodEnd::EndOfDay => at(date.succ_opt().unwrap_or(date), 0, 0, 0),
        };
        QueryWindow::new(start, end)
    }
}

/// Ticket categories in first-seen order.
///
/// The discovery order is part of the output contract: report columns appear in
/// the order categories were first encountered in the input scan, not sorted.
/// Discovery is an explicit pass that returns this value; no shared global.
#[derive(Debug, Clone, Default)]
pub struct CategorySet {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a label, keeping only its first occurrence position.
    pub fn insert(&mut self, label: &str) {
        if self.seen.insert(label.to_string()) {
            self.ordered.push(label.to_string());
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for CategorySet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

/// Monday-based weekday index for a date, 0..=6.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Compose a date with an in-range time of day.
pub(crate) fn at(date: NaiveDate, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, min, sec)
        .expect("time of day components in range")
}
