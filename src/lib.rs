//! Parking Occupancy Statistics Library
//!
//! Computes occupancy statistics for a vehicle parking facility from raw
//! entry/exit log records and renders several aggregated report tables.
//!
//! ## Core Features
//!
//! - **Peak occupancy**: true peak simultaneous presence per time window via an
//!   event sweep, averaged per hour-of-day and weekday across a date range
//! - **Custom periods**: the same measure over arbitrary caller-supplied
//!   sub-day windows, including an end-of-day `24:00` sentinel
//! - **Flow counts**: vehicles entering and exiting per hourly bucket
//! - **Stay histogram**: continuous stay lengths over 33 fixed duration bands
//! - **Open visits**: vehicles still inside at collection time are clamped to
//!   each queried window's end, never extrapolated
//!
//! ## Architecture Overview
//!
//! - [`models`] - Visit records, query windows, time periods, category set
//! - [`overlap`] - Interval overlap engine: sweep-based peak concurrency over a
//!   pre-sorted per-category index
//! - [`buckets`] - Time bucketing driver replicating buckets over day x weekday
//!   x category and reducing to means
//! - [`flow`] - Hourly entry/exit event counter
//! - [`histogram`] - Stay-duration band counts
//! - [`report`] - Assembles the full table set for one query
//! - [`loader`] / [`writer`] - CSV log input and per-sheet report output
//! - [`query`] - Up-front validation of the report query
//! - [`config`] / [`logging`] / [`display`] - Configuration, structured
//!   logging, and the terminal summary
//!
//! ## Main Entry Point
//!
//! ```rust
//! use parkstat::{build_report, CategorySet, DateRange, VisitRecord};
//! use chrono::NaiveDate;
//!
//! let records: Vec<VisitRecord> = Vec::new();
//! let categories = CategorySet::new();
//! let range = DateRange {
//!     start: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
//!     end: NaiveDate::from_ymd_opt(2024, 10, 30).unwrap(),
//! };
//! let report = build_report(&records, &categories, &range, &[]);
//! assert_eq!(report.occupancy.n_rows(), 24);
//! ```

pub mod buckets;
pub mod config;
pub mod display;
pub mod flow;
pub mod histogram;
pub mod loader;
pub mod logging;
pub mod models;
pub mod overlap;
pub mod query;
pub mod report;
pub mod table;
pub mod writer;

pub use models::*;
pub use overlap::CategoryIndex;
pub use query::ReportQuery;
pub use report::{build_report, ParkingReport};
pub use table::{Column, Table};
