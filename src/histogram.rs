//! Stay Duration Histogram
//!
//! Bins every visit's continuous stay length into 33 fixed, descending,
//! non-uniform duration bands, counted per category over the whole record set.
//!
//! A record lands in the first band, scanning from the longest threshold
//! downward, whose threshold is strictly below its `stay_hours`; bands are
//! half-open on the lower side. The final band (threshold 0) is the catch-all
//! for everything not strictly exceeding any threshold, including stays of
//! exactly 0 - and therefore also every record whose duration is unknown,
//! since an absent exit yields `stay_hours == 0.0`. That conflation of "very
//! short stay" and "duration unknown" is a documented data convention, not
//! something to repair here.

use crate::models::{CategorySet, VisitRecord};
use crate::table::{Column, Table};

/// Duration band thresholds in hours, longest first, with their row labels.
pub const DURATION_BANDS: [(f64, &str); 33] = [
    (744.0, "744 (31days)"),
    (696.0, "696 (29days)"),
    (648.0, "648 (27days)"),
    (600.0, "600 (25days)"),
    (552.0, "552 (23days)"),
    (504.0, "504 (21days)"),
    (456.0, "456 (19days)"),
    (408.0, "408 (17days)"),
    (360.0, "360 (15days)"),
    (312.0, "312 (13days)"),
    (264.0, "264 (11days)"),
    (216.0, "216 (9 days)"),
    (168.0, "168 (7days)"),
    (144.0, "144 (6days)"),
    (120.0, "120 (5days)"),
    (96.0, "96 (4days)"),
    (72.0, "72 (3days)"),
    (48.0, "48 (2days)"),
    (24.0, "24 (1day)"),
    (22.0, "22"),
    (20.0, "20"),
    (18.0, "18"),
    (16.0, "16"),
    (14.0, "14"),
    (12.0, "12"),
    (10.0, "10"),
    (8.0, "8"),
    (6.0, "6"),
    (4.0, "4"),
    (2.0, "2"),
    (1.0, "1"),
    (0.5, "0.5"),
    (0.0, "0"),
];

/// Index of the band a stay length falls into.
pub fn band_index(stay_hours: f64) -> usize {
    DURATION_BANDS
        .iter()
        .position(|(threshold, _)| *threshold < stay_hours)
        .unwrap_or(DURATION_BANDS.len() - 1)
}

/// Total stay-length counts per band and category. Counts, not averages; the
/// whole record set, not per day or weekday.
pub fn duration_histogram(records: &[VisitRecord], categories: &CategorySet) -> Table {
    let labels = categories.labels();
    let mut table = Table::new(
        "Longest Continuous Stay",
        DURATION_BANDS.iter().map(|(_, l)| l.to_string()).collect(),
        labels.iter().map(|label| Column::new(label.as_str())).collect(),
    );

    for record in records {
        let Some(ci) = labels.iter().position(|c| *c == record.category) else {
            continue;
        };
        let band = band_index(record.stay_hours);
        let count = table.get(band, ci);
        table.set(band, ci, count + 1.0);
    }
    table
}
