use parkstat::histogram::{band_index, duration_histogram, DURATION_BANDS};
use parkstat::models::CategorySet;

mod common;
use common::visit;

#[test]
fn test_bands_partition_the_record_set() {
    let records = vec![
        visit("staff", "2024-10-07 08:00:00", Some("2024-10-07 08:00:00")), // 0h
        visit("staff", "2024-10-07 08:00:00", Some("2024-10-07 13:00:00")), // 5h
        visit("staff", "2024-10-07 08:00:00", Some("2024-10-08 08:00:00")), // 24h
        visit("staff", "2024-10-01 08:00:00", Some("2024-11-05 08:00:00")), // 840h
        visit("visitor", "2024-10-07 08:00:00", None),                      // unknown -> 0h
        visit("visitor", "2024-10-07 08:00:00", Some("2024-10-07 08:45:00")), // 0.75h
    ];
    let categories: CategorySet = ["staff", "visitor"].into_iter().collect();
    let table = duration_histogram(&records, &categories);

    assert_eq!(table.n_rows(), 33);
    assert_eq!(table.n_cols(), 2);

    // Every record falls into exactly one band: per-category sums match totals.
    let staff_total: f64 = (0..33).map(|row| table.get(row, 0)).sum();
    let visitor_total: f64 = (0..33).map(|row| table.get(row, 1)).sum();
    assert_eq!(staff_total, 4.0);
    assert_eq!(visitor_total, 2.0);
}

#[test]
fn test_five_hour_stay_lands_in_band_four() {
    let records = vec![visit(
        "staff",
        "2024-10-07 08:00:00",
        Some("2024-10-07 13:00:00"),
    )];
    let categories: CategorySet = ["staff"].into_iter().collect();
    let table = duration_histogram(&records, &categories);

    let band_row = table.row_labels().iter().position(|l| l == "4").unwrap();
    assert_eq!(table.get(band_row, 0), 1.0);
    assert_eq!(DURATION_BANDS[band_index(5.0)].1, "4");
}

#[test]
fn test_unknown_duration_lands_in_catch_all_band() {
    // An open visit has stay_hours 0.0 by convention, so it is
    // indistinguishable from an instant stay and lands in the lowest band.
    let records = vec![
        visit("staff", "2024-10-07 08:00:00", None),
        visit("staff", "2024-10-07 08:00:00", Some("2024-10-07 08:00:00")),
    ];
    let categories: CategorySet = ["staff"].into_iter().collect();
    let table = duration_histogram(&records, &categories);

    let last = table.n_rows() - 1;
    assert_eq!(table.row_labels()[last], "0");
    assert_eq!(table.get(last, 0), 2.0);
}

#[test]
fn test_one_day_stay_in_24_hour_band() {
    // 25 hours strictly exceeds 24 but not 48.
    let records = vec![visit(
        "staff",
        "2024-10-07 08:00:00",
        Some("2024-10-08 09:00:00"),
    )];
    let categories: CategorySet = ["staff"].into_iter().collect();
    let table = duration_histogram(&records, &categories);

    let band_row = table
        .row_labels()
        .iter()
        .position(|l| l == "24 (1day)")
        .unwrap();
    assert_eq!(table.get(band_row, 0), 1.0);
}

#[test]
fn test_columns_follow_discovery_order() {
    let records = vec![
        visit("visitor", "2024-10-07 08:00:00", Some("2024-10-07 09:00:00")),
        visit("staff", "2024-10-07 08:00:00", Some("2024-10-07 09:00:00")),
    ];
    let categories: CategorySet = ["visitor", "staff"].into_iter().collect();
    let table = duration_histogram(&records, &categories);
    assert_eq!(table.columns()[0].label, "visitor");
    assert_eq!(table.columns()[1].label, "staff");
}
