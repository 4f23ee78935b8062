use parkstat::models::QueryWindow;
use parkstat::CategoryIndex;

mod common;
use common::{ts, visit};

#[test]
fn test_single_visit_inside_window() {
    let records = vec![visit(
        "A",
        "2024-10-07 08:00:00",
        Some("2024-10-07 09:30:00"),
    )];
    let index = CategoryIndex::build(&records);
    let window = QueryWindow::new(ts("2024-10-07 08:00:00"), ts("2024-10-07 10:00:00"));
    assert_eq!(index.max_concurrent("A", &window), 1);
    assert_eq!(index.count_overlapping("A", &window), 1);
}

#[test]
fn test_exit_and_entry_at_same_instant_both_counted() {
    // One vehicle leaves at the exact instant another arrives: both are
    // present at that instant, so the peak is 2.
    let records = vec![
        visit("A", "2024-10-07 08:00:00", Some("2024-10-07 09:00:00")),
        visit("A", "2024-10-07 09:00:00", Some("2024-10-07 10:00:00")),
    ];
    let index = CategoryIndex::build(&records);
    let window = QueryWindow::new(ts("2024-10-07 08:00:00"), ts("2024-10-07 10:00:00"));
    assert_eq!(index.max_concurrent("A", &window), 2);
}

#[test]
fn test_open_visit_clamped_to_window_end() {
    let records = vec![visit("A", "2024-10-07 08:00:00", None)];
    let index = CategoryIndex::build(&records);

    // Present for the rest of the entry day.
    let monday = QueryWindow::new(ts("2024-10-07 00:00:00"), ts("2024-10-07 23:59:59"));
    assert_eq!(index.max_concurrent("A", &monday), 1);

    // Still present in any later window; the clamp is per query, not "now".
    let thursday = QueryWindow::new(ts("2024-10-10 00:00:00"), ts("2024-10-10 23:59:59"));
    assert_eq!(index.max_concurrent("A", &thursday), 1);

    // Never present before it entered.
    let before = QueryWindow::new(ts("2024-10-07 06:00:00"), ts("2024-10-07 07:59:59"));
    assert_eq!(index.max_concurrent("A", &before), 0);
}

#[test]
fn test_count_overlapping_is_not_peak_concurrency() {
    let records = vec![
        visit("A", "2024-10-07 08:00:00", Some("2024-10-07 09:00:00")),
        visit("A", "2024-10-07 09:30:00", Some("2024-10-07 10:00:00")),
    ];
    let index = CategoryIndex::build(&records);
    let window = QueryWindow::new(ts("2024-10-07 08:00:00"), ts("2024-10-07 10:00:00"));
    assert_eq!(index.count_overlapping("A", &window), 2);
    assert_eq!(index.max_concurrent("A", &window), 1);
}

#[test]
fn test_overlapping_visits_stack() {
    let records = vec![
        visit("A", "2024-10-07 08:00:00", Some("2024-10-07 12:00:00")),
        visit("A", "2024-10-07 09:00:00", Some("2024-10-07 11:00:00")),
        visit("A", "2024-10-07 10:00:00", Some("2024-10-07 10:30:00")),
    ];
    let index = CategoryIndex::build(&records);
    let window = QueryWindow::new(ts("2024-10-07 00:00:00"), ts("2024-10-07 23:59:59"));
    assert_eq!(index.max_concurrent("A", &window), 3);
}

#[test]
fn test_zero_duration_window() {
    let records = vec![visit(
        "A",
        "2024-10-07 08:00:00",
        Some("2024-10-07 09:00:00"),
    )];
    let index = CategoryIndex::build(&records);
    let instant = QueryWindow::new(ts("2024-10-07 08:30:00"), ts("2024-10-07 08:30:00"));
    assert_eq!(index.max_concurrent("A", &instant), 1);
    let outside = QueryWindow::new(ts("2024-10-07 09:00:01"), ts("2024-10-07 09:00:01"));
    assert_eq!(index.max_concurrent("A", &outside), 0);
}

#[test]
fn test_category_filtering() {
    let records = vec![
        visit("A", "2024-10-07 08:00:00", Some("2024-10-07 09:00:00")),
        visit("B", "2024-10-07 08:00:00", Some("2024-10-07 09:00:00")),
    ];
    let index = CategoryIndex::build(&records);
    let window = QueryWindow::new(ts("2024-10-07 08:00:00"), ts("2024-10-07 10:00:00"));
    assert_eq!(index.max_concurrent("A", &window), 1);
    assert_eq!(index.max_concurrent("B", &window), 1);
    assert_eq!(index.max_concurrent("C", &window), 0);
}

#[test]
fn test_empty_record_set() {
    let index = CategoryIndex::build(&[]);
    let window = QueryWindow::new(ts("2024-10-07 08:00:00"), ts("2024-10-07 10:00:00"));
    assert_eq!(index.max_concurrent("A", &window), 0);
    assert_eq!(index.count_overlapping("A", &window), 0);
}

#[test]
fn test_entry_and_exit_event_counts() {
    let records = vec![
        visit("A", "2024-10-07 08:15:00", Some("2024-10-07 09:30:00")),
        visit("A", "2024-10-07 08:45:00", None),
        visit("A", "2024-10-07 10:00:00", Some("2024-10-07 10:59:59")),
    ];
    let index = CategoryIndex::build(&records);

    let eight = QueryWindow::new(ts("2024-10-07 08:00:00"), ts("2024-10-07 08:59:59"));
    assert_eq!(index.count_entries_in("A", &eight), 2);
    assert_eq!(index.count_exits_in("A", &eight), 0);

    let nine = QueryWindow::new(ts("2024-10-07 09:00:00"), ts("2024-10-07 09:59:59"));
    assert_eq!(index.count_entries_in("A", &nine), 0);
    assert_eq!(index.count_exits_in("A", &nine), 1);

    // The open visit never produces an exit event.
    let ten = QueryWindow::new(ts("2024-10-07 10:00:00"), ts("2024-10-07 10:59:59"));
    assert_eq!(index.count_entries_in("A", &ten), 1);
    assert_eq!(index.count_exits_in("A", &ten), 1);
}
