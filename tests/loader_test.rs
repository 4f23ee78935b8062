use parkstat::loader::{discover_log_files, load_facility, load_log_file};
use parkstat::models::CategorySet;
use tempfile::TempDir;

mod common;
use common::{ts, write_log_csv};

#[test]
fn test_load_rows_with_degraded_fields() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    write_log_csv(
        dir.path(),
        "north.csv",
        &[
            "AB-123,staff,2024-10-07,08:15:00,2024-10-07,09:45:00",
            // Open visit: exit fields empty.
            "CD-456,visitor,2024-10-07,10:00:00,,",
            // Unparseable exit time degrades to an open visit.
            "EF-789,staff,2024-10-07,11:00:00,2024-10-07,bogus",
            // Unparseable entry time: row skipped, category still discovered.
            ",monthly,2024-10-07,not-a-time,2024-10-07,12:00:00",
        ],
    )?;

    let mut categories = CategorySet::new();
    let records = load_log_file(&dir.path().join("north.csv"), &mut categories)?;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].plate.as_deref(), Some("AB-123"));
    assert_eq!(records[0].entry_ts, ts("2024-10-07 08:15:00"));
    assert_eq!(records[0].stay_hours, 1.5);
    assert_eq!(records[1].exit_ts, None);
    assert_eq!(records[1].stay_hours, 0.0);
    assert_eq!(records[2].exit_ts, None);

    // Category of the skipped row is still part of the discovery order.
    assert_eq!(categories.labels(), ["staff", "visitor", "monthly"]);
    Ok(())
}

#[test]
fn test_structurally_bad_row_skips_only_itself() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    write_log_csv(
        dir.path(),
        "north.csv",
        &[
            "AB-123,staff,2024-10-07,08:15:00,2024-10-07,09:45:00",
            // Truncated row: nothing to deserialize a category from.
            "ZZ-999",
            "CD-456,visitor,2024-10-07,10:00:00,2024-10-07,11:00:00",
        ],
    )?;

    let mut categories = CategorySet::new();
    let records = load_log_file(&dir.path().join("north.csv"), &mut categories)?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].entry_ts, ts("2024-10-07 10:00:00"));
    assert_eq!(categories.labels(), ["staff", "visitor"]);
    Ok(())
}

#[test]
fn test_discovery_matches_facility_name() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    write_log_csv(dir.path(), "north_2024-10.csv", &[])?;
    write_log_csv(dir.path(), "north_2024-11.csv", &[])?;
    write_log_csv(dir.path(), "south_2024-10.csv", &[])?;

    let files = discover_log_files(dir.path(), "north")?;
    assert_eq!(files.len(), 2);
    // Sorted order keeps discovery deterministic.
    assert!(files[0].to_string_lossy().contains("north_2024-10"));
    assert!(files[1].to_string_lossy().contains("north_2024-11"));
    Ok(())
}

#[test]
fn test_first_seen_category_order_across_files() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    write_log_csv(
        dir.path(),
        "north_a.csv",
        &[
            "P1,staff,2024-10-07,08:00:00,2024-10-07,09:00:00",
            "P2,visitor,2024-10-07,08:30:00,2024-10-07,09:30:00",
        ],
    )?;
    write_log_csv(
        dir.path(),
        "north_b.csv",
        &[
            "P3,monthly,2024-10-08,08:00:00,2024-10-08,09:00:00",
            "P4,staff,2024-10-08,08:30:00,2024-10-08,09:30:00",
        ],
    )?;

    let (records, categories) = load_facility(dir.path(), "north")?;
    assert_eq!(records.len(), 4);
    // First-seen order across the sorted file sequence, duplicates ignored.
    assert_eq!(categories.labels(), ["staff", "visitor", "monthly"]);
    Ok(())
}

#[test]
fn test_missing_facility_yields_empty_set() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (records, categories) = load_facility(dir.path(), "nowhere")?;
    assert!(records.is_empty());
    assert!(categories.is_empty());
    Ok(())
}
