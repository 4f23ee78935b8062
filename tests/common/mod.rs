#![allow(dead_code)]

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use parkstat::VisitRecord;
use std::fs;
use std::path::Path;

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn visit(category: &str, entry: &str, exit: Option<&str>) -> VisitRecord {
    VisitRecord::new(None, category.to_string(), ts(entry), exit.map(ts))
}

pub fn write_log_csv(dir: &Path, filename: &str, rows: &[&str]) -> Result<()> {
    let mut content =
        String::from("plate,category,entry_date,entry_time,exit_date,exit_time\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(dir.join(filename), content)?;
    Ok(())
}
