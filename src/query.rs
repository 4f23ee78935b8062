//! Query Validation
//!
//! Turns the raw CLI inputs - a start date, an end date, and zero or more
//! time-of-day periods - into a validated [`ReportQuery`]. Every failure names
//! the offending input, and validation happens before any computation starts:
//! an invalid query never produces a partial analysis.

use crate::models::{DateRange, PeriodEnd, TimePeriod};
use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveTime};

/// A fully validated report query.
#[derive(Debug, Clone)]
pub struct ReportQuery {
    pub range: DateRange,
    pub periods: Vec<TimePeriod>,
}

impl ReportQuery {
    /// Parse and validate the raw query inputs. `periods` entries look like
    /// `08:00-17:00`; an end of `24:00` is the end-of-day sentinel that rolls
    /// the window into the next calendar day.
    pub fn parse(start: &str, end: &str, periods: &[String]) -> Result<Self> {
        let start = parse_query_date(start, "start date")?;
        let end = parse_query_date(end, "end date")?;
        if end < start {
            bail!("end date {end} precedes start date {start}");
        }

        let periods = periods
            .iter()
            .map(|p| parse_period(p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            range: DateRange { start, end },
            periods,
        })
    }
}

fn parse_query_date(input: &str, field: &str) -> Result<NaiveDate> {
    match NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => bail!("invalid {field}: {input:?} (expected YYYY-MM-DD)"),
    }
}

fn parse_period(input: &str) -> Result<TimePeriod> {
    let Some((start_str, end_str)) = input.trim().split_once('-') else {
        bail!("invalid time period: {input:?} (expected HH:MM-HH:MM)");
    };

    let start = parse_time_of_day(start_str)
        .ok_or_else(|| anyhow::anyhow!("invalid period start time: {start_str:?}"))?;

    let end = if end_str.trim() == "24:00" {
        PeriodEnd::EndOfDay
    } else {
        let end = parse_time_of_day(end_str)
            .ok_or_else(|| anyhow::anyhow!("invalid period end time: {end_str:?}"))?;
        // Equal start and end is a valid zero-duration window.
        if end < start {
            bail!("period end {end_str:?} precedes its start {start_str:?}");
        }
        PeriodEnd::At(end)
    };

    Ok(TimePeriod { start, end })
}

fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}
