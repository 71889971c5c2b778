pub mod agenda;
pub mod calendar;
pub mod cases;
pub mod causelist;
pub mod expenses;
pub mod hearings;
pub mod remind;
pub mod reset;
pub mod storage;
pub mod tasks;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use docket_core::dates;

/// Parse a date argument: court form first (DD-MM-YYYY), ISO as fallback.
pub fn parse_date_arg(text: &str) -> Result<NaiveDate> {
    dates::parse_list_date(text)
        .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
        .with_context(|| format!("Invalid date '{}'. Use DD-MM-YYYY or YYYY-MM-DD.", text))
}

/// Parse a `YYYY-MM` month argument into that month's first day.
pub fn parse_month_arg(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}'. Use YYYY-MM, e.g. 2025-03.", text))
}
