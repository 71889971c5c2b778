//! DD-MM-YYYY causelist date handling.
//!
//! The court publishes and keys causelists by a localized day-month-year
//! hyphenated string; every other upstream source uses ISO dates handled by
//! chrono's serde support. These two functions convert between the two
//! conventions.

use chrono::NaiveDate;

/// Render a date as the court's zero-padded `DD-MM-YYYY` form.
pub fn format_list_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Parse a `DD-MM-YYYY` string.
///
/// Accepts exactly three hyphen-separated numeric components; anything else
/// yields `None` rather than an error. Component triples that name an
/// impossible calendar date (day 31 of February, a four-digit day) also
/// yield `None`. Callers fall back to an alternate date field when this
/// returns `None`.
pub fn parse_list_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('-');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let day: u32 = day.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    let year: i32 = year.trim().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}
