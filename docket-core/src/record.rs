//! Typed upstream rows.
//!
//! The hosted store returns loosely shaped JSON rows; everything is parsed
//! into one of these structs at the crate boundary so the rest of the code
//! never probes optional fields ad hoc. A missing or null column simply
//! deserializes to `None` and the row degrades gracefully downstream.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A task row. Tasks with a due date show up on the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub case_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A case row. A case can be listed (listing_date) and/or returnable
/// (return_date); either, both, or neither may be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: String,
    #[serde(default)]
    pub case_number: Option<String>,
    #[serde(default)]
    pub petitioner: Option<String>,
    #[serde(default)]
    pub respondent: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub listing_date: Option<NaiveDate>,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub judge_name: Option<String>,
    #[serde(default)]
    pub court_hall: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A manually entered hearing row, kept separate from case scheduling so a
/// hearing can be recorded for matters that are not tracked as cases yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HearingRecord {
    pub id: String,
    #[serde(default)]
    pub case_number: Option<String>,
    #[serde(default)]
    pub case_id: Option<String>,
    #[serde(default)]
    pub hearing_date: Option<NaiveDate>,
    #[serde(default)]
    pub court_name: Option<String>,
    #[serde(default)]
    pub judge_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A saved causelist snapshot, keyed by `(advocate_code, list_date)`.
///
/// `list_date` is the court's DD-MM-YYYY text form (see [`crate::dates`]);
/// `cases` is kept as the raw payload the endpoint returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauselistSnapshot {
    pub id: String,
    pub advocate_code: String,
    #[serde(default)]
    pub list_date: String,
    #[serde(default)]
    pub total_cases: i64,
    #[serde(default)]
    pub cases: serde_json::Value,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub saved_by: Option<String>,
}

/// One row of a causelist payload, as published by the court.
///
/// Every field is optional: the payload is treated as opaque when stored and
/// only parsed leniently for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CauselistCase {
    #[serde(default)]
    pub s_no: Option<String>,
    #[serde(default)]
    pub case_no: Option<String>,
    #[serde(default)]
    pub petitioner: Option<String>,
    #[serde(default)]
    pub respondent: Option<String>,
    #[serde(default)]
    pub petitioner_advocate: Option<String>,
    #[serde(default)]
    pub respondent_advocate: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub court: Option<String>,
    #[serde(default)]
    pub judge: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub connected_cases: Vec<String>,
}

/// An expense row (expenses page; not part of the calendar).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: String,
    #[serde(default)]
    pub case_id: Option<String>,
    pub description: String,
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub incurred_on: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
