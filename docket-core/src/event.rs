//! The derived calendar event model.
//!
//! Events are never persisted: the aggregation pass rebuilds the whole list
//! from the upstream rows on every load, and stale lists are simply
//! discarded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::{CaseRecord, CauselistSnapshot, HearingRecord, TaskRecord};

/// What kind of calendar entry an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Task,
    Hearing,
    Listing,
    Causelist,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Task => "task",
            EventKind::Hearing => "hearing",
            EventKind::Listing => "listing",
            EventKind::Causelist => "causelist",
        }
    }

    /// Single-letter marker used in grid cells and agenda lines.
    pub fn marker(self) -> char {
        match self {
            EventKind::Task => 'T',
            EventKind::Hearing => 'H',
            EventKind::Listing => 'L',
            EventKind::Causelist => 'C',
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The original row an event was derived from, retained for detail panels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SourceRecord {
    Task(TaskRecord),
    Case(CaseRecord),
    Hearing(HearingRecord),
    Causelist(CauselistSnapshot),
}

/// One entry on the calendar, derived from exactly one upstream row.
///
/// `id` is synthesized as `{prefix}-{source row id}`; the prefixes are
/// distinct per mapping rule, so ids are unique within one aggregation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub kind: EventKind,
    pub status: Option<String>,
    pub details: Option<String>,
    pub assigned_to: Option<String>,
    pub location: Option<String>,
    pub source: SourceRecord,
}
