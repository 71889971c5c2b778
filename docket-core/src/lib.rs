//! Core types and view logic for the docket ecosystem.
//!
//! This crate provides everything the CLI needs that does not touch the
//! network: the typed upstream records, the derived `CalendarEvent` model,
//! DD-MM-YYYY causelist date handling, the four-source event aggregation,
//! month-grid projection, and the causelist save workflow (generic over the
//! store/endpoint traits implemented in `docket-store`).

pub mod aggregate;
pub mod dates;
pub mod error;
pub mod event;
pub mod grid;
pub mod record;
pub mod save;

pub use error::{DocketError, DocketResult};
pub use event::{CalendarEvent, EventKind, SourceRecord};
pub use record::{
    CaseRecord, CauselistCase, CauselistSnapshot, ExpenseRecord, HearingRecord, TaskRecord,
};
