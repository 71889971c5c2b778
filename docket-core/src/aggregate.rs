//! Event aggregation over the four upstream sources.
//!
//! One load produces one `SourceSet` (four independently fetched row
//! collections, each its own `Result`), and [`aggregate`] merges them into a
//! single event list. A failed source contributes zero events and is
//! recorded in `failed_sources` so the caller can print one warning while
//! still rendering everything that did load.

use std::fmt;

use crate::dates;
use crate::error::DocketResult;
use crate::event::{CalendarEvent, EventKind, SourceRecord};
use crate::record::{CaseRecord, CauselistSnapshot, HearingRecord, TaskRecord};

/// Placeholder used when a case row has no case number.
const UNNUMBERED_CASE: &str = "Unnumbered case";

/// Which upstream source a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Tasks,
    Cases,
    Hearings,
    Causelists,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Tasks => "tasks",
            SourceKind::Cases => "cases",
            SourceKind::Hearings => "hearings",
            SourceKind::Causelists => "causelists",
        };
        f.write_str(name)
    }
}

/// The four upstream fetch results of one load, joined before aggregation.
#[derive(Debug)]
pub struct SourceSet {
    pub tasks: DocketResult<Vec<TaskRecord>>,
    pub cases: DocketResult<Vec<CaseRecord>>,
    pub hearings: DocketResult<Vec<HearingRecord>>,
    pub causelists: DocketResult<Vec<CauselistSnapshot>>,
}

/// The outcome of one aggregation pass.
#[derive(Debug)]
pub struct Aggregation {
    pub events: Vec<CalendarEvent>,
    pub failed_sources: Vec<SourceKind>,
}

/// Merge the four sources into one freshly built event list.
///
/// Order within the list follows source order (tasks, cases, hearings,
/// causelists) and row order within each source, which is what makes the
/// upcoming list's tie-breaking deterministic.
pub fn aggregate(sources: &SourceSet) -> Aggregation {
    let mut events = Vec::new();
    let mut failed_sources = Vec::new();

    match &sources.tasks {
        Ok(rows) => events.extend(rows.iter().filter_map(task_event)),
        Err(_) => failed_sources.push(SourceKind::Tasks),
    }

    match &sources.cases {
        Ok(rows) => {
            for case in rows {
                events.extend(case_events(case));
            }
        }
        Err(_) => failed_sources.push(SourceKind::Cases),
    }

    match &sources.hearings {
        Ok(rows) => events.extend(rows.iter().filter_map(hearing_event)),
        Err(_) => failed_sources.push(SourceKind::Hearings),
    }

    match &sources.causelists {
        Ok(rows) => events.extend(rows.iter().filter_map(causelist_event)),
        Err(_) => failed_sources.push(SourceKind::Causelists),
    }

    Aggregation {
        events,
        failed_sources,
    }
}

/// The event list sorted ascending by date, truncated to `limit`.
///
/// The sort is stable: events on the same day keep their aggregation order.
pub fn upcoming(events: &[CalendarEvent], limit: usize) -> Vec<&CalendarEvent> {
    let mut sorted: Vec<&CalendarEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.date);
    sorted.truncate(limit);
    sorted
}

fn task_event(task: &TaskRecord) -> Option<CalendarEvent> {
    let date = task.due_date?;
    Some(CalendarEvent {
        id: format!("task-{}", task.id),
        title: task.title.clone(),
        date,
        kind: EventKind::Task,
        status: task.status.clone(),
        details: task.description.clone(),
        assigned_to: task.assigned_to.clone(),
        location: None,
        source: SourceRecord::Task(task.clone()),
    })
}

/// A case can appear twice: once for its listing date and once for its
/// return date, on two different days. The id prefixes (`listing-`,
/// `return-`) keep the two apart from each other and from manual hearings.
fn case_events(case: &CaseRecord) -> Vec<CalendarEvent> {
    let number = case.case_number.as_deref().unwrap_or(UNNUMBERED_CASE);
    let mut events = Vec::new();

    if let Some(date) = case.listing_date {
        events.push(CalendarEvent {
            id: format!("listing-{}", case.id),
            title: format!("Listing: {}", number),
            date,
            kind: EventKind::Listing,
            status: case.status.clone(),
            details: parties_line(case),
            assigned_to: None,
            location: case.judge_name.clone(),
            source: SourceRecord::Case(case.clone()),
        });
    }

    if let Some(date) = case.return_date {
        events.push(CalendarEvent {
            id: format!("return-{}", case.id),
            title: format!("Hearing: {}", number),
            date,
            kind: EventKind::Hearing,
            status: case.status.clone(),
            details: parties_line(case),
            assigned_to: None,
            location: case.judge_name.clone(),
            source: SourceRecord::Case(case.clone()),
        });
    }

    events
}

fn parties_line(case: &CaseRecord) -> Option<String> {
    match (case.petitioner.as_deref(), case.respondent.as_deref()) {
        (Some(p), Some(r)) => Some(format!("{} vs {}", p, r)),
        (Some(p), None) => Some(p.to_string()),
        (None, Some(r)) => Some(r.to_string()),
        (None, None) => None,
    }
}

fn hearing_event(hearing: &HearingRecord) -> Option<CalendarEvent> {
    let date = hearing.hearing_date?;

    // First non-empty of case number / case id names the hearing.
    let reference = hearing
        .case_number
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .or(hearing.case_id.as_deref())
        .unwrap_or("(no case)");

    Some(CalendarEvent {
        id: format!("hearing-{}", hearing.id),
        title: format!("Hearing: {}", reference),
        date,
        kind: EventKind::Hearing,
        status: hearing.status.clone(),
        details: hearing.notes.clone(),
        assigned_to: None,
        location: hearing
            .court_name
            .clone()
            .or_else(|| hearing.judge_name.clone()),
        source: SourceRecord::Hearing(hearing.clone()),
    })
}

/// Snapshot rows carry their date as DD-MM-YYYY text. An unparsable date
/// falls back to the save timestamp; with neither, the row contributes no
/// event.
fn causelist_event(snapshot: &CauselistSnapshot) -> Option<CalendarEvent> {
    let date = dates::parse_list_date(&snapshot.list_date)
        .or_else(|| snapshot.saved_at.map(|t| t.date_naive()))?;

    Some(CalendarEvent {
        id: format!("causelist-{}", snapshot.id),
        title: format!(
            "Causelist {} ({} cases)",
            snapshot.advocate_code, snapshot.total_cases
        ),
        date,
        kind: EventKind::Causelist,
        status: Some("saved".to_string()),
        details: None,
        assigned_to: None,
        location: None,
        source: SourceRecord::Causelist(snapshot.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocketError;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, due: Option<NaiveDate>) -> TaskRecord {
        TaskRecord {
            id: id.to_string(),
            title: format!("Task {}", id),
            status: Some("pending".to_string()),
            due_date: due,
            assigned_to: Some("asha".to_string()),
            case_id: None,
            description: None,
        }
    }

    fn case(id: &str, listing: Option<NaiveDate>, ret: Option<NaiveDate>) -> CaseRecord {
        CaseRecord {
            id: id.to_string(),
            case_number: Some(format!("WP/{}/2025", id)),
            petitioner: Some("A".to_string()),
            respondent: Some("B".to_string()),
            status: Some("active".to_string()),
            listing_date: listing,
            return_date: ret,
            judge_name: Some("Justice Rao".to_string()),
            court_hall: None,
            created_at: None,
        }
    }

    fn snapshot(id: &str, list_date: &str) -> CauselistSnapshot {
        CauselistSnapshot {
            id: id.to_string(),
            advocate_code: "19272".to_string(),
            list_date: list_date.to_string(),
            total_cases: 4,
            cases: serde_json::Value::Null,
            saved_at: None,
            saved_by: None,
        }
    }

    fn empty_sources() -> SourceSet {
        SourceSet {
            tasks: Ok(Vec::new()),
            cases: Ok(Vec::new()),
            hearings: Ok(Vec::new()),
            causelists: Ok(Vec::new()),
        }
    }

    #[test]
    fn test_case_with_both_dates_yields_listing_and_hearing() {
        let sources = SourceSet {
            cases: Ok(vec![case(
                "77",
                Some(date(2025, 3, 1)),
                Some(date(2025, 3, 5)),
            )]),
            ..empty_sources()
        };

        let result = aggregate(&sources);
        assert_eq!(result.events.len(), 2);

        let listing = &result.events[0];
        let hearing = &result.events[1];
        assert_eq!(listing.kind, EventKind::Listing);
        assert_eq!(listing.date, date(2025, 3, 1));
        assert_eq!(hearing.kind, EventKind::Hearing);
        assert_eq!(hearing.date, date(2025, 3, 5));
        assert_ne!(listing.id, hearing.id);
        assert!(listing.title.contains("WP/77/2025"));
    }

    #[test]
    fn test_rows_without_dates_contribute_nothing() {
        let sources = SourceSet {
            tasks: Ok(vec![task("1", None)]),
            cases: Ok(vec![case("2", None, None)]),
            hearings: Ok(vec![HearingRecord {
                id: "3".to_string(),
                case_number: None,
                case_id: None,
                hearing_date: None,
                court_name: None,
                judge_name: None,
                status: None,
                notes: None,
            }]),
            causelists: Ok(vec![snapshot("4", "not a date")]),
        };

        let result = aggregate(&sources);
        assert!(result.events.is_empty());
        assert!(result.failed_sources.is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_deterministic() {
        let sources = SourceSet {
            tasks: Ok(vec![task("9", Some(date(2025, 1, 1)))]),
            cases: Ok(vec![case(
                "9",
                Some(date(2025, 1, 2)),
                Some(date(2025, 1, 3)),
            )]),
            hearings: Ok(vec![HearingRecord {
                id: "9".to_string(),
                case_number: Some("CR/9/2025".to_string()),
                case_id: None,
                hearing_date: Some(date(2025, 1, 4)),
                court_name: Some("Court 3".to_string()),
                judge_name: None,
                status: None,
                notes: None,
            }]),
            causelists: Ok(vec![snapshot("9", "05-01-2025")]),
        };

        let first = aggregate(&sources);
        let second = aggregate(&sources);

        let ids: HashSet<&str> = first.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), first.events.len(), "ids must be unique");

        let first_ids: Vec<&str> = first.events.iter().map(|e| e.id.as_str()).collect();
        let second_ids: Vec<&str> = second.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(first_ids, second_ids, "ids must be deterministic");
    }

    #[test]
    fn test_causelist_date_falls_back_to_saved_at() {
        let mut snap = snapshot("5", "garbage");
        snap.saved_at = Some(Utc.with_ymd_and_hms(2025, 6, 10, 9, 30, 0).unwrap());

        let sources = SourceSet {
            causelists: Ok(vec![snap]),
            ..empty_sources()
        };

        let result = aggregate(&sources);
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].date, date(2025, 6, 10));
        assert_eq!(result.events[0].status.as_deref(), Some("saved"));
        assert_eq!(result.events[0].kind, EventKind::Causelist);
    }

    #[test]
    fn test_failed_source_degrades_without_dropping_the_rest() {
        let sources = SourceSet {
            tasks: Err(DocketError::Network("connection refused".to_string())),
            cases: Ok(vec![case("1", Some(date(2025, 2, 2)), None)]),
            hearings: Ok(Vec::new()),
            causelists: Ok(vec![snapshot("2", "03-02-2025")]),
        };

        let result = aggregate(&sources);
        assert_eq!(result.events.len(), 2);
        assert_eq!(result.failed_sources, vec![SourceKind::Tasks]);
    }

    #[test]
    fn test_hearing_title_prefers_case_number_over_case_id() {
        let hearing = HearingRecord {
            id: "h1".to_string(),
            case_number: Some("  ".to_string()),
            case_id: Some("case-41".to_string()),
            hearing_date: Some(date(2025, 4, 4)),
            court_name: None,
            judge_name: Some("Justice Devi".to_string()),
            status: None,
            notes: None,
        };

        let event = hearing_event(&hearing).expect("Should produce an event");
        // Blank case number is skipped in favour of the case id.
        assert!(event.title.contains("case-41"));
        // No court name, so the judge names the location.
        assert_eq!(event.location.as_deref(), Some("Justice Devi"));
    }

    #[test]
    fn test_unnumbered_case_uses_placeholder() {
        let mut c = case("8", Some(date(2025, 5, 5)), None);
        c.case_number = None;

        let events = case_events(&c);
        assert_eq!(events.len(), 1);
        assert!(events[0].title.contains(UNNUMBERED_CASE));
    }

    #[test]
    fn test_upcoming_truncates_to_earliest_ten() {
        let tasks: Vec<TaskRecord> = (1..=11)
            .map(|d| task(&d.to_string(), Some(date(2025, 7, d))))
            .collect();
        let sources = SourceSet {
            tasks: Ok(tasks),
            ..empty_sources()
        };

        let result = aggregate(&sources);
        let next = upcoming(&result.events, 10);
        assert_eq!(next.len(), 10);
        assert_eq!(next[0].date, date(2025, 7, 1));
        assert_eq!(next[9].date, date(2025, 7, 10));
    }

    #[test]
    fn test_upcoming_keeps_insertion_order_on_ties() {
        let sources = SourceSet {
            tasks: Ok(vec![
                task("a", Some(date(2025, 7, 1))),
                task("b", Some(date(2025, 7, 1))),
            ]),
            ..empty_sources()
        };

        let result = aggregate(&sources);
        let next = upcoming(&result.events, 10);
        assert_eq!(next[0].id, "task-a");
        assert_eq!(next[1].id, "task-b");
    }
}
