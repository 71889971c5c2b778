//! Month-grid projection over the aggregated event list.
//!
//! Everything here is a pure function of its inputs: "today" is an explicit
//! reference date supplied by the caller, never read from the wall clock, so
//! the grid renders the same for the same inputs.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::event::{CalendarEvent, EventKind};

/// Events falling on exactly the given calendar day.
///
/// Comparison uses local calendar fields only; no timezone normalization.
pub fn events_on_day(events: &[CalendarEvent], day: NaiveDate) -> Vec<&CalendarEvent> {
    events.iter().filter(|e| e.date == day).collect()
}

/// Whether `day` is the caller's reference date.
pub fn is_today(day: NaiveDate, today: NaiveDate) -> bool {
    day == today
}

/// Per-kind counts for compact day badges. Kinds with no events are absent.
pub fn counts_by_kind(events: &[&CalendarEvent]) -> BTreeMap<EventKind, usize> {
    let mut counts = BTreeMap::new();
    for event in events {
        *counts.entry(event.kind).or_insert(0) += 1;
    }
    counts
}

/// Display state of the calendar page: which month is shown, which day is
/// selected, and which event (if any) is open in the detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub selected_day: NaiveDate,
    pub selected_event: Option<String>,
}

impl MonthView {
    /// Anchor the view on the month containing `date`, selecting that date.
    pub fn for_date(date: NaiveDate) -> Self {
        MonthView {
            year: date.year(),
            month: date.month(),
            selected_day: date,
            selected_event: None,
        }
    }

    /// First day of the displayed month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("month anchor is always valid")
    }

    pub fn day_count(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Move to the previous month. Selection re-anchors to the 1st and any
    /// open event detail closes: selection does not survive navigation.
    pub fn prev_month(&mut self) {
        let (year, month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        self.anchor(year, month);
    }

    /// Move to the next month (same re-anchoring rules as [`Self::prev_month`]).
    pub fn next_month(&mut self) {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        self.anchor(year, month);
    }

    /// Select a day of the displayed month. Out-of-range days are ignored.
    pub fn select_day(&mut self, day: u32) {
        if day >= 1 && day <= self.day_count() {
            if let Some(date) = NaiveDate::from_ymd_opt(self.year, self.month, day) {
                self.selected_day = date;
            }
        }
    }

    pub fn select_event(&mut self, event_id: &str) {
        self.selected_event = Some(event_id.to_string());
    }

    /// The Monday-first grid rows of the month: day numbers padded with
    /// `None` cells before the 1st and after the last day.
    pub fn weeks(&self) -> Vec<[Option<u32>; 7]> {
        let lead = self.first_day().weekday().num_days_from_monday() as usize;
        let days = self.day_count();
        let rows = (lead + days as usize).div_ceil(7);

        let mut weeks = vec![[None; 7]; rows];
        for day in 1..=days {
            let cell = lead + day as usize - 1;
            weeks[cell / 7][cell % 7] = Some(day);
        }
        weeks
    }

    fn anchor(&mut self, year: i32, month: u32) {
        self.year = year;
        self.month = month;
        self.selected_day =
            NaiveDate::from_ymd_opt(year, month, 1).expect("month anchor is always valid");
        self.selected_event = None;
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SourceRecord;
    use crate::record::TaskRecord;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, kind: EventKind, on: NaiveDate) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: id.to_string(),
            date: on,
            kind,
            status: None,
            details: None,
            assigned_to: None,
            location: None,
            source: SourceRecord::Task(TaskRecord {
                id: id.to_string(),
                title: id.to_string(),
                status: None,
                due_date: Some(on),
                assigned_to: None,
                case_id: None,
                description: None,
            }),
        }
    }

    #[test]
    fn test_events_on_day_matches_exact_date_only() {
        let events = vec![
            event("a", EventKind::Task, date(2025, 3, 1)),
            event("b", EventKind::Hearing, date(2025, 3, 1)),
            event("c", EventKind::Task, date(2025, 3, 2)),
        ];

        let day = events_on_day(&events, date(2025, 3, 1));
        assert_eq!(day.len(), 2);
        assert!(day.iter().all(|e| e.date == date(2025, 3, 1)));
    }

    #[test]
    fn test_counts_by_kind_omits_missing_kinds() {
        let events = vec![
            event("a", EventKind::Hearing, date(2025, 3, 1)),
            event("b", EventKind::Hearing, date(2025, 3, 1)),
            event("c", EventKind::Task, date(2025, 3, 1)),
        ];
        let refs: Vec<&CalendarEvent> = events.iter().collect();

        let counts = counts_by_kind(&refs);
        assert_eq!(counts.get(&EventKind::Hearing), Some(&2));
        assert_eq!(counts.get(&EventKind::Task), Some(&1));
        assert!(!counts.contains_key(&EventKind::Causelist));
        assert!(!counts.contains_key(&EventKind::Listing));
    }

    #[test]
    fn test_is_today_uses_reference_date() {
        let reference = date(2025, 3, 15);
        assert!(is_today(date(2025, 3, 15), reference));
        assert!(!is_today(date(2025, 3, 16), reference));
    }

    #[test]
    fn test_next_month_wraps_year_and_resets_selection() {
        let mut view = MonthView::for_date(date(2025, 12, 24));
        view.select_event("hearing-1");

        view.next_month();

        assert_eq!((view.year, view.month), (2026, 1));
        assert_eq!(view.selected_day, date(2026, 1, 1));
        assert_eq!(view.selected_event, None);
    }

    #[test]
    fn test_prev_month_wraps_year() {
        let mut view = MonthView::for_date(date(2025, 1, 10));
        view.prev_month();
        assert_eq!((view.year, view.month), (2024, 12));
        assert_eq!(view.selected_day, date(2024, 12, 1));
    }

    #[test]
    fn test_select_day_ignores_out_of_range() {
        let mut view = MonthView::for_date(date(2025, 2, 10));
        view.select_day(30);
        assert_eq!(view.selected_day, date(2025, 2, 10));
        view.select_day(28);
        assert_eq!(view.selected_day, date(2025, 2, 28));
    }

    #[test]
    fn test_weeks_shape_june_2025() {
        // June 2025 starts on a Sunday: six leading blanks, 30 days.
        let view = MonthView::for_date(date(2025, 6, 1));
        let weeks = view.weeks();

        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0], [None, None, None, None, None, None, Some(1)]);
        assert_eq!(weeks[5][0], Some(30));
        assert_eq!(weeks[5][1], None);
    }

    #[test]
    fn test_day_count_handles_leap_years() {
        assert_eq!(MonthView::for_date(date(2024, 2, 1)).day_count(), 29);
        assert_eq!(MonthView::for_date(date(2025, 2, 1)).day_count(), 28);
        assert_eq!(MonthView::for_date(date(2100, 2, 1)).day_count(), 28);
        assert_eq!(MonthView::for_date(date(2000, 2, 1)).day_count(), 29);
    }
}
