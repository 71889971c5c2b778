use anyhow::Result;
use chrono::{Local, NaiveDate};
use docket_core::aggregate::{aggregate, upcoming, Aggregation};
use docket_core::dates;
use docket_core::event::{CalendarEvent, SourceRecord};
use docket_core::grid::{self, MonthView};
use docket_store::load_sources;

use crate::commands::parse_month_arg;
use crate::config::Config;
use crate::table;

/// How many events the upcoming list shows.
const UPCOMING_LIMIT: usize = 10;

pub async fn run(
    cfg: &Config,
    month: Option<&str>,
    day: Option<u32>,
    event: Option<&str>,
) -> Result<()> {
    let store = cfg.store_client();
    let sources = load_sources(&store).await;
    let aggregation = aggregate(&sources);
    let today = Local::now().date_naive();

    let mut view = match month {
        Some(text) => MonthView::for_date(parse_month_arg(text)?),
        None => MonthView::for_date(today),
    };
    if let Some(day) = day {
        view.select_day(day);
    }
    if let Some(id) = event {
        view.select_event(id);
    }

    warn_failed(&aggregation);

    println!("{}", render_month(&view, &aggregation.events, today));

    // Neighbouring months for the --month flag; navigating re-anchors the
    // selection to the 1st, so the hint is computed on throwaway views.
    let mut prev = view.clone();
    prev.prev_month();
    let mut next = view.clone();
    next.next_month();
    println!(
        "{:^42}",
        format!(
            "< {:04}-{:02}        {:04}-{:02} >",
            prev.year, prev.month, next.year, next.month
        )
    );

    println!();
    print_day_panel(&view, &aggregation.events, today);

    if let Some(id) = &view.selected_event {
        print_event_detail(&aggregation.events, id);
    }

    print_upcoming(&aggregation.events);

    Ok(())
}

/// One warning for however many sources failed; the rest still renders.
pub(crate) fn warn_failed(aggregation: &Aggregation) {
    if aggregation.failed_sources.is_empty() {
        return;
    }
    let names: Vec<String> = aggregation
        .failed_sources
        .iter()
        .map(|source| source.to_string())
        .collect();
    println!("⚠ Could not load: {}. Showing everything else.\n", names.join(", "));
}

/// One agenda/day-panel line: kind marker, title, location, status, id.
pub(crate) fn event_line(event: &CalendarEvent) -> String {
    let mut line = format!("  [{}] {}", event.kind.marker(), event.title);
    if let Some(location) = &event.location {
        line.push_str(&format!(" @ {}", location));
    }
    if let Some(status) = &event.status {
        line.push_str(&format!(" [{}]", status));
    }
    line.push_str(&format!("  ({})", event.id));
    line
}

fn render_month(view: &MonthView, events: &[CalendarEvent], today: NaiveDate) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "{:^42}",
        format!("{} {}", month_name(view.month), view.year)
    ));
    lines.push(
        ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
            .iter()
            .map(|name| format!("{:>6}", name))
            .collect::<String>(),
    );

    for week in view.weeks() {
        let mut line = String::new();
        for cell in week {
            let date = cell.and_then(|d| NaiveDate::from_ymd_opt(view.year, view.month, d));
            match (cell, date) {
                (Some(day), Some(date)) => {
                    let count = grid::events_on_day(events, date).len();
                    let mark = if grid::is_today(date, today) { '*' } else { ' ' };
                    let badge = match count {
                        0 => "  ".to_string(),
                        1..=9 => format!("·{}", count),
                        _ => "·+".to_string(),
                    };
                    line.push_str(&format!(" {:>2}{}{}", day, mark, badge));
                }
                _ => line.push_str("      "),
            }
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn print_day_panel(view: &MonthView, events: &[CalendarEvent], today: NaiveDate) {
    let day = view.selected_day;
    let on_day = grid::events_on_day(events, day);

    let suffix = if grid::is_today(day, today) {
        "  (today)"
    } else {
        ""
    };
    println!("{}{}", day.format("%A, %d %B %Y"), suffix);

    if on_day.is_empty() {
        println!("  Nothing scheduled.");
        return;
    }

    let counts = grid::counts_by_kind(&on_day);
    let summary: Vec<String> = counts
        .iter()
        .map(|(kind, count)| format!("{} {}", count, kind))
        .collect();
    println!("  {}", summary.join(", "));
    println!();

    for event in &on_day {
        println!("{}", event_line(event));
    }
}

fn print_event_detail(events: &[CalendarEvent], id: &str) {
    let Some(event) = events.iter().find(|e| e.id == id) else {
        println!("\nNo event with id '{}'.", id);
        return;
    };

    println!("\n{}", event.title);
    println!("  date:   {}", dates::format_list_date(event.date));
    println!("  kind:   {}", event.kind);
    if let Some(status) = &event.status {
        println!("  status: {}", status);
    }
    if let Some(assigned) = &event.assigned_to {
        println!("  owner:  {}", assigned);
    }
    if let Some(details) = &event.details {
        println!("  notes:  {}", details);
    }

    // The original row, for everything the event line leaves out.
    match &event.source {
        SourceRecord::Task(task) => {
            if let Some(case_id) = &task.case_id {
                println!("  case:   {}", case_id);
            }
        }
        SourceRecord::Case(case) => {
            println!("  judge:  {}", table::dash(&case.judge_name));
            println!("  hall:   {}", table::dash(&case.court_hall));
            if let Some(listed) = case.listing_date {
                println!("  listed: {}", listed);
            }
            if let Some(returnable) = case.return_date {
                println!("  return: {}", returnable);
            }
        }
        SourceRecord::Hearing(hearing) => {
            println!("  court:  {}", table::dash(&hearing.court_name));
            println!("  judge:  {}", table::dash(&hearing.judge_name));
        }
        SourceRecord::Causelist(snapshot) => {
            println!("  code:   {}", snapshot.advocate_code);
            println!("  cases:  {}", snapshot.total_cases);
            if let Some(saved_at) = snapshot.saved_at {
                println!("  saved:  {}", saved_at.format("%Y-%m-%d %H:%M"));
            }
            println!("  by:     {}", table::dash(&snapshot.saved_by));
        }
    }
}

fn print_upcoming(events: &[CalendarEvent]) {
    let next = upcoming(events, UPCOMING_LIMIT);

    println!("\nUpcoming");
    if next.is_empty() {
        println!("  Nothing on the calendar.");
        return;
    }

    for event in next {
        println!(
            "  {}  [{}] {}",
            dates::format_list_date(event.date),
            event.kind.marker(),
            event.title
        );
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}
