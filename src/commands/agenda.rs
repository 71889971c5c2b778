use anyhow::Result;
use chrono::Local;
use docket_core::aggregate::aggregate;
use docket_core::grid;
use docket_store::load_sources;

use crate::commands::calendar::{event_line, warn_failed};
use crate::commands::parse_date_arg;
use crate::config::Config;

/// Printable one-day agenda: the same event list as the calendar's day
/// panel, formatted as plain text for piping into a printer or a file.
pub async fn run(cfg: &Config, date: Option<&str>) -> Result<()> {
    let day = match date {
        Some(text) => parse_date_arg(text)?,
        None => Local::now().date_naive(),
    };

    let store = cfg.store_client();
    let sources = load_sources(&store).await;
    let aggregation = aggregate(&sources);

    warn_failed(&aggregation);

    println!("Agenda for {}", day.format("%A, %d %B %Y"));
    println!();

    let on_day = grid::events_on_day(&aggregation.events, day);
    if on_day.is_empty() {
        println!("  Nothing scheduled.");
        return Ok(());
    }

    for event in &on_day {
        println!("{}", event_line(event));
    }

    let counts = grid::counts_by_kind(&on_day);
    let summary: Vec<String> = counts
        .iter()
        .map(|(kind, count)| format!("{} {}", count, kind))
        .collect();
    println!();
    println!("  {}", summary.join(", "));

    Ok(())
}
