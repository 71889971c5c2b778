use anyhow::Result;
use chrono::{Local, Utc};
use docket_core::aggregate::aggregate;
use docket_core::record::CauselistCase;
use docket_core::save::{save_causelist, SaveOutcome};
use docket_core::{dates, grid};
use docket_store::load_sources;

use crate::commands::parse_date_arg;
use crate::config::Config;
use crate::table;

/// Fetch one day's causelist and persist a snapshot.
///
/// Saving the same `(advocate code, date)` twice is a no-op success: the
/// existing snapshot wins and the endpoint is not contacted again.
pub async fn save(cfg: &Config, code: Option<&str>, date: Option<&str>) -> Result<()> {
    let code = match code.or(cfg.causelist.advocate_code.as_deref()) {
        Some(code) => code,
        None => anyhow::bail!(
            "No advocate code given.\n\
            Pass --code or set causelist.advocate_code in config.toml"
        ),
    };

    let list_date = match date {
        Some(text) => parse_date_arg(text)?,
        None => Local::now().date_naive(),
    };

    let store = cfg.store_client();
    let endpoint = cfg.causelist_client();

    let outcome = save_causelist(
        &store,
        &endpoint,
        code,
        list_date,
        cfg.user.id.as_deref(),
        Utc::now(),
    )
    .await?;

    let formatted = dates::format_list_date(list_date);
    match outcome {
        SaveOutcome::AlreadySaved { total_cases } => {
            println!(
                "Causelist for {} on {} is already saved ({} cases). Nothing to do.",
                code, formatted, total_cases
            );
        }
        SaveOutcome::Saved { total_cases } => {
            println!(
                "Saved causelist for {} on {}: {} cases.",
                code, formatted, total_cases
            );

            // Reload so the fresh snapshot shows up as a calendar event.
            let sources = load_sources(&store).await;
            let aggregation = aggregate(&sources);
            let on_day = grid::events_on_day(&aggregation.events, list_date);
            println!(
                "The calendar now shows {} event(s) on {}.",
                on_day.len(),
                formatted
            );
        }
    }

    Ok(())
}

pub async fn list(cfg: &Config) -> Result<()> {
    let store = cfg.store_client();
    let snapshots = store.fetch_causelists().await?;

    if snapshots.is_empty() {
        println!("No saved causelists.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = snapshots
        .iter()
        .map(|s| {
            vec![
                s.list_date.clone(),
                s.advocate_code.clone(),
                s.total_cases.to_string(),
                s.saved_at
                    .map_or("-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
                table::dash(&s.saved_by),
                s.id.clone(),
            ]
        })
        .collect();

    println!(
        "{}",
        table::render(
            &["List date", "Advocate", "Cases", "Saved at", "Saved by", "Id"],
            &rows
        )
    );
    println!("\n{} snapshot(s)", snapshots.len());

    Ok(())
}

pub async fn show(cfg: &Config, id: &str) -> Result<()> {
    let store = cfg.store_client();
    let snapshots = store.fetch_causelists().await?;

    let Some(snapshot) = snapshots.iter().find(|s| s.id == id) else {
        anyhow::bail!("No saved causelist with id '{}'. See `docket causelist list`.", id);
    };

    println!(
        "Causelist for {} on {} ({} cases)",
        snapshot.advocate_code, snapshot.list_date, snapshot.total_cases
    );

    let cases = parse_cases(&snapshot.cases);
    if cases.is_empty() {
        println!("\nNo case rows in this snapshot.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = cases
        .iter()
        .map(|c| {
            let parties = match (c.petitioner.as_deref(), c.respondent.as_deref()) {
                (Some(p), Some(r)) => format!("{} vs {}", p, r),
                (Some(p), None) => p.to_string(),
                (None, Some(r)) => r.to_string(),
                (None, None) => "-".to_string(),
            };
            vec![
                table::dash(&c.s_no),
                table::dash(&c.case_no),
                parties,
                table::dash(&c.stage),
                table::dash(&c.court),
            ]
        })
        .collect();

    println!();
    println!(
        "{}",
        table::render(&["S.No", "Case", "Parties", "Stage", "Court"], &rows)
    );

    Ok(())
}

/// The stored payload is opaque; parse it leniently for display. Rows that
/// do not look like case objects render as empty cells rather than failing
/// the page.
fn parse_cases(payload: &serde_json::Value) -> Vec<CauselistCase> {
    match payload {
        serde_json::Value::Array(rows) => rows
            .iter()
            .map(|row| serde_json::from_value(row.clone()).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    }
}
