use anyhow::Result;
use chrono::{Duration, Local};
use docket_store::NewNotification;
use std::collections::BTreeSet;

use crate::config::Config;

/// Queue in-app hearing reminders for every case listed tomorrow.
///
/// Assignees come from the tasks booked against each case; a case with no
/// assigned tasks is skipped with a note. Run this from your own cron.
pub async fn run(cfg: &Config) -> Result<()> {
    let tomorrow = Local::now().date_naive() + Duration::days(1);

    let store = cfg.store_client();
    let cases = store.cases_listed_on(tomorrow).await?;

    if cases.is_empty() {
        println!("No hearings listed for {}.", tomorrow);
        return Ok(());
    }

    let tasks = store.fetch_tasks().await?;
    let mut queued = 0u32;

    for case in &cases {
        let number = case.case_number.as_deref().unwrap_or(case.id.as_str());

        let assignees: BTreeSet<&str> = tasks
            .iter()
            .filter(|task| task.case_id.as_deref() == Some(case.id.as_str()))
            .filter_map(|task| task.assigned_to.as_deref())
            .collect();

        if assignees.is_empty() {
            println!("  {}: no assignees, skipped", number);
            continue;
        }

        for user in assignees {
            let reminder = NewNotification::hearing_reminder(user, number, tomorrow);
            store.insert_notification(&reminder).await?;
            queued += 1;
        }
    }

    println!(
        "Queued {} reminder(s) for {} hearing(s) on {}.",
        queued,
        cases.len(),
        tomorrow
    );

    Ok(())
}
