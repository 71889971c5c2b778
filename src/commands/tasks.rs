use anyhow::Result;

use crate::config::Config;
use crate::table;

pub async fn run(cfg: &Config, status: Option<&str>) -> Result<()> {
    let store = cfg.store_client();
    let mut tasks = store.fetch_tasks().await?;

    if let Some(status) = status {
        tasks.retain(|t| t.status.as_deref() == Some(status));
    }

    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|t| {
            vec![
                t.due_date.map_or("-".to_string(), |d| d.to_string()),
                t.title.clone(),
                table::dash(&t.status),
                table::dash(&t.assigned_to),
            ]
        })
        .collect();

    println!(
        "{}",
        table::render(&["Due", "Task", "Status", "Assigned to"], &rows)
    );
    println!("\n{} task(s)", tasks.len());

    Ok(())
}
