use anyhow::Result;

use crate::config::Config;
use crate::table;

pub async fn run(cfg: &Config) -> Result<()> {
    let store = cfg.store_client();
    let hearings = store.fetch_hearings().await?;

    if hearings.is_empty() {
        println!("No hearings recorded.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = hearings
        .iter()
        .map(|h| {
            vec![
                h.hearing_date.map_or("-".to_string(), |d| d.to_string()),
                table::dash(&h.case_number),
                table::dash(&h.court_name),
                table::dash(&h.judge_name),
                table::dash(&h.status),
                table::dash(&h.notes),
            ]
        })
        .collect();

    println!(
        "{}",
        table::render(&["Date", "Case", "Court", "Judge", "Status", "Notes"], &rows)
    );
    println!("\n{} hearing(s)", hearings.len());

    Ok(())
}
