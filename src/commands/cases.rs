use anyhow::Result;

use crate::config::Config;
use crate::table;

pub async fn run(cfg: &Config, status: Option<&str>) -> Result<()> {
    let store = cfg.store_client();
    let mut cases = store.fetch_cases().await?;

    if let Some(status) = status {
        cases.retain(|c| c.status.as_deref() == Some(status));
    }

    if cases.is_empty() {
        println!("No cases.");
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
                table::dash(&c.case_number),
                parties,
                table::dash(&c.status),
                c.listing_date.map_or("-".to_string(), |d| d.to_string()),
                c.return_date.map_or("-".to_string(), |d| d.to_string()),
                table::dash(&c.judge_name),
            ]
        })
        .collect();

    println!(
        "{}",
        table::render(
            &["Case", "Parties", "Status", "Listed", "Returnable", "Judge"],
            &rows
        )
    );
    println!("\n{} case(s)", cases.len());

    Ok(())
}
