use anyhow::Result;
use docket_store::storage::human_size;

use crate::config::Config;
use crate::table;

pub async fn run(cfg: &Config) -> Result<()> {
    let store = cfg.store_client();
    let usage = store.storage_usage().await?;

    if usage.is_empty() {
        println!("No storage buckets.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = usage
        .iter()
        .map(|bucket| {
            let note = match &bucket.error {
                Some(err) => format!("listing failed: {}", err),
                None => String::new(),
            };
            vec![
                bucket.name.clone(),
                if bucket.public { "public" } else { "private" }.to_string(),
                bucket.objects.to_string(),
                human_size(bucket.bytes),
                note,
            ]
        })
        .collect();

    println!(
        "{}",
        table::render(&["Bucket", "Visibility", "Objects", "Size", ""], &rows)
    );

    let objects: u64 = usage.iter().map(|b| b.objects).sum();
    let bytes: u64 = usage.iter().map(|b| b.bytes).sum();
    println!(
        "\n{} bucket(s), {} object(s), {} total",
        usage.len(),
        objects,
        human_size(bytes)
    );

    Ok(())
}
