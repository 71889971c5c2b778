use anyhow::Result;
use docket_store::tables::MANAGED_TABLES;

use crate::config::Config;

/// Admin reset: wipe every managed table.
///
/// Destructive and unrecoverable, so without `--force` it only previews the
/// row counts that would go.
pub async fn run(cfg: &Config, force: bool) -> Result<()> {
    let store = cfg.store_client();

    if !force {
        println!("This would permanently delete every row from:");
        for &table in &MANAGED_TABLES {
            let count = store.table_count(table).await?;
            println!("  {:<14} {:>6} row(s)", table, count);
        }
        println!("\nNothing was deleted. Run again with --force to delete.");
        return Ok(());
    }

    let mut total = 0u64;
    for &table in &MANAGED_TABLES {
        let removed = store.clear_table(table).await?;
        println!("  cleared {:<14} {:>6} row(s)", table, removed);
        total += removed;
    }

    println!("\nReset complete: {} row(s) deleted.", total);

    Ok(())
}
