use anyhow::Result;
use docket_store::NewExpense;

use crate::commands::parse_date_arg;
use crate::config::Config;
use crate::table;

pub async fn list(cfg: &Config) -> Result<()> {
    let store = cfg.store_client();
    let expenses = store.fetch_expenses().await?;

    if expenses.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = expenses
        .iter()
        .map(|e| {
            vec![
                e.incurred_on.map_or("-".to_string(), |d| d.to_string()),
                e.description.clone(),
                format!("{:.2}", e.amount),
                table::dash(&e.category),
                table::dash(&e.case_id),
            ]
        })
        .collect();

    println!(
        "{}",
        table::render(&["Date", "Description", "Amount", "Category", "Case"], &rows)
    );

    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    println!("\n{} expense(s), total {:.2}", expenses.len(), total);

    Ok(())
}

pub async fn add(
    cfg: &Config,
    description: String,
    amount: f64,
    case: Option<String>,
    category: Option<String>,
    date: Option<&str>,
) -> Result<()> {
    let incurred_on = match date {
        Some(text) => Some(parse_date_arg(text)?),
        None => None,
    };

    let expense = NewExpense {
        description,
        amount,
        case_id: case,
        category,
        incurred_on,
    };

    let store = cfg.store_client();
    store.insert_expense(&expense).await?;

    println!("Recorded expense: {} ({:.2})", expense.description, expense.amount);

    Ok(())
}
