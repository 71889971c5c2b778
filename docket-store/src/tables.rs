//! Typed table operations on the hosted store.
//!
//! Read orderings match what the pages display: tasks by due date, cases
//! newest first, hearings by hearing date, causelists by save time newest
//! first.

use chrono::NaiveDate;
use docket_core::record::{
    CaseRecord, CauselistSnapshot, ExpenseRecord, HearingRecord, TaskRecord,
};
use docket_core::save::{NewSnapshot, SnapshotStore};
use docket_core::DocketResult;
use serde::Serialize;

use crate::client::StoreClient;

/// Tables the admin reset clears, in deletion order.
pub const MANAGED_TABLES: [&str; 6] = [
    "tasks",
    "hearings",
    "expenses",
    "notifications",
    "causelists",
    "cases",
];

/// An expense row to insert (the store assigns id and created_at).
#[derive(Debug, Clone, Serialize)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub case_id: Option<String>,
    pub category: Option<String>,
    pub incurred_on: Option<NaiveDate>,
}

/// An in-app notification row to insert.
#[derive(Debug, Clone, Serialize)]
pub struct NewNotification {
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: String,
    pub is_read: bool,
}

impl NewNotification {
    /// A high-priority hearing reminder for one user.
    pub fn hearing_reminder(user_id: &str, case_number: &str, listed_on: NaiveDate) -> Self {
        NewNotification {
            user_id: user_id.to_string(),
            title: format!("Hearing reminder: {}", case_number),
            message: format!(
                "Case {} is listed for {}. Please prepare.",
                case_number, listed_on
            ),
            kind: "task".to_string(),
            priority: "high".to_string(),
            is_read: false,
        }
    }
}

impl StoreClient {
    pub async fn fetch_tasks(&self) -> DocketResult<Vec<TaskRecord>> {
        self.fetch_rows("tasks", &[("select", "*"), ("order", "due_date.asc")])
            .await
    }

    pub async fn fetch_cases(&self) -> DocketResult<Vec<CaseRecord>> {
        self.fetch_rows("cases", &[("select", "*"), ("order", "created_at.desc")])
            .await
    }

    pub async fn fetch_hearings(&self) -> DocketResult<Vec<HearingRecord>> {
        self.fetch_rows("hearings", &[("select", "*"), ("order", "hearing_date.asc")])
            .await
    }

    pub async fn fetch_causelists(&self) -> DocketResult<Vec<CauselistSnapshot>> {
        self.fetch_rows("causelists", &[("select", "*"), ("order", "saved_at.desc")])
            .await
    }

    pub async fn fetch_expenses(&self) -> DocketResult<Vec<ExpenseRecord>> {
        self.fetch_rows("expenses", &[("select", "*"), ("order", "incurred_on.desc")])
            .await
    }

    /// Cases whose listing date is exactly `date` (hearing reminders).
    pub async fn cases_listed_on(&self, date: NaiveDate) -> DocketResult<Vec<CaseRecord>> {
        let filter = format!("eq.{}", date.format("%Y-%m-%d"));
        self.fetch_rows("cases", &[("select", "*"), ("listing_date", filter.as_str())])
            .await
    }

    pub async fn insert_expense(&self, expense: &NewExpense) -> DocketResult<()> {
        self.insert_row("expenses", expense).await
    }

    pub async fn insert_notification(&self, notification: &NewNotification) -> DocketResult<()> {
        self.insert_row("notifications", notification).await
    }

    /// Row count of one managed table (used by the reset preview).
    pub async fn table_count(&self, table: &str) -> DocketResult<u64> {
        self.count_rows(table).await
    }

    /// Delete every row of one managed table, returning the removed count.
    pub async fn clear_table(&self, table: &str) -> DocketResult<u64> {
        self.delete_all(table).await
    }
}

impl SnapshotStore for StoreClient {
    async fn find_snapshot(
        &self,
        advocate_code: &str,
        list_date: &str,
    ) -> DocketResult<Option<CauselistSnapshot>> {
        let code_filter = format!("eq.{}", advocate_code);
        let date_filter = format!("eq.{}", list_date);
        let rows: Vec<CauselistSnapshot> = self
            .fetch_rows(
                "causelists",
                &[
                    ("select", "*"),
                    ("advocate_code", code_filter.as_str()),
                    ("list_date", date_filter.as_str()),
                    ("limit", "1"),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_snapshot(&self, snapshot: &NewSnapshot) -> DocketResult<()> {
        self.insert_row("causelists", snapshot).await
    }
}
