//! The causelist save workflow.
//!
//! One user-triggered action: validate the advocate code, check whether a
//! snapshot for `(advocate code, list date)` already exists (an existing one
//! is terminal success: no fetch, no write), fetch the causelist from the
//! external endpoint, normalize the response, and persist one snapshot row.
//! Persistence is the last step, so a failure anywhere leaves no partial
//! state behind.
//!
//! The store and the endpoint sit behind traits so the workflow itself has
//! no network dependency; `docket-store` provides the HTTP implementations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::dates;
use crate::error::{DocketError, DocketResult};
use crate::record::CauselistSnapshot;

/// Snapshot persistence operations the workflow needs.
pub trait SnapshotStore {
    async fn find_snapshot(
        &self,
        advocate_code: &str,
        list_date: &str,
    ) -> DocketResult<Option<CauselistSnapshot>>;

    async fn insert_snapshot(&self, snapshot: &NewSnapshot) -> DocketResult<()>;
}

/// The external causelist endpoint. Returns the raw response body; shape
/// normalization happens in [`CauselistPayload::from_value`].
pub trait CauselistSource {
    async fn fetch_causelist(&self, advocate_code: &str, list_date: &str) -> DocketResult<Value>;
}

/// A snapshot row to insert (the store assigns the id).
#[derive(Debug, Clone, Serialize)]
pub struct NewSnapshot {
    pub advocate_code: String,
    pub list_date: String,
    pub total_cases: i64,
    pub cases: Vec<Value>,
    pub saved_at: DateTime<Utc>,
    pub saved_by: Option<String>,
}

/// How a save ended (both variants are success).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A snapshot for this key already existed; nothing was fetched or
    /// written.
    AlreadySaved { total_cases: i64 },
    /// A fresh snapshot was fetched and persisted.
    Saved { total_cases: i64 },
}

/// The normalized causelist response.
///
/// The endpoint returns either a bare case array or a wrapper object with a
/// `cases` array plus echoed request fields. Echoed fields, when present,
/// win over the caller-supplied values at persist time.
#[derive(Debug, Default)]
pub struct CauselistPayload {
    pub cases: Vec<Value>,
    pub advocate_code: Option<String>,
    pub list_date: Option<String>,
    pub count: Option<i64>,
}

impl CauselistPayload {
    /// Accepts a bare array or `{ cases: [...], advocate_code, date, count }`;
    /// any other shape normalizes to an empty case list.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(cases) => CauselistPayload {
                cases,
                ..CauselistPayload::default()
            },
            Value::Object(mut body) => {
                let cases = match body.remove("cases") {
                    Some(Value::Array(cases)) => cases,
                    _ => Vec::new(),
                };
                CauselistPayload {
                    cases,
                    advocate_code: body
                        .get("advocate_code")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    list_date: body.get("date").and_then(Value::as_str).map(str::to_string),
                    count: body.get("count").and_then(Value::as_i64),
                }
            }
            _ => CauselistPayload::default(),
        }
    }
}

/// Run the save workflow for one `(advocate code, date)` pair.
pub async fn save_causelist<S, C>(
    store: &S,
    source: &C,
    advocate_code: &str,
    list_date: NaiveDate,
    saved_by: Option<&str>,
    now: DateTime<Utc>,
) -> DocketResult<SaveOutcome>
where
    S: SnapshotStore,
    C: CauselistSource,
{
    let advocate_code = advocate_code.trim();
    if advocate_code.is_empty() {
        return Err(DocketError::Validation(
            "advocate code must not be empty".to_string(),
        ));
    }

    let formatted_date = dates::format_list_date(list_date);

    if let Some(existing) = store.find_snapshot(advocate_code, &formatted_date).await? {
        return Ok(SaveOutcome::AlreadySaved {
            total_cases: existing.total_cases,
        });
    }

    let response = source.fetch_causelist(advocate_code, &formatted_date).await?;
    let payload = CauselistPayload::from_value(response);

    let total_cases = payload.count.unwrap_or(payload.cases.len() as i64);
    let snapshot = NewSnapshot {
        advocate_code: payload
            .advocate_code
            .unwrap_or_else(|| advocate_code.to_string()),
        list_date: payload.list_date.unwrap_or(formatted_date),
        total_cases,
        cases: payload.cases,
        saved_at: now,
        saved_by: saved_by.map(str::to_string),
    };

    store.insert_snapshot(&snapshot).await?;

    Ok(SaveOutcome::Saved { total_cases })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    struct FakeStore {
        existing: Option<CauselistSnapshot>,
        finds: Cell<u32>,
        inserted: RefCell<Vec<NewSnapshot>>,
    }

    impl FakeStore {
        fn empty() -> Self {
            FakeStore {
                existing: None,
                finds: Cell::new(0),
                inserted: RefCell::new(Vec::new()),
            }
        }

        fn with_existing(total_cases: i64) -> Self {
            FakeStore {
                existing: Some(CauselistSnapshot {
                    id: "snap-1".to_string(),
                    advocate_code: "19272".to_string(),
                    list_date: "10-01-2025".to_string(),
                    total_cases,
                    cases: Value::Null,
                    saved_at: None,
                    saved_by: None,
                }),
                ..FakeStore::empty()
            }
        }
    }

    impl SnapshotStore for FakeStore {
        async fn find_snapshot(
            &self,
            _advocate_code: &str,
            _list_date: &str,
        ) -> DocketResult<Option<CauselistSnapshot>> {
            self.finds.set(self.finds.get() + 1);
            Ok(self.existing.clone())
        }

        async fn insert_snapshot(&self, snapshot: &NewSnapshot) -> DocketResult<()> {
            self.inserted.borrow_mut().push(snapshot.clone());
            Ok(())
        }
    }

    struct FakeEndpoint {
        response: DocketResult<Value>,
        fetches: Cell<u32>,
    }

    impl FakeEndpoint {
        fn returning(value: Value) -> Self {
            FakeEndpoint {
                response: Ok(value),
                fetches: Cell::new(0),
            }
        }

        fn failing(status: u16) -> Self {
            FakeEndpoint {
                response: Err(DocketError::Endpoint { status }),
                fetches: Cell::new(0),
            }
        }
    }

    impl CauselistSource for FakeEndpoint {
        async fn fetch_causelist(
            &self,
            _advocate_code: &str,
            _list_date: &str,
        ) -> DocketResult<Value> {
            self.fetches.set(self.fetches.get() + 1);
            match &self.response {
                Ok(value) => Ok(value.clone()),
                Err(DocketError::Endpoint { status }) => {
                    Err(DocketError::Endpoint { status: *status })
                }
                Err(_) => unreachable!(),
            }
        }
    }

    fn list_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 9, 18, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_blank_advocate_code_fails_before_any_call() {
        let store = FakeStore::empty();
        let endpoint = FakeEndpoint::returning(json!([]));

        let result = save_causelist(&store, &endpoint, "   ", list_date(), None, now()).await;

        assert!(matches!(result, Err(DocketError::Validation(_))));
        assert_eq!(store.finds.get(), 0);
        assert_eq!(endpoint.fetches.get(), 0);
    }

    #[tokio::test]
    async fn test_existing_snapshot_is_terminal_success_without_fetch() {
        let store = FakeStore::with_existing(7);
        let endpoint = FakeEndpoint::returning(json!([]));

        let outcome = save_causelist(&store, &endpoint, "19272", list_date(), None, now())
            .await
            .expect("Should succeed");

        assert_eq!(outcome, SaveOutcome::AlreadySaved { total_cases: 7 });
        assert_eq!(endpoint.fetches.get(), 0, "no network call on a hit");
        assert!(store.inserted.borrow().is_empty(), "no overwrite on a hit");
    }

    #[tokio::test]
    async fn test_bare_array_response_is_counted_and_stored() {
        let store = FakeStore::empty();
        let endpoint =
            FakeEndpoint::returning(json!([{"case_no": "WP/1/2025"}, {"case_no": "WP/2/2025"}]));

        let outcome = save_causelist(&store, &endpoint, "19272", list_date(), Some("user-3"), now())
            .await
            .expect("Should succeed");

        assert_eq!(outcome, SaveOutcome::Saved { total_cases: 2 });
        let inserted = store.inserted.borrow();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].advocate_code, "19272");
        assert_eq!(inserted[0].list_date, "10-01-2025");
        assert_eq!(inserted[0].total_cases, 2);
        assert_eq!(inserted[0].cases.len(), 2);
        assert_eq!(inserted[0].saved_by.as_deref(), Some("user-3"));
        assert_eq!(inserted[0].saved_at, now());
    }

    #[tokio::test]
    async fn test_wrapper_response_prefers_echoed_fields() {
        let store = FakeStore::empty();
        let endpoint = FakeEndpoint::returning(json!({
            "cases": [{"case_no": "WP/1/2025"}],
            "advocate_code": "00042",
            "date": "11-01-2025",
            "count": 9
        }));

        let outcome = save_causelist(&store, &endpoint, "19272", list_date(), None, now())
            .await
            .expect("Should succeed");

        assert_eq!(outcome, SaveOutcome::Saved { total_cases: 9 });
        let inserted = store.inserted.borrow();
        assert_eq!(inserted[0].advocate_code, "00042");
        assert_eq!(inserted[0].list_date, "11-01-2025");
        assert_eq!(inserted[0].total_cases, 9);
    }

    #[tokio::test]
    async fn test_unexpected_shape_normalizes_to_empty_list() {
        let store = FakeStore::empty();
        let endpoint = FakeEndpoint::returning(json!("no records"));

        let outcome = save_causelist(&store, &endpoint, "19272", list_date(), None, now())
            .await
            .expect("Should succeed");

        assert_eq!(outcome, SaveOutcome::Saved { total_cases: 0 });
        assert!(store.inserted.borrow()[0].cases.is_empty());
    }

    #[tokio::test]
    async fn test_endpoint_failure_aborts_before_persist() {
        let store = FakeStore::empty();
        let endpoint = FakeEndpoint::failing(502);

        let result = save_causelist(&store, &endpoint, "19272", list_date(), None, now()).await;

        assert!(matches!(result, Err(DocketError::Endpoint { status: 502 })));
        assert!(store.inserted.borrow().is_empty());
    }

    #[test]
    fn test_payload_object_without_cases_array_is_empty() {
        let payload = CauselistPayload::from_value(json!({"error": "boom", "cases": "nope"}));
        assert!(payload.cases.is_empty());
        assert_eq!(payload.count, None);
    }
}
