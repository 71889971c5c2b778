//! The hosted relational store client.
//!
//! The store speaks PostgREST conventions: `GET /rest/v1/{table}` with
//! filter/order query parameters, `POST` for inserts, `DELETE` with a filter
//! for deletes, and the API key sent as both `apikey` and a bearer token.
//! Row counts come back in the `Content-Range` header when the request
//! carries `Prefer: count=exact`.

use docket_core::{DocketError, DocketResult};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Longest error body echoed back into an error message.
const DETAIL_LIMIT: usize = 200;

pub struct StoreClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl StoreClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        StoreClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http: reqwest::Client::new(),
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Fetch all rows of `table` matching `query`, parsed as `T`.
    pub(crate) async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> DocketResult<Vec<T>> {
        let url = self.rest_url(table);
        log::debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| DocketError::Network(e.to_string()))?;

        let response = check_status(response).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| DocketError::Payload(e.to_string()))
    }

    /// Insert one row into `table`.
    pub(crate) async fn insert_row<B: Serialize>(&self, table: &str, body: &B) -> DocketResult<()> {
        let url = self.rest_url(table);
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await
            .map_err(|e| DocketError::Network(e.to_string()))?;

        check_status(response).await?;
        Ok(())
    }

    /// Count the rows of `table` without fetching them.
    pub(crate) async fn count_rows(&self, table: &str) -> DocketResult<u64> {
        let url = self.rest_url(table);

        let response = self
            .http
            .get(&url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.api_key)
            .header("Prefer", "count=exact")
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| DocketError::Network(e.to_string()))?;

        let response = check_status(response).await?;
        Ok(content_range_total(content_range(&response)))
    }

    /// Delete every row of `table`, returning how many were removed.
    pub(crate) async fn delete_all(&self, table: &str) -> DocketResult<u64> {
        let url = self.rest_url(table);
        log::debug!("DELETE {} (all rows)", url);

        let response = self
            .http
            .delete(&url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.api_key)
            .header("Prefer", "count=exact")
            .query(&[("id", "not.is.null")])
            .send()
            .await
            .map_err(|e| DocketError::Network(e.to_string()))?;

        let response = check_status(response).await?;
        Ok(content_range_total(content_range(&response)))
    }
}

async fn check_status(response: reqwest::Response) -> DocketResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response.text().await.unwrap_or_default();
    let detail = detail.chars().take(DETAIL_LIMIT).collect();
    Err(DocketError::StoreStatus {
        status: status.as_u16(),
        detail,
    })
}

fn content_range(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get("content-range")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// Total from a `Content-Range` header: `0-24/25` or `*/0` → the part after
/// the slash. A missing or malformed header counts as zero.
fn content_range_total(header: &str) -> u64 {
    header
        .rsplit('/')
        .next()
        .and_then(|total| total.trim().parse().ok())
        .unwrap_or(0)
}
