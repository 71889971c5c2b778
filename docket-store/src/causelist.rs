//! Client for the external causelist endpoint.
//!
//! One GET with `advocateCode` and `listDate` (DD-MM-YYYY) query parameters.
//! The endpoint answers with either a bare JSON array of cases or a wrapper
//! object; shape handling lives in `docket_core::save`, this client only
//! enforces the status code and hands back the raw body.

use docket_core::save::CauselistSource;
use docket_core::{DocketError, DocketResult};
use serde_json::Value;

pub struct CauselistClient {
    endpoint: String,
    http: reqwest::Client,
}

impl CauselistClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        CauselistClient {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }
}

impl CauselistSource for CauselistClient {
    async fn fetch_causelist(&self, advocate_code: &str, list_date: &str) -> DocketResult<Value> {
        log::debug!(
            "GET {} advocateCode={} listDate={}",
            self.endpoint,
            advocate_code,
            list_date
        );

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("advocateCode", advocate_code), ("listDate", list_date)])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| DocketError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocketError::Endpoint {
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| DocketError::Payload(e.to_string()))
    }
}
