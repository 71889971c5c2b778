//! Storage monitoring over the store's bucket API.
//!
//! Two reads: the bucket list, then a paged object listing per bucket.
//! Usage is summed client-side from object metadata. A bucket whose listing
//! fails degrades to an error note on its row instead of failing the page.

use docket_core::{DocketError, DocketResult};
use serde::Deserialize;
use serde_json::json;

use crate::client::StoreClient;

/// Objects fetched per listing page.
const LIST_PAGE_SIZE: usize = 1000;

#[derive(Debug, Deserialize)]
struct Bucket {
    id: String,
    name: String,
    #[serde(default)]
    public: bool,
}

#[derive(Debug, Deserialize)]
struct StorageObject {
    #[allow(dead_code)]
    name: String,
    #[serde(default)]
    metadata: Option<ObjectMetadata>,
}

#[derive(Debug, Deserialize)]
struct ObjectMetadata {
    #[serde(default)]
    size: u64,
}

/// One row of the storage page.
#[derive(Debug, Clone)]
pub struct BucketUsage {
    pub name: String,
    pub public: bool,
    pub objects: u64,
    pub bytes: u64,
    /// Set when this bucket's object listing failed; counts are then zero.
    pub error: Option<String>,
}

impl StoreClient {
    /// Per-bucket object counts and byte totals.
    pub async fn storage_usage(&self) -> DocketResult<Vec<BucketUsage>> {
        let buckets: Vec<Bucket> = self.storage_get("bucket").await?;

        let mut usage = Vec::with_capacity(buckets.len());
        for bucket in buckets {
            match self.bucket_usage(&bucket.id).await {
                Ok((objects, bytes)) => usage.push(BucketUsage {
                    name: bucket.name,
                    public: bucket.public,
                    objects,
                    bytes,
                    error: None,
                }),
                Err(err) => {
                    log::warn!("object listing failed for bucket {}: {}", bucket.id, err);
                    usage.push(BucketUsage {
                        name: bucket.name,
                        public: bucket.public,
                        objects: 0,
                        bytes: 0,
                        error: Some(err.to_string()),
                    });
                }
            }
        }

        Ok(usage)
    }

    async fn bucket_usage(&self, bucket_id: &str) -> DocketResult<(u64, u64)> {
        let mut objects = 0u64;
        let mut bytes = 0u64;
        let mut offset = 0usize;

        loop {
            let page: Vec<StorageObject> = self.list_objects(bucket_id, offset).await?;
            let fetched = page.len();

            for object in page {
                // Folder placeholders have no metadata; only real objects count.
                if let Some(metadata) = object.metadata {
                    objects += 1;
                    bytes += metadata.size;
                }
            }

            if fetched < LIST_PAGE_SIZE {
                return Ok((objects, bytes));
            }
            offset += LIST_PAGE_SIZE;
        }
    }

    async fn storage_get<T: serde::de::DeserializeOwned>(&self, path: &str) -> DocketResult<T> {
        let url = format!("{}/storage/v1/{}", self.base_url(), path);

        let response = self
            .http()
            .get(&url)
            .header("apikey", self.api_key())
            .bearer_auth(self.api_key())
            .send()
            .await
            .map_err(|e| DocketError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DocketError::StoreStatus {
                status: status.as_u16(),
                detail: detail.chars().take(200).collect(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| DocketError::Payload(e.to_string()))
    }

    async fn list_objects(
        &self,
        bucket_id: &str,
        offset: usize,
    ) -> DocketResult<Vec<StorageObject>> {
        let url = format!("{}/storage/v1/object/list/{}", self.base_url(), bucket_id);

        let response = self
            .http()
            .post(&url)
            .header("apikey", self.api_key())
            .bearer_auth(self.api_key())
            .json(&json!({
                "prefix": "",
                "limit": LIST_PAGE_SIZE,
                "offset": offset,
                "sortBy": { "column": "name", "order": "asc" },
            }))
            .send()
            .await
            .map_err(|e| DocketError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DocketError::StoreStatus {
                status: status.as_u16(),
                detail: detail.chars().take(200).collect(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| DocketError::Payload(e.to_string()))
    }
}

/// Human-readable byte size for the storage table.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
