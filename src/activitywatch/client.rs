//! ActivityWatch REST client.
//!
//! Talks to aw-server's `/api/0` endpoints. Only the calls the importer
//! needs are implemented.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::model::Event;

use super::bucket::Bucket;
use super::store::EventStore;

/// HTTP client for a single aw-server.
pub struct AwClient {
    client: reqwest::Client,
    base_url: String,
    client_name: String,
}

/// Request body for bucket creation.
#[derive(Debug, Serialize)]
struct CreateBucketRequest<'a> {
    client: &'a str,
    #[serde(rename = "type")]
    event_type: &'a str,
    hostname: &'a str,
}

/// Response of `GET /api/0/info`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerInfo {
    pub hostname: String,
    pub version: String,
    #[serde(default)]
    pub testing: bool,
}

impl AwClient {
    /// Create a client from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.server_url.clone(),
            client_name: config.client_name.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bucket_url(&self, bucket_id: &str) -> String {
        format!("{}/api/0/buckets/{bucket_id}", self.base_url)
    }

    /// Fetch server info.
    ///
    /// # Errors
    ///
    /// Returns `ServerUnavailable` if the server cannot be reached or answers
    /// with an error status.
    pub async fn info(&self) -> Result<ServerInfo> {
        let url = format!("{}/api/0/info", self.base_url);
        let unavailable = || Error::ServerUnavailable {
            url: self.base_url.clone(),
        };

        let response = self.client.get(&url).send().await.map_err(|e| {
            debug!(error = %e, "aw-server info request failed");
            unavailable()
        })?;

        if !response.status().is_success() {
            return Err(unavailable());
        }

        response
            .json()
            .await
            .map_err(|e| Error::Publish(format!("Failed to parse server info: {e}")))
    }
}

impl EventStore for AwClient {
    async fn create_bucket(&self, bucket: &Bucket) -> Result<()> {
        let request = CreateBucketRequest {
            client: &self.client_name,
            event_type: &bucket.event_type,
            hostname: &bucket.hostname,
        };

        let response = self
            .client
            .post(self.bucket_url(&bucket.id))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Publish(format!("Bucket request failed: {e}")))?;

        let status = response.status();
        debug!(bucket = %bucket.id, %status, "Create bucket");

        if is_bucket_ready(status) {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Publish(format!(
            "Creating bucket {} failed ({status}): {body}",
            bucket.id
        )))
    }

    async fn insert_events(&self, bucket_id: &str, events: &[Event]) -> Result<()> {
        let url = format!("{}/events", self.bucket_url(bucket_id));

        let response = self
            .client
            .post(&url)
            .json(events)
            .send()
            .await
            .map_err(|e| Error::Publish(format!("Event request failed: {e}")))?;

        let status = response.status();
        debug!(bucket = %bucket_id, count = events.len(), %status, "Insert events");

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Publish(format!(
            "Inserting {} events into {bucket_id} failed ({status}): {body}",
            events.len()
        )))
    }
}

/// aw-server answers `304 Not Modified` when the bucket already exists.
fn is_bucket_ready(status: StatusCode) -> bool {
    status.is_success() || status == StatusCode::NOT_MODIFIED
}
