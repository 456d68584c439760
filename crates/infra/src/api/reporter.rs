//! HTTP activity reporter
//!
//! One `POST {serverUrl}/api/v1/ide/activity` per snapshot, authenticated
//! with `X-API-Key`. No retry, no queue.

use async_trait::async_trait;
use devtracker_core::ActivityReporter;
use devtracker_domain::constants::API_KEY_HEADER;
use devtracker_domain::{ActivitySnapshot, Config, Credentials, DevTrackerError};
use reqwest::Method;
use tracing::{debug, instrument};
use url::Url;

use super::errors::ReportError;
use crate::http::HttpClient;

/// Sends activity snapshots to the collector
#[derive(Clone)]
pub struct HttpActivityReporter {
    client: HttpClient,
}

impl HttpActivityReporter {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Reporter with the configured request timeout and a versioned user agent.
    pub fn from_config(config: &Config) -> Result<Self, DevTrackerError> {
        let client = HttpClient::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("devtracker/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(client))
    }

    /// Post one snapshot and classify the result.
    #[instrument(skip(self, snapshot, credentials), fields(server_url = %credentials.server_url))]
    pub async fn post_snapshot(
        &self,
        snapshot: &ActivitySnapshot,
        credentials: &Credentials,
    ) -> Result<(), ReportError> {
        let endpoint = credentials.activity_endpoint();
        let url = Url::parse(&endpoint).map_err(|e| {
            ReportError::Config(format!("invalid server URL '{}': {e}", credentials.server_url))
        })?;

        let request = self
            .client
            .request(Method::POST, url)
            .header(API_KEY_HEADER, &credentials.api_key)
            .json(snapshot);

        let response = self.client.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            debug!(%status, "collector accepted activity");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(ReportError::from_status(status, &body))
    }
}

#[async_trait]
impl ActivityReporter for HttpActivityReporter {
    async fn send(
        &self,
        snapshot: &ActivitySnapshot,
        credentials: &Credentials,
    ) -> devtracker_domain::Result<()> {
        self.post_snapshot(snapshot, credentials).await.map_err(|err| {
            debug!(category = ?err.category(), "activity report failed");
            DevTrackerError::from(err)
        })
    }
}
