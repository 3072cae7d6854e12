use crate::UpdaterResult;

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client as ReqwestClient;
use tsu_core::{CoreError, CoreResult, FeedSource, VersionFeed};

/// Version feed fetched over HTTP(S).
pub struct HttpFeed {
    pub url: String,
    client: ReqwestClient,
}

impl HttpFeed {
    /// Create a feed client
    ///
    /// # Arguments
    /// * `url` - Feed location (e.g., "https://www.server-residenz.com/tools/ts3versions.json")
    /// * `timeout` - Whole-request timeout
    pub fn new(url: &str, timeout: Duration) -> UpdaterResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl FeedSource for HttpFeed {
    async fn fetch_feed(&self) -> CoreResult<VersionFeed> {
        debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CoreError::feed(format!("GET {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::feed(format!(
                "GET {} returned {}",
                self.url, status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CoreError::feed(format!("reading {} failed: {}", self.url, e)))?;

        serde_json::from_str(&body)
            .map_err(|e| CoreError::feed(format!("malformed feed from {}: {}", self.url, e)))
    }
}
