use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tsu_core::{CoreError, CoreResult, VersionSource};
use tsu_query::QueryClient;

/// Reads the running server's version over ServerQuery.
pub struct ServerQueryVersion {
    address: String,
    timeout: Duration,
}

impl ServerQueryVersion {
    pub fn new(address: &str, timeout: Duration) -> Self {
        Self {
            address: address.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl VersionSource for ServerQueryVersion {
    async fn current_version(&self) -> CoreResult<String> {
        let mut client = QueryClient::connect(&self.address, self.timeout)
            .await
            .map_err(|e| CoreError::query(e.to_string()))?;

        let version = client
            .version()
            .await
            .map_err(|e| CoreError::query(e.to_string()))?;
        client.quit().await;

        debug!(
            "ServerQuery reports version {} (build {}, platform {})",
            version.version,
            version.build.as_deref().unwrap_or("?"),
            version.platform.as_deref().unwrap_or("?")
        );

        Ok(version.version)
    }
}
