//! Seams to the outside world.

use crate::{CommandOutput, ContainerSpec, CoreResult, VersionFeed};

use async_trait::async_trait;

/// Reports the version of the running instance.
#[async_trait]
pub trait VersionSource: Send + Sync {
    async fn current_version(&self) -> CoreResult<String>;
}

/// Fetches the published version feed.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_feed(&self) -> CoreResult<VersionFeed>;
}

/// Removes and recreates the server container.
///
/// Implementations return `CoreError::Container` with the captured output
/// when the runtime reports a failure.
#[async_trait]
pub trait ContainerController: Send + Sync {
    async fn remove(&self, spec: &ContainerSpec) -> CoreResult<CommandOutput>;

    async fn run(&self, spec: &ContainerSpec) -> CoreResult<CommandOutput>;
}

/// Posts a short text message to a chat channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> CoreResult<()>;
}
