//! tsu-updater library
//!
//! Concrete collaborators for the update workflow plus the process-level
//! plumbing (CLI, logging, run lock). Exposed for the integration tests.

pub mod app;
pub mod cli;
pub mod docker;
pub mod error;
pub mod feed;
pub mod lock;
pub mod logger;
pub mod query;
pub mod slack;

#[cfg(test)]
mod tests;

pub use app::run;
pub use cli::Cli;
pub use docker::DockerCli;
pub use error::{Result as UpdaterResult, UpdaterError};
pub use feed::HttpFeed;
pub use lock::LockFile;
pub use query::ServerQueryVersion;
pub use slack::SlackNotifier;
