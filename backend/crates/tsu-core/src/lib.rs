//! Update decision and restart workflow for a containerized TeamSpeak 3 server.
//!
//! The collaborators (ServerQuery client, version feed, container runtime,
//! chat webhook) live behind the traits in [`ports`] so the workflow in
//! [`updater`] can run against fakes.

pub mod backup;
pub mod container;
pub mod error;
pub mod feed;
pub mod ports;
pub mod updater;
pub mod version;

#[cfg(test)]
mod tests;

pub use backup::{BACKUP_PREFIX, DATABASE_FILENAME, backup_database, backup_database_at};
pub use container::{CommandOutput, ContainerSpec, ContainerStep};
pub use error::{CoreError, Result as CoreResult};
pub use feed::VersionFeed;
pub use ports::{ContainerController, FeedSource, Notifier, VersionSource};
pub use updater::{UpdateMode, UpdateOutcome, UpdateReport, UpdateState, Updater};
pub use version::Version;

/// Message posted after a successful restart.
pub const UPDATE_MESSAGE: &str = "TeamSpeak3 server was updated automatically.";
