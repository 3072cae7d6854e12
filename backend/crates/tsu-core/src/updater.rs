//! One pass of the update workflow.
//!
//! ```text
//! Idle -> VersionChecked -> UpToDate
//!                        -> Updating -> [BackedUp] -> Restarted -> [Notified] -> Done
//! ```
//!
//! Every failure before `Restarted` is fatal and stops the pass. Only the
//! notification is best-effort.

use crate::{
    ContainerController, ContainerSpec, CoreError, CoreResult, FeedSource, Notifier,
    UPDATE_MESSAGE, Version, VersionSource, backup_database,
};

use std::fmt;
use std::path::PathBuf;

use log::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    Idle,
    VersionChecked,
    UpToDate,
    Updating,
    BackedUp,
    Restarted,
    Notified,
    Done,
}

impl UpdateState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Idle => "idle",
            Self::VersionChecked => "version_checked",
            Self::UpToDate => "up_to_date",
            Self::Updating => "updating",
            Self::BackedUp => "backed_up",
            Self::Restarted => "restarted",
            Self::Notified => "notified",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for UpdateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the pass is allowed to do once an update is due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateMode {
    /// Report only
    DryRun,
    /// Back up (when `backup_dir` is set) and recreate the container
    Apply {
        container: ContainerSpec,
        backup_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    UpToDate,
    /// Dry run found an outdated instance
    WouldUpdate,
    Updated,
}

#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub current: Version,
    pub latest: Version,
    pub outcome: UpdateOutcome,
    pub backup: Option<PathBuf>,
    /// `None` when no notifier is configured or nothing was updated
    pub notified: Option<bool>,
    /// States visited, in order
    pub states: Vec<UpdateState>,
}

/// Sequences version check, backup, restart and notification.
pub struct Updater {
    mode: UpdateMode,
    version_source: Box<dyn VersionSource>,
    feed: Box<dyn FeedSource>,
    containers: Box<dyn ContainerController>,
    notifier: Option<Box<dyn Notifier>>,
}

impl Updater {
    pub fn new(
        mode: UpdateMode,
        version_source: Box<dyn VersionSource>,
        feed: Box<dyn FeedSource>,
        containers: Box<dyn ContainerController>,
    ) -> Self {
        Self {
            mode,
            version_source,
            feed,
            containers,
            notifier: None,
        }
    }

    /// Post a message after a successful restart.
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub async fn run(&self) -> CoreResult<UpdateReport> {
        let mut states = vec![UpdateState::Idle];

        let current_raw = self.version_source.current_version().await?;
        let feed = self.feed.fetch_feed().await?;

        let current: Version = current_raw.parse()?;
        let latest = feed.latest_version()?;
        transition(&mut states, UpdateState::VersionChecked);
        info!("Current version {}, latest version {}", current, latest);

        let mut report = UpdateReport {
            current,
            latest,
            outcome: UpdateOutcome::UpToDate,
            backup: None,
            notified: None,
            states: Vec::new(),
        };

        if !report.current.is_older_than(&report.latest) {
            transition(&mut states, UpdateState::UpToDate);
            info!("Server is up to date");
            report.states = states;
            return Ok(report);
        }

        let (container, backup_dir) = match &self.mode {
            UpdateMode::DryRun => {
                info!(
                    "Dry run: would update {} -> {}",
                    report.current, report.latest
                );
                report.outcome = UpdateOutcome::WouldUpdate;
                transition(&mut states, UpdateState::Done);
                report.states = states;
                return Ok(report);
            }
            UpdateMode::Apply {
                container,
                backup_dir,
            } => (container, backup_dir.as_deref()),
        };

        transition(&mut states, UpdateState::Updating);
        info!("Update to version {}", report.latest);

        if let Some(backup_dir) = backup_dir {
            match backup_database(&container.data_dir, backup_dir) {
                Ok(path) => {
                    report.backup = Some(path);
                    transition(&mut states, UpdateState::BackedUp);
                }
                Err(e) => {
                    error!("Backup failed, leaving container '{}' untouched", container.name);
                    return Err(e);
                }
            }
        }

        self.restart(container).await?;
        transition(&mut states, UpdateState::Restarted);
        report.outcome = UpdateOutcome::Updated;

        if let Some(notifier) = &self.notifier {
            let message = format!(
                "{} ({} -> {})",
                UPDATE_MESSAGE, report.current, report.latest
            );
            match notifier.notify(&message).await {
                Ok(()) => {
                    report.notified = Some(true);
                    transition(&mut states, UpdateState::Notified);
                }
                Err(e) => {
                    warn!("Notification failed (ignored): {}", e);
                    report.notified = Some(false);
                }
            }
        }

        transition(&mut states, UpdateState::Done);
        report.states = states;
        Ok(report)
    }

    /// Remove then run. A failed remove skips the run; a failed run after a
    /// successful remove is reported as `ServiceDown`.
    async fn restart(&self, container: &ContainerSpec) -> CoreResult<()> {
        match self.containers.remove(container).await {
            Ok(out) => log_output("remove", &out.output),
            Err(e) => {
                log_failure(&e);
                return Err(e);
            }
        }

        match self.containers.run(container).await {
            Ok(out) => {
                log_output("run", &out.output);
                Ok(())
            }
            Err(e) => {
                let e = e.into_service_down(&container.name);
                log_failure(&e);
                error!(
                    "Container '{}' is stopped and was not recreated",
                    container.name
                );
                Err(e)
            }
        }
    }
}

fn transition(states: &mut Vec<UpdateState>, next: UpdateState) {
    if let Some(previous) = states.last() {
        info!("State {} -> {}", previous, next);
    }
    states.push(next);
}

fn log_output(step: &str, output: &str) {
    let output = output.trim();
    if !output.is_empty() {
        info!("{}: {}", step, output);
    }
}

fn log_failure(e: &CoreError) {
    if let Some(output) = e.command_output() {
        let output = output.trim();
        if !output.is_empty() {
            error!("{}", output);
        }
    }
}
