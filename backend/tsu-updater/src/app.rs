//! Wires configuration to the concrete collaborators and runs one pass.

use crate::{DockerCli, HttpFeed, LockFile, ServerQueryVersion, SlackNotifier, UpdaterResult};

use log::{debug, info};
use tsu_config::Config;
use tsu_core::{ContainerSpec, UpdateMode, UpdateOutcome, UpdateReport, Updater};

/// Run one update pass with a validated configuration.
///
/// Takes the run lock before any collaborator is contacted and holds it
/// until the pass finishes.
pub async fn run(config: &Config) -> UpdaterResult<UpdateReport> {
    let lock = LockFile::acquire(&config.lock.path())?;
    debug!("Acquired lock {}", lock.path().display());

    let updater = build_updater(config)?;
    let report = updater.run().await?;

    log_report(&report);
    Ok(report)
}

/// Assemble the workflow from configuration.
pub fn build_updater(config: &Config) -> UpdaterResult<Updater> {
    let mode = match (config.dry_run, config.paths.data_dir()) {
        (false, Some(data_dir)) => UpdateMode::Apply {
            container: ContainerSpec {
                name: config.container.name.clone(),
                image: config.container.image.clone(),
                data_dir: data_dir.to_path_buf(),
            },
            backup_dir: config.paths.backup_dir().map(|p| p.to_path_buf()),
        },
        // validate() rejects a missing data_dir outside dry-run mode
        _ => UpdateMode::DryRun,
    };

    let updater = Updater::new(
        mode,
        Box::new(ServerQueryVersion::new(
            &config.query.address,
            config.query.timeout(),
        )),
        Box::new(HttpFeed::new(&config.feed.url, config.feed.timeout())?),
        Box::new(DockerCli::new(
            &config.container.runtime,
            config.container.timeout(),
        )),
    );

    Ok(match config.notification.url() {
        Some(url) => updater.with_notifier(Box::new(SlackNotifier::new(
            url,
            config.notification.timeout(),
        )?)),
        None => updater,
    })
}

fn log_report(report: &UpdateReport) {
    match report.outcome {
        UpdateOutcome::UpToDate => info!("Nothing to do, running {}", report.current),
        UpdateOutcome::WouldUpdate => info!(
            "Update available: {} -> {} (dry run, nothing changed)",
            report.current, report.latest
        ),
        UpdateOutcome::Updated => {
            info!("Updated {} -> {}", report.current, report.latest);
            if let Some(ref backup) = report.backup {
                info!("  backup: {}", backup.display());
            }
            match report.notified {
                Some(true) => info!("  notification: sent"),
                Some(false) => info!("  notification: failed"),
                None => info!("  notification: disabled"),
            }
        }
    }
}
