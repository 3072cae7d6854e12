//! ts3-updater - keep a containerized TeamSpeak 3 server current
//!
//! Meant to be started periodically (cron, systemd timer). Each invocation
//! makes one pass: query the running version, fetch the latest published
//! one, and when outdated back up the database and recreate the container.
//!
//! # Examples
//!
//! ```bash
//! ts3-updater -d /srv/ts3/data -b /srv/ts3/backup -n https://hooks.slack.com/services/...
//!
//! # Only report whether an update is available
//! ts3-updater --dry-run
//! ```

use std::process::ExitCode;

use clap::Parser;
use log::error;
use tsu_updater::{Cli, logger};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configuration problems are reported before anything else happens.
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = logger::initialize(&config.logging) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    log::info!("Starting ts3-updater v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    match tsu_updater::run(&config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            error!("{}", e.recovery_hint());
            ExitCode::FAILURE
        }
    }
}
