//! Database snapshot taken before the container is replaced.

use crate::{CoreError, CoreResult};

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{debug, info};

/// Database file inside the server data directory.
pub const DATABASE_FILENAME: &str = "ts3server.sqlitedb";

pub const BACKUP_PREFIX: &str = "ts3db";
pub const BACKUP_EXTENSION: &str = "sqlitedb";
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

/// Copy the database into `backup_dir`, stamped with the current local time.
pub fn backup_database(data_dir: &Path, backup_dir: &Path) -> CoreResult<PathBuf> {
    backup_database_at(data_dir, backup_dir, Local::now())
}

/// Copy `<data_dir>/ts3server.sqlitedb` to
/// `<backup_dir>/ts3db_<YYYY_MM_DD_HH_MM_SS>.sqlitedb`.
///
/// The backup directory is created (with parents) when missing. An existing
/// backup with the same name is never overwritten.
pub fn backup_database_at(
    data_dir: &Path,
    backup_dir: &Path,
    now: DateTime<Local>,
) -> CoreResult<PathBuf> {
    let source_path = data_dir.join(DATABASE_FILENAME);

    // Open the source first so a missing database leaves no directory behind.
    let mut source =
        File::open(&source_path).map_err(|e| CoreError::backup(source_path.clone(), e))?;

    if !backup_dir.exists() {
        debug!("Creating backup directory {}", backup_dir.display());
        std::fs::create_dir_all(backup_dir)
            .map_err(|e| CoreError::backup(backup_dir.to_path_buf(), e))?;
    }

    let backup_path = backup_dir.join(backup_file_name(now));

    let mut destination = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&backup_path)
        .map_err(|e| CoreError::backup(backup_path.clone(), e))?;

    let copied = std::io::copy(&mut source, &mut destination)
        .and_then(|bytes| destination.sync_all().map(|()| bytes));

    match copied {
        Ok(bytes) => {
            info!(
                "Backed up {} ({} bytes) to {}",
                source_path.display(),
                bytes,
                backup_path.display()
            );
            Ok(backup_path)
        }
        Err(e) => {
            drop(destination);
            // A truncated copy is worse than none.
            std::fs::remove_file(&backup_path).ok();
            Err(CoreError::backup(backup_path, e))
        }
    }
}

/// `ts3db_<YYYY_MM_DD_HH_MM_SS>.sqlitedb`
pub fn backup_file_name(now: DateTime<Local>) -> String {
    format!(
        "{}_{}.{}",
        BACKUP_PREFIX,
        now.format(BACKUP_TIMESTAMP_FORMAT),
        BACKUP_EXTENSION
    )
}
