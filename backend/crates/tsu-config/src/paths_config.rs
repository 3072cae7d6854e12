use crate::{ConfigError, ConfigErrorResult};

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Host paths used by the backup and run steps.
///
/// Empty paths are treated the same as absent ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Voice server data directory on the host, mounted into the container
    pub data_dir: Option<PathBuf>,
    /// Where database backups are written; unset skips the backup
    pub backup_dir: Option<PathBuf>,
}

impl PathsConfig {
    pub fn data_dir(&self) -> Option<&Path> {
        non_empty(self.data_dir.as_deref())
    }

    pub fn backup_dir(&self) -> Option<&Path> {
        non_empty(self.backup_dir.as_deref())
    }

    /// Both directories must be absolute when present. A backup reads from
    /// the data directory, and outside dry-run mode the run step mounts it,
    /// so it is required in those cases.
    pub fn validate(&self, dry_run: bool) -> ConfigErrorResult<()> {
        if let Some(dir) = self.data_dir()
            && !dir.is_absolute()
        {
            return Err(ConfigError::path(format!(
                "paths.data_dir must be an absolute path, got '{}'",
                dir.display()
            )));
        }

        if let Some(dir) = self.backup_dir()
            && !dir.is_absolute()
        {
            return Err(ConfigError::path(format!(
                "paths.backup_dir must be an absolute path, got '{}'",
                dir.display()
            )));
        }

        if self.data_dir().is_none() {
            if self.backup_dir().is_some() {
                return Err(ConfigError::path(
                    "paths.data_dir is required when paths.backup_dir is set",
                ));
            }
            if !dry_run {
                return Err(ConfigError::path(
                    "paths.data_dir is required to recreate the container",
                ));
            }
        }

        Ok(())
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}
