use crate::DEFAULT_LOCK_FILENAME;

use std::path::PathBuf;

use serde::Deserialize;

/// Location of the run lock that keeps scheduled invocations from overlapping.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    pub path: Option<PathBuf>,
}

impl LockConfig {
    /// Configured lock path, or `ts3-updater.lock` in the system temp directory.
    pub fn path(&self) -> PathBuf {
        self.path
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOCK_FILENAME))
    }
}
