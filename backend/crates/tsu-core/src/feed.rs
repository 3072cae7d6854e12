use crate::{CoreResult, Version};

use serde::{Deserialize, Serialize};

/// Remote document listing published server versions.
///
/// ```json
/// {"checked": "2020-06-01 12:00:00", "latest": "3.12.1", "versions": ["3.12.0", "3.12.1"]}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionFeed {
    /// When the feed publisher last checked for releases
    #[serde(default)]
    pub checked: String,
    pub latest: String,
    /// Historical versions, oldest first
    #[serde(default)]
    pub versions: Vec<String>,
}

impl VersionFeed {
    #[track_caller]
    pub fn latest_version(&self) -> CoreResult<Version> {
        self.latest.parse()
    }
}
