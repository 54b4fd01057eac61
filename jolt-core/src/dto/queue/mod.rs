//! Queue item DTOs

use serde::{Deserialize, Serialize};

/// Status document of a queued item (`{location}api/json`)
///
/// `executable` is `null` or absent until an executor picks the item up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItemStatus {
    #[serde(default)]
    pub executable: Option<Executable>,
    /// Why the item is still waiting (e.g. "Waiting for next available executor")
    #[serde(default)]
    pub why: Option<String>,
}

/// The build an executor started for a queued item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Executable {
    #[serde(default)]
    pub url: String,
}

impl QueueItemStatus {
    /// URL of the started build, if the server has attached a non-empty one
    pub fn executable_url(&self) -> Option<&str> {
        self.executable
            .as_ref()
            .map(|e| e.url.as_str())
            .filter(|url| !url.trim().is_empty())
    }
}
