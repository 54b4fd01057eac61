//! Build status DTOs

use serde::{Deserialize, Serialize};

/// Build status document (`{build}api/json?tree=result`)
///
/// `result` is `null` while the build runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStatus {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl BuildStatus {
    /// Terminal result, if the build has finished
    pub fn terminal_result(&self) -> Option<&str> {
        self.result.as_deref().filter(|r| !r.is_empty())
    }
}
