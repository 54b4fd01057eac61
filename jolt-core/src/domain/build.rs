//! Queue, build and outcome types

use serde::{Deserialize, Serialize};

/// Result string the server reports for a successful build
pub const SUCCESS_RESULT: &str = "SUCCESS";

/// Status document path appended to queue and build locations
pub const STATUS_DOCUMENT: &str = "api/json";

/// Location of a queued trigger, before an executor picks it up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedItemRef {
    pub url: String,
}

impl QueuedItemRef {
    /// Builds the queue status URL from a trigger's `Location` header
    ///
    /// The server hands out locations with a trailing slash
    /// (`http://h/queue/item/7/`), so the status document is appended as-is.
    pub fn from_location(location: &str) -> Self {
        Self {
            url: format!("{}{}", location, STATUS_DOCUMENT),
        }
    }
}

/// Location of an executing or completed build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRef {
    pub url: String,
}

impl BuildRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// URL that reports only the `result` field of this build
    pub fn result_url(&self) -> String {
        format!("{}{}?tree=result", self.url, STATUS_DOCUMENT)
    }
}

/// Terminal state of a completed build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalBuildStatus {
    /// e.g. "SUCCESS", "FAILURE", "ABORTED", "UNSTABLE"
    pub result: String,
    pub url: String,
}

impl TerminalBuildStatus {
    pub fn is_success(&self) -> bool {
        self.result == SUCCESS_RESULT
    }
}

/// Final result of one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub succeeded: bool,
    pub message: String,
    pub build_url: Option<String>,
}

impl Outcome {
    pub fn succeeded(message: impl Into<String>, build_url: Option<String>) -> Self {
        Self {
            succeeded: true,
            message: message.into(),
            build_url,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
            build_url: None,
        }
    }

    pub fn failed_build(message: impl Into<String>, build_url: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
            build_url: Some(build_url.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_url_from_location() {
        let item = QueuedItemRef::from_location("http://h/queue/item/7/");
        assert_eq!(item.url, "http://h/queue/item/7/api/json");
    }

    #[test]
    fn test_build_result_url() {
        let build = BuildRef::new("http://h/job/x/5/");
        assert_eq!(build.result_url(), "http://h/job/x/5/api/json?tree=result");
    }

    #[test]
    fn test_only_literal_success_is_success() {
        let status = |result: &str| TerminalBuildStatus {
            result: result.to_string(),
            url: "http://h/job/x/5/".to_string(),
        };

        assert!(status("SUCCESS").is_success());
        assert!(!status("FAILURE").is_success());
        assert!(!status("ABORTED").is_success());
        assert!(!status("success").is_success());
    }
}
