//! Runner configuration
//!
//! Holds the trigger inputs and polling budgets. The binary fills it from
//! command-line flags or the GitHub Actions `INPUT_*` environment, validates
//! it, and turns it into an immutable [`TriggerRequest`].

use std::time::Duration;

use jolt_core::domain::trigger::{Credentials, TriggerRequest, parse_parameters};

use crate::scheduler::PollPolicy;
use crate::service::Policies;

/// Runner configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Build server base URL (e.g., "https://jenkins.example.com")
    pub jenkins_url: String,

    /// Name of the job to trigger
    pub job: String,

    /// Multi-line `key=value` parameter block
    pub parameters: String,

    /// Wait for the build to finish and report its result
    pub wait_for_completion: bool,

    /// Basic-auth credentials
    pub credentials: Credentials,

    /// Pause between two status probes
    pub poll_interval: Duration,

    /// Probes allowed while the trigger sits in the queue
    pub start_attempts: u32,

    /// Probes allowed while the build runs
    pub completion_attempts: u32,

    /// Per-request HTTP timeout
    pub http_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with default polling budgets
    pub fn new(jenkins_url: String, job: String, credentials: Credentials) -> Self {
        Self {
            jenkins_url,
            job,
            parameters: String::new(),
            wait_for_completion: false,
            credentials,
            poll_interval: Duration::from_secs(5),
            start_attempts: 180,       // 15 minutes
            completion_attempts: 3600, // 1 hour
            http_timeout: Duration::from_secs(30),
        }
    }

    /// Validates the configuration
    ///
    /// Whitespace around the URL is ignored, as in [`Config::trigger_request`].
    pub fn validate(&self) -> anyhow::Result<()> {
        let jenkins_url = self.jenkins_url.trim();
        if jenkins_url.is_empty() {
            anyhow::bail!("jenkins_url cannot be empty");
        }

        if !jenkins_url.starts_with("http://") && !jenkins_url.starts_with("https://") {
            anyhow::bail!("jenkins_url must start with http:// or https://");
        }

        if self.job.trim().is_empty() {
            anyhow::bail!("job cannot be empty");
        }

        if self.credentials.username.is_empty() {
            anyhow::bail!("JENKINS_USER cannot be empty");
        }

        if self.credentials.token.is_empty() {
            anyhow::bail!("JENKINS_TOKEN cannot be empty");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.start_attempts == 0 {
            anyhow::bail!("start_attempts must be greater than 0");
        }

        if self.completion_attempts == 0 {
            anyhow::bail!("completion_attempts must be greater than 0");
        }

        if self.http_timeout.is_zero() {
            anyhow::bail!("http_timeout must be greater than 0");
        }

        Ok(())
    }

    /// Polling budgets for both resolution steps
    pub fn policies(&self) -> Policies {
        Policies {
            build_start: PollPolicy::new(self.poll_interval, self.start_attempts),
            build_completion: PollPolicy::new(self.poll_interval, self.completion_attempts),
        }
    }

    /// Builds the immutable trigger request
    ///
    /// Fails if a line of the parameter block has an empty key (`=value`).
    pub fn trigger_request(&self) -> anyhow::Result<TriggerRequest> {
        let params = parse_parameters(&self.parameters)?;

        Ok(TriggerRequest::new(
            self.jenkins_url.trim(),
            self.job.trim(),
            self.credentials.clone(),
        )
        .with_parameters(params)
        .with_wait_for_completion(self.wait_for_completion))
    }
}

/// Reads a GitHub Actions style boolean input
///
/// Only `true` (any case, surrounding whitespace ignored) enables the flag;
/// every other value, including an empty one, disables it.
pub fn parse_flag(value: &str) -> Result<bool, std::convert::Infallible> {
    Ok(value.trim().eq_ignore_ascii_case("true"))
}
