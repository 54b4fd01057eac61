//! Trigger orchestrator
//!
//! Sequences one invocation:
//!
//! ```text
//! NotStarted -> Triggered -> BuildStarted -> [Waiting ->] Completed
//! ```
//!
//! Any step may fall into `Failed`. Every failure funnels into a single
//! failed [`Outcome`]; nothing is rolled back, so a build that was already
//! started keeps running on the server.

use jolt_core::domain::build::{BuildRef, Outcome, QueuedItemRef};
use jolt_core::domain::trigger::TriggerRequest;
use tracing::{debug, error, info};

use crate::error::{Stage, TriggerError};
use crate::repository::JenkinsRepository;
use crate::scheduler::PollPolicy;
use crate::service::resolver::{resolve_build_completion, resolve_build_start};

/// Where an invocation currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    NotStarted,
    Triggered,
    BuildStarted,
    Waiting,
    Completed,
    Failed,
}

/// Polling budgets for both resolution steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policies {
    pub build_start: PollPolicy,
    pub build_completion: PollPolicy,
}

impl Default for Policies {
    fn default() -> Self {
        Self {
            build_start: PollPolicy::build_start(),
            build_completion: PollPolicy::build_completion(),
        }
    }
}

/// Final state and outcome of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub state: BuildState,
    pub outcome: Outcome,
}

/// Per-invocation bookkeeping
struct Run {
    state: BuildState,
    build: Option<BuildRef>,
}

impl Run {
    fn advance(&mut self, next: BuildState) {
        debug!(from = ?self.state, to = ?next, "State transition");
        self.state = next;
    }
}

/// Drives a trigger request to an [`Outcome`]
pub struct Orchestrator<R> {
    repository: R,
    policies: Policies,
}

impl<R: JenkinsRepository> Orchestrator<R> {
    /// Creates a new orchestrator
    ///
    /// # Arguments
    /// * `repository` - Build server adapter
    /// * `policies` - Polling budgets for build start and completion
    pub fn new(repository: R, policies: Policies) -> Self {
        Self {
            repository,
            policies,
        }
    }

    /// Triggers the build and returns the outcome
    pub async fn run(&self, request: &TriggerRequest) -> Outcome {
        self.execute(request).await.outcome
    }

    /// Triggers the build and returns the outcome with the final state
    pub async fn execute(&self, request: &TriggerRequest) -> Execution {
        let mut run = Run {
            state: BuildState::NotStarted,
            build: None,
        };

        match self.drive(request, &mut run).await {
            Ok(outcome) => Execution {
                state: run.state,
                outcome,
            },
            Err(e) => {
                error!(stage = %e.stage(), "{}", e);
                run.advance(BuildState::Failed);

                let message = if e.is_auth_failure() {
                    format!("{} (check JENKINS_USER and JENKINS_TOKEN)", e)
                } else {
                    e.to_string()
                };
                let outcome = match run.build {
                    Some(build) => Outcome::failed_build(message, build.url),
                    None => Outcome::failed(message),
                };

                Execution {
                    state: run.state,
                    outcome,
                }
            }
        }
    }

    async fn drive(
        &self,
        request: &TriggerRequest,
        run: &mut Run,
    ) -> Result<Outcome, TriggerError> {
        // NotStarted -> Triggered
        if let Some(query) = request.query_string() {
            info!("Using query params: {}", query);
        }

        let response = self
            .repository
            .trigger_build(request)
            .await
            .map_err(|source| TriggerError::Transport {
                stage: Stage::Trigger,
                source,
            })?;

        let accepted = if response.is_accepted() {
            response.accepted_location().map(str::to_string)
        } else {
            None
        };
        let Some(location) = accepted else {
            error!(status = response.status, location = ?response.location, "Trigger rejected");
            return Err(TriggerError::Rejected {
                status: response.status,
                location: response.location,
            });
        };
        run.advance(BuildState::Triggered);
        info!(location = %location, "Job triggered");

        // Triggered -> BuildStarted
        let queued = QueuedItemRef::from_location(&location);
        info!(queue_url = %queued.url, "Polling startup of job via {}", queued.url);

        let build = resolve_build_start(&self.repository, &queued, &self.policies.build_start)
            .await
            .map_err(|e| TriggerError::from_poll(Stage::BuildStart, e))?;
        run.build = Some(build.clone());
        run.advance(BuildState::BuildStarted);
        info!(build_url = %build.url, "Job successfully started, build URL is {}", build.url);

        if !request.wait_for_completion {
            run.advance(BuildState::Completed);
            return Ok(Outcome::succeeded(
                format!("Build started: {}", build.url),
                Some(build.url),
            ));
        }

        // BuildStarted -> Waiting -> Completed
        run.advance(BuildState::Waiting);
        let status =
            resolve_build_completion(&self.repository, &build, &self.policies.build_completion)
                .await
                .map_err(|e| TriggerError::from_poll(Stage::BuildCompletion, e))?;
        run.advance(BuildState::Completed);
        info!(
            build_url = %status.url,
            result = %status.result,
            "Job finished with result {} ({})", status.result, status.url
        );

        if status.is_success() {
            Ok(Outcome::succeeded(
                format!("Job finished with result {} ({})", status.result, status.url),
                Some(status.url),
            ))
        } else {
            error!(result = %status.result, "Unsuccessful job state: {}", status.url);
            Ok(Outcome::failed_build(
                format!("Unsuccessful job state: {}", status.url),
                status.url,
            ))
        }
    }
}
