//! Error types for a trigger run

use jolt_client::ClientError;
use thiserror::Error;

use crate::scheduler::PollError;

/// Polling step a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Trigger,
    BuildStart,
    BuildCompletion,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Trigger => write!(f, "job trigger"),
            Stage::BuildStart => write!(f, "build start"),
            Stage::BuildCompletion => write!(f, "build completion"),
        }
    }
}

/// Reasons a trigger run ends in `Failed`
///
/// A build that finishes with a non-success result is not an error; it is
/// reported as a failed outcome.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// The server did not answer the trigger with 201 and a `Location`
    #[error(
        "Prerequisite for triggered job failed (status: {status}, location: {})",
        .location.as_deref().unwrap_or("<none>")
    )]
    Rejected {
        status: u16,
        location: Option<String>,
    },

    /// The attempt budget ran out
    #[error("Exceeded max attempts ({attempts}) waiting for {stage}")]
    TimedOut { stage: Stage, attempts: u32 },

    /// An HTTP call failed outright
    #[error("{stage} failed: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: ClientError,
    },
}

impl TriggerError {
    /// Tags a polling failure with the step it happened in
    pub fn from_poll(stage: Stage, err: PollError<ClientError>) -> Self {
        match err {
            PollError::TimedOut { attempts } => Self::TimedOut { stage, attempts },
            PollError::Probe(source) => Self::Transport { stage, source },
        }
    }

    /// The server refused the credentials (401/403)
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::Rejected { status, .. } => matches!(status, 401 | 403),
            Self::Transport { source, .. } => source.is_auth_error(),
            Self::TimedOut { .. } => false,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Self::Rejected { .. } => Stage::Trigger,
            Self::TimedOut { stage, .. } | Self::Transport { stage, .. } => *stage,
        }
    }
}
