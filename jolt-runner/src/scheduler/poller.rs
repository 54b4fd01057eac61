//! Generic poller
//!
//! Repeatedly invokes an async probe until a predicate holds or the attempt
//! budget runs out. The budget is counted in attempts, not wall-clock time:
//! `interval * max_attempts` approximates the total wait, and slow probes
//! stretch it.

use std::future::Future;

use thiserror::Error;
use tokio::time::{self, Duration};
use tracing::debug;

/// Result of a polling run
pub type PollResult<T, E> = std::result::Result<T, PollError<E>>;

/// Why a polling run ended without satisfying its predicate
#[derive(Debug, Error)]
pub enum PollError<E> {
    /// The predicate never held within the attempt budget
    #[error("Exceeded max attempts ({attempts})")]
    TimedOut { attempts: u32 },

    /// The probe itself failed; it is not retried
    #[error("{0}")]
    Probe(E),
}

impl<E> PollError<E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }
}

/// Interval and attempt budget of a polling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Pause between two probes; there is no pause before the first one
    pub interval: Duration,
    /// Number of probes before giving up (0 behaves as 1)
    pub max_attempts: u32,
}

impl PollPolicy {
    pub const fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Waiting for a queued item to get an executor: every 5s for 15 minutes
    pub const fn build_start() -> Self {
        Self::new(Duration::from_secs(5), 180)
    }

    /// Waiting for a running build to finish: every 5s for an hour
    pub const fn build_completion() -> Self {
        Self::new(Duration::from_secs(5), 3600)
    }
}

/// Polls `probe` until `is_done` accepts its result
///
/// - The first probe runs immediately.
/// - A probe error is returned at once as [`PollError::Probe`].
/// - After `max_attempts` unsatisfied probes, [`PollError::TimedOut`] is returned.
/// - Otherwise the task sleeps for `interval` and probes again.
pub async fn poll<T, E, F, Fut, D>(
    mut probe: F,
    is_done: D,
    policy: &PollPolicy,
) -> PollResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    D: Fn(&T) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempts = 0;

    loop {
        let result = probe().await.map_err(PollError::Probe)?;
        attempts += 1;

        if is_done(&result) {
            debug!(attempts, "Poll condition met");
            return Ok(result);
        }

        if attempts >= max_attempts {
            return Err(PollError::TimedOut { attempts });
        }

        debug!(
            "Poll condition not met (attempt {}/{}), retrying in {:?}",
            attempts, max_attempts, policy.interval
        );
        time::sleep(policy.interval).await;
    }
}
