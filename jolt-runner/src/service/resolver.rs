//! Build resolvers
//!
//! Two polling steps turn a fire-and-forget trigger into a result:
//! - a queued item is resolved into the build an executor started for it
//! - a running build is resolved into its terminal result

use jolt_client::ClientError;
use jolt_core::domain::build::{BuildRef, QueuedItemRef, TerminalBuildStatus};
use jolt_core::dto::build::BuildStatus;
use jolt_core::dto::queue::QueueItemStatus;
use tracing::{debug, info};

use crate::repository::JenkinsRepository;
use crate::scheduler::{PollPolicy, PollResult, poll};

/// Polls a queued item until the server attaches an executable to it
///
/// # Arguments
/// * `repository` - Build server adapter
/// * `item` - Queue status URL returned by the trigger
/// * `policy` - Interval and attempt budget
pub async fn resolve_build_start<R>(
    repository: &R,
    item: &QueuedItemRef,
    policy: &PollPolicy,
) -> PollResult<BuildRef, ClientError>
where
    R: JenkinsRepository + ?Sized,
{
    info!(
        queue_url = %item.url,
        "Waiting for the queued item to start (every {:?}, at most {} attempts)",
        policy.interval, policy.max_attempts
    );

    let status = poll(
        || async move {
            let status = repository.queue_item_status(item).await?;
            if let Some(why) = status.why.as_deref() {
                debug!(queue_url = %item.url, "Still queued: {}", why);
            }
            Ok::<_, ClientError>(status)
        },
        |status: &QueueItemStatus| status.executable_url().is_some(),
        policy,
    )
    .await?;

    // Non-empty once the predicate holds
    let url = status.executable_url().unwrap_or_default();
    Ok(BuildRef::new(url))
}

/// Polls a build until it reports a non-empty `result`
///
/// The status `url` falls back to the build's own URL when the server leaves
/// it out of the response.
///
/// # Arguments
/// * `repository` - Build server adapter
/// * `build` - The started build
/// * `policy` - Interval and attempt budget
pub async fn resolve_build_completion<R>(
    repository: &R,
    build: &BuildRef,
    policy: &PollPolicy,
) -> PollResult<TerminalBuildStatus, ClientError>
where
    R: JenkinsRepository + ?Sized,
{
    info!(
        build_url = %build.url,
        "Waiting for build completion, polling via {} (every {:?}, at most {} attempts)",
        build.result_url(),
        policy.interval,
        policy.max_attempts
    );

    let status = poll(
        || async move { repository.build_status(build).await },
        |status: &BuildStatus| status.terminal_result().is_some(),
        policy,
    )
    .await?;

    Ok(TerminalBuildStatus {
        result: status.terminal_result().unwrap_or_default().to_string(),
        url: status.url.unwrap_or_else(|| build.url.clone()),
    })
}
