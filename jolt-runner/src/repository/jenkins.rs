//! Build server repository
//!
//! Handles the three calls a trigger needs:
//! - Triggering a parameterized build
//! - Fetching the status of a queued item
//! - Fetching the result of a build

use async_trait::async_trait;
use jolt_client::{ClientError, JenkinsClient, TriggerResponse};
use jolt_core::domain::build::{BuildRef, QueuedItemRef};
use jolt_core::domain::trigger::TriggerRequest;
use jolt_core::dto::build::BuildStatus;
use jolt_core::dto::queue::QueueItemStatus;

/// Repository trait for the build server
#[async_trait]
pub trait JenkinsRepository: Send + Sync {
    /// Triggers a build and returns the raw status and `Location` header
    ///
    /// # Arguments
    /// * `request` - Server, job and parameters of the build
    async fn trigger_build(&self, request: &TriggerRequest)
    -> Result<TriggerResponse, ClientError>;

    /// Fetches the current status of a queued item
    async fn queue_item_status(&self, item: &QueuedItemRef)
    -> Result<QueueItemStatus, ClientError>;

    /// Fetches the `result` of a build
    async fn build_status(&self, build: &BuildRef) -> Result<BuildStatus, ClientError>;
}

/// HTTP implementation of JenkinsRepository
pub struct HttpJenkinsRepository {
    client: JenkinsClient,
}

impl HttpJenkinsRepository {
    /// Creates a new HTTP repository
    ///
    /// # Arguments
    /// * `client` - Authenticated client for the build server
    pub fn new(client: JenkinsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JenkinsRepository for HttpJenkinsRepository {
    async fn trigger_build(
        &self,
        request: &TriggerRequest,
    ) -> Result<TriggerResponse, ClientError> {
        self.client.trigger_build(request).await
    }

    async fn queue_item_status(
        &self,
        item: &QueuedItemRef,
    ) -> Result<QueueItemStatus, ClientError> {
        self.client.queue_item_status(item).await
    }

    async fn build_status(&self, build: &BuildRef) -> Result<BuildStatus, ClientError> {
        self.client.build_status(build).await
    }
}
