//! Queue item endpoint

use jolt_core::domain::build::QueuedItemRef;
use jolt_core::dto::queue::QueueItemStatus;

use crate::JenkinsClient;
use crate::error::Result;

impl JenkinsClient {
    /// Fetch the current status of a queued item
    ///
    /// # Arguments
    /// * `item` - Queue status URL derived from the trigger's `Location` header
    pub async fn queue_item_status(&self, item: &QueuedItemRef) -> Result<QueueItemStatus> {
        self.post_json(&item.url).await
    }
}
