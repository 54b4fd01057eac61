//! Build status endpoint

use jolt_core::domain::build::BuildRef;
use jolt_core::dto::build::BuildStatus;

use crate::JenkinsClient;
use crate::error::Result;

impl JenkinsClient {
    /// Fetch the `result` of a build
    ///
    /// Only the `result` tree is requested, which keeps the response small
    /// for builds with large action lists.
    pub async fn build_status(&self, build: &BuildRef) -> Result<BuildStatus> {
        self.post_json(&build.result_url()).await
    }
}
