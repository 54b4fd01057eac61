//! Job trigger endpoint

use jolt_core::domain::trigger::TriggerRequest;
use reqwest::Url;
use reqwest::header::LOCATION;
use tracing::info;

use crate::JenkinsClient;
use crate::error::{ClientError, Result};

/// Raw answer to a trigger request
///
/// Any status is returned as-is; deciding whether the trigger was accepted
/// is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerResponse {
    pub status: u16,
    /// `Location` header, pointing at the queued item
    pub location: Option<String>,
}

impl TriggerResponse {
    /// 201 Created with a non-empty `Location` header
    pub fn is_accepted(&self) -> bool {
        self.status == 201 && self.accepted_location().is_some()
    }

    /// The `Location` header, if present and non-empty
    pub fn accepted_location(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.trim().is_empty())
    }
}

/// Builds `{base}/job/{job}/buildWithParameters[?query]`
///
/// The job name is percent-encoded as a single path segment and a trailing
/// slash on the base URL is ignored. Parameters are appended verbatim.
pub fn trigger_url(request: &TriggerRequest) -> Result<Url> {
    let mut url = Url::parse(&request.base_url)
        .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", request.base_url, e)))?;

    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", request.base_url)))?
        .pop_if_empty()
        .extend(["job", request.job_name.as_str(), "buildWithParameters"]);

    url.set_query(request.query_string().as_deref());

    Ok(url)
}

impl JenkinsClient {
    // =============================================================================
    // Job Trigger
    // =============================================================================

    /// Trigger a parameterized build
    ///
    /// The POST is authenticated with `request.credentials`.
    ///
    /// # Arguments
    /// * `request` - Server, job, parameters and credentials of the build
    ///
    /// # Returns
    /// The trigger's status code and `Location` header, whatever the status
    pub async fn trigger_build(&self, request: &TriggerRequest) -> Result<TriggerResponse> {
        let url = trigger_url(request)?;
        info!(trigger_url = %url, "Triggering job: {}", request.job_name);

        let response = self.post_as(url, &request.credentials).send().await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(TriggerResponse {
            status: response.status().as_u16(),
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jolt_core::domain::trigger::{Credentials, QueryParameter};

    fn request(base: &str, job: &str) -> TriggerRequest {
        TriggerRequest::new(base, job, Credentials::new("bot", "token"))
    }

    #[test]
    fn test_trigger_url_without_parameters() {
        let url = trigger_url(&request("http://h", "x")).unwrap();
        assert_eq!(url.as_str(), "http://h/job/x/buildWithParameters");
    }

    #[test]
    fn test_trigger_url_with_parameters() {
        let req = request("http://h", "x").with_parameters(vec![
            QueryParameter::new("a", "1"),
            QueryParameter::new("b", "2"),
        ]);
        let url = trigger_url(&req).unwrap();
        assert_eq!(url.as_str(), "http://h/job/x/buildWithParameters?a=1&b=2");
    }

    #[test]
    fn test_trigger_url_trailing_slash_and_context_path() {
        let url = trigger_url(&request("https://ci.example.com/jenkins/", "x")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://ci.example.com/jenkins/job/x/buildWithParameters"
        );
    }

    #[test]
    fn test_job_name_is_one_encoded_segment() {
        let url = trigger_url(&request("http://h", "my job/main")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://h/job/my%20job%2Fmain/buildWithParameters"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = trigger_url(&request("not a url", "x")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_acceptance_requires_201_and_location() {
        let response = |status, location: Option<&str>| TriggerResponse {
            status,
            location: location.map(str::to_string),
        };

        assert!(response(201, Some("http://h/queue/item/7/")).is_accepted());
        assert!(!response(200, Some("http://h/queue/item/7/")).is_accepted());
        assert!(!response(302, Some("http://h/queue/item/7/")).is_accepted());
        assert!(!response(201, None).is_accepted());
        assert!(!response(201, Some("")).is_accepted());
    }
}
