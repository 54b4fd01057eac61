//! Jolt HTTP Client
//!
//! A small, type-safe HTTP client for the build server's remote access API.
//!
//! Every call is an authenticated POST. The server treats a POST to a status
//! document the same as a GET, and a POST works whether or not CSRF crumbs
//! are enforced for token-authenticated users.
//!
//! # Example
//!
//! ```no_run
//! use jolt_client::JenkinsClient;
//! use jolt_core::domain::trigger::{Credentials, TriggerRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new("bot", "api-token");
//!     let client = JenkinsClient::new(credentials.clone())?;
//!
//!     let request = TriggerRequest::new("https://jenkins.example.com", "deploy", credentials);
//!     let response = client.trigger_build(&request).await?;
//!
//!     println!("Trigger answered {} ({:?})", response.status, response.location);
//!     Ok(())
//! }
//! ```

pub mod error;
mod builds;
mod jobs;
mod queue;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use jobs::{TriggerResponse, trigger_url};

use std::time::Duration;

use jolt_core::domain::trigger::Credentials;
use reqwest::Client;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Default per-request timeout
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the build server
///
/// Status requests authenticate with the client's credentials. A trigger
/// authenticates with the credentials carried by its [`TriggerRequest`].
///
/// [`TriggerRequest`]: jolt_core::domain::trigger::TriggerRequest
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    /// Basic-auth credentials (username + API token)
    credentials: Credentials,
    /// HTTP client instance
    client: Client,
}

impl JenkinsClient {
    /// Create a new client with the default request timeout
    pub fn new(credentials: Credentials) -> Result<Self> {
        let client = Self::http_client(DEFAULT_HTTP_TIMEOUT)?;
        Ok(Self::with_client(credentials, client))
    }

    /// Create a new client with a custom HTTP client
    ///
    /// The client should not follow redirects, otherwise the trigger's
    /// status code and `Location` header are lost. See [`Self::http_client`].
    pub fn with_client(credentials: Credentials, client: Client) -> Self {
        Self {
            credentials,
            client,
        }
    }

    /// Build a reqwest client suitable for this API
    ///
    /// Redirects are disabled and every request is bounded by `timeout`.
    pub fn http_client(timeout: Duration) -> Result<Client> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()?;
        Ok(client)
    }

    // =============================================================================
    // Request Helpers
    // =============================================================================

    /// Start a POST request authenticated as the client
    fn post(&self, url: impl reqwest::IntoUrl) -> reqwest::RequestBuilder {
        self.post_as(url, &self.credentials)
    }

    /// Start a POST request authenticated with `credentials`
    fn post_as(
        &self,
        url: impl reqwest::IntoUrl,
        credentials: &Credentials,
    ) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .basic_auth(&credentials.username, Some(&credentials.token))
    }

    /// POST to a status document and deserialize the JSON body
    async fn post_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %url, "POST");
        let response = self.post(url).send().await?;
        self.handle_response(response).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success status codes and malformed bodies both become errors.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = JenkinsClient::new(Credentials::new("bot", "token")).unwrap();
        assert_eq!(client.credentials.username, "bot");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = JenkinsClient::http_client(Duration::from_secs(5)).unwrap();
        let client = JenkinsClient::with_client(Credentials::new("bot", "token"), http_client);
        assert_eq!(client.credentials.username, "bot");
    }

    #[test]
    fn test_post_as_uses_given_credentials() {
        let client = JenkinsClient::new(Credentials::new("bot", "token")).unwrap();
        let request = client
            .post_as("http://h/", &Credentials::new("alice", "tok"))
            .build()
            .unwrap();

        // base64("alice:tok")
        assert_eq!(
            request.headers()[reqwest::header::AUTHORIZATION],
            "Basic YWxpY2U6dG9r"
        );
    }
}
