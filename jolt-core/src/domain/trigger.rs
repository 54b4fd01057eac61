//! Trigger request types

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading the multi-line parameter block
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// A line had an empty key (e.g. `=value`)
    #[error("Parameter line {line} has an empty key")]
    EmptyKey { line: usize },
}

/// Basic-auth credentials for the build server
///
/// The token is never printed by the `Debug` implementation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"***")
            .finish()
    }
}

/// A single build parameter, `key=value` or a bare `key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameter {
    pub key: String,
    /// `None` for a bare token, which is rendered without `=`
    pub value: Option<String>,
}

impl QueryParameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    pub fn bare(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }
}

impl fmt::Display for QueryParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.key, value),
            None => write!(f, "{}", self.key),
        }
    }
}

/// Parses a multi-line parameter block into ordered build parameters
///
/// The block is trimmed and blank lines are skipped, so runs of newlines
/// collapse into a single separator. Each line is split on its first `=`;
/// the value is kept verbatim and may itself contain `=`. A line without
/// `=` passes through as a bare query token.
///
/// # Example
/// ```
/// use jolt_core::domain::trigger::parse_parameters;
///
/// let params = parse_parameters("a=1\nb=2\n").unwrap();
/// assert_eq!(params.len(), 2);
/// assert_eq!(params[1].to_string(), "b=2");
/// ```
pub fn parse_parameters(block: &str) -> Result<Vec<QueryParameter>, ParameterError> {
    let mut params = Vec::new();

    for (index, raw) in block.trim().lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            params.push(QueryParameter::bare(line));
            continue;
        };

        if key.trim().is_empty() {
            return Err(ParameterError::EmptyKey { line: index + 1 });
        }

        params.push(QueryParameter::new(key.trim(), value));
    }

    Ok(params)
}

/// Everything needed to trigger one parameterized build
///
/// Built once from validated configuration before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRequest {
    /// Server base URL (e.g., "https://jenkins.example.com")
    pub base_url: String,
    /// Job name, percent-encoded as one path segment when the URL is built
    pub job_name: String,
    /// Build parameters, in the order they were supplied
    pub query_parameters: Vec<QueryParameter>,
    pub credentials: Credentials,
    /// Whether to wait for the build to reach a terminal result
    pub wait_for_completion: bool,
}

impl TriggerRequest {
    pub fn new(
        base_url: impl Into<String>,
        job_name: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            job_name: job_name.into(),
            query_parameters: Vec::new(),
            credentials,
            wait_for_completion: false,
        }
    }

    pub fn with_parameters(mut self, params: Vec<QueryParameter>) -> Self {
        self.query_parameters = params;
        self
    }

    pub fn with_wait_for_completion(mut self, wait: bool) -> Self {
        self.wait_for_completion = wait;
        self
    }

    /// Renders the parameters as a raw query string (`a=1&b=2`)
    ///
    /// Returns `None` when there are no parameters, so callers never append
    /// a dangling `?`.
    pub fn query_string(&self) -> Option<String> {
        if self.query_parameters.is_empty() {
            return None;
        }

        Some(
            self.query_parameters
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("&"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TriggerRequest {
        TriggerRequest::new("http://h", "x", Credentials::new("bot", "secret"))
    }

    #[test]
    fn test_parameter_block_joined_with_ampersand() {
        let params = parse_parameters("a=1\nb=2\n").unwrap();
        let req = request().with_parameters(params);
        assert_eq!(req.query_string().as_deref(), Some("a=1&b=2"));
    }

    #[test]
    fn test_blank_lines_collapse() {
        let params = parse_parameters("\n\na=1\n\n\nb=2\n\n").unwrap();
        assert_eq!(
            params,
            vec![QueryParameter::new("a", "1"), QueryParameter::new("b", "2")]
        );
    }

    #[test]
    fn test_crlf_and_surrounding_whitespace() {
        let params = parse_parameters("  a=1\r\nb=2  \r\n").unwrap();
        assert_eq!(
            params,
            vec![QueryParameter::new("a", "1"), QueryParameter::new("b", "2")]
        );
    }

    #[test]
    fn test_value_may_contain_equals() {
        let params = parse_parameters("expr=a=b").unwrap();
        assert_eq!(params, vec![QueryParameter::new("expr", "a=b")]);
    }

    #[test]
    fn test_empty_value_is_kept() {
        let params = parse_parameters("flag=").unwrap();
        assert_eq!(params[0].to_string(), "flag=");
    }

    #[test]
    fn test_empty_block_has_no_query_string() {
        assert!(parse_parameters("").unwrap().is_empty());
        assert!(parse_parameters("  \n \n").unwrap().is_empty());
        assert_eq!(request().query_string(), None);
    }

    #[test]
    fn test_line_without_separator_is_a_bare_token() {
        let params = parse_parameters("a=1\ndelay").unwrap();
        assert_eq!(
            params,
            vec![QueryParameter::new("a", "1"), QueryParameter::bare("delay")]
        );

        let req = request().with_parameters(params);
        assert_eq!(req.query_string().as_deref(), Some("a=1&delay"));
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let err = parse_parameters("=1").unwrap_err();
        assert_eq!(err, ParameterError::EmptyKey { line: 1 });
    }

    #[test]
    fn test_credentials_debug_hides_token() {
        let creds = Credentials::new("bot", "secret");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("bot"));
        assert!(!rendered.contains("secret"));
    }
}
