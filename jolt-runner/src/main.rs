//! Jolt
//!
//! Triggers a parameterized Jenkins build and optionally waits for it to
//! finish. Inputs follow the GitHub Actions convention (`INPUT_*`), so the
//! binary runs unchanged as an action step; every input also has a flag.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use jolt_client::JenkinsClient;
use jolt_core::domain::trigger::Credentials;
use jolt_runner::config::{Config, parse_flag};
use jolt_runner::repository::HttpJenkinsRepository;
use jolt_runner::{Orchestrator, report};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jolt")]
#[command(about = "Trigger a Jenkins build and wait for its result", long_about = None)]
struct Cli {
    /// Jenkins base URL
    #[arg(long, env = "INPUT_JENKINSURL")]
    jenkins_url: String,

    /// Job to trigger
    #[arg(long, env = "INPUT_JOB")]
    job: String,

    /// Build parameters, one key=value per line
    #[arg(long, env = "INPUT_PARAMETERS")]
    parameters: Option<String>,

    /// Wait for the build to finish ("true" to enable)
    #[arg(
        long,
        env = "INPUT_WAITFORCOMPLETION",
        default_value = "false",
        action = ArgAction::Set,
        value_parser = parse_flag
    )]
    wait_for_completion: bool,

    /// Jenkins user
    #[arg(long, env = "JENKINS_USER")]
    user: String,

    /// Jenkins API token
    #[arg(long, env = "JENKINS_TOKEN", hide_env_values = true)]
    token: String,

    /// Seconds between two status probes
    #[arg(long, env = "JOLT_POLL_INTERVAL", default_value_t = 5)]
    poll_interval: u64,

    /// Probes allowed while the build waits in the queue
    #[arg(long, env = "JOLT_START_ATTEMPTS", default_value_t = 180)]
    start_attempts: u32,

    /// Probes allowed while the build runs
    #[arg(long, env = "JOLT_COMPLETION_ATTEMPTS", default_value_t = 3600)]
    completion_attempts: u32,

    /// Per-request HTTP timeout in seconds
    #[arg(long, env = "JOLT_HTTP_TIMEOUT", default_value_t = 30)]
    http_timeout: u64,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::new(
            self.jenkins_url,
            self.job,
            Credentials::new(self.user, self.token),
        );
        config.parameters = self.parameters.unwrap_or_default();
        config.wait_for_completion = self.wait_for_completion;
        config.poll_interval = Duration::from_secs(self.poll_interval);
        config.start_attempts = self.start_attempts;
        config.completion_attempts = self.completion_attempts;
        config.http_timeout = Duration::from_secs(self.http_timeout);
        config
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging; stdout is kept for workflow commands
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jolt_runner=info,jolt_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Cli::parse().into_config();
    config.validate()?;

    let request = config
        .trigger_request()
        .context("Invalid parameters input")?;
    info!(
        "Loaded configuration: jenkins_url={}, job={}, wait_for_completion={}",
        request.base_url, request.job_name, request.wait_for_completion
    );

    let http_client = JenkinsClient::http_client(config.http_timeout)
        .context("Failed to build HTTP client")?;
    let client = JenkinsClient::with_client(request.credentials.clone(), http_client);
    let orchestrator = Orchestrator::new(HttpJenkinsRepository::new(client), config.policies());

    let outcome = orchestrator.run(&request).await;

    Ok(report::report(&outcome))
}
