//! Scripted in-memory repository for tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use jolt_client::{ClientError, TriggerResponse};
use jolt_core::domain::build::{BuildRef, QueuedItemRef};
use jolt_core::domain::trigger::TriggerRequest;
use jolt_core::dto::build::BuildStatus;
use jolt_core::dto::queue::{Executable, QueueItemStatus};

use super::JenkinsRepository;

/// One scripted answer; `Err` becomes a `ClientError::ApiError` with that status
type Reply<T> = Result<T, (u16, String)>;

/// Replays scripted answers in order and records every URL it was asked for
///
/// When a script has a single answer left it is repeated forever, which makes
/// "never finishes" scenarios a one-liner.
#[derive(Default)]
pub struct ScriptedRepository {
    trigger: Mutex<Option<Reply<TriggerResponse>>>,
    queue: Mutex<VecDeque<Reply<QueueItemStatus>>>,
    builds: Mutex<VecDeque<Reply<BuildStatus>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(self, status: u16, location: Option<&str>) -> Self {
        *self.trigger.lock().unwrap() = Some(Ok(TriggerResponse {
            status,
            location: location.map(str::to_string),
        }));
        self
    }

    pub fn trigger_error(self, message: &str) -> Self {
        *self.trigger.lock().unwrap() = Some(Err((500, message.to_string())));
        self
    }

    pub fn queued(self) -> Self {
        self.queue_reply(Ok(QueueItemStatus::default()))
    }

    pub fn started(self, url: &str) -> Self {
        self.queue_reply(Ok(QueueItemStatus {
            executable: Some(Executable {
                url: url.to_string(),
            }),
            ..Default::default()
        }))
    }

    pub fn queue_error(self, message: &str) -> Self {
        self.queue_reply(Err((500, message.to_string())))
    }

    pub fn queue_denied(self, status: u16) -> Self {
        self.queue_reply(Err((status, "Access denied".to_string())))
    }

    pub fn running(self) -> Self {
        self.build_reply(Ok(BuildStatus::default()))
    }

    pub fn finished(self, result: &str, url: Option<&str>) -> Self {
        self.build_reply(Ok(BuildStatus {
            result: Some(result.to_string()),
            url: url.map(str::to_string),
        }))
    }

    pub fn build_error(self, message: &str) -> Self {
        self.build_reply(Err((500, message.to_string())))
    }

    /// URLs requested so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|url| url.starts_with(prefix))
            .count()
    }

    fn queue_reply(self, reply: Reply<QueueItemStatus>) -> Self {
        self.queue.lock().unwrap().push_back(reply);
        self
    }

    fn build_reply(self, reply: Reply<BuildStatus>) -> Self {
        self.builds.lock().unwrap().push_back(reply);
        self
    }

    fn record(&self, url: String) {
        self.calls.lock().unwrap().push(url);
    }

    fn next<T: Clone>(script: &Mutex<VecDeque<Reply<T>>>) -> Result<T, ClientError> {
        let mut script = script.lock().unwrap();
        let reply = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };

        match reply {
            Some(Ok(value)) => Ok(value),
            Some(Err((status, message))) => Err(ClientError::api_error(status, message)),
            None => Err(ClientError::ParseError("script exhausted".to_string())),
        }
    }
}

#[async_trait]
impl JenkinsRepository for ScriptedRepository {
    async fn trigger_build(
        &self,
        request: &TriggerRequest,
    ) -> Result<TriggerResponse, ClientError> {
        let url = jolt_client::trigger_url(request)?;
        self.record(url.to_string());

        match self.trigger.lock().unwrap().clone() {
            Some(Ok(response)) => Ok(response),
            Some(Err((status, message))) => Err(ClientError::api_error(status, message)),
            None => Err(ClientError::ParseError("no trigger scripted".to_string())),
        }
    }

    async fn queue_item_status(
        &self,
        item: &QueuedItemRef,
    ) -> Result<QueueItemStatus, ClientError> {
        self.record(item.url.clone());
        Self::next(&self.queue)
    }

    async fn build_status(&self, build: &BuildRef) -> Result<BuildStatus, ClientError> {
        self.record(build.result_url());
        Self::next(&self.builds)
    }
}
