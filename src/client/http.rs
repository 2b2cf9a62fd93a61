#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time;

use async_trait::async_trait;
use eyre::{Context, Result};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use thiserror::Error;

use super::TaskServer;
use crate::config::{ServerConfig, user_agent};
use crate::models::{CompletionResponse, Task, TaskFilter, TaskId, TaskListResponse, Tier};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body (http {status}): {source}")]
    InvalidBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Serialize)]
struct CompleteTaskRequest {
    tier: Tier,
}

pub struct HttpTaskServer {
    client: reqwest::Client,
    endpoint: String,
    timeout: Option<time::Duration>,
}

#[async_trait]
impl TaskServer for HttpTaskServer {
    async fn complete_task(&self, id: &TaskId, tier: Option<Tier>) -> Result<CompletionResponse> {
        let mut req = self
            .client
            .post(format!("{}/complete_task/{}", self.endpoint, id))
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, user_agent());

        if let Some(tier) = tier {
            let body = serde_json::to_vec(&CompleteTaskRequest { tier })
                .wrap_err("encoding completion request")?;
            req = req.body(body);
        }

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        log::debug!("Completing task {} (tier: {:?})", id, tier);
        let res = req
            .send()
            .await
            .map_err(ClientError::from)
            .wrap_err(format!("completing task {}", id))?;

        // A failed completion still carries a JSON body, e.g. 404 for unknown ids
        decode(res)
            .await
            .wrap_err(format!("parsing completion response for task {}", id))
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut req = self
            .client
            .post(format!("{}/api/tasks/filter", self.endpoint))
            .header(USER_AGENT, user_agent())
            .json(filter);

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let res = req
            .send()
            .await
            .map_err(ClientError::from)
            .wrap_err("listing tasks")?;

        let res = res
            .error_for_status()
            .map_err(ClientError::from)
            .wrap_err("listing tasks")?;

        let res: TaskListResponse = decode(res).await.wrap_err("parsing task list response")?;
        Ok(res.tasks)
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    res: reqwest::Response,
) -> Result<T, ClientError> {
    let status = res.status().as_u16();
    let body = res.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| ClientError::InvalidBody { status, source })
}

impl From<&ServerConfig> for HttpTaskServer {
    fn from(value: &ServerConfig) -> Self {
        let mut server = HttpTaskServer::new().with_endpoint(&value.endpoint);
        if let Some(timeout) = value.timeout() {
            server = server.with_timeout(timeout);
        }
        server
    }
}

impl Default for HttpTaskServer {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: String::new(),
            timeout: None,
        }
    }
}

impl HttpTaskServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) fn timeout(&self) -> Option<time::Duration> {
        self.timeout
    }
}
