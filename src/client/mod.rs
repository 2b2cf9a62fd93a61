pub mod http;

pub use http::{ClientError, HttpTaskServer};

#[cfg(test)]
use mockall::automock;

use crate::{
    config::ServerConfig,
    models::{CompletionResponse, Task, TaskFilter, TaskId, Tier},
};
use async_trait::async_trait;
use eyre::Result;
use std::sync::Arc;

/// The server side of the task tracker.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TaskServer {
    /// Marks a task complete. Business failures come back as
    /// `CompletionResponse { success: false, .. }`, not as errors.
    async fn complete_task(&self, id: &TaskId, tier: Option<Tier>) -> Result<CompletionResponse>;

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>>;
}

pub type ArcTaskServer = Arc<dyn TaskServer + Send + Sync>;

pub fn new_server(config: &ServerConfig) -> ArcTaskServer {
    let server = HttpTaskServer::from(config);
    log::debug!("Using task server at {}", server.endpoint());
    Arc::new(server)
}
