#[cfg(test)]
#[path = "action_test.rs"]
mod tests;

use std::sync::{Arc, atomic};
use std::time::Duration;

use crate::client::ArcTaskServer;
use crate::config::constants::{COMPLETE_TASK_ERROR, LOAD_TASKS_ERROR, RELOAD_DELAY_MS};
use crate::models::{Action, ArcEventTx, Event, TaskFilter, TaskId, Tier};
use crate::{notice_error, notice_success};
use eyre::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Runs actions requested by the UI. Each action gets its own task and is
/// never cancelled by a later one.
pub struct ActionService {
    server: ArcTaskServer,
    action_rx: mpsc::UnboundedReceiver<Action>,
    event_tx: ArcEventTx,
    cancel_token: CancellationToken,
    pending_tasks: Arc<atomic::AtomicUsize>,
    reload_delay: Duration,
}

impl ActionService {
    pub fn new(
        server: ArcTaskServer,
        action_rx: mpsc::UnboundedReceiver<Action>,
        event_tx: ArcEventTx,
        cancel_token: CancellationToken,
        pending_tasks: Arc<atomic::AtomicUsize>,
    ) -> ActionService {
        ActionService {
            server,
            action_rx,
            event_tx,
            cancel_token,
            pending_tasks,
            reload_delay: Duration::from_millis(RELOAD_DELAY_MS),
        }
    }

    pub fn with_reload_delay(mut self, delay: Duration) -> Self {
        self.reload_delay = delay;
        self
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    log::debug!("Action service cancelled");
                    return Ok(());
                }

                action = self.action_rx.recv() => {
                    let Some(action) = action else {
                        log::debug!("Action channel closed");
                        return Ok(());
                    };
                    self.dispatch(action);
                }
            }
        }
    }

    fn dispatch(&self, action: Action) {
        let server = Arc::clone(&self.server);
        let event_tx = Arc::clone(&self.event_tx);
        let guard = PendingGuard::new(Arc::clone(&self.pending_tasks));
        let reload_delay = self.reload_delay;

        tokio::spawn(async move {
            let _guard = guard;
            let result = match action {
                Action::CompleteTask { id, tier } => {
                    complete_task(&server, id, tier, event_tx, reload_delay).await
                }
                Action::FetchTasks(filter) => fetch_tasks(&server, filter, event_tx).await,
            };

            if let Err(err) = result {
                log::error!("Failed to deliver event: {}", err);
            }
        });
    }
}

/// Completes a task and reports the outcome as notices. A successful
/// completion is followed by a reload once `reload_delay` has passed.
pub async fn complete_task(
    server: &ArcTaskServer,
    id: TaskId,
    tier: Option<Tier>,
    event_tx: ArcEventTx,
    reload_delay: Duration,
) -> Result<()> {
    match server.complete_task(&id, tier).await {
        Ok(res) if res.success => {
            log::info!("Task {} completed: {}", id, res.message);
            event_tx.send(notice_success!(res.message)).await?;
            tokio::time::sleep(reload_delay).await;
            event_tx.send(Event::Reload).await?;
        }
        Ok(res) => {
            log::warn!("Task {} was not completed: {}", id, res.message);
            event_tx.send(notice_error!(res.message)).await?;
        }
        Err(err) => {
            log::error!("Error: {:?}", err);
            event_tx.send(notice_error!(COMPLETE_TASK_ERROR)).await?;
        }
    }
    Ok(())
}

pub async fn fetch_tasks(
    server: &ArcTaskServer,
    filter: TaskFilter,
    event_tx: ArcEventTx,
) -> Result<()> {
    match server.list_tasks(&filter).await {
        Ok(tasks) => {
            log::debug!("Fetched {} tasks", tasks.len());
            event_tx.send(Event::TasksLoaded(tasks)).await?;
        }
        Err(err) => {
            log::error!("Error: {:?}", err);
            event_tx.send(notice_error!(LOAD_TASKS_ERROR)).await?;
            event_tx.send(Event::TasksLoadFailed).await?;
        }
    }
    Ok(())
}

struct PendingGuard(Arc<atomic::AtomicUsize>);

impl PendingGuard {
    fn new(counter: Arc<atomic::AtomicUsize>) -> Self {
        counter.fetch_add(1, atomic::Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, atomic::Ordering::SeqCst);
    }
}
