pub mod action;
pub mod events;

pub use action::ActionService;
pub use events::EventService;

use std::sync::{Arc, atomic};

use eyre::{Result, eyre};
use std::time::Duration;
use tokio::sync::oneshot;

/// Waits for in-flight requests before the process exits.
pub struct ShutdownCoordinator {
    pub pending_tasks: Arc<atomic::AtomicUsize>,
    pub shutdown_complete: oneshot::Sender<Result<()>>,
    pub timeout: Option<Duration>,
}

impl ShutdownCoordinator {
    pub async fn wait_for_completion(self) -> Result<()> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(15));
        let result = match tokio::time::timeout(timeout, self.wait_pending_tasks()).await {
            Ok(_) => Ok(()),
            Err(_) => Err(eyre!(
                "shutdown timeout reached with {} requests in flight",
                self.pending_tasks.load(atomic::Ordering::SeqCst)
            )),
        };
        let _ = self.shutdown_complete.send(result);
        Ok(())
    }

    async fn wait_pending_tasks(&self) {
        loop {
            let pending = self.pending_tasks.load(atomic::Ordering::SeqCst);
            if pending == 0 {
                return;
            }
            log::debug!("Waiting for {} in-flight requests", pending);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
}
