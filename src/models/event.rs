use std::sync::Arc;

use tokio::sync::mpsc;

use super::{NoticeMessage, Task, Tier};

#[derive(Debug)]
pub enum Event {
    Notice(NoticeMessage),

    /// Refetch the task list from the server.
    Reload,
    TasksLoaded(Vec<Task>),
    TasksLoadFailed,

    KeyboardUp,
    KeyboardDown,
    KeyboardEnter,
    KeyboardTier(Tier),
    KeyboardReload,

    Quit,

    UiTick,
}

#[macro_export]
macro_rules! notice_success {
    ($msg:expr) => {
        $crate::models::Event::Notice($crate::models::NoticeMessage::success($msg))
    };
    ($msg:expr, $duration:expr) => {
        $crate::models::Event::Notice(
            $crate::models::NoticeMessage::success($msg).with_duration($duration),
        )
    };
}

#[macro_export]
macro_rules! notice_error {
    ($msg:expr) => {
        $crate::models::Event::Notice($crate::models::NoticeMessage::error($msg))
    };
    ($msg:expr, $duration:expr) => {
        $crate::models::Event::Notice(
            $crate::models::NoticeMessage::error($msg).with_duration($duration),
        )
    };
}

#[async_trait::async_trait]
pub trait EventTx {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>>;
}

#[async_trait::async_trait]
impl EventTx for mpsc::UnboundedSender<Event> {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(event)
    }
}

pub type ArcEventTx = Arc<dyn EventTx + Send + Sync>;
