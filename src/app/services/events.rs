#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use std::pin::Pin;

use crate::{config::constants::FRAME_DURATION, models::Event, models::Tier};
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::time;

type StreamOutput = Option<Result<CrosstermEvent, std::io::Error>>;

/// Source of terminal events; swapped out in tests.
pub trait CrosstermStream: Send + 'static {
    fn next(&mut self) -> Pin<Box<dyn Future<Output = StreamOutput> + Send + '_>>;
}

impl CrosstermStream for EventStream {
    fn next(&mut self) -> Pin<Box<dyn Future<Output = StreamOutput> + Send + '_>> {
        Box::pin(futures::StreamExt::next(self))
    }
}

/// Replays a fixed list of terminal events, then stays pending.
#[cfg(test)]
pub(crate) struct ScriptedStream(pub(crate) std::collections::VecDeque<CrosstermEvent>);

#[cfg(test)]
impl CrosstermStream for ScriptedStream {
    fn next(&mut self) -> Pin<Box<dyn Future<Output = StreamOutput> + Send + '_>> {
        let next = self.0.pop_front();
        Box::pin(async move {
            match next {
                Some(event) => Some(Ok(event)),
                None => futures::future::pending().await,
            }
        })
    }
}

pub struct EventService {
    crossterm_events: Box<dyn CrosstermStream>,
    event_rx: mpsc::UnboundedReceiver<Event>,
    event_tx: mpsc::UnboundedSender<Event>,
}

impl EventService {
    pub fn new() -> Self {
        Self::with_stream(EventStream::new())
    }

    pub fn with_stream(stream: impl CrosstermStream) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
        Self {
            crossterm_events: Box::new(stream),
            event_rx,
            event_tx,
        }
    }

    pub fn event_tx(&self) -> mpsc::UnboundedSender<Event> {
        self.event_tx.clone()
    }

    pub async fn next(&mut self) -> Event {
        loop {
            let e = tokio::select! {
                event = self.event_rx.recv() => event,
                event = self.crossterm_events.next().fuse() => match event {
                    Some(Ok(input)) => handle_crossterm(input),
                    Some(Err(err)) => {
                        log::warn!("Failed to read terminal event: {}", err);
                        None
                    }
                    None => None
                },
                _ = time::sleep(FRAME_DURATION) => Some(Event::UiTick)
            };

            if let Some(event) = e {
                return event;
            }
        }
    }
}

impl Default for EventService {
    fn default() -> Self {
        Self::new()
    }
}

fn handle_crossterm(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key_event) => handle_key(key_event),
        CrosstermEvent::Resize(..) => Some(Event::UiTick),
        _ => None,
    }
}

fn handle_key(key: KeyEvent) -> Option<Event> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Event::Quit),
            KeyCode::Char('r') => Some(Event::KeyboardReload),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Event::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Event::KeyboardUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Event::KeyboardDown),
        KeyCode::Enter => Some(Event::KeyboardEnter),
        KeyCode::Char('1') => Some(Event::KeyboardTier(Tier::Low)),
        KeyCode::Char('2') => Some(Event::KeyboardTier(Tier::Medium)),
        KeyCode::Char('3') => Some(Event::KeyboardTier(Tier::High)),
        KeyCode::Char('r') | KeyCode::F(5) => Some(Event::KeyboardReload),
        _ => None,
    }
}
