use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::{Mutex, Once, OnceLock};

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;

use super::*;
use crate::app::services::events::{CrosstermStream, ScriptedStream};
use crate::models::{NoticeKind, NoticeMessage, TaskId};

const ORDERED_GREETING: &str = "Ordered bootstrap initialized!";

fn tasks() -> Vec<Task> {
    vec![
        Task {
            id: TaskId::new("7"),
            title: "Water plants".to_string(),
            ..Default::default()
        },
        Task {
            id: TaskId::new("8"),
            title: "Call grandma".to_string(),
            ..Default::default()
        },
    ]
}

fn key(code: KeyCode) -> CrosstermEvent {
    CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn new_app<'a>(
    events: &'a mut EventService,
    filter: TaskFilter,
) -> (App<'a>, mpsc::UnboundedReceiver<Action>) {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let app = App::new(
        action_tx,
        events,
        CancellationToken::new(),
        InitProps {
            tasks: tasks(),
            filter,
        },
    );
    (app, action_rx)
}

#[test]
fn test_reload_sends_fetch_with_filter() {
    let filter = TaskFilter::default().with_category("Garden");
    let mut events = EventService::with_stream(ScriptedStream(VecDeque::new()));
    let (mut app, mut action_rx) = new_app(&mut events, filter.clone());

    assert!(!app.handle_event(Event::Reload));

    assert_eq!(action_rx.try_recv().unwrap(), Action::FetchTasks(filter));
    assert!(app.app_state.loading);
    assert!(action_rx.try_recv().is_err());
}

#[test]
fn test_enter_and_tier_keys_complete_selected_task() {
    let mut events = EventService::with_stream(ScriptedStream(VecDeque::new()));
    let (mut app, mut action_rx) = new_app(&mut events, TaskFilter::default());

    app.handle_event(Event::KeyboardEnter);
    app.handle_event(Event::KeyboardDown);
    app.handle_event(Event::KeyboardTier(Tier::Medium));

    assert_eq!(
        action_rx.try_recv().unwrap(),
        Action::CompleteTask {
            id: TaskId::new("7"),
            tier: None,
        }
    );
    assert_eq!(
        action_rx.try_recv().unwrap(),
        Action::CompleteTask {
            id: TaskId::new("8"),
            tier: Some(Tier::Medium),
        }
    );
}

#[test]
fn test_notice_event_reaches_slot() {
    let mut events = EventService::with_stream(ScriptedStream(VecDeque::new()));
    let (mut app, _action_rx) = new_app(&mut events, TaskFilter::default());

    app.handle_event(Event::Notice(NoticeMessage::error("Task not found")));

    let notice = app.notice.as_ref().unwrap();
    assert!(notice.is_visible());
    assert_eq!(notice.message(), Some("Task not found"));
    assert_eq!(notice.kind(), Some(NoticeKind::Error));
}

#[test]
fn test_notice_event_ignored_when_slot_disabled() {
    let mut config = Configuration::default();
    config.notice.enabled = false;
    Configuration::init(config).unwrap();

    let mut events = EventService::with_stream(ScriptedStream(VecDeque::new()));
    let (mut app, _action_rx) = new_app(&mut events, TaskFilter::default());

    assert!(!app.handle_event(Event::Notice(NoticeMessage::success("Done"))));
    assert!(app.notice.is_none());

    let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    app.render(&mut terminal).unwrap();
}

#[test]
fn test_quit_event_stops_loop() {
    let mut events = EventService::with_stream(ScriptedStream(VecDeque::new()));
    let (mut app, _action_rx) = new_app(&mut events, TaskFilter::default());

    assert!(app.handle_event(Event::Quit));
}

fn journal() -> &'static Mutex<Vec<&'static str>> {
    static JOURNAL: OnceLock<Mutex<Vec<&'static str>>> = OnceLock::new();
    JOURNAL.get_or_init(Default::default)
}

/// Records the greeting line only, so other tests' logs stay out of the journal.
struct GreetingLogger;

impl log::Log for GreetingLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record) {
        if record.args().to_string() == ORDERED_GREETING {
            journal().lock().unwrap().push("greeting");
        }
    }

    fn flush(&self) {}
}

static LOGGER: GreetingLogger = GreetingLogger;

/// Journals every read of a terminal key.
struct JournaledStream(ScriptedStream);

impl CrosstermStream for JournaledStream {
    fn next(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Option<Result<CrosstermEvent, std::io::Error>>> + Send + '_>>
    {
        journal().lock().unwrap().push("key");
        self.0.next()
    }
}

#[tokio::test]
async fn test_bootstrap_runs_once_after_first_frame_before_keys() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Info);
    });

    let mut config = Configuration::default();
    config.general.greeting = ORDERED_GREETING.to_string();
    Configuration::init(config).unwrap();

    let stream = JournaledStream(ScriptedStream(VecDeque::from([
        key(KeyCode::Down),
        key(KeyCode::Up),
        key(KeyCode::Char('q')),
    ])));
    let mut events = EventService::with_stream(stream);
    let (mut app, _action_rx) = new_app(&mut events, TaskFilter::default());

    let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    assert!(journal().lock().unwrap().is_empty());

    app.start_loop(&mut terminal).await.unwrap();

    let journal = journal().lock().unwrap();
    assert_eq!(journal.first(), Some(&"greeting"));
    assert_eq!(journal.iter().filter(|e| **e == "greeting").count(), 1);
    assert!(journal.iter().filter(|e| **e == "key").count() >= 3);

    let screen = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect::<String>();
    assert!(screen.contains("Water plants"));
}
