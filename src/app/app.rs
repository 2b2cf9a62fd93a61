#[cfg(test)]
#[path = "app_test.rs"]
mod tests;

use std::io;

use crate::app::app_state::AppState;
use crate::app::ui::{Notice, Present, help, utils};
use crate::config::Configuration;
use crate::config::constants::NOTICE_WIDTH_PERCENT;
use crate::models::{Action, Event, Task, TaskFilter, Tier};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use eyre::{Context, Result};
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    layout::{Alignment, Constraint, Direction, Layout},
    prelude::{Backend, CrosstermBackend},
    widgets::{Paragraph, Wrap},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::services::EventService;

const MIN_WIDTH: u16 = 40;

pub struct InitProps {
    pub tasks: Vec<Task>,
    pub filter: TaskFilter,
}

pub struct App<'a> {
    action_tx: mpsc::UnboundedSender<Action>,

    events: &'a mut EventService,

    app_state: AppState,

    notice: Option<Notice>,

    cancel_token: CancellationToken,
}

impl<'a> App<'a> {
    pub fn new(
        action_tx: mpsc::UnboundedSender<Action>,
        events: &'a mut EventService,
        cancel_token: CancellationToken,

        init_props: InitProps,
    ) -> App<'a> {
        let notice_config = &Configuration::instance().notice;
        let notice = notice_config
            .enabled
            .then(|| Notice::new(notice_config.display_duration()));

        App {
            action_tx,
            events,
            app_state: AppState::new(init_props.tasks, init_props.filter),
            notice,
            cancel_token,
        }
    }

    /// Presents a notice, or drops it when the slot is not mounted.
    pub fn present(&mut self, msg: crate::models::NoticeMessage) {
        self.notice.present(msg);
    }

    pub async fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        let mut stdout = stdout.lock();

        enable_raw_mode().wrap_err("enabling raw mode")?;
        execute!(stdout, EnterAlternateScreen).wrap_err("entering alternate screen")?;

        let term_backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(term_backend)?;
        let result = self.start_loop(&mut terminal).await;

        self.cancel_token.cancel();

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

        terminal.show_cursor()?;
        result
    }

    async fn start_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.render(terminal)?;
            if self.app_state.mark_ready() {
                bootstrap();
            }
            if self.handle_next_event().await {
                return Ok(());
            }
        }
    }

    async fn handle_next_event(&mut self) -> bool {
        let event = self.events.next().await;
        self.handle_event(event)
    }

    /// Applies one event to the UI. Returns true when the app should quit.
    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Quit => return true,

            Event::Notice(msg) => self.present(msg),

            Event::Reload | Event::KeyboardReload => {
                let action = self.app_state.reload();
                self.send_action(action);
            }

            Event::TasksLoaded(tasks) => self.app_state.set_tasks(tasks),

            Event::TasksLoadFailed => self.app_state.loading = false,

            Event::KeyboardUp => self.app_state.task_list.previous(),
            Event::KeyboardDown => self.app_state.task_list.next(),

            Event::KeyboardEnter => self.complete_selected(None),
            Event::KeyboardTier(tier) => self.complete_selected(Some(tier)),

            Event::UiTick => {}
        }
        false
    }

    fn complete_selected(&mut self, tier: Option<Tier>) {
        if let Some(action) = self.app_state.complete_selected(tier) {
            self.send_action(action);
        }
    }

    fn send_action(&self, action: Action) {
        if let Err(err) = self.action_tx.send(action) {
            log::error!("Failed to send action: {}", err);
        }
    }

    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|f| {
            let current_width = f.area().width;
            if current_width < MIN_WIDTH {
                f.render_widget(
                    Paragraph::new(format!(
                        "I'm too small, make me bigger! I need at least {} cells (current: {})",
                        MIN_WIDTH, current_width
                    ))
                    .wrap(Wrap { trim: true })
                    .alignment(Alignment::Left),
                    f.area(),
                );
                return;
            }

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1), Constraint::Length(1)])
                .split(f.area());

            self.app_state
                .task_list
                .render(f, layout[0], self.app_state.loading);
            help::render_help_line(f, layout[1]);

            if let Some(notice) = self.notice.as_mut() {
                notice.render(f, utils::notice_area(layout[0], NOTICE_WIDTH_PERCENT));
            }
        })?;
        Ok(())
    }
}

/// Runs once, after the first frame is on screen and before any key is handled.
fn bootstrap() {
    log::info!("{}", Configuration::instance().general.greeting);
}
