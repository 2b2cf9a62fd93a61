#[cfg(test)]
#[path = "notice_test.rs"]
mod tests;

use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};
use unicode_width::UnicodeWidthStr;

use crate::config::constants::{NOTICE_DISPLAY_MS, NOTICE_REVEAL_DURATION};
use crate::models::{NoticeKind, NoticeMessage};

/// Anything a notice can be presented on.
pub trait Present {
    fn present(&mut self, msg: NoticeMessage);
}

struct Shown {
    value: NoticeMessage,
    revealed_at: Instant,
}

/// Single-slot notice display.
///
/// A new notice replaces whatever is shown. Every notice schedules its own
/// hide deadline and deadlines are never cancelled, so an older deadline can
/// hide a newer notice before its own time is up.
pub struct Notice {
    current: Option<Shown>,
    visible: bool,
    hide_at: Vec<Instant>,
    display_duration: Duration,
}

impl Notice {
    pub fn new(display_duration: Duration) -> Notice {
        Notice {
            display_duration,
            ..Default::default()
        }
    }

    pub fn add_message(&mut self, msg: NoticeMessage) {
        self.present_at(msg, Instant::now());
    }

    pub fn success(&mut self, msg: impl Into<String>) {
        self.add_message(NoticeMessage::success(msg))
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.add_message(NoticeMessage::error(msg))
    }

    pub(crate) fn present_at(&mut self, msg: NoticeMessage, now: Instant) {
        // Deadlines that passed before this notice must not hide it
        self.sync(now);
        let duration = msg.duration().unwrap_or(self.display_duration);
        self.hide_at.push(now + duration);
        // Restart the reveal even if the same kind is already showing
        self.current = Some(Shown {
            value: msg,
            revealed_at: now,
        });
        self.visible = true;
    }

    pub(crate) fn sync(&mut self, now: Instant) {
        let pending = self.hide_at.len();
        self.hide_at.retain(|deadline| *deadline > now);
        if self.hide_at.len() < pending {
            self.visible = false;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|shown| shown.value.message())
    }

    pub fn kind(&self) -> Option<NoticeKind> {
        self.current.as_ref().map(|shown| shown.value.kind())
    }

    pub(crate) fn pending_hides(&self) -> usize {
        self.hide_at.len()
    }

    /// Fraction of the notice revealed at `now`, from 0.0 to 1.0.
    pub(crate) fn reveal_progress(&self, now: Instant) -> f64 {
        let Some(shown) = self.current.as_ref() else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(shown.revealed_at);
        (elapsed.as_secs_f64() / NOTICE_REVEAL_DURATION.as_secs_f64()).min(1.0)
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let now = Instant::now();
        self.sync(now);
        if !self.visible || area.width < 6 || area.height < 3 {
            return;
        }

        let Some(shown) = self.current.as_ref() else {
            return;
        };

        let max_width = area.width as usize - 2;
        let max_height = area.height as usize;

        let mut lines = build_bubble(shown.value.message(), max_width, shown.value.kind());
        lines.truncate(max_height);

        // Slide in from the top edge
        let revealed = (lines.len() as f64 * self.reveal_progress(now)).ceil() as usize;
        let lines = lines.split_off(lines.len() - revealed.clamp(1, lines.len()));

        f.render_widget(List::new(vec![ListItem::new(lines)]), area);
    }
}

impl Present for Notice {
    fn present(&mut self, msg: NoticeMessage) {
        self.add_message(msg);
    }
}

/// An unmounted slot drops every notice.
impl Present for Option<Notice> {
    fn present(&mut self, msg: NoticeMessage) {
        if let Some(notice) = self.as_mut() {
            notice.present(msg);
        }
    }
}

impl Default for Notice {
    fn default() -> Self {
        Self {
            current: None,
            visible: false,
            hide_at: vec![],
            display_duration: Duration::from_millis(NOTICE_DISPLAY_MS),
        }
    }
}

fn build_bubble<'a>(message: &str, max_width: usize, kind: NoticeKind) -> Vec<Line<'a>> {
    let mut lines = vec![];

    let mut line = String::new();
    for word in message.replace('\n', " ").split(' ') {
        if !line.is_empty() && line.width() + word.width() > max_width - 2 {
            lines.push(line.trim().to_string());
            line = String::new();
        }
        line.push_str(word);
        line.push(' ');
    }

    if !line.trim().is_empty() {
        lines.push(line.trim().to_string());
    }

    wrap_bubble(lines, max_width, kind)
}

fn wrap_bubble<'a>(lines: Vec<String>, max_width: usize, kind: NoticeKind) -> Vec<Line<'a>> {
    let border = kind.border_color();
    let top_bar = Line::from(styled(format!("╭{}╮", "─".repeat(max_width)), border));
    let bottom_bar = Line::from(styled(format!("╰{}╯", "─".repeat(max_width)), border));

    let mut wrapped_lines = vec![top_bar];
    for line in lines {
        let fill = " ".repeat((max_width - 2).saturating_sub(line.width()));
        wrapped_lines.push(Line::from(vec![
            styled("│ ".to_string(), border),
            styled(format!("{line}{fill}"), kind.text_color()),
            styled(" │".to_string(), border),
        ]));
    }

    wrapped_lines.push(bottom_bar);
    wrapped_lines
}

fn styled<'a>(text: String, color: Color) -> Span<'a> {
    Span::styled(text, Style::default().fg(color))
}
