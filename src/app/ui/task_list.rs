#[cfg(test)]
#[path = "task_list_test.rs"]
mod tests;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Padding},
};
use ratatui_macros::span;

use crate::models::{Task, TaskId, Tier};

#[derive(Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    state: ListState,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> TaskList {
        let mut list = TaskList::default();
        list.set_tasks(tasks);
        list
    }

    /// Replaces the tasks, keeping the selection on the same task id when it
    /// is still listed.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        let selected_id = self.selected().map(|t| t.id.clone());
        let prev_index = self.state.selected();
        self.tasks = tasks;

        if self.tasks.is_empty() {
            self.state.select(None);
            return;
        }

        let index = selected_id
            .and_then(|id| self.position(&id))
            .or(prev_index.map(|i| i.min(self.tasks.len() - 1)))
            .unwrap_or(0);
        self.state.select(Some(index));
    }

    pub fn selected(&self) -> Option<&Task> {
        self.state.selected().and_then(|i| self.tasks.get(i))
    }

    pub fn next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.tasks.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = self.state.selected().map(|i| i.saturating_sub(1)).unwrap_or(0);
        self.state.select(Some(i));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, loading: bool) {
        let title = if loading {
            " Quests (loading...) ".to_string()
        } else {
            format!(" Quests ({}) ", self.tasks.len())
        };

        let block = Block::default()
            .title(title)
            .title_style(Style::default().bold())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .padding(Padding::new(1, 1, 0, 0));

        if self.tasks.is_empty() {
            f.render_widget(
                ratatui::widgets::Paragraph::new("No quests available").block(block).gray(),
                area,
            );
            return;
        }

        let items = self.tasks.iter().map(build_item).collect::<Vec<_>>();
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::Rgb(48, 48, 48))
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.state);
    }
}

fn build_item<'a>(task: &Task) -> ListItem<'a> {
    let mut spans = vec![Span::raw(task.title.clone())];
    if let Some(category) = task.category.as_deref() {
        spans.push(span!(Style::default().fg(Color::Cyan); "  [{}]", category));
    }
    spans.push(Span::raw("  "));
    spans.extend(tier_spans(task));
    ListItem::new(Line::from(spans))
}

fn tier_spans<'a>(task: &Task) -> Vec<Span<'a>> {
    [
        (Tier::Low, "🌙", Color::Blue),
        (Tier::Medium, "⚡", Color::Yellow),
        (Tier::High, "🔥", Color::Red),
    ]
    .into_iter()
    .map(|(tier, icon, color)| {
        span!(Style::default().fg(color); "{} {} ", icon, task.points(tier))
    })
    .collect()
}
