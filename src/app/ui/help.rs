#[cfg(test)]
#[path = "help_test.rs"]
mod tests;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
};
use ratatui_macros::span;

struct KeyBinding {
    key: &'static str,
    description: &'static str,
}

const KEY_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "↑/↓",
        description: "Select",
    },
    KeyBinding {
        key: "Enter",
        description: "Complete (no tier)",
    },
    KeyBinding {
        key: "1/2/3",
        description: "Complete at tier",
    },
    KeyBinding {
        key: "r",
        description: "Reload",
    },
    KeyBinding {
        key: "q",
        description: "Quit",
    },
];

pub fn render_help_line(frame: &mut Frame, area: Rect) {
    let mut instructions = KEY_BINDINGS
        .iter()
        .flat_map(|b| {
            vec![
                span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "{}", b.key),
                " ".into(),
                span!(Style::default().fg(Color::White); "{}", b.description),
                " | ".into(),
            ]
        })
        .collect::<Vec<_>>();
    instructions.pop(); // remove the last " | "

    frame.render_widget(Line::from(instructions), area);
}
