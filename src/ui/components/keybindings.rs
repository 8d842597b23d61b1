use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, AppState};

/// Render the keybindings bar at the bottom
pub fn render_keybindings(frame: &mut Frame, app: &App, area: Rect) {
    let keys: Vec<(&str, &str)> = match &app.state {
        AppState::LoadingPrList | AppState::LoadingPr => vec![("q", "Quit")],
        AppState::PrPicker => {
            let back = if app.blocks.is_empty() { "Quit" } else { "Back" };
            vec![
                ("j/↓", "Down"),
                ("k/↑", "Up"),
                ("Enter", "Select"),
                ("r", "Refresh"),
                ("Esc", back),
            ]
        }
        AppState::Composing => vec![
            ("j/k", "Move"),
            ("Space", "Toggle"),
            ("Enter", "Files"),
            ("z", "Fold"),
            ("m", "Mode"),
            ("i", "Instructions"),
            ("y/Y", "Copy"),
            ("o", "RepoPrompt"),
            ("r", "Reset"),
            ("p", "PRs"),
            ("q", "Quit"),
        ],
        AppState::PickingFiles => vec![
            ("j/k", "Move"),
            ("Space", "Toggle"),
            ("a", "All"),
            ("n", "None"),
            ("Enter", "Confirm"),
            ("Esc", "Cancel"),
        ],
        AppState::EditingText => vec![
            ("Type", "Edit text"),
            ("Home/End", "Jump"),
            ("Ctrl+U", "Clear"),
            ("Esc", "Done"),
        ],
        AppState::Error(_) => vec![("q", "Quit"), ("r", "Retry")],
    };

    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default())];

    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            *key,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(paragraph, area);
}
