use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::domain::selection_payload::selection_label;
use crate::ui::util::truncate;

/// Overlay listing the files of the active diff
pub fn render_file_picker(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect(80, 70, area);
    frame.render_widget(Clear, popup_area);

    let files = app.active_diff_files();
    let width = popup_area.width.saturating_sub(24) as usize;
    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled(
                "SELECT FILES",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                selection_label(app.pending_files.len(), files.len()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
    ];

    for (i, file) in files.iter().enumerate() {
        let is_cursor = i == app.file_cursor;
        let checked = app.pending_files.contains(&file.path);

        let stats = if file.is_binary {
            "binary".to_string()
        } else {
            format!("{} lines", file.line_count)
        };

        lines.push(Line::from(vec![
            Span::styled(
                if is_cursor { "▶ " } else { "  " },
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                if checked { "[x] " } else { "[ ] " },
                Style::default().fg(if checked { Color::Green } else { Color::DarkGray }),
            ),
            Span::styled(
                truncate(&file.path, width),
                if is_cursor {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                },
            ),
            Span::styled(format!("  {}", stats), Style::default().fg(Color::DarkGray)),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Files ");

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
