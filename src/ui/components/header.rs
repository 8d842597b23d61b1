use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// PR identity on the first line, mode and selection summary on the second
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let target = match &app.pr {
        Some(pr) => format!("{}/{}#{} {}", pr.owner, pr.repo, pr.number, pr.title),
        None => "Local diff".to_string(),
    };

    let selected = app
        .blocks
        .iter()
        .filter(|b| app.selection.is_selected(b.id()))
        .count();
    let mut summary = vec![
        Span::styled("mode ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.mode.clone(), Style::default().fg(Color::Magenta)),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} of {} sections", selected, app.blocks.len()),
            Style::default().fg(Color::White),
        ),
    ];
    if let Some(label) = app.file_label() {
        summary.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        summary.push(Span::styled(label, Style::default().fg(Color::Green)));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "rpcompose",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(target, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(summary),
    ];

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}
