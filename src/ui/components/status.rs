use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let loading = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("⏳ {}", message),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
    ])
    .wrap(Wrap { trim: false });

    frame.render_widget(loading, area);
}

/// Error text plus the ways out of it
pub fn render_error(frame: &mut Frame, area: Rect, message: &str, can_return: bool) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Error: {}", message),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    let hint = if can_return {
        "r retries, Esc returns to the composer"
    } else {
        "r retries"
    };
    lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
