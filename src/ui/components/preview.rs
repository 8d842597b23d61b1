use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState};
use crate::domain::types::PromptBlock;

/// Instructions, then the highlighted section
pub fn render_preview(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    let editing = app.state == AppState::EditingText;
    lines.push(Line::from(Span::styled(
        if editing { "INSTRUCTIONS (editing)" } else { "INSTRUCTIONS" },
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    if app.user_text.is_empty() && !editing {
        lines.push(Line::from(Span::styled(
            "press i to add instructions",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let text = if editing {
            with_cursor(&app.user_text, app.cursor_pos)
        } else {
            app.user_text.clone()
        };
        for line in text.split('\n') {
            lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::White),
            )));
        }
    }
    lines.push(Line::from(""));

    if let Some(block) = app.current_block() {
        let selected = app.selection.is_selected(block.id());
        lines.push(Line::from(vec![
            Span::styled(
                block.header().to_string(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                if selected { "" } else { "  (not included)" },
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        if app.collapsed.contains(block.id()) {
            lines.push(Line::from(Span::styled(
                "collapsed, press z to expand",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            let (body, is_diff) = match block {
                PromptBlock::Diff(diff) => (diff.patch.as_str(), true),
                PromptBlock::Comment(comment) => (comment.comment_body.as_str(), false),
            };
            for text_line in body.lines() {
                lines.push(Line::from(Span::styled(
                    text_line.to_string(),
                    line_style(text_line, is_diff),
                )));
            }
        }
    }

    if let Some(status) = &app.status {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::NONE))
        .scroll((app.scroll_offset, 0))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn line_style(line: &str, is_diff: bool) -> Style {
    if !is_diff {
        return Style::default().fg(Color::White);
    }
    if line.starts_with("diff --git") {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else if line.starts_with("+++") || line.starts_with("---") {
        Style::default().fg(Color::DarkGray)
    } else if line.starts_with('+') {
        Style::default().fg(Color::Green)
    } else if line.starts_with('-') {
        Style::default().fg(Color::Red)
    } else if line.starts_with("@@") {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn with_cursor(text: &str, cursor_pos: usize) -> String {
    let mut out: String = text.chars().take(cursor_pos).collect();
    out.push('▏');
    out.extend(text.chars().skip(cursor_pos));
    out
}
