use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::domain::types::PromptBlock;
use crate::ui::util::truncate;

pub fn render_block_list(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "SECTIONS",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if app.blocks.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing to attach",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let width = area.width.saturating_sub(8) as usize;

    for (i, block) in app.blocks.iter().enumerate() {
        let is_cursor = i == app.cursor;
        let selected = app.selection.is_selected(block.id());
        let collapsed = app.collapsed.contains(block.id());

        let marker = if is_cursor { "▶ " } else { "  " };
        let check = if selected { "[x] " } else { "[ ] " };
        let title = truncate(block.header().trim_start_matches('#').trim(), width);

        let title_style = if is_cursor {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else if !selected || block.is_resolved_thread() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(
                check,
                Style::default().fg(if selected { Color::Green } else { Color::DarkGray }),
            ),
            Span::styled(title, title_style),
        ]));

        if !collapsed && let Some(detail) = detail_line(app, block) {
            lines.push(Line::from(vec![
                Span::styled("      ", Style::default()),
                Span::styled(truncate(&detail, width), Style::default().fg(Color::DarkGray)),
            ]));
        }
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(list, area);
}

fn detail_line(app: &App, block: &PromptBlock) -> Option<String> {
    match block {
        PromptBlock::Diff(_) if app.is_active_diff(block) => app.file_label(),
        PromptBlock::Diff(diff) => Some(format!("{} lines", diff.patch.lines().count())),
        PromptBlock::Comment(comment) => {
            let first = comment.comment_body.lines().find(|l| !l.trim().is_empty())?;
            Some(first.trim().to_string())
        }
    }
}
