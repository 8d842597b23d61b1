use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::domain::types::PrListItem;
use crate::ui::util::truncate;

const DIM: Style = Style::new().fg(Color::DarkGray);

pub fn render_picker(frame: &mut Frame, app: &App, area: Rect) {
    let repo = app
        .current_repo
        .as_ref()
        .map(|(owner, name)| format!("{}/{}", owner, name))
        .unwrap_or_default();
    let drafts = app.pr_list.iter().filter(|pr| pr.is_draft).count();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                "PULL REQUESTS",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", DIM),
            Span::styled(repo, Style::default().fg(Color::White)),
            Span::styled(
                format!("  {} open, {} draft", app.pr_list.len() - drafts, drafts),
                DIM,
            ),
        ]),
        Line::from(""),
    ];

    if app.pr_list.is_empty() {
        lines.push(Line::from(Span::styled("No open PRs", DIM)));
    }

    let title_width = area.width.saturating_sub(16) as usize;
    let mut previous_draft = None;
    for (i, pr) in app.pr_list.iter().enumerate() {
        // Drafts sort last; separate them once
        if previous_draft == Some(false) && pr.is_draft {
            lines.push(Line::from(Span::styled("── drafts ──", DIM)));
        }
        previous_draft = Some(pr.is_draft);

        let current = app.current_pr_number == Some(pr.number);
        lines.extend(pr_lines(pr, i == app.picker_selected, current, title_width));
    }

    let frame_block = Block::default()
        .borders(Borders::ALL)
        .border_style(DIM)
        .title(" Pick a PR to compose from ");

    frame.render_widget(
        Paragraph::new(lines).block(frame_block).wrap(Wrap { trim: false }),
        area,
    );
}

fn pr_lines(pr: &PrListItem, highlighted: bool, current: bool, width: usize) -> [Line<'static>; 2] {
    let title_style = match (highlighted, pr.is_draft) {
        (true, _) => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        (false, true) => DIM,
        (false, false) => Style::default().fg(Color::White),
    };
    let badge = if current { " (loaded)" } else { "" };

    [
        Line::from(vec![
            Span::styled(if highlighted { "▶ " } else { "  " }, Style::default().fg(Color::Cyan)),
            Span::styled(format!("#{:<6}", pr.number), Style::default().fg(Color::Blue)),
            Span::styled(truncate(&pr.title, width), title_style),
            Span::styled(badge, Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::raw("        "),
            Span::styled(format!("@{}", pr.author), DIM),
            Span::styled(" on ", DIM),
            Span::styled(pr.head_branch.clone(), Style::default().fg(Color::Magenta)),
            Span::styled(format!("  +{}", pr.additions), Style::default().fg(Color::Green)),
            Span::styled(format!(" -{}", pr.deletions), Style::default().fg(Color::Red)),
        ]),
    ]
}
