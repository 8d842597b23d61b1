mod components;
mod util;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, AppState};

use components::{block_list, file_picker, header, keybindings, picker, preview, status};

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Main content
            Constraint::Length(3), // Keybindings bar
        ])
        .split(frame.area());

    let main_area = chunks[0];

    match &app.state {
        AppState::LoadingPrList => status::render_loading(frame, main_area, "Fetching PR list..."),
        AppState::LoadingPr => status::render_loading(frame, main_area, "Fetching PR from GitHub..."),
        AppState::Error(msg) => status::render_error(frame, main_area, msg, !app.blocks.is_empty()),
        AppState::PrPicker => picker::render_picker(frame, app, main_area),
        AppState::Composing | AppState::EditingText => render_composer(frame, app, main_area),
        AppState::PickingFiles => {
            render_composer(frame, app, main_area);
            file_picker::render_file_picker(frame, app, main_area);
        }
    }

    keybindings::render_keybindings(frame, app, chunks[1]);
}

fn render_composer(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(10),   // Blocks and preview
        ])
        .split(area);

    header::render_header(frame, app, vertical[0]);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(50)])
        .split(vertical[1]);

    block_list::render_block_list(frame, app, horizontal[0]);
    preview::render_preview(frame, app, horizontal[1]);
}
