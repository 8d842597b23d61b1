use std::collections::HashSet;

use crate::config::AppConfig;
use crate::domain::assembler::{self, AssembleInput, SelectionState};
use crate::domain::block_format;
use crate::domain::diff_segment::{self, SegmentedDiff};
use crate::domain::selection_payload::selection_label;
use crate::domain::template::{self, Slots};
use crate::domain::types::{PrContext, PrListItem, PromptBlock};

/// Application state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Loading PR list
    LoadingPrList,
    /// PR picker screen
    PrPicker,
    /// Loading PR data from GitHub
    LoadingPr,
    /// Choosing sections for the prompt
    Composing,
    /// Choosing files of the active diff
    PickingFiles,
    /// Editing the free-form instructions
    EditingText,
    /// Error state
    Error(String),
}

/// The main application
pub struct App {
    /// Current state
    pub state: AppState,
    /// PR context (absent for a local diff)
    pub pr: Option<PrContext>,
    /// Prompt sections in display order
    pub blocks: Vec<PromptBlock>,
    pub selection: SelectionState,
    /// Block ids shown folded in the list
    pub collapsed: HashSet<String>,
    /// Highlighted block
    pub cursor: usize,
    /// Draft file selection while the picker is open
    pub pending_files: HashSet<String>,
    /// Highlighted file in the picker
    pub file_cursor: usize,
    /// Active template mode
    pub mode: String,
    /// Free-form instructions
    pub user_text: String,
    /// Cursor position in the instructions, in chars
    pub cursor_pos: usize,
    /// Scroll offset for the preview
    pub scroll_offset: u16,
    /// Status message
    pub status: Option<String>,
    /// Should quit
    pub should_quit: bool,
    /// PR list for picker
    pub pr_list: Vec<PrListItem>,
    /// Selected index in PR picker
    pub picker_selected: usize,
    /// Currently selected repo (owner, name)
    pub current_repo: Option<(String, String)>,
    pub current_pr_number: Option<u32>,
    /// Commit SHAs to add as extra diff blocks
    pub commits: Vec<String>,
}

impl App {
    pub fn new(mode: &str) -> Self {
        Self {
            state: AppState::LoadingPr,
            pr: None,
            blocks: Vec::new(),
            selection: SelectionState::default(),
            collapsed: HashSet::new(),
            cursor: 0,
            pending_files: HashSet::new(),
            file_cursor: 0,
            mode: mode.to_string(),
            user_text: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            status: None,
            should_quit: false,
            pr_list: Vec::new(),
            picker_selected: 0,
            current_repo: None,
            current_pr_number: None,
            commits: Vec::new(),
        }
    }

    /// Create app starting with PR picker for a specific repo
    pub fn new_with_picker(owner: &str, repo: &str, mode: &str) -> Self {
        let mut app = Self::new(mode);
        app.state = AppState::LoadingPrList;
        app.current_repo = Some((owner.to_string(), repo.to_string()));
        app
    }

    /// Install a new block list and reset selection to its defaults
    pub fn load_blocks(&mut self, pr: Option<PrContext>, blocks: Vec<PromptBlock>) {
        self.pr = pr;
        self.blocks = blocks;
        self.reset_selection();
        self.state = AppState::Composing;
    }

    /// Recompute selection and fold state from the current blocks
    pub fn reset_selection(&mut self) {
        self.selection = SelectionState::initialize(&self.blocks, None);
        self.collapsed = assembler::default_collapsed(&self.blocks);
        self.cursor = self.cursor.min(self.blocks.len().saturating_sub(1));
        self.scroll_offset = 0;
        tracing::debug!(
            blocks = self.blocks.len(),
            selected = self.selection.selected_blocks.len(),
            "selection reset to defaults"
        );
    }

    pub fn current_block(&self) -> Option<&PromptBlock> {
        self.blocks.get(self.cursor)
    }

    pub fn cursor_down(&mut self) {
        if self.cursor < self.blocks.len().saturating_sub(1) {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Toggle whether the highlighted block goes into the prompt
    pub fn toggle_current(&mut self) {
        if let Some(id) = self.current_block().map(|b| b.id().to_string()) {
            self.selection.toggle_block(&id);
        }
    }

    pub fn toggle_collapsed_current(&mut self) {
        if let Some(id) = self.current_block().map(|b| b.id().to_string())
            && !self.collapsed.remove(&id)
        {
            self.collapsed.insert(id);
        }
    }

    pub fn is_active_diff(&self, block: &PromptBlock) -> bool {
        self.selection.active_diff.as_deref() == Some(block.id())
    }

    /// Files of the active diff block, segmented
    pub fn active_diff_files(&self) -> SegmentedDiff {
        self.selection
            .active_diff
            .as_deref()
            .and_then(|id| {
                self.blocks
                    .iter()
                    .filter_map(PromptBlock::as_diff)
                    .find(|diff| diff.id == id)
            })
            .map(|diff| diff_segment::split(&diff.patch))
            .unwrap_or_default()
    }

    /// "3 of 5 files" for the active diff
    pub fn file_label(&self) -> Option<String> {
        self.selection.active_diff.as_ref()?;
        let all = self.active_diff_files().paths();
        let selected = self.selection.files_for(&all);
        let count = all.iter().filter(|p| selected.contains(*p)).count();
        Some(selection_label(count, all.len()))
    }

    /// Open the file picker when the highlighted block is the active diff
    pub fn open_file_picker(&mut self) -> bool {
        let Some(block) = self.current_block() else {
            return false;
        };
        if !self.is_active_diff(block) {
            return false;
        }
        let all = self.active_diff_files().paths();
        self.pending_files = self.selection.files_for(&all);
        self.file_cursor = 0;
        self.state = AppState::PickingFiles;
        true
    }

    pub fn file_down(&mut self) {
        if self.file_cursor < self.active_diff_files().len().saturating_sub(1) {
            self.file_cursor += 1;
        }
    }

    pub fn file_up(&mut self) {
        self.file_cursor = self.file_cursor.saturating_sub(1);
    }

    pub fn toggle_file(&mut self) {
        let paths = self.active_diff_files().paths();
        if let Some(path) = paths.get(self.file_cursor)
            && !self.pending_files.remove(path)
        {
            self.pending_files.insert(path.clone());
        }
    }

    pub fn select_all_files(&mut self) {
        self.pending_files = self.active_diff_files().paths().into_iter().collect();
    }

    pub fn select_no_files(&mut self) {
        self.pending_files.clear();
    }

    /// Commit the picker draft into the selection
    pub fn confirm_files(&mut self) {
        let files = std::mem::take(&mut self.pending_files);
        self.selection.set_selected_files(files);
        self.state = AppState::Composing;
    }

    pub fn cancel_files(&mut self) {
        self.pending_files.clear();
        self.state = AppState::Composing;
    }

    pub fn cycle_mode(&mut self, config: &AppConfig) {
        self.mode = config.templates.next_mode(&self.mode);
        self.scroll_offset = 0;
    }

    /// Mode template with PR slots filled in
    pub fn rendered_template(&self, config: &AppConfig) -> String {
        let slots = match &self.pr {
            Some(pr) => template::pr_slots(pr),
            None => marker_slots(),
        };
        template::render(config.template_for(&self.mode), &slots)
    }

    /// The full prompt as it would be copied right now
    pub fn assembled_prompt(&self, config: &AppConfig) -> String {
        let template = self.rendered_template(config);
        let input = AssembleInput {
            template: &template,
            user_text: &self.user_text,
            blocks: &self.blocks,
            selection: &self.selection,
        };
        assembler::assemble(&input)
    }

    pub fn nothing_to_send(&self, config: &AppConfig) -> bool {
        let template = self.rendered_template(config);
        let input = AssembleInput {
            template: &template,
            user_text: &self.user_text,
            blocks: &self.blocks,
            selection: &self.selection,
        };
        assembler::nothing_to_send(&input)
    }

    /// Text of the highlighted section on its own
    pub fn current_section_text(&self) -> Option<String> {
        self.current_block().map(block_format::format)
    }

    /// Enter edit mode for the instructions
    pub fn start_editing(&mut self) {
        self.cursor_pos = self.user_text.chars().count();
        self.state = AppState::EditingText;
    }

    /// Exit edit mode
    pub fn stop_editing(&mut self) {
        self.state = AppState::Composing;
    }

    /// Insert character at cursor
    pub fn insert_char(&mut self, c: char) {
        let at = byte_index(&self.user_text, self.cursor_pos);
        self.user_text.insert(at, c);
        self.cursor_pos += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor_pos > 0 {
            let at = byte_index(&self.user_text, self.cursor_pos - 1);
            self.user_text.remove(at);
            self.cursor_pos -= 1;
        }
    }

    pub fn clear_text(&mut self) {
        self.user_text.clear();
        self.cursor_pos = 0;
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor_pos < self.user_text.chars().count() {
            self.cursor_pos += 1;
        }
    }

    /// Move picker selection down
    pub fn picker_down(&mut self) {
        if self.picker_selected < self.pr_list.len().saturating_sub(1) {
            self.picker_selected += 1;
        }
    }

    /// Move picker selection up
    pub fn picker_up(&mut self) {
        self.picker_selected = self.picker_selected.saturating_sub(1);
    }

    /// Get currently selected PR in picker
    pub fn selected_pr(&self) -> Option<&PrListItem> {
        self.pr_list.get(self.picker_selected)
    }

    /// Reset for loading a new PR
    pub fn reset_for_new_pr(&mut self) {
        self.pr = None;
        self.blocks.clear();
        self.selection = SelectionState::default();
        self.collapsed.clear();
        self.cursor = 0;
        self.scroll_offset = 0;
        self.status = None;
    }
}

/// Slots for a prompt without PR metadata: only the diff marker survives
fn marker_slots() -> Slots {
    let mut slots = Slots::new();
    let token = format!("{{{{{}}}}}", assembler::DIFF_TOKEN_NAME);
    slots.insert(assembler::DIFF_TOKEN_NAME.to_string(), Some(token));
    slots
}

fn byte_index(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
