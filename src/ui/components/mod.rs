pub mod block_list;
pub mod file_picker;
pub mod header;
pub mod keybindings;
pub mod picker;
pub mod preview;
pub mod status;
