pub mod assembler;
pub mod block_format;
pub mod blocks;
pub mod diff_segment;
pub mod github;
pub mod launch;
pub mod selection_payload;
pub mod template;
pub mod types;
