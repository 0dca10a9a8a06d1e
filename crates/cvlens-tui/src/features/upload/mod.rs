//! Upload intake: the pending-file slot and the file prompt.

mod render;
mod update;

use cvlens_core::upload::UploadSlot;
pub use render::render_upload;
pub use update::*;

use crate::common::TextField;

#[derive(Debug, Clone, Default)]
pub struct UploadState {
    pub slot: UploadSlot,
    /// Open file prompt (the picker admission source).
    pub prompt: Option<TextField>,
}

impl UploadState {
    pub fn is_prompt_open(&self) -> bool {
        self.prompt.is_some()
    }
}
