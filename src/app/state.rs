use crate::upload::{DropZone, FileSelectionDisplay, SelectedFile};

/// Everything the upload form holds between frames.
#[derive(Debug, Default)]
pub struct FormState {
    pub file: Option<SelectedFile>,
    pub title: String,
    pub display: FileSelectionDisplay,
    pub drop_zone: DropZone,
}

impl FormState {
    pub fn select(&mut self, file: SelectedFile) {
        tracing::info!(name = %file.name, size = file.size, "File selected");
        self.display.show(&file);
        self.file = Some(file);
    }

    /// Clears file and title and puts the drop zone back to its placeholder.
    pub fn reset(&mut self) {
        self.file = None;
        self.title.clear();
        self.display.reset();
    }
}

/// The session panel's editable text.
#[derive(Debug, Default)]
pub struct SessionForm {
    pub curl_text: String,
    pub error: Option<String>,
}
