use super::types::SelectedFile;
use crate::utils::format::format_file_size;

pub const PLACEHOLDER_TEXT: &str = "Click to browse or drag and drop PDF file here";
pub const FALLBACK_HINT: &str = "Maximum file size: 10MB";

/// The label and hint shown inside the drop zone.
#[derive(Debug, Clone)]
pub struct FileSelectionDisplay {
    text: String,
    hint: String,
    original_hint: Option<String>,
    has_file: bool,
}

impl FileSelectionDisplay {
    pub fn new(hint: impl Into<String>) -> Self {
        Self {
            text: PLACEHOLDER_TEXT.to_string(),
            hint: hint.into(),
            original_hint: None,
            has_file: false,
        }
    }

    pub fn show(&mut self, file: &SelectedFile) {
        // The placeholder hint is captured the first time it gets overwritten.
        if self.original_hint.is_none() {
            self.original_hint = Some(self.hint.clone());
        }
        self.has_file = true;
        self.text = format!("Selected: {}", file.name);
        self.hint = format!("Size: {}", format_file_size(file.size));
    }

    pub fn reset(&mut self) {
        self.has_file = false;
        self.text = PLACEHOLDER_TEXT.to_string();
        self.hint = self
            .original_hint
            .clone()
            .unwrap_or_else(|| FALLBACK_HINT.to_string());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn has_file(&self) -> bool {
        self.has_file
    }
}

impl Default for FileSelectionDisplay {
    fn default() -> Self {
        Self::new(FALLBACK_HINT)
    }
}
