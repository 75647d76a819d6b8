use std::path::{Path, PathBuf};

/// The file currently chosen in the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            path: path.into(),
        }
    }

    /// Reads name and size from the filesystem.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, metadata.len(), path))
    }

    pub fn is_pdf(&self) -> bool {
        self.name.to_lowercase().ends_with(".pdf")
    }
}

/// Result of one upload attempt, as reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub success: bool,
    pub document_id: Option<String>,
    pub error: Option<String>,
}

impl UploadOutcome {
    pub fn succeeded(document_id: impl Into<String>) -> Self {
        Self {
            success: true,
            document_id: Some(document_id.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            document_id: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn pdf_extension_is_case_insensitive() {
        assert!(SelectedFile::new("report.PDF", 1, "report.PDF").is_pdf());
        assert!(SelectedFile::new("report.pdf", 1, "report.pdf").is_pdf());
        assert!(!SelectedFile::new("report.txt", 1, "report.txt").is_pdf());
        assert!(!SelectedFile::new("pdf", 1, "pdf").is_pdf());
    }

    #[test]
    fn from_path_reads_size() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.4 test").unwrap();

        let selected = SelectedFile::from_path(file.path()).unwrap();
        assert_eq!(selected.size, 13);
        assert!(selected.is_pdf());
    }
}
