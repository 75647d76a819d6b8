use serde::{Deserialize, Serialize};

/// One entry of the document list, as served by `GET /api/pdf/documents/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub document_id: String,
    pub title: String,
    pub processing_status: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub page_count: Option<u32>,
    pub upload_date: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub task_status: Option<String>,
}

impl DocumentSummary {
    /// Still moving through the server's processing pipeline.
    pub fn is_in_progress(&self) -> bool {
        matches!(self.processing_status.as_str(), "pending" | "processing")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub documents: Option<Vec<DocumentSummary>>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    pub document_id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
