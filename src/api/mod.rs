mod client;
mod error;
mod types;

pub use client::PdfApiClient;
pub use error::ApiError;
pub use types::{DocumentList, DocumentSummary, UploadResponse};

use crate::upload::SelectedFile;

/// Identifies one in-flight request of a controller. Tokens only grow, so a
/// result carrying an older token than the controller's current one is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    Upload {
        token: RequestToken,
        file: SelectedFile,
        title: Option<String>,
    },
    ListDocuments {
        token: RequestToken,
    },
    Delete {
        document_id: String,
    },
}

#[derive(Debug)]
pub enum ApiEvent {
    Uploaded {
        token: RequestToken,
        result: Result<UploadResponse, ApiError>,
    },
    DocumentsLoaded {
        token: RequestToken,
        result: Result<DocumentList, ApiError>,
    },
    Deleted {
        document_id: String,
        result: Result<(), ApiError>,
    },
}

/// Runs one request to completion and packages the result for the UI thread.
pub async fn execute(client: &PdfApiClient, request: ApiRequest) -> ApiEvent {
    match request {
        ApiRequest::Upload { token, file, title } => ApiEvent::Uploaded {
            token,
            result: client.upload(&file, title.as_deref()).await,
        },
        ApiRequest::ListDocuments { token } => ApiEvent::DocumentsLoaded {
            token,
            result: client.list_documents().await,
        },
        ApiRequest::Delete { document_id } => {
            let result = client.delete_document(&document_id).await;
            ApiEvent::Deleted {
                document_id,
                result,
            }
        }
    }
}
