use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{DocumentList, UploadResponse};
use crate::session::Session;
use crate::upload::SelectedFile;

pub const CSRF_HEADER: &str = "x-csrftoken";

const UPLOAD_PATH: &str = "api/pdf/upload/";
const DOCUMENTS_PATH: &str = "api/pdf/documents/";

/// Thin client over the server's `/api/pdf` endpoints.
#[derive(Clone, Debug)]
pub struct PdfApiClient {
    client: reqwest::Client,
    session: Session,
}

impl PdfApiClient {
    pub fn new(session: Session) -> Self {
        Self {
            client: reqwest::Client::new(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn upload(
        &self,
        file: &SelectedFile,
        title: Option<&str>,
    ) -> Result<UploadResponse, ApiError> {
        tracing::info!(name = %file.name, size = file.size, "Uploading PDF");

        let bytes = tokio::fs::read(&file.path).await?;
        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str("application/pdf")?;

        let mut form = Form::new().part("file", part);
        if let Some(title) = title {
            form = form.text("title", title.to_string());
        }

        let request = self
            .client
            .post(self.session.url(UPLOAD_PATH))
            .headers(self.headers(true)?)
            .multipart(form);

        let uploaded: UploadResponse = Self::send(request).await?;
        tracing::info!(
            document_id = %uploaded.document_id,
            task_id = uploaded.task_id.as_deref(),
            status = uploaded.status.as_deref(),
            message = uploaded.message.as_deref(),
            "Upload accepted"
        );
        Ok(uploaded)
    }

    pub async fn list_documents(&self) -> Result<DocumentList, ApiError> {
        let request = self
            .client
            .get(self.session.url(DOCUMENTS_PATH))
            .headers(self.headers(false)?);

        let list: DocumentList = Self::send(request).await?;
        tracing::debug!(
            count = list.documents.as_ref().map(Vec::len),
            total = list.total_count,
            "Fetched document list"
        );
        Ok(list)
    }

    pub async fn delete_document(&self, document_id: &str) -> Result<(), ApiError> {
        tracing::info!(document_id, "Deleting document");

        let url = self
            .session
            .url(&format!("{}{}/delete/", DOCUMENTS_PATH, document_id));
        let request = self.client.delete(url).headers(self.headers(true)?);

        let _: serde_json::Value = Self::send(request).await?;
        Ok(())
    }

    fn headers(&self, with_csrf: bool) -> Result<HeaderMap, ApiError> {
        let mut headers = self.session.extra_headers().clone();

        if let Some(cookies) = self.session.cookies() {
            headers.insert(COOKIE, HeaderValue::from_str(cookies)?);
        }

        if with_csrf {
            match self.session.csrf_token() {
                Some(token) => {
                    headers.insert(CSRF_HEADER, HeaderValue::from_str(&token)?);
                }
                None => {
                    tracing::warn!("No CSRF cookie in session, sending request without token")
                }
            }
        }

        Ok(headers)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()));
        }

        // A failure body that is not JSON never reached the API views.
        let body: serde_json::Value =
            serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let message = body.get("error").and_then(|e| e.as_str()).map(str::to_string);
        tracing::warn!(%status, message = message.as_deref(), "Request failed");
        Err(ApiError::Http { status, message })
    }
}
