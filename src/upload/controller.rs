use std::time::{Duration, Instant};

use thiserror::Error;

use super::types::{SelectedFile, UploadOutcome};
use crate::api::{ApiError, ApiRequest, RequestToken, UploadResponse};
use crate::notify::Message;

/// Pause between a successful upload and opening the document's page.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1000);

pub const UPLOAD_SUCCESS: &str = "✅ PDF uploaded successfully! Processing started...";
pub const UPLOAD_FAILED: &str = "Upload failed";
pub const UPLOAD_TRANSPORT_ERROR: &str = "An error occurred during upload";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("⚠️ Please select a PDF file")]
    NoFileSelected,

    #[error("❌ Only PDF files are allowed")]
    InvalidFileType { name: String },

    #[error("⏳ An upload is already in progress")]
    UploadInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Submitting {
        token: RequestToken,
    },
}

/// What the form should do once an upload has finished.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub outcome: UploadOutcome,
    pub message: Message,
    pub redirect: Option<PendingRedirect>,
}

/// Reload the list and open the new document once `due` has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRedirect {
    pub document_id: String,
    pub due: Instant,
}

#[derive(Debug, Default)]
pub struct UploadController {
    phase: UploadPhase,
    last_token: RequestToken,
}

impl UploadController {
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, UploadPhase::Submitting { .. })
    }

    /// Validates the form and, when it passes, moves to `Submitting` and
    /// returns the request to send.
    pub fn submit(
        &mut self,
        file: Option<&SelectedFile>,
        title: &str,
    ) -> Result<ApiRequest, ValidationError> {
        if self.is_submitting() {
            return Err(ValidationError::UploadInProgress);
        }

        let file = file.ok_or(ValidationError::NoFileSelected)?;
        if !file.is_pdf() {
            return Err(ValidationError::InvalidFileType {
                name: file.name.clone(),
            });
        }

        let title = title.trim();
        let token = self.last_token.next();
        self.last_token = token;
        self.phase = UploadPhase::Submitting { token };

        Ok(ApiRequest::Upload {
            token,
            file: file.clone(),
            title: (!title.is_empty()).then(|| title.to_string()),
        })
    }

    /// Consumes the upload's result. The controller is back in `Idle` after
    /// any result for the current request; results for older requests are
    /// ignored and return `None`.
    pub fn settle(
        &mut self,
        token: RequestToken,
        result: Result<UploadResponse, ApiError>,
        now: Instant,
    ) -> Option<Settlement> {
        if self.phase != (UploadPhase::Submitting { token }) {
            tracing::debug!(?token, "Ignoring stale upload result");
            return None;
        }
        self.phase = UploadPhase::Idle;

        let settlement = match result {
            Ok(uploaded) => Settlement {
                outcome: UploadOutcome::succeeded(uploaded.document_id.clone()),
                message: Message::success(UPLOAD_SUCCESS),
                redirect: Some(PendingRedirect {
                    document_id: uploaded.document_id,
                    due: now + REDIRECT_DELAY,
                }),
            },
            Err(e) if e.is_http() => {
                let text = format!("❌ {}", e.server_message_or(UPLOAD_FAILED));
                Settlement {
                    outcome: UploadOutcome::failed(text.clone()),
                    message: Message::error(text),
                    redirect: None,
                }
            }
            Err(e) => {
                tracing::error!("Upload error: {}", e);
                Settlement {
                    outcome: UploadOutcome::failed(UPLOAD_TRANSPORT_ERROR),
                    message: Message::error(UPLOAD_TRANSPORT_ERROR),
                    redirect: None,
                }
            }
        };

        Some(settlement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::AlertKind;
    use reqwest::StatusCode;

    fn pdf(name: &str) -> SelectedFile {
        SelectedFile::new(name, 1024, format!("/tmp/{}", name))
    }

    fn token_of(request: &ApiRequest) -> RequestToken {
        match request {
            ApiRequest::Upload { token, .. } => *token,
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn no_file_fails_validation() {
        let mut controller = UploadController::default();
        let err = controller.submit(None, "").unwrap_err();

        assert_eq!(err, ValidationError::NoFileSelected);
        assert_eq!(err.to_string(), "⚠️ Please select a PDF file");
        assert_eq!(controller.phase, UploadPhase::Idle);
    }

    #[test]
    fn non_pdf_fails_validation() {
        let mut controller = UploadController::default();
        let err = controller.submit(Some(&pdf("report.txt")), "").unwrap_err();

        assert_eq!(err.to_string(), "❌ Only PDF files are allowed");
        assert!(!controller.is_submitting());
    }

    #[test]
    fn uppercase_extension_passes() {
        let mut controller = UploadController::default();
        let request = controller.submit(Some(&pdf("report.PDF")), "").unwrap();

        assert!(controller.is_submitting());
        match request {
            ApiRequest::Upload { file, title, .. } => {
                assert_eq!(file.name, "report.PDF");
                assert_eq!(title, None);
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn title_is_trimmed_and_blank_omitted() {
        let mut controller = UploadController::default();
        let request = controller.submit(Some(&pdf("a.pdf")), "  Annual report \n").unwrap();
        match request {
            ApiRequest::Upload { title, .. } => assert_eq!(title.as_deref(), Some("Annual report")),
            other => panic!("unexpected request {other:?}"),
        }

        let mut controller = UploadController::default();
        match controller.submit(Some(&pdf("a.pdf")), "   ").unwrap() {
            ApiRequest::Upload { title, .. } => assert_eq!(title, None),
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn second_submit_while_uploading_is_rejected() {
        let mut controller = UploadController::default();
        controller.submit(Some(&pdf("a.pdf")), "").unwrap();
        assert_eq!(
            controller.submit(Some(&pdf("b.pdf")), ""),
            Err(ValidationError::UploadInProgress)
        );
    }

    #[test]
    fn success_schedules_redirect() {
        let now = Instant::now();
        let mut controller = UploadController::default();
        let token = token_of(&controller.submit(Some(&pdf("a.pdf")), "").unwrap());

        let response = UploadResponse {
            document_id: "abc".into(),
            task_id: None,
            status: Some("pending".into()),
            message: None,
        };
        let settlement = controller.settle(token, Ok(response), now).unwrap();

        assert_eq!(controller.phase, UploadPhase::Idle);
        assert!(settlement.outcome.success);
        assert_eq!(settlement.message.kind, AlertKind::Success);
        assert_eq!(
            settlement.redirect,
            Some(PendingRedirect {
                document_id: "abc".into(),
                due: now + REDIRECT_DELAY,
            })
        );
    }

    #[test]
    fn http_failure_shows_server_error() {
        let mut controller = UploadController::default();
        let token = token_of(&controller.submit(Some(&pdf("a.pdf")), "").unwrap());

        let err = ApiError::Http {
            status: StatusCode::BAD_REQUEST,
            message: Some("too large".into()),
        };
        let settlement = controller.settle(token, Err(err), Instant::now()).unwrap();

        assert_eq!(settlement.message.text, "❌ too large");
        assert_eq!(settlement.message.kind, AlertKind::Error);
        assert_eq!(settlement.redirect, None);
        assert!(!controller.is_submitting());
    }

    #[test]
    fn http_failure_without_message_uses_fallback() {
        let mut controller = UploadController::default();
        let token = token_of(&controller.submit(Some(&pdf("a.pdf")), "").unwrap());

        let err = ApiError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        let settlement = controller.settle(token, Err(err), Instant::now()).unwrap();
        assert_eq!(settlement.message.text, "❌ Upload failed");
    }

    #[test]
    fn transport_failure_uses_generic_message() {
        let mut controller = UploadController::default();
        let token = token_of(&controller.submit(Some(&pdf("a.pdf")), "").unwrap());

        let err = ApiError::Decode("expected value at line 1".into());
        let settlement = controller.settle(token, Err(err), Instant::now()).unwrap();

        assert_eq!(settlement.message.text, UPLOAD_TRANSPORT_ERROR);
        assert!(!settlement.outcome.success);
        assert!(!controller.is_submitting());
    }

    #[test]
    fn stale_result_is_ignored() {
        let mut controller = UploadController::default();
        let first = token_of(&controller.submit(Some(&pdf("a.pdf")), "").unwrap());
        let err = ApiError::Decode("boom".into());
        controller.settle(first, Err(err), Instant::now()).unwrap();

        let second = token_of(&controller.submit(Some(&pdf("b.pdf")), "").unwrap());
        assert!(second > first);

        let late = ApiError::Decode("late".into());
        assert!(controller.settle(first, Err(late), Instant::now()).is_none());
        assert_eq!(controller.phase, UploadPhase::Submitting { token: second });
    }
}
