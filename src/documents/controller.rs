use std::collections::HashSet;
use std::time::{Duration, Instant};

use super::card::DocumentCard;
use crate::api::{ApiError, ApiRequest, DocumentList, RequestToken};
use crate::notify::Message;

pub const LOADING_TEXT: &str = "Loading documents...";
pub const EMPTY_TEXT: &str = "No documents yet. Upload your first PDF to get started!";
pub const LOAD_FAILED_TEXT: &str = "Failed to load documents";
pub const LOAD_ERROR_TEXT: &str = "Error loading documents. Please try again.";

pub const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this document? This action cannot be undone.";
pub const DELETE_SUCCESS: &str = "Document deleted successfully";
pub const DELETE_FAILED: &str = "Failed to delete document";
pub const DELETE_TRANSPORT_ERROR: &str = "An error occurred while deleting the document";

pub const REFRESH_LABEL: &str = "🔄 Refresh";
pub const REFRESHING_LABEL: &str = "🔄 Refreshing...";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListView {
    #[default]
    Idle,
    Loading,
    Empty,
    Cards(Vec<DocumentCard>),
    /// The server answered, but not with a document list.
    LoadFailed,
    /// No usable answer at all.
    LoadError,
}

impl ListView {
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ListView::Idle | ListView::Cards(_) => None,
            ListView::Loading => Some(LOADING_TEXT),
            ListView::Empty => Some(EMPTY_TEXT),
            ListView::LoadFailed => Some(LOAD_FAILED_TEXT),
            ListView::LoadError => Some(LOAD_ERROR_TEXT),
        }
    }
}

/// Outcome of a delete request.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteSettlement {
    pub alert: Message,
    pub reload: Option<ApiRequest>,
}

#[derive(Debug, Default)]
pub struct DocumentListController {
    view: ListView,
    loading: Option<RequestToken>,
    last_token: RequestToken,
    refreshing: bool,
    last_loaded: Option<Instant>,
    pending_confirmation: Option<String>,
    deleting: HashSet<String>,
}

impl DocumentListController {
    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Starts a load, showing the loading placeholder until it settles.
    /// Any load still in flight is superseded.
    pub fn load(&mut self) -> ApiRequest {
        self.view = ListView::Loading;
        self.start_request()
    }

    /// Starts a load that keeps the current cards on screen.
    pub fn reload_in_background(&mut self) -> ApiRequest {
        self.start_request()
    }

    fn start_request(&mut self) -> ApiRequest {
        let token = self.last_token.next();
        self.last_token = token;
        self.loading = Some(token);
        ApiRequest::ListDocuments { token }
    }

    /// Refresh button. Does nothing while a refresh is already running.
    pub fn refresh(&mut self) -> Option<ApiRequest> {
        if self.refreshing {
            return None;
        }
        self.refreshing = true;
        Some(self.load())
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn refresh_label(&self) -> &'static str {
        if self.refreshing {
            REFRESHING_LABEL
        } else {
            REFRESH_LABEL
        }
    }

    /// Applies a list result. Results of superseded loads are dropped.
    pub fn finish_load(
        &mut self,
        token: RequestToken,
        result: Result<DocumentList, ApiError>,
        now: Instant,
    ) -> bool {
        if self.loading != Some(token) {
            tracing::debug!(?token, "Ignoring stale document list");
            return false;
        }
        self.loading = None;
        self.refreshing = false;
        self.last_loaded = Some(now);

        self.view = match result {
            Ok(DocumentList {
                documents: Some(documents),
                ..
            }) => {
                if documents.is_empty() {
                    ListView::Empty
                } else {
                    ListView::Cards(documents.iter().map(DocumentCard::from_summary).collect())
                }
            }
            Ok(_) => {
                tracing::warn!("Document list response has no documents field");
                ListView::LoadFailed
            }
            Err(e) if e.is_http() => ListView::LoadFailed,
            Err(e) => {
                tracing::error!("Error loading documents: {}", e);
                ListView::LoadError
            }
        };

        true
    }

    fn has_documents_in_progress(&self) -> bool {
        match &self.view {
            ListView::Cards(cards) => cards.iter().any(|card| card.in_progress),
            _ => false,
        }
    }

    /// True when documents are still being processed server-side and the
    /// last load is older than `interval`. A zero interval disables polling.
    pub fn poll_due(&self, now: Instant, interval: Duration) -> bool {
        if interval.is_zero() || self.is_loading() || !self.has_documents_in_progress() {
            return false;
        }
        self.last_loaded
            .map_or(true, |loaded| now.duration_since(loaded) >= interval)
    }

    pub fn next_poll(&self, interval: Duration) -> Option<Instant> {
        if interval.is_zero() || self.is_loading() || !self.has_documents_in_progress() {
            return None;
        }
        self.last_loaded.map(|loaded| loaded + interval)
    }

    /// Delete button on a card: asks for confirmation first.
    pub fn request_delete(&mut self, document_id: impl Into<String>) {
        self.pending_confirmation = Some(document_id.into());
    }

    pub fn pending_confirmation(&self) -> Option<&str> {
        self.pending_confirmation.as_deref()
    }

    /// Answer to the confirmation prompt. Declining sends nothing.
    pub fn confirm_delete(&mut self, accepted: bool) -> Option<ApiRequest> {
        let document_id = self.pending_confirmation.take()?;
        if !accepted {
            tracing::debug!(%document_id, "Delete cancelled");
            return None;
        }
        if !self.deleting.insert(document_id.clone()) {
            return None;
        }
        Some(ApiRequest::Delete { document_id })
    }

    pub fn is_deleting(&self, document_id: &str) -> bool {
        self.deleting.contains(document_id)
    }

    pub fn finish_delete(
        &mut self,
        document_id: &str,
        result: Result<(), ApiError>,
    ) -> DeleteSettlement {
        self.deleting.remove(document_id);

        match result {
            Ok(()) => DeleteSettlement {
                alert: Message::success(DELETE_SUCCESS),
                reload: Some(self.load()),
            },
            Err(e) if e.is_http() => DeleteSettlement {
                alert: Message::error(e.server_message_or(DELETE_FAILED)),
                reload: None,
            },
            Err(e) => {
                tracing::error!("Delete error: {}", e);
                DeleteSettlement {
                    alert: Message::error(DELETE_TRANSPORT_ERROR),
                    reload: None,
                }
            }
        }
    }
}
