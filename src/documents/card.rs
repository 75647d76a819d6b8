use chrono::{Local, TimeZone};

use crate::api::DocumentSummary;
use crate::utils::format::{format_date_in, format_file_size};

/// Display-ready view of one [`DocumentSummary`].
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentCard {
    pub document_id: String,
    pub title: String,
    pub status: String,
    pub status_class: String,
    pub status_label: String,
    pub size: String,
    pub pages: Option<String>,
    pub uploaded: String,
    pub error: Option<String>,
    pub in_progress: bool,
}

impl DocumentCard {
    pub fn from_summary(doc: &DocumentSummary) -> Self {
        Self::from_summary_in(doc, &Local)
    }

    pub fn from_summary_in<Tz>(doc: &DocumentSummary, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let error = match doc.processing_status.as_str() {
            "failed" => doc.error_message.clone().filter(|m| !m.trim().is_empty()),
            _ => None,
        };

        Self {
            document_id: doc.document_id.clone(),
            title: doc.title.clone(),
            status: doc.processing_status.clone(),
            status_class: format!("status-{}", doc.processing_status),
            status_label: capitalize(&doc.processing_status),
            size: format_file_size(doc.file_size.unwrap_or(0)),
            pages: doc
                .page_count
                .filter(|&pages| pages > 0)
                .map(|pages| format!("{} pages", pages)),
            uploaded: format_date_in(&doc.upload_date, tz),
            error,
            in_progress: doc.is_in_progress(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Open(String),
    Delete(String),
}

/// Decides what a click on a card means. Clicks inside the actions area
/// never open the card, and the delete action is consumed where it happens.
pub fn resolve_click(
    document_id: &str,
    card_clicked: bool,
    in_actions: bool,
    delete_clicked: bool,
) -> Option<CardAction> {
    if delete_clicked {
        Some(CardAction::Delete(document_id.to_string()))
    } else if card_clicked && !in_actions {
        Some(CardAction::Open(document_id.to_string()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn summary() -> DocumentSummary {
        DocumentSummary {
            document_id: "doc-1".into(),
            title: "<b>Invoice</b> & co".into(),
            processing_status: "completed".into(),
            file_size: Some(1536),
            page_count: Some(12),
            upload_date: "2024-01-05T15:45:00Z".into(),
            error_message: None,
            task_id: None,
            task_status: None,
        }
    }

    #[test]
    fn renders_all_fields() {
        let card = DocumentCard::from_summary_in(&summary(), &Utc);

        assert_eq!(card.title, "<b>Invoice</b> & co");
        assert_eq!(card.status_class, "status-completed");
        assert_eq!(card.status_label, "Completed");
        assert_eq!(card.size, "1.5 KB");
        assert_eq!(card.pages.as_deref(), Some("12 pages"));
        assert_eq!(card.uploaded, "Jan 5, 2024, 03:45 PM");
        assert_eq!(card.error, None);
        assert!(!card.in_progress);
    }

    #[test]
    fn page_count_omitted_when_absent_or_zero() {
        let mut doc = summary();
        doc.page_count = None;
        assert_eq!(DocumentCard::from_summary_in(&doc, &Utc).pages, None);

        doc.page_count = Some(0);
        assert_eq!(DocumentCard::from_summary_in(&doc, &Utc).pages, None);
    }

    #[test]
    fn missing_size_is_zero_bytes() {
        let mut doc = summary();
        doc.file_size = None;
        assert_eq!(DocumentCard::from_summary_in(&doc, &Utc).size, "0 Bytes");
    }

    #[test]
    fn unknown_status_passes_through() {
        let mut doc = summary();
        doc.processing_status = "queued_for_ocr".into();
        let card = DocumentCard::from_summary_in(&doc, &Utc);
        assert_eq!(card.status_class, "status-queued_for_ocr");
        assert_eq!(card.status_label, "Queued_for_ocr");
        assert!(!card.in_progress);
    }

    #[test]
    fn pending_and_processing_are_in_progress() {
        let mut doc = summary();
        for status in ["pending", "processing"] {
            doc.processing_status = status.into();
            assert!(DocumentCard::from_summary_in(&doc, &Utc).in_progress, "{status}");
        }
        doc.processing_status = "failed".into();
        assert!(!DocumentCard::from_summary_in(&doc, &Utc).in_progress);
    }

    #[test]
    fn failed_document_shows_error() {
        let mut doc = summary();
        doc.processing_status = "failed".into();
        doc.error_message = Some("Encrypted PDF".into());
        let card = DocumentCard::from_summary_in(&doc, &Utc);
        assert_eq!(card.status_label, "Failed");
        assert_eq!(card.error.as_deref(), Some("Encrypted PDF"));
    }

    #[test]
    fn delete_click_never_opens_card() {
        // The card frame sees the same click as the button inside it.
        assert_eq!(
            resolve_click("doc-1", true, true, true),
            Some(CardAction::Delete("doc-1".into()))
        );
        assert_eq!(
            resolve_click("doc-1", false, true, true),
            Some(CardAction::Delete("doc-1".into()))
        );
    }

    #[test]
    fn card_click_opens_outside_actions() {
        assert_eq!(
            resolve_click("doc-1", true, false, false),
            Some(CardAction::Open("doc-1".into()))
        );
        assert_eq!(resolve_click("doc-1", true, true, false), None);
        assert_eq!(resolve_click("doc-1", false, false, false), None);
    }
}
