//! Transient user feedback: the inline message under the upload form and the
//! global alerts stacked at the top of the window.

use std::time::{Duration, Instant};

pub const MESSAGE_LIFETIME: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertKind {
    #[default]
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub kind: AlertKind,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: AlertKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: AlertKind::Error,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: AlertKind::Info,
        }
    }
}

/// Inline status line of the upload form. Success messages hide themselves
/// after [`MESSAGE_LIFETIME`]; errors stay until replaced or hidden.
#[derive(Debug, Default)]
pub struct UploadMessage {
    current: Option<Message>,
    hide_at: Option<Instant>,
}

impl UploadMessage {
    pub fn show(&mut self, message: Message, now: Instant) {
        self.hide_at = (message.kind == AlertKind::Success).then(|| now + MESSAGE_LIFETIME);
        self.current = Some(message);
    }

    pub fn hide(&mut self) {
        self.current = None;
        self.hide_at = None;
    }

    pub fn tick(&mut self, now: Instant) {
        if self.hide_at.is_some_and(|at| now >= at) {
            self.hide();
        }
    }

    pub fn visible(&self) -> Option<&Message> {
        self.current.as_ref()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.hide_at
    }
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub message: Message,
    expires_at: Instant,
}

/// Global alerts, newest first. Every alert lives for [`MESSAGE_LIFETIME`].
#[derive(Debug, Default)]
pub struct Alerts {
    items: Vec<Alert>,
}

impl Alerts {
    pub fn push(&mut self, message: Message, now: Instant) {
        self.items.insert(
            0,
            Alert {
                message,
                expires_at: now + MESSAGE_LIFETIME,
            },
        );
    }

    pub fn tick(&mut self, now: Instant) {
        self.items.retain(|alert| alert.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.items.iter().map(|alert| alert.expires_at).min()
    }
}
