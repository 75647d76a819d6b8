use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(
        "Server responded with {status}: {}",
        .message.as_deref().unwrap_or("no error message")
    )]
    Http {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl ApiError {
    /// True for errors where the server answered with a failure status;
    /// everything else never produced a usable response.
    pub fn is_http(&self) -> bool {
        matches!(self, ApiError::Http { .. })
    }

    /// Server-supplied text for HTTP failures, `fallback` otherwise.
    pub fn server_message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            ApiError::Http {
                message: Some(message),
                ..
            } if !message.is_empty() => message,
            _ => fallback,
        }
    }
}
