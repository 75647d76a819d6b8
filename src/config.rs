use std::time::Duration;

use clap::Parser;

use crate::session::{Session, SessionError};

pub const DEFAULT_LOG_FILTER: &str = "pdf_manager=info,warn";

/// Desktop client for the PDF processing server's document API.
#[derive(Debug, Clone, Parser)]
#[command(name = "pdf-manager", version, about)]
pub struct Settings {
    /// Server root, e.g. http://127.0.0.1:8000
    #[arg(long, env = "PDF_MANAGER_BASE_URL", default_value = "http://127.0.0.1:8000")]
    pub base_url: String,

    /// Cookie header of a logged-in browser session (`sessionid=...; csrftoken=...`)
    #[arg(long, env = "PDF_MANAGER_COOKIE")]
    pub cookie: Option<String>,

    /// Name of the cookie holding the anti-forgery token
    #[arg(long, env = "PDF_MANAGER_CSRF_COOKIE", default_value = "csrftoken")]
    pub csrf_cookie_name: String,

    /// Seconds between list reloads while documents are processing; 0 disables
    #[arg(long, env = "PDF_MANAGER_POLL_INTERVAL", default_value_t = 5)]
    pub poll_interval_secs: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

impl Settings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn session(&self) -> Result<Session, SessionError> {
        Session::new(&self.base_url, self.cookie.clone(), self.csrf_cookie_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let settings = Settings::try_parse_from([
            "pdf-manager",
            "--base-url",
            "https://pdf.example.com",
            "--cookie",
            "csrftoken=abc",
            "--poll-interval-secs",
            "0",
        ])
        .unwrap();

        assert_eq!(settings.base_url, "https://pdf.example.com");
        assert_eq!(settings.poll_interval(), Duration::ZERO);
        let session = settings.session().unwrap();
        assert_eq!(session.csrf_token().as_deref(), Some("abc"));
    }

    #[test]
    fn rejects_bad_base_url() {
        let settings =
            Settings::try_parse_from(["pdf-manager", "--base-url", "::nope::"]).unwrap();
        assert!(settings.session().is_err());
    }
}
