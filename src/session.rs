//! Server location and browser session the client talks to.

use reqwest::header::{HeaderMap, ACCEPT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, HOST};
use thiserror::Error;
use url::Url;

use crate::utils::cookie::get_cookie;
use crate::utils::curl_parser::CurlParser;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid base URL '{0}': {1}")]
    InvalidBaseUrl(String, url::ParseError),

    #[error("Could not find a request URL in the curl command")]
    MissingUrl,
}

#[derive(Clone, Debug)]
pub struct Session {
    base_url: Url,
    cookies: Option<String>,
    csrf_cookie_name: String,
    extra_headers: HeaderMap,
}

impl Session {
    pub fn new(
        base_url: &str,
        cookies: Option<String>,
        csrf_cookie_name: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| SessionError::InvalidBaseUrl(base_url.to_string(), e))?;
        // Joined paths are absolute, but a trailing slash keeps `join` honest
        // for servers mounted below the root.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            cookies: cookies.filter(|c| !c.trim().is_empty()),
            csrf_cookie_name: csrf_cookie_name.into(),
            extra_headers: HeaderMap::new(),
        })
    }

    /// Builds a session from a browser "Copy as cURL" command: the request's
    /// origin becomes the base URL and its cookies become the session.
    pub fn from_curl(curl_text: &str, csrf_cookie_name: &str) -> Result<Self, SessionError> {
        let mut parser = CurlParser::new();
        parser.parse(curl_text)?;

        let url = parser.url.ok_or(SessionError::MissingUrl)?;
        let origin = url.origin().ascii_serialization();
        let mut session = Self::new(&origin, parser.cookies, csrf_cookie_name)?;

        let mut headers = parser.headers.unwrap_or_default();
        for name in [CONTENT_TYPE, CONTENT_LENGTH, ACCEPT_ENCODING, HOST] {
            headers.remove(name);
        }
        session.extra_headers = headers;

        Ok(session)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn cookies(&self) -> Option<&str> {
        self.cookies.as_deref()
    }

    pub fn extra_headers(&self) -> &HeaderMap {
        &self.extra_headers
    }

    /// The anti-forgery token echoed back on state-changing requests.
    pub fn csrf_token(&self) -> Option<String> {
        self.cookies
            .as_deref()
            .and_then(|cookies| get_cookie(cookies, &self.csrf_cookie_name))
    }

    /// Resolves a path such as `api/pdf/documents/` against the base URL.
    pub fn url(&self, path: &str) -> Url {
        match self.base_url.join(path.trim_start_matches('/')) {
            Ok(url) => url,
            Err(_) => self.base_url.clone(),
        }
    }

    /// Browser location of a document's detail page.
    pub fn document_page(&self, document_id: &str) -> Url {
        self.url(&format!("document/{}/", document_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_api_paths() {
        let session = Session::new("http://localhost:8000", None, "csrftoken").unwrap();
        assert_eq!(
            session.url("/api/pdf/documents/").as_str(),
            "http://localhost:8000/api/pdf/documents/"
        );
        assert_eq!(
            session.document_page("abc").as_str(),
            "http://localhost:8000/document/abc/"
        );
    }

    #[test]
    fn keeps_mount_prefix() {
        let session = Session::new("https://host.example/pdfs", None, "csrftoken").unwrap();
        assert_eq!(
            session.url("api/pdf/upload/").as_str(),
            "https://host.example/pdfs/api/pdf/upload/"
        );
    }

    #[test]
    fn csrf_token_from_cookies() {
        let session = Session::new(
            "http://localhost:8000",
            Some("sessionid=1; csrftoken=abc".to_string()),
            "csrftoken",
        )
        .unwrap();
        assert_eq!(session.csrf_token().as_deref(), Some("abc"));

        let anonymous =
            Session::new("http://localhost:8000", Some(" ".into()), "csrftoken").unwrap();
        assert_eq!(anonymous.cookies(), None);
        assert_eq!(anonymous.csrf_token(), None);
    }

    #[test]
    fn invalid_base_url() {
        let err = Session::new("not a url", None, "csrftoken").unwrap_err();
        assert!(matches!(err, SessionError::InvalidBaseUrl(..)));
    }

    #[test]
    fn session_from_curl() {
        let curl = r#"curl 'http://127.0.0.1:8000/api/pdf/documents/' \
  -H 'Content-Type: application/json' \
  -H 'User-Agent: test-agent' \
  -H 'Cookie: csrftoken=tok; sessionid=s'"#;
        let session = Session::from_curl(curl, "csrftoken").unwrap();

        assert_eq!(session.base_url().as_str(), "http://127.0.0.1:8000/");
        assert_eq!(session.csrf_token().as_deref(), Some("tok"));
        assert!(session.extra_headers().get("content-type").is_none());
        assert_eq!(session.extra_headers().get("user-agent").unwrap(), "test-agent");
    }
}
