use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE};
use std::str::FromStr;
use url::Url;

use crate::session::SessionError;

/// The parts of a browser "Copy as cURL" command the client cares about.
#[derive(Clone, Debug, Default)]
pub struct CurlParser {
    pub url: Option<Url>,
    pub headers: Option<HeaderMap>,
    pub cookies: Option<String>,
}

impl CurlParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&mut self, curl_text: &str) -> Result<(), SessionError> {
        let args = quoted_args(curl_text);

        let url = args
            .iter()
            .filter(|(flag, _)| flag.is_none())
            .find_map(|(_, value)| Url::parse(value).ok())
            .ok_or(SessionError::MissingUrl)?;

        let mut headers = HeaderMap::new();
        let mut cookies = None;

        for (flag, value) in &args {
            match flag.as_deref() {
                Some("-H") | Some("--header") => {
                    let Some((key, value)) = value.split_once(':') else {
                        continue;
                    };
                    let key = key.trim().to_lowercase();
                    let value = value.trim();

                    if key == COOKIE.as_str() {
                        cookies = Some(value.to_string());
                        continue;
                    }

                    if let Ok(header_name) = HeaderName::from_str(&key) {
                        if let Ok(header_value) = HeaderValue::from_str(value) {
                            headers.insert(header_name, header_value);
                        }
                    }
                }
                Some("-b") | Some("--cookie") => cookies = Some(value.trim().to_string()),
                _ => {}
            }
        }

        self.url = Some(url);
        self.headers = Some(headers);
        self.cookies = cookies;

        Ok(())
    }
}

/// Flags copied by browsers that never take a value.
const SWITCHES: &[&str] = &[
    "--compressed",
    "--insecure",
    "-k",
    "-s",
    "-L",
    "--location",
    "-i",
];

/// Splits the command into shell words, each paired with the flag that
/// precedes it (if any). Understands `'...'`, `$'...'`, `"..."`, backslash
/// escapes and line continuations, which covers what Chrome and Firefox emit.
fn quoted_args(curl_text: &str) -> Vec<(Option<String>, String)> {
    let mut args = Vec::new();
    let mut pending_flag: Option<String> = None;

    for word in shell_words(curl_text) {
        if word.starts_with('-') {
            pending_flag = (!SWITCHES.contains(&word.as_str())).then_some(word);
        } else {
            args.push((pending_flag.take(), word));
        }
    }

    args
}

fn shell_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\n') | None => {}
                Some('\r') => {
                    chars.next_if_eq(&'\n');
                }
                Some(escaped) => {
                    word.push(escaped);
                    in_word = true;
                }
            },
            '$' if chars.peek() == Some(&'\'') => {
                chars.next();
                in_word = true;
                while let Some(c) = chars.next() {
                    match c {
                        '\'' => break,
                        '\\' => match chars.next() {
                            Some('n') => word.push('\n'),
                            Some('t') => word.push('\t'),
                            Some('r') => word.push('\r'),
                            Some(other) => word.push(other),
                            None => break,
                        },
                        other => word.push(other),
                    }
                }
            }
            '\'' => {
                in_word = true;
                for c in chars.by_ref() {
                    if c == '\'' {
                        break;
                    }
                    word.push(c);
                }
            }
            '"' => {
                in_word = true;
                while let Some(c) = chars.next() {
                    match c {
                        '"' => break,
                        '\\' => match chars.next() {
                            Some(escaped @ ('"' | '\\' | '$' | '`')) => word.push(escaped),
                            Some('\n') => {}
                            Some(other) => {
                                word.push('\\');
                                word.push(other);
                            }
                            None => break,
                        },
                        other => word.push(other),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            other => {
                word.push(other);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(word);
    }

    words
}
