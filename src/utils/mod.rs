pub mod cookie;
pub mod curl_parser;
pub mod format;
