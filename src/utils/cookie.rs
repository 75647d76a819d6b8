/// Looks up `name` in a `Cookie` header style string (`a=1; b=2`).
///
/// The first entry whose prefix is exactly `name=` wins. Values are
/// percent-decoded; a value that does not decode cleanly is returned as is.
pub fn get_cookie(cookies: &str, name: &str) -> Option<String> {
    if cookies.trim().is_empty() {
        return None;
    }

    let prefix = format!("{}=", name);
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .map(|raw| match urlencoding::decode(raw) {
            Ok(value) => value.into_owned(),
            Err(_) => raw.to_string(),
        })
}
