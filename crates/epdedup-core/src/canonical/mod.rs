//! URL canonicalization.
//!
//! Reduces a URL to its structural identity: parameter values, parameter
//! order, fragments and trailing slashes do not survive. Normalization is a
//! pure function of the input string and never fails; input that cannot be
//! split into URL parts is returned verbatim.

mod parse;
mod query;

pub use parse::{parse_url, UrlParseError, UrlParts};
pub use query::normalize_query;

use std::borrow::Cow;

/// Canonical form of `url`.
///
/// # Examples
///
/// - `normalize("/api/users?name=jane&id=2")` → `"/api/users?id=&name="`
/// - `normalize("https://example.com/api/posts/")` → `"https://example.com/api/posts"`
pub fn normalize(url: &str) -> String {
    match parse_url(url) {
        Ok(parts) => reassemble(&parts),
        Err(err) => {
            tracing::trace!("keeping unparseable url {:?} verbatim: {}", url, err);
            url.to_string()
        }
    }
}

fn reassemble(parts: &UrlParts<'_>) -> String {
    let path = normalize_path(parts.path);
    let query = normalize_query(parts.query);

    let mut out = if !parts.scheme.is_empty() && !parts.authority.is_empty() {
        format!("{}://{}{}", parts.scheme, parts.authority, path)
    } else {
        unambiguous_relative(path).into_owned()
    };

    if !query.is_empty() {
        out.push('?');
        out.push_str(&query);
    }
    out
}

/// Strips trailing slashes; a path made only of slashes becomes `/`.
fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && !path.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// A bare path must not re-parse as an authority (`//host`) or a scheme
/// (`name:rest`), otherwise normalizing the output would change it again.
fn unambiguous_relative(path: &str) -> Cow<'_, str> {
    if path.starts_with("//") {
        return Cow::Owned(format!("/{}", path.trim_start_matches('/')));
    }
    match path.split_once(':') {
        Some((head, _)) if parse::is_scheme(head) => Cow::Owned(format!("./{path}")),
        _ => Cow::Borrowed(path),
    }
}
