//! Split a URL string into scheme, authority, path and query.

use thiserror::Error;

/// Structural pieces of a URL. The fragment is never kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts<'a> {
    /// Lowercased scheme, empty when the input has none.
    pub scheme: String,
    /// `host[:port]` (with any userinfo), empty when there is no `//` part.
    pub authority: &'a str,
    pub path: &'a str,
    /// Raw query without the leading `?`; empty when absent.
    pub query: &'a str,
}

/// Reasons a URL cannot be split. Callers fall back to the raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlParseError {
    #[error("control character at byte {position}")]
    ControlCharacter { position: usize },
    #[error("unbalanced IPv6 brackets in authority {authority:?}")]
    UnbalancedBracket { authority: String },
}

/// Splits `input` into its parts without validating host, port or path.
pub fn parse_url(input: &str) -> Result<UrlParts<'_>, UrlParseError> {
    if let Some(position) = input.bytes().position(|b| b.is_ascii_control()) {
        return Err(UrlParseError::ControlCharacter { position });
    }

    let (scheme, mut rest) = split_scheme(input);

    let mut authority = "";
    if let Some(after) = rest.strip_prefix("//") {
        let end = after
            .find(|c: char| matches!(c, '/' | '?' | '#'))
            .unwrap_or(after.len());
        authority = &after[..end];
        rest = &after[end..];
        if authority.contains('[') != authority.contains(']') {
            return Err(UrlParseError::UnbalancedBracket {
                authority: authority.to_string(),
            });
        }
    }

    let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

    Ok(UrlParts {
        scheme,
        authority,
        path,
        query,
    })
}

fn split_scheme(input: &str) -> (String, &str) {
    match input.split_once(':') {
        Some((candidate, rest)) if is_scheme(candidate) => (candidate.to_ascii_lowercase(), rest),
        _ => (String::new(), input),
    }
}

/// RFC 3986 scheme: a letter followed by letters, digits, `+`, `-` or `.`.
pub(super) fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_url() {
        let p = parse_url("HTTPS://api.example.com:8443/v1/users?id=1#top").unwrap();
        assert_eq!(p.scheme, "https");
        assert_eq!(p.authority, "api.example.com:8443");
        assert_eq!(p.path, "/v1/users");
        assert_eq!(p.query, "id=1");
    }

    #[test]
    fn relative_url() {
        let p = parse_url("/api/users?id=1").unwrap();
        assert_eq!(p.scheme, "");
        assert_eq!(p.authority, "");
        assert_eq!(p.path, "/api/users");
        assert_eq!(p.query, "id=1");
    }

    #[test]
    fn scheme_relative_url() {
        let p = parse_url("//cdn.example.com/app.js").unwrap();
        assert_eq!(p.scheme, "");
        assert_eq!(p.authority, "cdn.example.com");
        assert_eq!(p.path, "/app.js");
    }

    #[test]
    fn authority_ends_at_query_or_fragment() {
        let p = parse_url("http://example.com?x=1").unwrap();
        assert_eq!(p.authority, "example.com");
        assert_eq!(p.path, "");
        assert_eq!(p.query, "x=1");

        let p = parse_url("http://example.com#frag").unwrap();
        assert_eq!(p.authority, "example.com");
        assert_eq!(p.query, "");
    }

    #[test]
    fn colon_in_path_is_not_a_scheme() {
        let p = parse_url("/a/b:c").unwrap();
        assert_eq!(p.scheme, "");
        assert_eq!(p.path, "/a/b:c");

        let p = parse_url("1abc:def").unwrap();
        assert_eq!(p.scheme, "");
        assert_eq!(p.path, "1abc:def");
    }

    #[test]
    fn opaque_scheme() {
        let p = parse_url("mailto:dev@example.com").unwrap();
        assert_eq!(p.scheme, "mailto");
        assert_eq!(p.authority, "");
        assert_eq!(p.path, "dev@example.com");
    }

    #[test]
    fn ipv6_authority() {
        let p = parse_url("http://[::1]:8080/health").unwrap();
        assert_eq!(p.authority, "[::1]:8080");
        assert_eq!(p.path, "/health");
    }

    #[test]
    fn rejects_control_characters() {
        assert_eq!(
            parse_url("/api\n/users"),
            Err(UrlParseError::ControlCharacter { position: 4 })
        );
        assert!(parse_url("\u{0}\u{1}\u{2}").is_err());
        assert!(parse_url("/x\u{7f}").is_err());
    }

    #[test]
    fn rejects_unbalanced_brackets() {
        let err = parse_url("http://[::1/path").unwrap_err();
        assert_eq!(
            err,
            UrlParseError::UnbalancedBracket {
                authority: "[::1".to_string()
            }
        );
        assert!(parse_url("http://::1]/").is_err());
    }

    #[test]
    fn empty_input() {
        let p = parse_url("").unwrap();
        assert_eq!(p.scheme, "");
        assert_eq!(p.authority, "");
        assert_eq!(p.path, "");
        assert_eq!(p.query, "");
    }
}
