//! Bearer token extraction.

use std::borrow::Cow;

use axum::http::{header::AUTHORIZATION, HeaderMap};

const BEARER_PREFIX: &[u8] = b"Bearer ";

/// Extract the token from the first `Authorization` header.
///
/// Returns `None` when the header is missing, does not start with `Bearer `
/// (case-sensitive), or carries only whitespace after it. Non-ASCII bytes
/// after the prefix are kept (lossily decoded) and left for the authority
/// to judge.
pub fn extract_bearer(headers: &HeaderMap) -> Option<Cow<'_, str>> {
    let value = headers.get(AUTHORIZATION)?.as_bytes();
    let token = value.strip_prefix(BEARER_PREFIX)?;

    if token.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    Some(String::from_utf8_lossy(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn test_well_formed() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def")), Some("abc.def".into()));
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
        assert_eq!(extract_bearer(&headers("")), None);
        assert_eq!(extract_bearer(&headers("Bearer")), None);
        assert_eq!(extract_bearer(&headers("Bearer ")), None);
        assert_eq!(extract_bearer(&headers("Bearer    ")), None);
        assert_eq!(extract_bearer(&headers("bearer abc")), None);
        assert_eq!(extract_bearer(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer(&headers("BearerX abc")), None);
    }

    #[test]
    fn test_first_header_wins() {
        let mut h = HeaderMap::new();
        h.append(AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        h.append(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_bearer(&h), None);
    }

    #[test]
    fn test_non_ascii_token_is_passed_on() {
        let mut h = HeaderMap::new();
        h.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes("Bearer tök".as_bytes()).unwrap(),
        );
        assert_eq!(extract_bearer(&h).as_deref(), Some("tök"));
    }

    #[test]
    fn test_token_kept_verbatim() {
        assert_eq!(extract_bearer(&headers("Bearer  padded")), Some(" padded".into()));
    }
}
