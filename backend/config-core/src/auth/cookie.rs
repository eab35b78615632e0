//! Session cookie encoding and extraction.

use crate::COOKIE_NAME;

use common::SessionToken;

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

/// Build the `Set-Cookie` value handed out after a successful login.
pub fn session_cookie_header(token: &SessionToken) -> String {
    format!(
        "{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax",
        token.as_str()
    )
}

/// Find the session cookie among all `Cookie` headers of a request.
pub fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value.trim_matches('"'))
}
