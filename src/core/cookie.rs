//! Session cookie - costruzione e lettura del cookie che trasporta il token

use axum::http::{HeaderMap, header};

/// Name of the cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "token";

fn attributes(secure: bool) -> &'static str {
    if secure {
        "HttpOnly; Path=/; Secure; SameSite=None"
    } else {
        "HttpOnly; Path=/; SameSite=Strict"
    }
}

/// `Set-Cookie` value that stores `token` for the browser session
pub fn session_cookie(token: &str, secure: bool) -> String {
    format!("{}={}; {}", SESSION_COOKIE, token, attributes(secure))
}

/// `Set-Cookie` value that clears the session cookie (same attributes, Max-Age=0)
pub fn cleared_session_cookie(secure: bool) -> String {
    format!("{}=; {}; Max-Age=0", SESSION_COOKIE, attributes(secure))
}

/// Extracts the session token from the request `Cookie` header(s).
/// An empty value counts as missing: that is what the browser sends back after logout.
pub fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
