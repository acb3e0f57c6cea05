//! Session cookie helpers.
//!
//! Sessions are carried in an `HttpOnly` cookie. `SameSite=Lax` keeps the
//! cookie on the redirects the step-up flow depends on.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};

/// Cookie name for browser sessions.
pub const SESSION_COOKIE_NAME: &str = "granite_session";

/// Builds the session cookie header value.
#[must_use]
pub fn create_session_cookie(session_id: &str, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!("{SESSION_COOKIE_NAME}={session_id}; HttpOnly{secure_flag}; SameSite=Lax; Path=/")
}

/// Sets the session cookie in response headers.
pub fn set_session_cookie(headers: &mut HeaderMap, session_id: &str, secure: bool) {
    let cookie_value = create_session_cookie(session_id, secure);
    if let Ok(value) = HeaderValue::from_str(&cookie_value) {
        headers.insert(SET_COOKIE, value);
    }
}

/// Expires the session cookie in response headers.
pub fn clear_session_cookie(headers: &mut HeaderMap) {
    let cookie_value =
        format!("{SESSION_COOKIE_NAME}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0");
    if let Ok(value) = HeaderValue::from_str(&cookie_value) {
        headers.insert(SET_COOKIE, value);
    }
}

/// Extracts the session id from request cookies.
#[must_use]
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    let cookie_str = headers.get(COOKIE)?.to_str().ok()?;

    for part in cookie_str.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(&format!("{SESSION_COOKIE_NAME}=")) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}
