use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Extract the session token from a request's cookie header.
///
/// An absent or empty header denies with "cookie not found"; a header
/// that parses but lacks the configured session key denies with
/// "session not found".
#[track_caller]
pub fn session_token(cookie_header: Option<&str>, session_key: &str) -> AuthErrorResult<String> {
    let header = match cookie_header {
        Some(h) if !h.is_empty() => h,
        _ => {
            return Err(AuthError::CookieNotFound {
                location: ErrorLocation::from(Location::caller()),
            });
        }
    };

    for parsed in cookie::Cookie::split_parse(header).flatten() {
        if parsed.name() == session_key {
            return Ok(parsed.value().to_string());
        }
    }

    Err(AuthError::SessionNotFound {
        location: ErrorLocation::from(Location::caller()),
    })
}
