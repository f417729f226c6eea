use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Host mismatch: expected {expected}, got {actual} {location}")]
    HostMismatch {
        expected: String,
        actual: String,
        location: ErrorLocation,
    },

    #[error("Cookie not found {location}")]
    CookieNotFound { location: ErrorLocation },

    #[error("Login session not found {location}")]
    SessionNotFound { location: ErrorLocation },

    #[error("Session rejected by admission policy {location}")]
    SessionRejected { location: ErrorLocation },

    #[error("Session store unavailable: {source} {location}")]
    Store {
        #[source]
        source: redis::RedisError,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Stable denial reason for logs and admission metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::HostMismatch { .. } => "host mismatch",
            Self::CookieNotFound { .. } => "cookie not found",
            Self::SessionNotFound { .. } => "session not found",
            Self::SessionRejected { .. } => "session rejected",
            Self::Store { .. } => "session store unavailable",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
