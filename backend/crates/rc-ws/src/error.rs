use crate::ConnectionId;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Send buffer full, client too slow {location}")]
    SendBufferFull { location: ErrorLocation },

    #[error("Connection limit exceeded: {current} connections (max: {max}) {location}")]
    ConnectionLimitExceeded {
        current: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("No such connection: {connection_id} {location}")]
    UnknownConnection {
        connection_id: ConnectionId,
        location: ErrorLocation,
    },
}

impl WsError {
    /// Stable label for metrics and close-reason accounting
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionClosed { .. } => "connection_closed",
            Self::SendBufferFull { .. } => "slow_client",
            Self::ConnectionLimitExceeded { .. } => "connection_limit",
            Self::UnknownConnection { .. } => "unknown_connection",
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
