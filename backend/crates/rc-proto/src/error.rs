use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtoError {
    #[error("JSON decode failed: {source} {location}")]
    Json {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Transit decode failed: {source} {location}")]
    Transit {
        #[source]
        source: base64::DecodeError,
        location: ErrorLocation,
    },

    #[error("Transit payload is not valid UTF-8 {location}")]
    Utf8 { location: ErrorLocation },
}

impl From<serde_json::Error> for ProtoError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Json {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<base64::DecodeError> for ProtoError {
    #[track_caller]
    fn from(source: base64::DecodeError) -> Self {
        Self::Transit {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProtoError>;
