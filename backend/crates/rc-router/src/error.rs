use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Pub/sub failure: {source} {location}")]
    PubSub {
        #[source]
        source: redis::RedisError,
        location: ErrorLocation,
    },
}

impl From<redis::RedisError> for RouterError {
    #[track_caller]
    fn from(source: redis::RedisError) -> Self {
        Self::PubSub {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, RouterError>;
