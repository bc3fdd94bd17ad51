use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum CacheError {
    #[error("Cache Connection Error: {endpoint}: {message} {location}")]
    Connection {
        endpoint: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Cache Command Error: {message} {location}")]
    Command {
        message: String,
        location: ErrorLocation,
    },
}

impl From<redis::RedisError> for CacheError {
    #[track_caller]
    fn from(error: redis::RedisError) -> Self {
        CacheError::Command {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
