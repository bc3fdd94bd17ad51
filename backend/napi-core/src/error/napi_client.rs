use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum NapiClientError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        is_timeout: bool,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server Error: HTTP {status} - {message} {location}")]
    Server {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },
}

impl NapiClientError {
    #[track_caller]
    pub fn server(status: impl Into<HttpStatusCode>, message: impl Into<String>) -> Self {
        NapiClientError::Server {
            status: status.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Status code, for server errors only.
    pub fn status(&self) -> Option<HttpStatusCode> {
        match self {
            NapiClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<url::ParseError> for NapiClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        NapiClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for NapiClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        NapiClientError::Http {
            is_timeout: error.is_timeout(),
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for NapiClientError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        NapiClientError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
