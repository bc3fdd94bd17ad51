use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

/// Why a client could not be built.
///
/// Only ever logged; callers see [`ApiError::Configuration`](super::ApiError).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source} {location}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Parse Error: {path}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Missing Error: {key} is empty or not set {location}")]
    MissingKey {
        location: ErrorLocation,
        key: &'static str,
    },

    #[error("Config Validation Error: {key}: {reason} {location}")]
    InvalidValue {
        location: ErrorLocation,
        key: &'static str,
        reason: String,
    },

    #[error("Request Logger Error: {path}: {reason} {location}")]
    RequestLogger {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Cache Backend Error: {endpoint}: {reason} {location}")]
    CacheBackend {
        location: ErrorLocation,
        endpoint: String,
        reason: String,
    },

    #[error("HTTP Client Error: {reason} {location}")]
    HttpClient {
        location: ErrorLocation,
        reason: String,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn missing(key: &'static str) -> Self {
        ConfigError::MissingKey {
            location: ErrorLocation::caller(),
            key,
        }
    }

    #[track_caller]
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            location: ErrorLocation::caller(),
            key,
            reason: reason.into(),
        }
    }
}
