//! The two error kinds surfaced to callers of the service layer.
//!
//! Construction failures are deliberately flattened into a single
//! [`ApiError::Configuration`]: the detailed [`ConfigError`](super::ConfigError)
//! is logged where it happens and never handed to the caller.

use common::ErrorLocation;

use std::fmt;

use thiserror::Error as ThisError;

/// Code reported for every client construction failure.
pub const CONFIGURATION_ERROR_CODE: u32 = 1_495_105_254;

/// Code reported when an object or query type name cannot be resolved.
pub const LOOKUP_ERROR_CODE: u32 = 1_495_179_007;

pub const CONFIGURATION_ERROR_MESSAGE: &str =
    "Configuration error - please check API configuration";

/// What was being resolved when a type name turned out to be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTarget {
    Repository,
    Query,
}

impl fmt::Display for LookupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self {
            LookupTarget::Repository => "Query error",
            LookupTarget::Query => "Configuration error",
        };
        write!(f, "{prefix}")
    }
}

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("Configuration error - please check API configuration (code {code}) {location}")]
    Configuration { code: u32, location: ErrorLocation },

    #[error("{target} - unknown object {object} (code {code}) {location}")]
    Lookup {
        target: LookupTarget,
        object: String,
        code: u32,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn configuration() -> Self {
        ApiError::Configuration {
            code: CONFIGURATION_ERROR_CODE,
            location: ErrorLocation::caller(),
        }
    }

    /// Unknown repository name.
    #[track_caller]
    pub fn lookup(object: impl Into<String>) -> Self {
        Self::unknown(LookupTarget::Repository, object.into())
    }

    /// Unknown query name.
    #[track_caller]
    pub fn query_lookup(object: impl Into<String>) -> Self {
        Self::unknown(LookupTarget::Query, object.into())
    }

    #[track_caller]
    fn unknown(target: LookupTarget, object: String) -> Self {
        ApiError::Lookup {
            target,
            object,
            code: LOOKUP_ERROR_CODE,
            location: ErrorLocation::caller(),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            ApiError::Configuration { code, .. } | ApiError::Lookup { code, .. } => *code,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, ApiError::Configuration { .. })
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, ApiError::Lookup { .. })
    }

    pub fn lookup_target(&self) -> Option<LookupTarget> {
        match self {
            ApiError::Lookup { target, .. } => Some(*target),
            ApiError::Configuration { .. } => None,
        }
    }
}
