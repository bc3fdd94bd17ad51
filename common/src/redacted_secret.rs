//! Credentials with redacted Debug/Display output.
//!
//! The NAPI access token and the HTTP basic-auth password are both carried
//! in a [`RedactedSecret`] from the moment they are read out of the
//! configuration bag until they are written into a request header.

use crate::{ErrorLocation, RedactError};

use std::fmt;

use serde::ser::Error;
use zeroize::Zeroize;

/// A secret string that never exposes its value in logs or debug output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RedactedSecret {
    inner: String,
}

impl RedactedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            inner: secret.into(),
        }
    }

    /// The raw value.
    ///
    /// Only call this when writing the secret into an outgoing request.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for RedactedSecret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl fmt::Debug for RedactedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedSecret([REDACTED])")
    }
}

impl fmt::Display for RedactedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl Drop for RedactedSecret {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl serde::Serialize for RedactedSecret {
    #[track_caller]
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            field: "RedactedSecret",
            location: ErrorLocation::caller(),
        }))
    }
}
