//! Shared primitives for the NAPI workspace.
//!
//! Everything in here is free of I/O so it can be used by any crate that
//! talks to the content API:
//!
//! - [`ErrorLocation`]: file/line/column captured with `#[track_caller]`
//! - [`RedactedSecret`]: credentials that never reach logs or serializers
//! - [`HttpStatusCode`]: status codes kept as numbers, not parsed from text

pub mod error;
pub mod http_status;
pub mod redacted_secret;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
