use crate::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Redacted Value Serialization Error: {field} cannot be serialized {location}")]
    Serialization {
        field: &'static str,
        location: ErrorLocation,
    },
}
