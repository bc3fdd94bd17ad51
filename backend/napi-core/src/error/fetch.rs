use crate::error::NapiClientError;

use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Failure while accumulating the pages of a query.
///
/// Items gathered before the failing page are discarded.
#[derive(Debug, ThisError)]
pub enum FetchError {
    #[error("Page Fetch Error: page {page} failed {location}")]
    Page {
        page: u32,
        location: ErrorLocation,
        #[source]
        source: NapiClientError,
    },
}

impl FetchError {
    #[track_caller]
    pub fn page(page: u32, source: NapiClientError) -> Self {
        FetchError::Page {
            page,
            location: ErrorLocation::caller(),
            source,
        }
    }

    /// The page number whose request failed.
    pub fn failed_page(&self) -> u32 {
        match self {
            FetchError::Page { page, .. } => *page,
        }
    }
}
