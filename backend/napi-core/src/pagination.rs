//! Drive a paginated query to completion.
//!
//! Pages are requested strictly one after another. The loop fetches first
//! and tests afterwards, so at least one request is always made, even when
//! the service reports zero pages.

use crate::domain::Query;
use crate::domain::query::DEFAULT_PAGE_SIZE;
use crate::error::FetchError;
use crate::repository::Repository;

use log::{debug, warn};

/// Page size and include relations applied before the first request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub includes: Vec<String>,
    pub page_size: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_includes<I, S>(mut self, includes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes = includes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Fetch every page of `query` and return the items in service order.
///
/// The query's page size is set from `options`, and its include list is
/// replaced only when `options.includes` is non-empty. Pages are requested
/// from 1 upwards while the last reported page count is at least the next
/// page number.
///
/// # Errors
///
/// Returns [`FetchError::Page`] for the first page whose request fails.
/// Items from earlier pages are dropped.
pub async fn fetch_all<R>(
    repository: &R,
    query: &mut Query,
    options: &FetchOptions,
) -> Result<Vec<R::Item>, FetchError>
where
    R: Repository,
{
    query.set_page_size(options.page_size);
    if !options.includes.is_empty() {
        query.set_include(options.includes.iter().cloned());
    }

    let mut items = Vec::new();
    let mut current_page: u32 = 1;

    loop {
        query.set_page_number(current_page);

        let page = repository
            .get(query)
            .await
            .map_err(|e| FetchError::page(current_page, e))?;

        let page_count = page.page_count();
        debug!(
            "Fetched {} page {current_page}/{page_count} ({} items)",
            query.object_type(),
            page.len()
        );
        items.extend(page);

        current_page += 1;
        if page_count < current_page {
            break;
        }
    }

    Ok(items)
}

/// [`fetch_all`], but any failure yields an empty vector.
///
/// An empty result therefore does not tell "nothing found" apart from "a
/// request failed"; use [`fetch_all`] when that matters.
pub async fn fetch_all_or_empty<R>(
    repository: &R,
    query: &mut Query,
    options: &FetchOptions,
) -> Vec<R::Item>
where
    R: Repository,
{
    match fetch_all(repository, query, options).await {
        Ok(items) => items,
        Err(e) => {
            warn!("Discarding {} results: {e}", query.object_type());
            Vec::new()
        }
    }
}
