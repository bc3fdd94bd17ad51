//! Access to the Nordkirche content API (NAPI).
//!
//! - [`service`]: the process-wide client plus name-based repository/query lookup
//! - [`pagination`]: collect every page of a query into one vector
//! - [`config`]: configuration bag and validated client settings

pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod napi_client;
pub mod pagination;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ObjectType, Page, Query};
pub use error::{ApiError, FetchError, NapiClientError};
pub use napi_client::NapiClient;
pub use pagination::{FetchOptions, fetch_all, fetch_all_or_empty};
pub use repository::{ApiRepository, Repository};
