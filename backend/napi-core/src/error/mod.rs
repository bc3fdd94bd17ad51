pub mod api;
pub mod cache;
pub mod config;
pub mod fetch;
pub mod napi_client;

pub use api::{ApiError, LookupTarget};
pub use cache::CacheError;
pub use config::ConfigError;
pub use fetch::FetchError;
pub use napi_client::NapiClientError;
