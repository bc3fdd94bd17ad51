//! Process-wide access to the NAPI client.
//!
//! The first caller of [`client`] builds the client from the environment;
//! every later caller gets the same instance. Initialization runs behind a
//! once-only cell, so concurrent first callers wait for a single build
//! instead of racing. A failed build is not remembered and is retried by
//! the next caller.
//!
//! Code that prefers to own its client can build a [`NapiClient`] directly
//! and call [`NapiClient::repository`] on it.

use crate::config::{ApplicationContext, ConfigBag};
use crate::domain::{ObjectType, Query};
use crate::error::ApiError;
use crate::napi_client::NapiClient;
use crate::repository::ApiRepository;

use std::future::Future;

use log::{error, info};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

static NAPI_CLIENT: Lazy<ClientCell> = Lazy::new(ClientCell::new);

/// Lazily initialized, memoized client slot.
pub struct ClientCell {
    cell: OnceCell<NapiClient>,
}

impl ClientCell {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the stored client, building it with `init` if the cell is empty.
    pub async fn get_or_try_init<F, Fut>(&self, init: F) -> Result<&NapiClient, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<NapiClient, ApiError>>,
    {
        self.cell.get_or_try_init(init).await
    }

    /// The stored client, if initialization has already succeeded.
    pub fn get(&self) -> Option<&NapiClient> {
        self.cell.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

impl Default for ClientCell {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide client, built from the environment on first use.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] if the configuration is incomplete or
/// the client cannot be built.
pub async fn client() -> Result<&'static NapiClient, ApiError> {
    NAPI_CLIENT.get_or_try_init(load_from_env).await
}

async fn load_from_env() -> Result<NapiClient, ApiError> {
    let bag = ConfigBag::from_env().map_err(|e| {
        error!("NAPI configuration could not be read: {e}");
        ApiError::configuration()
    })?;
    let context = ApplicationContext::from_env();

    info!("Initializing NAPI client ({context} context)");
    NapiClient::from_bag(&bag, context).await
}

/// Repository for `name` (e.g. `"event"`), bound to the process-wide client.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] if the client cannot be built and
/// [`ApiError::Lookup`] if `name` is not a known object type.
pub async fn repository<T>(name: &str) -> Result<ApiRepository<T>, ApiError>
where
    T: DeserializeOwned,
{
    let client = client().await?;
    client.repository(name)
}

/// Fresh query descriptor for `name`.
///
/// # Errors
///
/// Returns [`ApiError::Lookup`] if `name` is not a known object type.
#[track_caller]
pub fn query(name: &str) -> Result<Query, ApiError> {
    ObjectType::from_name(name)
        .map(Query::new)
        .ok_or_else(|| ApiError::query_lookup(name))
}
