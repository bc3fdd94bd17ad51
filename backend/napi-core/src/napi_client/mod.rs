pub mod request_logger;

pub use request_logger::RequestLogger;

use crate::cache::{CacheProvider, CacheProviders, CacheRole};
use crate::config::{ApplicationContext, ClientConfig, ConfigBag};
use crate::domain::page::PageDocument;
use crate::domain::{ObjectType, Page, Query};
use crate::error::{ApiError, ConfigError, NapiClientError};
use crate::repository::ApiRepository;

use common::{ErrorLocation, HttpStatusCode};

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

pub const USER_AGENT: &str = const_format::concatcp!("napi-core/", env!("CARGO_PKG_VERSION"));
pub const USER_ID_HEADER_KEY: &str = "x-user-id";
pub const ACCESS_TOKEN_HEADER_KEY: &str = "x-access-token";

/// How long a cached collection response stays valid.
const TRANSPORT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Configured connection to the content API.
///
/// Cheap to clone; clones share the HTTP connection pool, request logger and
/// cache connections.
#[derive(Clone)]
pub struct NapiClient {
    base_url: Url,
    client: Client,
    config: ClientConfig,
    request_logger: Option<Arc<RequestLogger>>,
    caches: Option<CacheProviders>,
}

impl NapiClient {
    /// Validate `bag` and connect.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] for any problem; the cause is logged.
    pub async fn from_bag(bag: &ConfigBag, context: ApplicationContext) -> Result<Self, ApiError> {
        let config = ClientConfig::from_bag(bag, context).map_err(collapse)?;
        Self::connect(config).await
    }

    /// Build a client, opening cache connections if a backend is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the request logger, the HTTP
    /// client or any of the three cache connections cannot be set up.
    pub async fn connect(config: ClientConfig) -> Result<Self, ApiError> {
        let caches = match &config.cache {
            Some(endpoint) => {
                let providers = CacheProviders::connect(endpoint, config.timeout)
                    .await
                    .map_err(|e| ConfigError::CacheBackend {
                        location: ErrorLocation::caller(),
                        endpoint: endpoint.to_string(),
                        reason: e.to_string(),
                    })
                    .map_err(collapse)?;
                Some(providers)
            }
            None => None,
        };

        Self::with_cache_providers(config, caches)
    }

    /// Build a client around caller-supplied cache providers.
    ///
    /// `config.cache` is ignored; `caches` is used as given.
    pub fn with_cache_providers(
        config: ClientConfig,
        caches: Option<CacheProviders>,
    ) -> Result<Self, ApiError> {
        Self::build(config, caches).map_err(collapse)
    }

    fn build(config: ClientConfig, caches: Option<CacheProviders>) -> Result<Self, ConfigError> {
        let base_url = config.base_url().map_err(|e| ConfigError::InvalidValue {
            location: ErrorLocation::caller(),
            key: "base url",
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .user_agent(USER_AGENT)
            .default_headers(credential_headers(&config)?)
            .build()
            .map_err(|e| ConfigError::HttpClient {
                location: ErrorLocation::caller(),
                reason: e.to_string(),
            })?;

        let request_logger = match config.request_log_file() {
            Some(path) => Some(Arc::new(RequestLogger::to_file(path)?)),
            None => None,
        };

        info!(
            "NAPI client ready for {} (timeout {}, request log: {}, cache: {})",
            base_url,
            config
                .timeout
                .map_or_else(|| "none".to_string(), |timeout| format!("{}s", timeout.as_secs())),
            request_logger.is_some(),
            caches.is_some()
        );

        Ok(Self {
            base_url,
            client,
            config,
            request_logger,
            caches,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Timeout applied to every request, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.config.timeout
    }

    pub fn request_logger(&self) -> Option<&RequestLogger> {
        self.request_logger.as_deref()
    }

    pub fn cache(&self, role: CacheRole) -> Option<&Arc<dyn CacheProvider>> {
        self.caches.as_ref().map(|caches| caches.get(role))
    }

    /// Repository for a type name such as `"event"`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Lookup`] if the name is not a known object type.
    #[track_caller]
    pub fn repository<T>(&self, name: &str) -> Result<ApiRepository<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let object_type = ObjectType::from_name(name).ok_or_else(|| ApiError::lookup(name))?;
        Ok(self.repository_for(object_type))
    }

    pub fn repository_for<T>(&self, object_type: ObjectType) -> ApiRepository<T>
    where
        T: DeserializeOwned,
    {
        ApiRepository::new(self.clone(), object_type)
    }

    /// Fetch one page of `endpoint`.
    ///
    /// Served from the transport cache when possible; cache failures are
    /// logged and otherwise ignored.
    pub async fn get_page<T>(&self, endpoint: &str, query: &Query) -> Result<Page<T>, NapiClientError>
    where
        T: DeserializeOwned,
    {
        let mut url = self.base_url.join(endpoint)?;
        query.apply_to(&mut url);

        let transport_cache = self.cache(CacheRole::Transport);

        if let Some(cache) = transport_cache {
            match cache.fetch(url.as_str()).await {
                Ok(Some(body)) => match serde_json::from_slice::<PageDocument<T>>(&body) {
                    Ok(document) => {
                        if let Some(logger) = self.request_logger() {
                            logger.cache_hit(&url);
                        }
                        return Ok(Page::from(document));
                    }
                    Err(e) => warn!("Discarding unreadable cached response for {url}: {e}"),
                },
                Ok(None) => {}
                Err(e) => warn!("Transport cache read failed for {url}: {e}"),
            }
        }

        let body = self.send(&url).await?;
        let document: PageDocument<T> = serde_json::from_slice(&body)?;

        if let Some(cache) = transport_cache {
            if let Err(e) = cache.save(url.as_str(), &body, TRANSPORT_CACHE_TTL).await {
                warn!("Transport cache write failed for {url}: {e}");
            }
        }

        Ok(Page::from(document))
    }

    async fn send(&self, url: &Url) -> Result<Vec<u8>, NapiClientError> {
        debug!("GET {url}");
        if let Some(logger) = self.request_logger() {
            logger.request(url);
        }

        let mut request = self.client.get(url.clone());
        if let Some(auth) = &self.config.http_auth {
            request = request.basic_auth(&auth.username, Some(auth.password.expose()));
        }

        let started = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let error = NapiClientError::from(e);
                if let Some(logger) = self.request_logger() {
                    logger.failure(url, &error);
                }
                return Err(error);
            }
        };

        let status = HttpStatusCode(response.status().as_u16());
        if let Some(logger) = self.request_logger() {
            logger.response(url, status, started.elapsed());
        }

        if status.is_auth_failure() {
            error!("NAPI refused the configured credentials (HTTP {status}) for {url}");
        } else if status.is_server_error() {
            warn!("NAPI server error (HTTP {status}) for {url}");
        }

        if !status.is_success() {
            return Err(NapiClientError::server(
                status,
                response.text().await.unwrap_or_default(),
            ));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl fmt::Debug for NapiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NapiClient")
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .field("request_logger", &self.request_logger)
            .field("caches", &self.caches)
            .finish()
    }
}

fn credential_headers(config: &ClientConfig) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();

    if !config.user_id.is_empty() {
        let value = HeaderValue::from_str(&config.user_id)
            .map_err(|e| ConfigError::invalid(crate::config::keys::USER_ID, e.to_string()))?;
        headers.insert(USER_ID_HEADER_KEY, value);
    }

    if !config.access_token.is_empty() {
        let mut value = HeaderValue::from_str(config.access_token.expose())
            .map_err(|_| ConfigError::invalid(crate::config::keys::ACCESS_TOKEN, "not a valid header value"))?;
        value.set_sensitive(true);
        headers.insert(ACCESS_TOKEN_HEADER_KEY, value);
    }

    Ok(headers)
}

/// Log the construction failure and hand back the uniform error.
#[track_caller]
fn collapse(error: ConfigError) -> ApiError {
    error!("NAPI client construction failed: {error}");
    ApiError::configuration()
}
