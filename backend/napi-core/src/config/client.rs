use super::context::ApplicationContext;
use super::{ConfigBag, keys};
use crate::error::config::ConfigError;

use common::RedactedSecret;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use url::Url;

/// Request timeout applied when `NDK_NAPI_TIMEOUT` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Keys that must be present and non-empty, in the order they are checked.
const REQUIRED_KEYS: [&str; 5] = [
    keys::HOST,
    keys::PORT,
    keys::PATH,
    keys::PROTOCOL,
    keys::VERSION,
];

/// HTTP basic-auth credentials sent in front of the API token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpAuth {
    pub username: String,
    pub password: RedactedSecret,
}

/// Address of the shared cache backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEndpoint {
    pub host: String,
    pub port: u16,
}

impl CacheEndpoint {
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }
}

impl fmt::Display for CacheEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Validated client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_id: String,
    pub access_token: RedactedSecret,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub protocol: String,
    pub version: String,
    pub http_auth: Option<HttpAuth>,
    /// `None` when `NDK_NAPI_TIMEOUT` is 0: requests may take as long as they need.
    pub timeout: Option<Duration>,
    pub log_file: Option<PathBuf>,
    pub cache: Option<CacheEndpoint>,
    pub context: ApplicationContext,
}

impl ClientConfig {
    /// Validate a configuration bag.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if host, port, path, protocol or
    /// version is absent or blank, and [`ConfigError::InvalidValue`] if the
    /// port, protocol, timeout or cache port cannot be used.
    pub fn from_bag(bag: &ConfigBag, context: ApplicationContext) -> Result<Self, ConfigError> {
        for key in REQUIRED_KEYS {
            if bag.non_empty(key).is_none() {
                return Err(ConfigError::missing(key));
            }
        }

        let host = required(bag, keys::HOST)?.to_string();
        let port = parse_port(keys::PORT, required(bag, keys::PORT)?)?;
        let path = required(bag, keys::PATH)?.to_string();
        let version = required(bag, keys::VERSION)?.to_string();

        let protocol = required(bag, keys::PROTOCOL)?.to_ascii_lowercase();
        if protocol != "http" && protocol != "https" {
            return Err(ConfigError::invalid(
                keys::PROTOCOL,
                format!("expected http or https, got '{protocol}'"),
            ));
        }

        let timeout = match bag.non_empty(keys::TIMEOUT) {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    ConfigError::invalid(keys::TIMEOUT, format!("'{raw}' is not a number of seconds: {e}"))
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        };

        let http_auth = bag.non_empty(keys::HTTP_AUTH_USERNAME).map(|username| HttpAuth {
            username: username.to_string(),
            password: RedactedSecret::new(bag.get(keys::HTTP_AUTH_PASSWORD).unwrap_or_default()),
        });

        let cache = match (
            bag.non_empty(keys::REDIS_CACHE_HOST),
            bag.non_empty(keys::REDIS_CACHE_PORT),
        ) {
            (Some(host), Some(port)) => Some(CacheEndpoint {
                host: host.to_string(),
                port: parse_port(keys::REDIS_CACHE_PORT, port)?,
            }),
            (None, None) => None,
            _ => {
                debug!("NDK_REDIS_CACHE needs both host and port - cache backend disabled");
                None
            }
        };

        Ok(Self {
            user_id: bag.get(keys::USER_ID).unwrap_or_default().to_string(),
            access_token: RedactedSecret::new(bag.get(keys::ACCESS_TOKEN).unwrap_or_default()),
            host,
            port,
            path,
            protocol,
            version,
            http_auth,
            timeout,
            log_file: bag.non_empty(keys::LOG_FILE).map(PathBuf::from),
            cache,
            context,
        })
    }

    /// `{protocol}://{host}:{port}/{path}/{version}/`, with empty segments dropped.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        let segments: Vec<&str> = [self.path.as_str(), self.version.as_str()]
            .into_iter()
            .flat_map(|segment| segment.split('/'))
            .filter(|segment| !segment.is_empty())
            .collect();

        let mut base = format!("{}://{}:{}/", self.protocol, self.host, self.port);
        for segment in segments {
            base.push_str(segment);
            base.push('/');
        }

        Url::parse(&base)
    }

    /// The request log file, if one is configured and the context allows it.
    pub fn request_log_file(&self) -> Option<&Path> {
        if self.context.is_development() {
            self.log_file.as_deref()
        } else {
            None
        }
    }
}

fn required<'a>(bag: &'a ConfigBag, key: &'static str) -> Result<&'a str, ConfigError> {
    bag.non_empty(key).ok_or_else(|| ConfigError::missing(key))
}

fn parse_port(key: &'static str, raw: &str) -> Result<u16, ConfigError> {
    raw.parse::<u16>()
        .map_err(|e| ConfigError::invalid(key, format!("'{raw}' is not a valid port: {e}")))
}
