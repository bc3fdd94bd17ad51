//! Configuration bag for the NAPI client.
//!
//! The bag is a flat string map keyed by the extension configuration names
//! (`NDK_NAPI_HOST`, `NDK_REDIS_CACHE.host`, ...). It can be filled from a
//! TOML file, from the process environment, or by hand. Validation happens
//! later in [`ClientConfig::from_bag`].

pub mod client;
pub mod context;

pub use client::{CacheEndpoint, ClientConfig, HttpAuth};
pub use context::ApplicationContext;

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

pub mod keys {
    pub const USER_ID: &str = "NDK_NAPI_USER_ID";
    pub const ACCESS_TOKEN: &str = "NDK_NAPI_ACCESS_TOKEN";
    pub const HOST: &str = "NDK_NAPI_HOST";
    pub const PORT: &str = "NDK_NAPI_PORT";
    pub const PATH: &str = "NDK_NAPI_PATH";
    pub const PROTOCOL: &str = "NDK_NAPI_PROTOCOL";
    pub const VERSION: &str = "NDK_NAPI_VERSION";
    pub const TIMEOUT: &str = "NDK_NAPI_TIMEOUT";
    pub const HTTP_AUTH_USERNAME: &str = "NDK_HTTP_AUTH_USERNAME";
    pub const HTTP_AUTH_PASSWORD: &str = "NDK_HTTP_AUTH_PASSWORD";
    pub const LOG_FILE: &str = "NDK_LOG_FILE";
    pub const REDIS_CACHE_HOST: &str = "NDK_REDIS_CACHE.host";
    pub const REDIS_CACHE_PORT: &str = "NDK_REDIS_CACHE.port";

    /// Keys that are read verbatim from the environment.
    pub const FLAT: [&str; 11] = [
        USER_ID,
        ACCESS_TOKEN,
        HOST,
        PORT,
        PATH,
        PROTOCOL,
        VERSION,
        TIMEOUT,
        HTTP_AUTH_USERNAME,
        HTTP_AUTH_PASSWORD,
        LOG_FILE,
    ];

    /// Environment spelling of the nested cache keys, which cannot contain a dot.
    pub const NESTED_ENV: [(&str, &str); 2] = [
        ("NDK_REDIS_CACHE_HOST", REDIS_CACHE_HOST),
        ("NDK_REDIS_CACHE_PORT", REDIS_CACHE_PORT),
    ];
}

/// Environment variable naming a TOML file to read before the environment.
pub const CONFIG_FILE_ENV: &str = "NKC_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "nkc-base";
const DEFAULT_CONFIG_FILE_NAME: &str = "napi.toml";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConfigBag {
    values: BTreeMap<String, String>,
}

impl ConfigBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value for `key` unless it is absent or blank.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|value| !value.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay `other` on top of `self`; keys present in `other` win.
    pub fn merge(&mut self, other: ConfigBag) {
        self.values.extend(other.values);
    }

    /// Parse a TOML document. Nested tables are flattened with a dot.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            location: ErrorLocation::from(Location::caller()),
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut bag = Self::new();
        flatten_table(&mut bag, None, &table);
        Ok(bag)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        let bag = Self::from_toml_str(&contents, path)?;
        info!("NAPI config loaded from {}", path.display());
        Ok(bag)
    }

    /// Collect recognised keys from `(name, value)` pairs such as `env::vars()`.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut bag = Self::new();
        for (name, value) in vars {
            let name = name.as_ref();
            if keys::FLAT.contains(&name) {
                bag.insert(name, value);
            } else if let Some((_, key)) = keys::NESTED_ENV.iter().find(|(env, _)| *env == name) {
                bag.insert(*key, value);
            }
        }
        bag
    }

    /// Build the bag the process-wide client is created from.
    ///
    /// Loads `.env` first, then the TOML file named by `NKC_CONFIG_FILE`
    /// (or the default file under the user config dir, if present), then
    /// overlays the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        try_load_dotenv();

        let mut bag = match config_file_path() {
            Some(path) => Self::load(&path)?,
            None => {
                debug!("No NAPI config file found - using environment only");
                Self::new()
            }
        };

        bag.merge(Self::from_vars(env::vars()));
        Ok(bag)
    }
}

impl fmt::Debug for ConfigBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.values {
            if is_secret_key(key) {
                map.entry(key, &"[REDACTED]");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

fn is_secret_key(key: &str) -> bool {
    key == keys::ACCESS_TOKEN || key == keys::HTTP_AUTH_PASSWORD
}

fn flatten_table(bag: &mut ConfigBag, prefix: Option<&str>, table: &toml::Table) {
    for (name, value) in table {
        let key = match prefix {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.clone(),
        };

        match value {
            toml::Value::Table(nested) => flatten_table(bag, Some(key.as_str()), nested),
            toml::Value::String(text) => bag.insert(key, text.clone()),
            toml::Value::Integer(number) => bag.insert(key, number.to_string()),
            toml::Value::Float(number) => bag.insert(key, number.to_string()),
            toml::Value::Boolean(flag) => bag.insert(key, flag.to_string()),
            other => warn!("Ignoring unsupported NAPI config value for {key}: {other}"),
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_FILE_ENV) {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|dir| dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

/// Attempts to load `.env` from the working directory, then next to the executable.
fn try_load_dotenv() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return Some(path);
    }

    let env_path = env::current_exe().ok()?.parent()?.join(".env");
    if !env_path.exists() {
        return None;
    }

    match dotenvy::from_path(&env_path) {
        Ok(()) => {
            info!("Loaded .env from: {:?}", env_path);
            Some(env_path)
        }
        Err(e) => {
            warn!("Failed to parse .env at {:?}: {}", env_path, e);
            None
        }
    }
}
