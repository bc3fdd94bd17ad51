//! Per-client request log.
//!
//! Built with fern but never installed as the global logger: the dispatch
//! is turned into a standalone [`log::Log`] owned by the client, so request
//! lines go to the configured file and nowhere else.

use crate::error::config::ConfigError;

use common::{ErrorLocation, HttpStatusCode};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use fern::Dispatch;
use humantime::format_rfc3339;
use log::{Level, LevelFilter, Log, Record};
use url::Url;

pub const REQUEST_LOGGER_TARGET: &str = "NdkRequestLogger";

pub struct RequestLogger {
    logger: Box<dyn Log>,
    path: PathBuf,
}

impl RequestLogger {
    /// Open (or append to) `path` and log requests into it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RequestLogger`] if the file cannot be opened.
    #[track_caller]
    pub fn to_file(path: &Path) -> Result<Self, ConfigError> {
        let file = fern::log_file(path).map_err(|e| ConfigError::RequestLogger {
            location: ErrorLocation::caller(),
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let (_, logger) = Dispatch::new()
            .level(LevelFilter::Debug)
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{date} - {level}] {message}",
                    date = format_rfc3339(SystemTime::now()),
                    level = record.level(),
                    message = message,
                ))
            })
            .chain(file)
            .into_log();

        Ok(Self {
            logger,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn request(&self, url: &Url) {
        self.write(Level::Info, format_args!("GET {url}"));
    }

    /// Successes log at info, rejected queries at warn, refused credentials
    /// and server failures at error.
    pub fn response(&self, url: &Url, status: HttpStatusCode, elapsed: Duration) {
        let level = match status {
            status if status.is_success() => Level::Info,
            status if status.is_client_error() && !status.is_auth_failure() => Level::Warn,
            _ => Level::Error,
        };
        self.write(
            level,
            format_args!("HTTP {status} for {url} in {}ms", elapsed.as_millis()),
        );
    }

    pub fn cache_hit(&self, url: &Url) {
        self.write(Level::Debug, format_args!("cache hit for {url}"));
    }

    pub fn failure(&self, url: &Url, error: &dyn std::error::Error) {
        self.write(Level::Error, format_args!("request to {url} failed: {error}"));
    }

    fn write(&self, level: Level, args: fmt::Arguments<'_>) {
        self.logger.log(
            &Record::builder()
                .args(args)
                .level(level)
                .target(REQUEST_LOGGER_TARGET)
                .build(),
        );
        self.logger.flush();
    }
}

impl fmt::Debug for RequestLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLogger")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
