use crate::error::config::ConfigError;

use std::env;
use std::fmt;
use std::str::FromStr;

use log::warn;

/// Environment variable holding the application context.
pub const CONTEXT_ENV: &str = "NKC_CONTEXT";

/// Deployment context the CMS is running in.
///
/// Written as `Production`, `Development` or `Testing`, optionally followed
/// by a sub-context such as `Development/Local`. Anything unrecognised is
/// treated as production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicationContext {
    #[default]
    Production,
    Development,
    Testing,
}

impl ApplicationContext {
    pub fn from_env() -> Self {
        match env::var(CONTEXT_ENV) {
            Ok(value) => value.parse::<Self>().unwrap_or_else(|e| {
                warn!("{e} - assuming Production");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, ApplicationContext::Development)
    }
}

impl FromStr for ApplicationContext {
    type Err = ConfigError;

    #[track_caller]
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let root = value.split('/').next().unwrap_or_default().trim();
        match root {
            "Production" => Ok(ApplicationContext::Production),
            "Development" => Ok(ApplicationContext::Development),
            "Testing" => Ok(ApplicationContext::Testing),
            other => Err(ConfigError::invalid(
                CONTEXT_ENV,
                format!("unknown application context '{other}'"),
            )),
        }
    }
}

impl fmt::Display for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApplicationContext::Production => "Production",
            ApplicationContext::Development => "Development",
            ApplicationContext::Testing => "Testing",
        };
        write!(f, "{name}")
    }
}
