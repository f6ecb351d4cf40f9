//! Runtime configuration from the environment.

use std::env;
use std::time::Duration;

use simplelog::LevelFilter;

use crate::error::AppError;

/// Base URL of the paged artwork service.
pub const API_URL_VAR: &str = "ARTWORKS_API_URL";
/// Optional per-request timeout in whole seconds.
pub const TIMEOUT_VAR: &str = "ARTWORKS_TIMEOUT_SECS";
/// Optional connect timeout in whole seconds.
pub const CONNECT_TIMEOUT_VAR: &str = "ARTWORKS_CONNECT_TIMEOUT_SECS";
/// Optional log level (`error`, `warn`, `info`, `debug`, `trace`, `off`).
pub const LOG_VAR: &str = "ARTWORKS_LOG";

/// Service URL baked in at build time, used when the variable is unset at runtime.
const BUILD_API_URL: Option<&str> = option_env!("ARTWORKS_API_URL");

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub log_level: LevelFilter,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first, if present.
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok(), BUILD_API_URL)
    }

    /// Builds configuration from a variable lookup and a fallback URL.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        fallback_url: Option<&str>,
    ) -> Result<Self, AppError> {
        let api_url = lookup(API_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .or_else(|| fallback_url.map(str::to_string))
            .ok_or_else(|| AppError::Config(format!("{} is not set", API_URL_VAR)))?;

        let timeout = seconds(&lookup, TIMEOUT_VAR)?;
        let connect_timeout = seconds(&lookup, CONNECT_TIMEOUT_VAR)?;

        let log_level = match lookup(LOG_VAR) {
            None => LevelFilter::Debug,
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::Config(format!("{} has unknown log level {:?}", LOG_VAR, raw))
            })?,
        };

        Ok(Self {
            api_url,
            timeout,
            connect_timeout,
            log_level,
        })
    }
}

/// Reads an optional positive number of seconds.
fn seconds(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Result<Option<Duration>, AppError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(AppError::Config(format!(
            "{} must be a positive number of seconds, got {:?}",
            var, raw
        ))),
    }
}
