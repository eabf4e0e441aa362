//! Process configuration loaded once at start-up.
//!
//! Values come from the environment, optionally seeded from a `.env` file.
//! The resulting [`AppConfig`] is immutable and handed to the call sites that
//! need it.

use crate::task::{domain::OwnerId, services::RetryPolicy};
use camino::Utf8Path;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Bearer credential for the hosted API.
pub const TOKEN_VAR: &str = "NOTION_TOKEN";
/// Database holding the daily task pages.
pub const TASKS_DATABASE_VAR: &str = "MAIN_DB_ID";
/// Database receiving one log page per run.
pub const LOG_DATABASE_VAR: &str = "LOG_DB_ID";
/// Tracked owners, in processing order.
pub const OWNER_VARS: [&str; 2] = ["USER_1_ID", "USER_2_ID"];
/// Optional API base URL override.
pub const API_URL_VAR: &str = "NOTION_API_URL";
/// Optional number of attempts per remote call.
pub const RETRY_ATTEMPTS_VAR: &str = "CARRY_FORWARD_RETRY_ATTEMPTS";
/// Optional delay between attempts, in milliseconds.
pub const RETRY_DELAY_VAR: &str = "CARRY_FORWARD_RETRY_DELAY_MS";
/// Optional template for the success log message.
pub const LOG_TEMPLATE_VAR: &str = "CARRY_FORWARD_LOG_TEMPLATE";

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.notion.com";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required configuration variable {0}")]
    Missing(&'static str),

    /// A variable holds an unusable value.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The requested environment file could not be read.
    #[error("failed to load environment file {path}: {source}")]
    EnvFile {
        /// Path of the file.
        path: String,
        /// Underlying loader error.
        #[source]
        source: dotenvy::Error,
    },
}

/// Connection settings for the hosted database API.
#[derive(Clone, PartialEq, Eq)]
pub struct NotionConfig {
    /// Base URL, without the `/v1` suffix.
    pub api_url: String,
    /// Database holding task pages.
    pub tasks_database_id: String,
    /// Database receiving run log pages.
    pub log_database_id: String,
    token: String,
}

impl NotionConfig {
    /// Creates connection settings.
    #[must_use]
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        tasks_database_id: impl Into<String>,
        log_database_id: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            tasks_database_id: tasks_database_id.into(),
            log_database_id: log_database_id.into(),
            token: token.into(),
        }
    }

    /// Returns the bearer credential.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionConfig")
            .field("api_url", &self.api_url)
            .field("tasks_database_id", &self.tasks_database_id)
            .field("log_database_id", &self.log_database_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Immutable process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Remote store connection.
    pub notion: NotionConfig,
    /// Owners whose tasks are carried forward, in processing order.
    pub owners: Vec<OwnerId>,
    /// Retry policy applied to every remote call.
    pub retry: RetryPolicy,
    /// Template overriding the default success message.
    pub log_template: Option<String>,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// When `env_file` is given it must exist and is loaded first; otherwise a
    /// `.env` file in the working directory is loaded if present. Variables
    /// already set in the environment take precedence over file entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the environment file cannot be read or a
    /// variable is missing or invalid.
    pub fn from_env(env_file: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
                    path: path.to_string(),
                    source,
                })?;
            }
            None => {
                if let Err(source) = dotenvy::dotenv()
                    && !source.not_found()
                {
                    return Err(ConfigError::EnvFile {
                        path: ".env".to_owned(),
                        source,
                    });
                }
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = required(&lookup, TOKEN_VAR)?;
        let tasks_database_id = required(&lookup, TASKS_DATABASE_VAR)?;
        let log_database_id = required(&lookup, LOG_DATABASE_VAR)?;
        let api_url = optional(&lookup, API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        let owners = OWNER_VARS
            .iter()
            .map(|&key| {
                let value = required(&lookup, key)?;
                OwnerId::new(value).map_err(|err| ConfigError::Invalid {
                    key,
                    reason: err.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let defaults = RetryPolicy::default();
        let default_attempts = defaults.max_attempts();
        let default_delay = defaults.delay();
        let attempts = parsed(&lookup, RETRY_ATTEMPTS_VAR)?.unwrap_or(default_attempts);
        if attempts == 0 {
            return Err(ConfigError::Invalid {
                key: RETRY_ATTEMPTS_VAR,
                reason: "at least one attempt is required".to_owned(),
            });
        }
        let delay = parsed::<u64>(&lookup, RETRY_DELAY_VAR)?
            .map_or(default_delay, Duration::from_millis);

        Ok(Self {
            notion: NotionConfig::new(api_url, token, tasks_database_id, log_database_id),
            owners,
            retry: RetryPolicy::new(attempts, delay),
            log_template: optional(&lookup, LOG_TEMPLATE_VAR),
        })
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    optional(lookup, key).ok_or(ConfigError::Missing(key))
}

fn parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    optional(lookup, key)
        .map(|value| {
            value.parse::<T>().map_err(|err| ConfigError::Invalid {
                key,
                reason: format!("'{value}': {err}"),
            })
        })
        .transpose()
}
