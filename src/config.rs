//! Store configuration loaded from the environment.
//!
//! | Env Var                         | Default     |
//! |---------------------------------|-------------|
//! | `DATABASE_URL`                  | required    |
//! | `PERCURSO_POOL_SIZE`            | `10`        |
//! | `PERCURSO_CONNECT_TIMEOUT_MS`   | `5000`      |
//! | `PERCURSO_STATEMENT_TIMEOUT_MS` | `10000`     |
//! | `PERCURSO_VACATED_SLOT_POLICY`  | `leave_gap` |

use crate::board::domain::VacatedSlotPolicy;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_STATEMENT_TIMEOUT_MS: u64 = 10_000;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    /// A variable is set to a value that cannot be parsed.
    #[error("environment variable {name} has invalid value '{value}'")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Connection and behaviour settings for the board store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    database_url: String,
    max_pool_size: u32,
    connect_timeout: Duration,
    statement_timeout: Duration,
    vacated_slot_policy: VacatedSlotPolicy,
}

impl StoreConfig {
    /// Creates a configuration with default limits for `database_url`.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: DEFAULT_POOL_SIZE,
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            statement_timeout: Duration::from_millis(DEFAULT_STATEMENT_TIMEOUT_MS),
            vacated_slot_policy: VacatedSlotPolicy::default(),
        }
    }

    /// Loads configuration from the process environment, reading a `.env`
    /// file first when one is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or a variable
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            tracing::debug!(error = %err, "no .env file loaded");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or a variable
    /// cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let mut config = Self::new(database_url);

        if let Some(size) = parse_var(&lookup, "PERCURSO_POOL_SIZE")? {
            config.max_pool_size = size;
        }
        if let Some(ms) = parse_var(&lookup, "PERCURSO_CONNECT_TIMEOUT_MS")? {
            config.connect_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var(&lookup, "PERCURSO_STATEMENT_TIMEOUT_MS")? {
            config.statement_timeout = Duration::from_millis(ms);
        }
        if let Some(policy) = parse_var(&lookup, "PERCURSO_VACATED_SLOT_POLICY")? {
            config.vacated_slot_policy = policy;
        }
        Ok(config)
    }

    /// Sets the statement timeout.
    #[must_use]
    pub const fn with_statement_timeout(mut self, timeout: Duration) -> Self {
        self.statement_timeout = timeout;
        self
    }

    /// Sets the vacated slot policy for single-task moves.
    #[must_use]
    pub const fn with_vacated_slot_policy(mut self, policy: VacatedSlotPolicy) -> Self {
        self.vacated_slot_policy = policy;
        self
    }

    /// Returns the database URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn max_pool_size(&self) -> u32 {
        self.max_pool_size
    }

    /// Returns how long to wait for a pooled connection.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the per-statement timeout applied by the store.
    #[must_use]
    pub const fn statement_timeout(&self) -> Duration {
        self.statement_timeout
    }

    /// Returns the upper bound for one repository call: acquiring a
    /// connection plus running its statements.
    #[must_use]
    pub const fn call_timeout(&self) -> Duration {
        self.connect_timeout.saturating_add(self.statement_timeout)
    }

    /// Returns the vacated slot policy for single-task moves.
    #[must_use]
    pub const fn vacated_slot_policy(&self) -> VacatedSlotPolicy {
        self.vacated_slot_policy
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(name)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| ConfigError::Invalid { name, value })
        })
        .transpose()
}
