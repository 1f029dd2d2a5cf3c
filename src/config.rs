//! Environment-driven runtime configuration.

use std::env;
use std::net::SocketAddr;
use thiserror::Error;

/// Default access-token lifetime in minutes.
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Default invite lifetime in hours.
const DEFAULT_INVITE_TTL_HOURS: i64 = 72;

/// Default listen address for the REST adapter.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Errors returned while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable holds an unparsable value.
    #[error("invalid value '{value}' for {name}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Runtime settings for the portal service.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Listen address for the REST adapter.
    pub bind_addr: SocketAddr,
    /// Secret used to sign access tokens.
    pub jwt_secret: String,
    /// Access-token lifetime in minutes.
    pub token_ttl_minutes: i64,
    /// Invite lifetime in hours.
    pub invite_ttl_hours: i64,
}

impl Config {
    /// Loads configuration from `ATELIER_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `ATELIER_DATABASE_URL` or
    /// `ATELIER_JWT_SECRET` are unset, or when an optional variable holds an
    /// unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require_var("ATELIER_DATABASE_URL")?;
        let jwt_secret = require_var("ATELIER_JWT_SECRET")?;
        let bind_addr = parse_var("ATELIER_BIND_ADDR", DEFAULT_BIND_ADDR.parse().ok())?
            .ok_or(ConfigError::MissingVar("ATELIER_BIND_ADDR"))?;
        let token_ttl_minutes =
            parse_var("ATELIER_TOKEN_TTL_MINUTES", Some(DEFAULT_TOKEN_TTL_MINUTES))?
                .ok_or(ConfigError::MissingVar("ATELIER_TOKEN_TTL_MINUTES"))?;
        let invite_ttl_hours = parse_var("ATELIER_INVITE_TTL_HOURS", Some(DEFAULT_INVITE_TTL_HOURS))?
            .ok_or(ConfigError::MissingVar("ATELIER_INVITE_TTL_HOURS"))?;

        Ok(Self {
            database_url,
            bind_addr,
            jwt_secret,
            token_ttl_minutes,
            invite_ttl_hours,
        })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    default: Option<T>,
) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar { name, value: raw }),
        Err(_) => Ok(default),
    }
}
