use std::env;

use chrono::Duration;
use thiserror::Error;

use crate::application::order_service::DEFAULT_LICENSE_TERM_DAYS;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Process configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub license_term_days: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "a valid port number",
                value: raw,
            })?,
            None => 8080,
        };

        let license_term_days = match lookup("LICENSE_TERM_DAYS") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(days) if days > 0 => days,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "LICENSE_TERM_DAYS",
                        expected: "a positive number of days",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_LICENSE_TERM_DAYS,
        };

        Ok(Self {
            database_url,
            host,
            port,
            license_term_days,
        })
    }

    pub fn license_term(&self) -> Duration {
        Duration::days(self.license_term_days)
    }
}
