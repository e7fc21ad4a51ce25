// Configuration for Fraud Case Sync service

use crate::transformer::TransformOptions;
use std::env;
use thiserror::Error;
use tracing::warn;

/// Variables that must be present at startup
pub const REQUIRED_VARS: [&str; 6] = [
    "RMQ_AMQP_URL",
    "RMQ_QUEUE_NAME",
    "SENTRY_DSN",
    "CDQ_FRAUD_CASES_API_URL",
    "CATENAX_API_URL",
    "CATENAX_API_KEY",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Env var ${0} is missing")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub amqp_url: String,
    pub queue_name: String,
    /// Empty disables error reporting
    pub sentry_dsn: String,
    pub source_api_url: String,
    pub destination_api_url: String,
    pub destination_api_key: String,
    pub debug: bool,
    pub log_format: LogFormat,
    pub transform: TransformOptions,
}

impl Config {
    /// Read from the process environment. `.env` is loaded by `main` before
    /// logging starts.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::MissingVar(name));

        // Check presence of everything up front so the first missing var is reported
        for name in REQUIRED_VARS {
            required(name)?;
        }

        let debug = optional_bool(&lookup, "DEBUG");
        let skip_missing_country_code = optional_bool(&lookup, "SKIP_MISSING_COUNTRY_CODE");

        let log_format = LogFormat::from_value(lookup("LOG_FORMAT").as_deref());

        Ok(Self {
            amqp_url: required("RMQ_AMQP_URL")?,
            queue_name: required("RMQ_QUEUE_NAME")?,
            sentry_dsn: required("SENTRY_DSN")?,
            source_api_url: required("CDQ_FRAUD_CASES_API_URL")?,
            destination_api_url: required("CATENAX_API_URL")?,
            destination_api_key: required("CATENAX_API_KEY")?,
            debug,
            log_format,
            transform: TransformOptions {
                skip_missing_country_code,
            },
        })
    }
}

/// Optional flag: absent is `false`, unparseable logs a warning and is `false`
fn optional_bool<F>(lookup: &F, name: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| {
            parse_bool(&raw).unwrap_or_else(|| {
                warn!("Unable to parse env var ${}={} as bool", name, raw);
                false
            })
        })
        .unwrap_or(false)
}

/// Accepts the usual spellings: 1/0, t/f, true/false in any case
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}
