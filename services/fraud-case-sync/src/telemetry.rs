// Logging and error reporting setup

use crate::config::{Config, LogFormat};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Error events are forwarded to Sentry once
/// `init_error_reporting` has bound a client; until then the layer is inert.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(sentry::integrations::tracing::layer());

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

/// Log format requested via `LOG_FORMAT`, readable before the full config
pub fn log_format_from_env() -> LogFormat {
    LogFormat::from_value(std::env::var("LOG_FORMAT").ok().as_deref())
}

/// Start the Sentry client. An empty DSN yields a disabled client.
/// Keep the guard alive for the life of the process; dropping it flushes
/// pending events.
pub fn init_error_reporting(
    config: &Config,
) -> Result<sentry::ClientInitGuard, sentry::types::ParseDsnError> {
    let dsn = if config.sentry_dsn.is_empty() {
        None
    } else {
        Some(config.sentry_dsn.parse()?)
    };

    Ok(sentry::init(sentry::ClientOptions {
        dsn,
        debug: config.debug,
        release: sentry::release_name!(),
        ..Default::default()
    }))
}
