use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Pick the filter: `RUST_LOG` wins, otherwise `fallback`.
fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::try_new(fallback).unwrap_or_else(|_| EnvFilter::new("info")))
}

/// Initialize tracing subscriber with compact human-readable output.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,sea_orm=warn,sqlx=warn`
/// - Writes to stderr so stdout stays reserved for command output
pub fn init_logging_default() {
    init_logging_compact("info,sea_orm=warn,sqlx=warn");
}

pub fn init_logging_compact(fallback: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(fallback))
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// - Respects `RUST_LOG` if set, otherwise uses `fallback`
/// - Emits one JSON object per event for machine parsing
pub fn init_logging_json(fallback: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(fallback))
        .with_target(true)
        .json()
        .with_writer(io::stderr)
        .try_init();
}

/// Initialize logging from the `json` switch and fallback filter of the app config.
pub fn init_from_settings(json: bool, fallback: &str) {
    if json {
        init_logging_json(fallback);
    } else {
        init_logging_compact(fallback);
    }
    tracing::debug!(event = "logger_init", json, fallback, "tracing subscriber initialized");
}
