//! `tracing` subscriber setup.
//!
//! `CSR_LOG` holds the filter directives (default `info`); set
//! `CSR_LOG_FORMAT=json` for structured output.

use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "CSR_LOG";
pub const LOG_FORMAT_ENV: &str = "CSR_LOG_FORMAT";

pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    // A second init (tests, re-entry) keeps the first subscriber.
    let installed = match std::env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => builder.json().try_init(),
        _ => builder.try_init(),
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
