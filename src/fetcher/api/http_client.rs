//! HTTP client creation and configuration utilities

use reqwest::Client;
use std::time::Duration;

use crate::config::Config;

/// Builds the shared HTTP client from the application config.
///
/// One client serves the whole multi-season scan, so connections to the
/// API host are pooled and reused across the fan-out. The request timeout
/// comes from the config (default 30 seconds).
pub fn create_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_seconds))
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}
