//! Generic HTTP fetching with caching, retry logic, and error handling

use rand::Rng;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::constants::retry;
use crate::error::AppError;
use crate::fetcher::cache::{CacheLookup, ResponseCache};

/// Generic fetch function with response caching, retry logic, and
/// comprehensive error handling.
///
/// This function:
/// - Checks the response cache first, including negative entries (a cached
///   404 short-circuits without touching the network)
/// - Implements retry logic with jittered exponential backoff for transient
///   failures, respecting Retry-After headers for rate limiting
/// - Caches successful responses, and caches 404s / post-retry transport
///   failures as negative entries so persistent failures are not hot-looped
/// - Maps HTTP status codes to specific error types
///
/// # Arguments
/// * `client` - HTTP client for making requests
/// * `cache` - Response cache owned by the caller
/// * `url` - URL to fetch data from
///
/// # Returns
/// * `Result<T, AppError>` - Parsed response data or error
#[instrument(skip(client, cache))]
pub(crate) async fn fetch<T: DeserializeOwned>(
    client: &Client,
    cache: &ResponseCache,
    url: &str,
) -> Result<T, AppError> {
    debug!("Fetching data from URL: {url}");

    // Check the response cache first
    match cache.lookup(url).await {
        CacheLookup::Hit(cached_body) => {
            match serde_json::from_str::<T>(&cached_body) {
                Ok(parsed) => return Ok(parsed),
                Err(e) => {
                    warn!("Failed to parse cached response for URL {}: {}", url, e);
                    // Continue with fresh request if cached response is invalid
                }
            }
        }
        CacheLookup::NegativeHit => {
            return Err(AppError::api_not_found(url));
        }
        CacheLookup::Miss => {}
    }

    // Handle reqwest errors with retries/backoff for transient failures
    let mut attempt = 0u32;
    let mut backoff = Duration::from_millis(retry::BASE_DELAY_MS);
    let mut rng = SmallRng::from_os_rng();
    let response = loop {
        // +/- JITTER_FRACTION around the nominal backoff, so many clients
        // retrying the same outage don't re-align on each attempt
        let jittered = backoff.mul_f64(
            rng.random_range((1.0 - retry::JITTER_FRACTION)..(1.0 + retry::JITTER_FRACTION)),
        );
        match client.get(url).send().await {
            Ok(resp) => {
                let status = resp.status();
                if (status.as_u16() == 429 || status.is_server_error())
                    && attempt < retry::MAX_ATTEMPTS
                {
                    // Respect Retry-After if provided
                    let retry_after = resp
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|h| h.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .map(Duration::from_secs);
                    let wait = retry_after.unwrap_or(jittered);
                    warn!(
                        "Transient {} from {}. Retrying in {:?} (attempt {}/{})",
                        status,
                        url,
                        wait,
                        attempt + 1,
                        retry::MAX_ATTEMPTS
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                    backoff = backoff.saturating_mul(2);
                    continue;
                }
                break resp;
            }
            Err(e) => {
                if (e.is_timeout() || e.is_connect()) && attempt < retry::MAX_ATTEMPTS {
                    warn!(
                        "Request error {} for {}. Retrying in {:?} (attempt {}/{})",
                        e,
                        url,
                        jittered,
                        attempt + 1,
                        retry::MAX_ATTEMPTS
                    );
                    tokio::time::sleep(jittered).await;
                    attempt += 1;
                    backoff = backoff.saturating_mul(2);
                    continue;
                }
                error!("Request failed for URL {}: {}", url, e);
                // Out of retries: negative-cache so the rest of the scan
                // doesn't keep re-dialing a dead endpoint
                cache.insert_negative(url.to_string()).await;
                return if e.is_timeout() {
                    Err(AppError::network_timeout(url))
                } else if e.is_connect() {
                    Err(AppError::network_connection(url, e.to_string()))
                } else {
                    Err(AppError::ApiFetch(e))
                };
            }
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");

        error!("HTTP {} - {} (URL: {})", status_code, reason, url);

        if status_code == 404 {
            // The API answers 404 for unknown users/leagues; remember that
            // so repeated scans don't re-ask within the negative TTL
            cache.insert_negative(url.to_string()).await;
            return Err(AppError::api_not_found(url));
        }

        // Return specific error types based on HTTP status code
        return Err(match status_code {
            429 => AppError::api_rate_limit(reason, url),
            400..=499 => AppError::api_client_error(status_code, reason, url),
            500..=599 => {
                if status_code == 502 || status_code == 503 {
                    AppError::api_service_unavailable(status_code, reason, url)
                } else {
                    AppError::api_server_error(status_code, reason, url)
                }
            }
            _ => AppError::api_server_error(status_code, reason, url),
        });
    }

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length: {} bytes", response_text.len());

    // Enhanced JSON parsing with more specific error handling
    match serde_json::from_str::<T>(&response_text) {
        Ok(parsed) => {
            info!(
                "Fetched and cached: url={}, size={} bytes",
                url,
                response_text.len()
            );
            // Cache only valid/parsable payloads; move the body (no clone)
            cache.insert_body(url.to_string(), response_text).await;
            Ok(parsed)
        }
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            error!(
                "Response text (first 200 chars): {}",
                &response_text.chars().take(200).collect::<String>()
            );

            // Check if it's malformed JSON vs unexpected structure
            if response_text.trim().is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !response_text.trim_start().starts_with('{')
                && !response_text.trim_start().starts_with('[')
                && response_text.trim() != "null"
            {
                Err(AppError::api_malformed_json(
                    "Response is not valid JSON",
                    url,
                ))
            } else {
                // Valid JSON but unexpected structure
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}
