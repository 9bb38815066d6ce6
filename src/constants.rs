//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and configuration constants
//! to improve maintainability and make the codebase more configurable.

#![allow(dead_code)]

/// Base URL of the public Sleeper API, used when no override is configured
pub const DEFAULT_API_BASE_URL: &str = "https://api.sleeper.app/v1";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Cache TTL (Time To Live) values in seconds
pub mod cache_ttl {
    /// TTL for successful API responses (1 hour). League history is
    /// effectively immutable within a session, so a long TTL is safe.
    pub const RESPONSE_SECONDS: u64 = 3600;

    /// TTL for negative results (404s, post-retry transport failures).
    /// Shorter than the data TTL so a flapping endpoint recovers quickly
    /// while still bounding the request rate within one session.
    pub const NEGATIVE_SECONDS: u64 = 300;
}

/// Response cache sizing
pub mod cache {
    /// Maximum number of cached responses. A full multi-season scan of a
    /// 12-team league touches roughly 40-60 URLs per league-season, so this
    /// comfortably covers a decade of history for several leagues.
    pub const RESPONSE_CACHE_CAPACITY: usize = 2048;
}

/// Season boundaries and playoff defaults
pub mod seasons {
    /// Earliest season the scan walks. Sleeper launched its league product
    /// in 2015; nothing exists before that.
    pub const FIRST_SUPPORTED_SEASON: u16 = 2015;

    /// Week the playoffs start when a league's settings don't carry
    /// `playoff_week_start`. Matches the Sleeper default.
    pub const DEFAULT_PLAYOFF_WEEK_START: u32 = 14;
}

/// Tier thresholds for achievement flags
pub mod tiers {
    /// Leagues with at least this many teams use the fixed thresholds below
    pub const FULL_LEAGUE_MIN_TEAMS: usize = 8;

    /// Top-tier cutoff for full-size leagues (standing <= 6)
    pub const TOP_TIER_STANDING: usize = 6;

    /// Bottom-tier size for full-size leagues (last 4 places)
    pub const BOTTOM_TIER_SIZE: usize = 4;

    /// Top-tier fraction for small leagues (standing <= 75% of teams)
    pub const SMALL_LEAGUE_TOP_FRACTION: f64 = 0.75;

    /// Bottom-tier fraction for small leagues (standing > 50% of teams)
    pub const SMALL_LEAGUE_BOTTOM_FRACTION: f64 = 0.5;
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API base URL override
    pub const API_BASE_URL: &str = "SLEEPER_API_URL";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "SLEEPER_LOG_FILE";

    /// Environment variable for HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "SLEEPER_HTTP_TIMEOUT";
}

/// Retry configuration
pub mod retry {
    /// Maximum number of retry attempts for API calls
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 250;

    /// Jitter range applied to backoff (+/- percentage of the delay).
    /// Use 20% to avoid thundering herd across clients.
    pub const JITTER_FRACTION: f64 = 0.2;
}
