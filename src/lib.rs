//! Sleeper League Rewind Library
//!
//! This library aggregates a Sleeper fantasy-football league's historical
//! standings and head-to-head matchup records from the public Sleeper API
//! and derives season-over-season performance summaries.
//!
//! # Examples
//!
//! ```rust,no_run
//! use sleeper_rewind::analysis::{CareerSummary, compute_standings};
//! use sleeper_rewind::config::Config;
//! use sleeper_rewind::error::AppError;
//! use sleeper_rewind::fetcher::SleeperClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = SleeperClient::new(&config)?;
//!
//!     // Compute standings across the full supported range
//!     if let Some(report) = compute_standings(&client, "alice", 2015..=2024).await? {
//!         let summary = CareerSummary::from_rows(&report.rows);
//!         println!(
//!             "{} seasons, {} championships",
//!             summary.seasons, summary.championships
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod fetcher;
pub mod logging;

// Re-export commonly used types for convenience
pub use analysis::{
    CareerSummary, HeadToHeadReport, ManagerDirectory, Meeting, SeasonPerformance, SeriesSummary,
    StandingsReport, compute_standings, reconcile, resolve_managers,
};
pub use config::Config;
pub use error::AppError;
pub use fetcher::{ResponseCache, SleeperClient};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
