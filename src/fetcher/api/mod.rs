pub mod urls;
pub mod http_client;
mod client;
mod fetch_utils;

// Re-export URL utilities
pub use urls::*;
// Re-export HTTP client utilities
#[allow(unused_imports)]
pub use http_client::*;
// Re-export the typed client
pub use client::{LeagueBundle, SleeperClient};
