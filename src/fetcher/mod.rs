pub mod api;
pub mod cache;
pub mod models;

pub use api::{LeagueBundle, SleeperClient};
pub use cache::ResponseCache;
