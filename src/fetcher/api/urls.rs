//! URL building utilities for API endpoints

/// Builds the URL for resolving a username to an account.
///
/// # Example
/// ```
/// use sleeper_rewind::fetcher::api::build_user_url;
///
/// let url = build_user_url("https://api.sleeper.app/v1", "alice");
/// assert_eq!(url, "https://api.sleeper.app/v1/user/alice");
/// ```
pub fn build_user_url(base_url: &str, username: &str) -> String {
    format!("{base_url}/user/{username}")
}

/// Builds the URL listing a user's NFL leagues for one season year.
///
/// # Example
/// ```
/// use sleeper_rewind::fetcher::api::build_user_leagues_url;
///
/// let url = build_user_leagues_url("https://api.sleeper.app/v1", "12345", 2023);
/// assert_eq!(url, "https://api.sleeper.app/v1/user/12345/leagues/nfl/2023");
/// ```
pub fn build_user_leagues_url(base_url: &str, user_id: &str, season: u16) -> String {
    format!("{base_url}/user/{user_id}/leagues/nfl/{season}")
}

/// Builds the URL for a league's metadata.
///
/// # Example
/// ```
/// use sleeper_rewind::fetcher::api::build_league_url;
///
/// let url = build_league_url("https://api.sleeper.app/v1", "98765");
/// assert_eq!(url, "https://api.sleeper.app/v1/league/98765");
/// ```
pub fn build_league_url(base_url: &str, league_id: &str) -> String {
    format!("{base_url}/league/{league_id}")
}

/// Builds the URL for a league's roster list.
pub fn build_rosters_url(base_url: &str, league_id: &str) -> String {
    format!("{base_url}/league/{league_id}/rosters")
}

/// Builds the URL for a league's user list.
pub fn build_users_url(base_url: &str, league_id: &str) -> String {
    format!("{base_url}/league/{league_id}/users")
}

/// Builds the URL for one week's matchup entries in a league.
///
/// # Example
/// ```
/// use sleeper_rewind::fetcher::api::build_matchups_url;
///
/// let url = build_matchups_url("https://api.sleeper.app/v1", "98765", 14);
/// assert_eq!(url, "https://api.sleeper.app/v1/league/98765/matchups/14");
/// ```
pub fn build_matchups_url(base_url: &str, league_id: &str, week: u32) -> String {
    format!("{base_url}/league/{league_id}/matchups/{week}")
}

/// Builds the URL for a league's winners (playoff) bracket.
pub fn build_bracket_url(base_url: &str, league_id: &str) -> String {
    format!("{base_url}/league/{league_id}/winners_bracket")
}
