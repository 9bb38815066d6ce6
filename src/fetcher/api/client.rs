// Typed access to the league API
// One client instance owns the HTTP connection pool and the response cache,
// and is shared by every aggregation and reconciliation call in a session.

use futures::join;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::fetcher::cache::ResponseCache;
use crate::fetcher::models::{BracketMatch, League, MatchupEntry, Roster, User};

use super::fetch_utils::fetch;
use super::http_client::create_http_client;
use super::urls::{
    build_bracket_url, build_league_url, build_matchups_url, build_rosters_url,
    build_user_leagues_url, build_user_url, build_users_url,
};

/// Everything the analysis layer needs about one league, fetched as a unit.
/// Metadata and rosters are required; the user list and playoff bracket are
/// optional extras that individual consumers check for themselves.
#[derive(Debug, Clone)]
pub struct LeagueBundle {
    pub league: League,
    pub rosters: Vec<Roster>,
    pub users: Option<Vec<User>>,
    pub bracket: Option<Vec<BracketMatch>>,
}

/// Client for the league-hosting API with built-in response caching.
///
/// All methods translate "the remote has nothing there" (404, null body)
/// into `Ok(None)` / an empty list: for historical data that is an ordinary
/// answer, not an error. Transport and server failures still surface as
/// `Err` so callers can report why a unit of work was skipped.
#[derive(Debug)]
pub struct SleeperClient {
    http: Client,
    base_url: String,
    cache: ResponseCache,
}

impl SleeperClient {
    /// Creates a client from the application config with a default cache
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Self::with_cache(config, ResponseCache::new())
    }

    /// Creates a client with an explicitly configured cache (tests inject
    /// short TTLs through this)
    pub fn with_cache(config: &Config, cache: ResponseCache) -> Result<Self, AppError> {
        let http = create_http_client(config)?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    /// The response cache, exposed for diagnostics
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Resolves a username to an account. Unknown usernames are `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn user_by_name(&self, username: &str) -> Result<Option<User>, AppError> {
        let url = build_user_url(&self.base_url, username);
        self.optional(fetch::<Option<User>>(&self.http, &self.cache, &url).await)
            .map(Option::flatten)
    }

    /// Lists the leagues a user belonged to in one season year. A year the
    /// user sat out comes back as an empty list.
    #[instrument(skip(self))]
    pub async fn leagues_for_user(
        &self,
        user_id: &str,
        season: u16,
    ) -> Result<Vec<League>, AppError> {
        let url = build_user_leagues_url(&self.base_url, user_id, season);
        Ok(self
            .optional(fetch::<Option<Vec<League>>>(&self.http, &self.cache, &url).await)?
            .flatten()
            .unwrap_or_default())
    }

    /// Fetches one league's metadata
    #[instrument(skip(self))]
    pub async fn league(&self, league_id: &str) -> Result<Option<League>, AppError> {
        let url = build_league_url(&self.base_url, league_id);
        self.optional(fetch::<Option<League>>(&self.http, &self.cache, &url).await)
            .map(Option::flatten)
    }

    /// Fetches one league's roster list
    #[instrument(skip(self))]
    pub async fn rosters(&self, league_id: &str) -> Result<Option<Vec<Roster>>, AppError> {
        let url = build_rosters_url(&self.base_url, league_id);
        self.optional(fetch::<Option<Vec<Roster>>>(&self.http, &self.cache, &url).await)
            .map(Option::flatten)
    }

    /// Fetches one league's user list
    #[instrument(skip(self))]
    pub async fn users(&self, league_id: &str) -> Result<Option<Vec<User>>, AppError> {
        let url = build_users_url(&self.base_url, league_id);
        self.optional(fetch::<Option<Vec<User>>>(&self.http, &self.cache, &url).await)
            .map(Option::flatten)
    }

    /// Fetches one week's matchup entries for a league
    #[instrument(skip(self))]
    pub async fn matchups(
        &self,
        league_id: &str,
        week: u32,
    ) -> Result<Option<Vec<MatchupEntry>>, AppError> {
        let url = build_matchups_url(&self.base_url, league_id, week);
        self.optional(fetch::<Option<Vec<MatchupEntry>>>(&self.http, &self.cache, &url).await)
            .map(Option::flatten)
    }

    /// Fetches a league's winners (playoff) bracket
    #[instrument(skip(self))]
    pub async fn winners_bracket(
        &self,
        league_id: &str,
    ) -> Result<Option<Vec<BracketMatch>>, AppError> {
        let url = build_bracket_url(&self.base_url, league_id);
        self.optional(fetch::<Option<Vec<BracketMatch>>>(&self.http, &self.cache, &url).await)
            .map(Option::flatten)
    }

    /// Fetches metadata, rosters, users and bracket for one league with the
    /// four requests in flight concurrently. Returns `Ok(None)` when the
    /// required parts (metadata, rosters) are unavailable; the optional
    /// parts degrade to `None` on any failure rather than sinking the
    /// whole bundle.
    #[instrument(skip(self))]
    pub async fn league_bundle(&self, league_id: &str) -> Result<Option<LeagueBundle>, AppError> {
        let (league, rosters, users, bracket) = join!(
            self.league(league_id),
            self.rosters(league_id),
            self.users(league_id),
            self.bracket_or_none(league_id),
        );

        let Some(league) = league? else {
            debug!("League metadata unavailable: league_id={league_id}");
            return Ok(None);
        };
        let Some(rosters) = rosters? else {
            debug!("Roster list unavailable: league_id={league_id}");
            return Ok(None);
        };

        let users = match users {
            Ok(users) => users,
            Err(e) => {
                warn!("User list fetch failed for league {league_id}: {e}");
                None
            }
        };

        Ok(Some(LeagueBundle {
            league,
            rosters,
            users,
            bracket,
        }))
    }

    /// Bracket fetch that degrades to `None` on any error; many leagues
    /// simply have no bracket yet
    async fn bracket_or_none(&self, league_id: &str) -> Option<Vec<BracketMatch>> {
        match self.winners_bracket(league_id).await {
            Ok(bracket) => bracket,
            Err(e) => {
                warn!("Bracket fetch failed for league {league_id}: {e}");
                None
            }
        }
    }

    /// Collapses "not found" errors into `Ok(None)`; everything else
    /// propagates
    fn optional<T>(&self, result: Result<T, AppError>) -> Result<Option<T>, AppError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> Config {
        Config {
            api_base_url: base_url.to_string(),
            log_file_path: None,
            http_timeout_seconds: crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS,
        }
    }

    #[tokio::test]
    async fn test_user_by_name_resolves() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user_id": "1001",
                "display_name": "alice"
            })))
            .mount(&mock_server)
            .await;

        let client = SleeperClient::new(&test_config(&mock_server.uri())).unwrap();
        let user = client.user_by_name("alice").await.unwrap();

        assert_eq!(user.unwrap().user_id, "1001");
    }

    #[tokio::test]
    async fn test_user_by_name_unknown_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = SleeperClient::new(&test_config(&mock_server.uri())).unwrap();
        let user = client.user_by_name("ghost").await.unwrap();

        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_user_by_name_null_body_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/ghost"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&mock_server)
            .await;

        let client = SleeperClient::new(&test_config(&mock_server.uri())).unwrap();
        let user = client.user_by_name("ghost").await.unwrap();

        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_leagues_for_user_null_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/1001/leagues/nfl/2019"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&mock_server)
            .await;

        let client = SleeperClient::new(&test_config(&mock_server.uri())).unwrap();
        let leagues = client.leagues_for_user("1001", 2019).await.unwrap();

        assert!(leagues.is_empty());
    }

    #[tokio::test]
    async fn test_repeat_call_is_served_from_cache() {
        let mock_server = MockServer::start().await;

        // expect(1) fails the test if the second call reaches the network
        Mock::given(method("GET"))
            .and(path("/league/42/rosters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"roster_id": 1, "owner_id": "1001", "settings": {"wins": 5, "losses": 8, "fpts": 1000}}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SleeperClient::new(&test_config(&mock_server.uri())).unwrap();

        let first = client.rosters("42").await.unwrap().unwrap();
        let second = client.rosters("42").await.unwrap().unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(client.cache().stats().await.hits, 1);
    }

    #[tokio::test]
    async fn test_repeat_404_is_served_from_negative_cache() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/league/404/rosters"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SleeperClient::new(&test_config(&mock_server.uri())).unwrap();

        assert!(client.rosters("404").await.unwrap().is_none());
        assert!(client.rosters("404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_league_bundle_complete() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/league/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "league_id": "42",
                "name": "Test League",
                "season": "2023",
                "status": "complete",
                "total_rosters": 2
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/league/42/rosters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"roster_id": 1, "owner_id": "1001"},
                {"roster_id": 2, "owner_id": "1002"}
            ])))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/league/42/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"user_id": "1001", "display_name": "alice"},
                {"user_id": "1002", "display_name": "bob"}
            ])))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/league/42/winners_bracket"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = SleeperClient::new(&test_config(&mock_server.uri())).unwrap();
        let bundle = client.league_bundle("42").await.unwrap().unwrap();

        assert_eq!(bundle.league.league_id, "42");
        assert_eq!(bundle.rosters.len(), 2);
        assert_eq!(bundle.users.unwrap().len(), 2);
        assert!(bundle.bracket.is_none());
    }

    #[tokio::test]
    async fn test_league_bundle_missing_rosters_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/league/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "league_id": "42"
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/league/42/rosters"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/league/42/users"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/league/42/winners_bracket"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = SleeperClient::new(&test_config(&mock_server.uri())).unwrap();
        let bundle = client.league_bundle("42").await.unwrap();

        assert!(bundle.is_none());
    }

    #[tokio::test]
    async fn test_matchups_week_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/league/42/matchups/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"roster_id": 1, "matchup_id": 1, "points": 101.5},
                {"roster_id": 2, "matchup_id": 1, "points": 88.25}
            ])))
            .mount(&mock_server)
            .await;

        let client = SleeperClient::new(&test_config(&mock_server.uri())).unwrap();
        let matchups = client.matchups("42", 3).await.unwrap().unwrap();

        assert_eq!(matchups.len(), 2);
        assert_eq!(matchups[0].matchup_id, Some(1));
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_is_normalized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user_id": "1"})))
            .mount(&mock_server)
            .await;

        let base = format!("{}/", mock_server.uri());
        let client = SleeperClient::new(&test_config(&base)).unwrap();
        let user = client.user_by_name("alice").await.unwrap();

        assert!(user.is_some());
    }
}
