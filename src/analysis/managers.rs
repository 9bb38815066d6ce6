// Manager identity resolution
// Display names drift across seasons; the directory keeps, per account,
// the name from the most recent league-season it was seen in.

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use crate::fetcher::SleeperClient;

/// Mapping from account id to the most recently used display name across
/// a set of league-seasons
#[derive(Debug, Clone, Default)]
pub struct ManagerDirectory {
    // user_id -> (season the name was seen in, display name)
    names: HashMap<String, (u16, String)>,
}

impl ManagerDirectory {
    /// Records a sighting of a manager in a season, keeping the name from
    /// the latest season seen so far
    pub fn record(&mut self, user_id: &str, season: u16, display_name: &str) {
        match self.names.get(user_id) {
            Some((recorded_season, _)) if *recorded_season >= season => {}
            _ => {
                self.names
                    .insert(user_id.to_string(), (season, display_name.to_string()));
            }
        }
    }

    /// Latest known display name for an account
    pub fn display_name(&self, user_id: &str) -> Option<&str> {
        self.names.get(user_id).map(|(_, name)| name.as_str())
    }

    /// Reverse lookup: account id for a display name (case-insensitive).
    /// Used to resolve a `--compare` argument typed by the user.
    pub fn user_id_by_name(&self, display_name: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, (_, name))| name.eq_ignore_ascii_case(display_name))
            .map(|(user_id, _)| user_id.as_str())
    }

    /// Removes an account from the directory. The analysis subject is
    /// dropped this way before the directory is offered for "compare
    /// against" selection.
    pub fn remove(&mut self, user_id: &str) {
        self.names.remove(user_id);
    }

    /// All display names, sorted for stable presentation
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.values().map(|(_, name)| name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Builds the manager directory for a set of leagues.
///
/// Leagues whose user list or metadata can't be fetched contribute
/// nothing; resolution is best-effort by design since the directory only
/// feeds presentation choices.
#[instrument(skip(client, league_ids))]
pub async fn resolve_managers(client: &SleeperClient, league_ids: &[String]) -> ManagerDirectory {
    let mut directory = ManagerDirectory::default();

    for league_id in league_ids {
        let league = match client.league(league_id).await {
            Ok(Some(league)) => league,
            Ok(None) => {
                debug!("League {league_id} metadata unavailable for manager resolution");
                continue;
            }
            Err(e) => {
                warn!("League {league_id} metadata fetch failed: {e}");
                continue;
            }
        };
        let Some(season) = league.season_year() else {
            continue;
        };

        let users = match client.users(league_id).await {
            Ok(Some(users)) => users,
            Ok(None) => continue,
            Err(e) => {
                warn!("League {league_id} user list fetch failed: {e}");
                continue;
            }
        };

        for user in &users {
            directory.record(&user.user_id, season, user.display_name_or_unknown());
        }
    }

    directory
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_season_wins_renames() {
        let mut directory = ManagerDirectory::default();
        directory.record("p1", 2019, "Foo");
        directory.record("p1", 2022, "Bar");

        assert_eq!(directory.display_name("p1"), Some("Bar"));
    }

    #[test]
    fn test_earlier_sighting_does_not_overwrite() {
        let mut directory = ManagerDirectory::default();
        directory.record("p1", 2022, "Bar");
        directory.record("p1", 2019, "Foo");

        assert_eq!(directory.display_name("p1"), Some("Bar"));
    }

    #[test]
    fn test_same_season_keeps_first_sighting() {
        let mut directory = ManagerDirectory::default();
        directory.record("p1", 2022, "First");
        directory.record("p1", 2022, "Second");

        assert_eq!(directory.display_name("p1"), Some("First"));
    }

    #[test]
    fn test_remove_subject() {
        let mut directory = ManagerDirectory::default();
        directory.record("subject", 2022, "Me");
        directory.record("other", 2022, "Them");

        directory.remove("subject");

        assert_eq!(directory.display_name("subject"), None);
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_reverse_lookup_is_case_insensitive() {
        let mut directory = ManagerDirectory::default();
        directory.record("p1", 2022, "BigCat");

        assert_eq!(directory.user_id_by_name("bigcat"), Some("p1"));
        assert_eq!(directory.user_id_by_name("BIGCAT"), Some("p1"));
        assert_eq!(directory.user_id_by_name("nope"), None);
    }

    #[test]
    fn test_sorted_names() {
        let mut directory = ManagerDirectory::default();
        directory.record("a", 2022, "zeta");
        directory.record("b", 2022, "alpha");
        directory.record("c", 2022, "mid");

        assert_eq!(directory.sorted_names(), vec!["alpha", "mid", "zeta"]);
    }
}
