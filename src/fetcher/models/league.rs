use serde::{Deserialize, Serialize};

use crate::constants::seasons;

/// One competitive instance of a league in one season year, as returned by
/// `/league/{league_id}` and `/user/{user_id}/leagues/nfl/{season}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct League {
    #[serde(rename = "league_id")]
    pub league_id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Season year as a string ("2023"), the way the API serializes it
    #[serde(default)]
    pub season: Option<String>,
    /// `pre_draft` | `drafting` | `in_season` | `complete`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "total_rosters", default)]
    pub total_rosters: Option<u32>,
    /// The API serializes absent settings/metadata as null rather than
    /// omitting them, hence the Option wrappers
    #[serde(default)]
    pub settings: Option<LeagueSettings>,
    #[serde(default)]
    pub metadata: Option<LeagueMetadata>,
}

/// Scoring/schedule settings subset the aggregation needs
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeagueSettings {
    #[serde(rename = "playoff_week_start", default)]
    pub playoff_week_start: Option<u32>,
}

/// Free-form league metadata; only the champion pointer matters here
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeagueMetadata {
    #[serde(rename = "latest_league_winner_roster_id", default)]
    pub latest_league_winner_roster_id: Option<String>,
}

impl League {
    /// League name with a stable fallback
    pub fn name_or_unknown(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown League")
    }

    /// Season year parsed out of the API's string form
    pub fn season_year(&self) -> Option<u16> {
        self.season.as_deref().and_then(|s| s.parse().ok())
    }

    /// True once the season has been fully played out
    pub fn is_complete(&self) -> bool {
        self.status.as_deref() == Some("complete")
    }

    /// First playoff week, falling back to the platform default when the
    /// settings blob doesn't carry one
    pub fn playoff_week_start(&self) -> u32 {
        self.settings
            .as_ref()
            .and_then(|s| s.playoff_week_start)
            .unwrap_or(seasons::DEFAULT_PLAYOFF_WEEK_START)
    }

    /// Roster id recorded as the league winner, if the league has one
    pub fn winner_roster_id(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.latest_league_winner_roster_id.as_deref())
    }
}
