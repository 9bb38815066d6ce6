use serde::{Deserialize, Serialize};

/// One participant's season record within a league, as returned by
/// `/league/{league_id}/rosters`. Orphaned rosters (the owner left the
/// platform) have a null `owner_id`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    #[serde(rename = "roster_id")]
    pub roster_id: i64,
    #[serde(rename = "owner_id", default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub settings: Option<RosterSettings>,
}

/// Win/loss record and season points. `fpts_decimal` carries the cents
/// part the API splits off the integer `fpts`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RosterSettings {
    #[serde(default)]
    pub wins: i64,
    #[serde(default)]
    pub losses: i64,
    #[serde(default)]
    pub ties: i64,
    #[serde(default)]
    pub fpts: i64,
    #[serde(rename = "fpts_decimal", default)]
    pub fpts_decimal: i64,
}

impl Roster {
    /// Wins, defaulting to 0 when the settings blob is absent
    pub fn wins(&self) -> i64 {
        self.settings.as_ref().map_or(0, |s| s.wins)
    }

    /// Losses, defaulting to 0 when the settings blob is absent
    pub fn losses(&self) -> i64 {
        self.settings.as_ref().map_or(0, |s| s.losses)
    }

    /// Total season fantasy points with the decimal part folded back in
    pub fn season_points(&self) -> f64 {
        self.settings
            .as_ref()
            .map_or(0.0, |s| s.fpts as f64 + s.fpts_decimal as f64 / 100.0)
    }
}
