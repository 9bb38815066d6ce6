use serde::{Deserialize, Serialize};

/// One roster's entry in a week's matchup list, as returned by
/// `/league/{league_id}/matchups/{week}`. Two entries sharing a
/// `matchup_id` form one head-to-head pairing; bye weeks have a null id.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchupEntry {
    #[serde(rename = "roster_id")]
    pub roster_id: i64,
    #[serde(rename = "matchup_id", default)]
    pub matchup_id: Option<i64>,
    #[serde(default)]
    pub points: Option<f64>,
}

impl MatchupEntry {
    /// Recorded points, treating absent as 0 (the unplayed marker)
    pub fn points_or_zero(&self) -> f64 {
        self.points.unwrap_or(0.0)
    }
}
