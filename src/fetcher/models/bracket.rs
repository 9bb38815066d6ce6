use serde::{Deserialize, Serialize};

/// One pairing in the winners bracket, as returned by
/// `/league/{league_id}/winners_bracket`. Roster slots are null until the
/// preceding round decides them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BracketMatch {
    /// Round number, 1-based from the first playoff week
    #[serde(rename = "r", default)]
    pub round: Option<u32>,
    /// Match number within the bracket
    #[serde(rename = "m", default)]
    pub match_id: Option<i64>,
    #[serde(rename = "t1", default)]
    pub team_one: Option<i64>,
    #[serde(rename = "t2", default)]
    pub team_two: Option<i64>,
    #[serde(rename = "w", default)]
    pub winner: Option<i64>,
}

impl BracketMatch {
    /// True when this pairing is between exactly the two given rosters,
    /// in either slot order
    pub fn pairs(&self, a: i64, b: i64) -> bool {
        (self.team_one == Some(a) && self.team_two == Some(b))
            || (self.team_one == Some(b) && self.team_two == Some(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_match_deserialization() {
        let json = r#"{"r": 2, "m": 5, "t1": 3, "t2": 6, "w": 3}"#;

        let m: BracketMatch = serde_json::from_str(json).unwrap();
        assert_eq!(m.round, Some(2));
        assert_eq!(m.match_id, Some(5));
        assert_eq!(m.winner, Some(3));
        assert!(m.pairs(3, 6));
        assert!(m.pairs(6, 3));
        assert!(!m.pairs(3, 7));
    }

    #[test]
    fn test_bracket_match_undecided_slots() {
        // Later rounds reference winners of earlier matches via t1_from/t2_from
        // objects; the plain slots stay null until decided
        let json = r#"{"r": 3, "m": 7, "t1": null, "t2": null, "t1_from": {"w": 5}, "t2_from": {"w": 6}}"#;

        let m: BracketMatch = serde_json::from_str(json).unwrap();
        assert_eq!(m.team_one, None);
        assert_eq!(m.team_two, None);
        assert!(!m.pairs(1, 2));
    }
}
