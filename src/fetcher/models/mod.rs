pub mod bracket;
pub mod league;
pub mod matchup;
pub mod roster;
pub mod user;

// Re-export all public types for convenient access
pub use bracket::BracketMatch;
pub use league::{League, LeagueMetadata, LeagueSettings};
pub use matchup::MatchupEntry;
pub use roster::{Roster, RosterSettings};
pub use user::User;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_implementations() {
        let user = User {
            user_id: "1".to_string(),
            display_name: Some("alice".to_string()),
            avatar: None,
        };
        let cloned_user = user.clone();
        assert_eq!(user.user_id, cloned_user.user_id);
        assert_eq!(user.display_name, cloned_user.display_name);

        let roster = Roster {
            roster_id: 3,
            owner_id: Some("1".to_string()),
            settings: Some(RosterSettings {
                wins: 10,
                losses: 3,
                ties: 0,
                fpts: 1500,
                fpts_decimal: 0,
            }),
        };
        let cloned_roster = roster.clone();
        assert_eq!(roster.roster_id, cloned_roster.roster_id);
        assert_eq!(roster.wins(), cloned_roster.wins());
    }

    #[test]
    fn test_debug_implementations() {
        let entry = MatchupEntry {
            roster_id: 3,
            matchup_id: Some(1),
            points: Some(101.5),
        };
        let debug_string = format!("{entry:?}");
        assert!(debug_string.contains("MatchupEntry"));
        assert!(debug_string.contains("101.5"));

        let m = BracketMatch {
            round: Some(1),
            match_id: Some(1),
            team_one: Some(3),
            team_two: Some(6),
            winner: None,
        };
        let debug_string = format!("{m:?}");
        assert!(debug_string.contains("BracketMatch"));
    }
}
