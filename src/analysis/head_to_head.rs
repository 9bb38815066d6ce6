// Head-to-head matchup reconciliation
// Correlates two managers' weekly scores and playoff bracket pairings
// across a set of leagues into one chronological meeting ledger.

use std::cmp::Ordering;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::analysis::standings::LeagueSkip;
use crate::fetcher::models::MatchupEntry;
use crate::fetcher::{LeagueBundle, SleeperClient};

/// Fixed labels for the first playoff rounds; anything deeper falls back
/// to a numbered label.
static ROUND_NAMES: Lazy<HashMap<u32, &'static str>> = Lazy::new(|| {
    HashMap::from([(1, "First Round"), (2, "Semi-Finals"), (3, "Finals")])
});

/// Human label for a playoff round number
pub fn playoff_round_label(round: u32) -> String {
    ROUND_NAMES
        .get(&round)
        .map(|name| (*name).to_string())
        .unwrap_or_else(|| format!("Round {round}"))
}

/// Which phase of the season a meeting belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MeetingPhase {
    RegularSeason,
    Playoffs,
}

/// Result of a meeting, relative to the primary subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    /// Outcome from the primary subject's and opponent's scores
    pub fn from_scores(user_score: f64, opponent_score: f64) -> Self {
        match user_score.total_cmp(&opponent_score) {
            Ordering::Greater => Outcome::Win,
            Ordering::Less => Outcome::Loss,
            Ordering::Equal => Outcome::Tie,
        }
    }

    /// The same meeting seen from the other side
    pub fn inverted(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Tie => Outcome::Tie,
        }
    }
}

/// One head-to-head encounter between the two subjects in one
/// league-season week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meeting {
    pub season: u16,
    /// Week number used for ordering; playoff meetings carry the week
    /// derived from their round, so they sort after the regular season
    pub week: u32,
    /// Week number as text for regular season, round name for playoffs
    pub week_label: String,
    pub league_name: String,
    pub user_score: f64,
    pub opponent_score: f64,
    pub outcome: Outcome,
    pub phase: MeetingPhase,
}

/// Result of a reconciliation pass: meetings sorted season-descending,
/// week-ascending, plus the leagues that could not be examined
#[derive(Debug, Clone)]
pub struct HeadToHeadReport {
    pub meetings: Vec<Meeting>,
    pub skipped: Vec<LeagueSkip>,
}

/// Reconciles the full head-to-head history between two managers across
/// the given leagues.
///
/// A league missing its metadata or rosters is recorded as skipped; a
/// league where either manager never had a roster contributes nothing and
/// is not an anomaly. No partial meeting is ever emitted: a week either
/// yields a complete scored pairing or nothing.
#[instrument(skip(client, league_ids))]
pub async fn reconcile(
    client: &SleeperClient,
    league_ids: &[String],
    user_id: &str,
    opponent_id: &str,
) -> HeadToHeadReport {
    let mut meetings = Vec::new();
    let mut skipped = Vec::new();

    for league_id in league_ids {
        let bundle = match client.league_bundle(league_id).await {
            Ok(Some(bundle)) => bundle,
            Ok(None) => {
                skipped.push(LeagueSkip {
                    season: 0,
                    league_id: league_id.clone(),
                    reason: "league metadata or rosters unavailable".to_string(),
                });
                continue;
            }
            Err(e) => {
                warn!("League {league_id} unavailable for reconciliation: {e}");
                skipped.push(LeagueSkip {
                    season: 0,
                    league_id: league_id.clone(),
                    reason: format!("league data unavailable: {e}"),
                });
                continue;
            }
        };

        meetings.extend(reconcile_league(client, &bundle, user_id, opponent_id).await);
    }

    // Newest season first; within a season the derived week numbers keep
    // regular-season weeks ahead of playoff rounds
    meetings.sort_by(|a, b| b.season.cmp(&a.season).then(a.week.cmp(&b.week)));

    HeadToHeadReport { meetings, skipped }
}

/// Reconciles one league-season. Returns every meeting found, regular
/// season first, then the playoff meeting if the bracket pairs the two.
async fn reconcile_league(
    client: &SleeperClient,
    bundle: &LeagueBundle,
    user_id: &str,
    opponent_id: &str,
) -> Vec<Meeting> {
    let league = &bundle.league;

    // Map owners to rosters; a missing owner can't be matched
    let roster_of: HashMap<&str, i64> = bundle
        .rosters
        .iter()
        .filter_map(|r| r.owner_id.as_deref().map(|owner| (owner, r.roster_id)))
        .collect();

    let (Some(&user_roster), Some(&opponent_roster)) =
        (roster_of.get(user_id), roster_of.get(opponent_id))
    else {
        // They were never both in this league
        debug!(
            "Skipping league {}: one of the managers has no roster",
            league.league_id
        );
        return Vec::new();
    };

    let Some(season) = league.season_year() else {
        debug!("Skipping league {}: season year missing", league.league_id);
        return Vec::new();
    };

    let reg_season_weeks = league.playoff_week_start();
    let league_name = league.name_or_unknown().to_string();
    let mut meetings = Vec::new();

    // Regular season pass: weeks must be scanned in increasing order so
    // the ledger's in-season ordering comes straight from discovery
    for week in 1..reg_season_weeks {
        let entries = match client.matchups(&league.league_id, week).await {
            Ok(Some(entries)) => entries,
            Ok(None) => continue,
            Err(e) => {
                debug!(
                    "Week {week} unavailable for league {}: {e}",
                    league.league_id
                );
                continue;
            }
        };

        if let Some((user_score, opponent_score)) =
            paired_scores(&entries, user_roster, opponent_roster)
        {
            meetings.push(Meeting {
                season,
                week,
                week_label: week.to_string(),
                league_name: league_name.clone(),
                user_score,
                opponent_score,
                outcome: Outcome::from_scores(user_score, opponent_score),
                phase: MeetingPhase::RegularSeason,
            });
        }
    }

    // Playoff pass: the bracket tells us whether (and in which round) the
    // two met; the week's matchup list supplies the scores
    if let Some(bracket) = &bundle.bracket
        && let Some(pairing) = bracket
            .iter()
            .find(|m| m.pairs(user_roster, opponent_roster))
        && let Some(round) = pairing.round
    {
        let week = reg_season_weeks + round - 1;

        let entries = match client.matchups(&league.league_id, week).await {
            Ok(Some(entries)) => entries,
            _ => Vec::new(),
        };

        let user_score = score_of(&entries, user_roster);
        let opponent_score = score_of(&entries, opponent_roster);

        if let (Some(user_score), Some(opponent_score)) = (user_score, opponent_score)
            && !is_unplayed(user_score, opponent_score)
        {
            meetings.push(Meeting {
                season,
                week,
                week_label: playoff_round_label(round),
                league_name: league_name.clone(),
                user_score,
                opponent_score,
                outcome: Outcome::from_scores(user_score, opponent_score),
                phase: MeetingPhase::Playoffs,
            });
        }
    }

    meetings
}

/// Finds the week's head-to-head pairing of the two rosters, if any.
///
/// Entries are grouped by matchup id; only a group of exactly two rosters
/// that contains both targets counts. The degenerate (0, 0) pairing means
/// the week hasn't been played and yields nothing.
pub(crate) fn paired_scores(
    entries: &[MatchupEntry],
    user_roster: i64,
    opponent_roster: i64,
) -> Option<(f64, f64)> {
    let mut groups: HashMap<i64, Vec<&MatchupEntry>> = HashMap::new();
    for entry in entries {
        if let Some(matchup_id) = entry.matchup_id {
            groups.entry(matchup_id).or_default().push(entry);
        }
    }

    for pair in groups.values() {
        if pair.len() != 2 {
            continue;
        }
        let roster_ids = [pair[0].roster_id, pair[1].roster_id];
        if roster_ids.contains(&user_roster) && roster_ids.contains(&opponent_roster) {
            let user_score = score_of(entries, user_roster)?;
            let opponent_score = score_of(entries, opponent_roster)?;
            if is_unplayed(user_score, opponent_score) {
                return None;
            }
            return Some((user_score, opponent_score));
        }
    }

    None
}

/// A roster's recorded score in a week's entry list
fn score_of(entries: &[MatchupEntry], roster_id: i64) -> Option<f64> {
    entries
        .iter()
        .find(|e| e.roster_id == roster_id)
        .map(MatchupEntry::points_or_zero)
}

/// Exactly (0, 0) marks a matchup that hasn't been played
fn is_unplayed(user_score: f64, opponent_score: f64) -> bool {
    user_score == 0.0 && opponent_score == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(roster_id: i64, matchup_id: Option<i64>, points: Option<f64>) -> MatchupEntry {
        MatchupEntry {
            roster_id,
            matchup_id,
            points,
        }
    }

    #[test]
    fn test_round_labels() {
        assert_eq!(playoff_round_label(1), "First Round");
        assert_eq!(playoff_round_label(2), "Semi-Finals");
        assert_eq!(playoff_round_label(3), "Finals");
        assert_eq!(playoff_round_label(4), "Round 4");
    }

    #[test]
    fn test_outcome_from_scores() {
        assert_eq!(Outcome::from_scores(101.5, 88.25), Outcome::Win);
        assert_eq!(Outcome::from_scores(88.25, 101.5), Outcome::Loss);
        assert_eq!(Outcome::from_scores(100.0, 100.0), Outcome::Tie);
    }

    #[test]
    fn test_outcome_inversion() {
        assert_eq!(Outcome::Win.inverted(), Outcome::Loss);
        assert_eq!(Outcome::Loss.inverted(), Outcome::Win);
        assert_eq!(Outcome::Tie.inverted(), Outcome::Tie);
    }

    #[test]
    fn test_paired_scores_finds_shared_matchup() {
        let entries = vec![
            entry(1, Some(1), Some(101.5)),
            entry(2, Some(1), Some(88.25)),
            entry(3, Some(2), Some(95.0)),
            entry(4, Some(2), Some(77.0)),
        ];

        assert_eq!(paired_scores(&entries, 1, 2), Some((101.5, 88.25)));
        assert_eq!(paired_scores(&entries, 2, 1), Some((88.25, 101.5)));
    }

    #[test]
    fn test_paired_scores_requires_same_group() {
        // Both rosters played this week, but against other people
        let entries = vec![
            entry(1, Some(1), Some(101.5)),
            entry(3, Some(1), Some(90.0)),
            entry(2, Some(2), Some(88.25)),
            entry(4, Some(2), Some(77.0)),
        ];

        assert_eq!(paired_scores(&entries, 1, 2), None);
    }

    #[test]
    fn test_paired_scores_ignores_null_matchup_ids() {
        // Bye weeks have no matchup id and must not group together
        let entries = vec![entry(1, None, Some(101.5)), entry(2, None, Some(88.25))];

        assert_eq!(paired_scores(&entries, 1, 2), None);
    }

    #[test]
    fn test_paired_scores_rejects_oversized_groups() {
        let entries = vec![
            entry(1, Some(1), Some(101.5)),
            entry(2, Some(1), Some(88.25)),
            entry(3, Some(1), Some(90.0)),
        ];

        assert_eq!(paired_scores(&entries, 1, 2), None);
    }

    #[test]
    fn test_unplayed_matchup_is_excluded() {
        let entries = vec![entry(1, Some(1), Some(0.0)), entry(2, Some(1), Some(0.0))];
        assert_eq!(paired_scores(&entries, 1, 2), None);

        // Absent points count as zero
        let entries = vec![entry(1, Some(1), None), entry(2, Some(1), None)];
        assert_eq!(paired_scores(&entries, 1, 2), None);
    }

    #[test]
    fn test_single_zero_score_is_kept() {
        // A genuine shutout (only one side at zero) is a real result
        let entries = vec![entry(1, Some(1), Some(0.0)), entry(2, Some(1), Some(55.5))];
        assert_eq!(paired_scores(&entries, 1, 2), Some((0.0, 55.5)));
    }

    #[test]
    fn test_meeting_sort_order() {
        let meeting = |season, week| Meeting {
            season,
            week,
            week_label: week.to_string(),
            league_name: "L".to_string(),
            user_score: 1.0,
            opponent_score: 0.5,
            outcome: Outcome::Win,
            phase: MeetingPhase::RegularSeason,
        };

        let mut meetings = vec![meeting(2022, 14), meeting(2023, 3), meeting(2023, 1)];
        meetings.sort_by(|a, b| b.season.cmp(&a.season).then(a.week.cmp(&b.week)));

        assert_eq!(
            meetings
                .iter()
                .map(|m| (m.season, m.week))
                .collect::<Vec<_>>(),
            vec![(2023, 1), (2023, 3), (2022, 14)]
        );
    }
}
