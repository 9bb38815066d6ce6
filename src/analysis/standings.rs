// Multi-season standings aggregation
// Walks every season in the requested range, finds the subject's leagues,
// and derives one performance row per league-season.

use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::constants::tiers;
use crate::error::AppError;
use crate::fetcher::models::{Roster, User};
use crate::fetcher::{LeagueBundle, SleeperClient};

/// One row of the season-over-season performance table: the subject's
/// standing and achievement flags within a single league-season. Computed
/// fresh on every aggregation call and never mutated afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeasonPerformance {
    pub season: u16,
    pub league_name: String,
    /// Wins minus losses
    pub games_above_500: i64,
    /// 1-based rank within the league-season
    pub standing: usize,
    pub total_teams: usize,
    pub is_regular_season_winner: bool,
    pub is_champion: bool,
    pub in_top_tier: bool,
    pub in_bottom_tier: bool,
    /// Kept for joins (head-to-head, manager directory)
    pub league_id: String,
}

/// A league-season the scan could not evaluate, with the reason. One
/// failing league never suppresses the rest of the scan.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeagueSkip {
    /// 0 when the season isn't known, e.g. the metadata itself was missing
    pub season: u16,
    pub league_id: String,
    pub reason: String,
}

/// Result of a standings scan: the resolved subject, the performance rows
/// in discovery order (season ascending, league list order), and every
/// skipped league-season with its reason.
#[derive(Debug, Clone)]
pub struct StandingsReport {
    pub subject: User,
    pub rows: Vec<SeasonPerformance>,
    pub skipped: Vec<LeagueSkip>,
}

/// Computes the season-over-season standings for a username.
///
/// Returns `Ok(None)` when the username doesn't resolve to an account —
/// callers render a "user not found" message, it is not an error
/// condition. Per-league failures are collected into the report's
/// `skipped` list; only a failure to even attempt resolution surfaces
/// as `Err`.
#[instrument(skip(client))]
pub async fn compute_standings(
    client: &SleeperClient,
    username: &str,
    seasons: RangeInclusive<u16>,
) -> Result<Option<StandingsReport>, AppError> {
    let Some(subject) = client.user_by_name(username).await? else {
        info!("Username did not resolve: {username}");
        return Ok(None);
    };

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for season in seasons {
        let leagues = match client.leagues_for_user(&subject.user_id, season).await {
            Ok(leagues) => leagues,
            Err(e) => {
                warn!("League list unavailable for season {season}: {e}");
                skipped.push(LeagueSkip {
                    season,
                    league_id: String::new(),
                    reason: format!("league list unavailable: {e}"),
                });
                continue;
            }
        };

        debug!("Season {season}: {} league(s)", leagues.len());

        for league in leagues {
            match evaluate_league(client, &subject.user_id, season, &league.league_id).await {
                Ok(Some(row)) => rows.push(row),
                // Subject has no roster there (e.g. co-owner seat); nothing to report
                Ok(None) => debug!(
                    "No roster for subject in league {}, season {season}",
                    league.league_id
                ),
                Err(reason) => {
                    warn!(
                        "Skipping league {} for season {season}: {reason}",
                        league.league_id
                    );
                    skipped.push(LeagueSkip {
                        season,
                        league_id: league.league_id,
                        reason,
                    });
                }
            }
        }
    }

    info!(
        "Standings scan complete for {}: {} row(s), {} skipped",
        subject.display_name_or_unknown(),
        rows.len(),
        skipped.len()
    );

    Ok(Some(StandingsReport {
        subject,
        rows,
        skipped,
    }))
}

/// Evaluates one league-season for the subject. `Ok(None)` means the
/// subject had no roster there; `Err(reason)` means required data was
/// unavailable and the league-season must be skipped whole — a partial
/// row is never emitted.
async fn evaluate_league(
    client: &SleeperClient,
    user_id: &str,
    season: u16,
    league_id: &str,
) -> Result<Option<SeasonPerformance>, String> {
    let bundle = client
        .league_bundle(league_id)
        .await
        .map_err(|e| format!("league data unavailable: {e}"))?
        .ok_or_else(|| "league metadata or rosters unavailable".to_string())?;

    // The user list isn't read directly here, but its absence marks the
    // league as incompletely synced and the source treats that as a skip
    if bundle.users.is_none() {
        return Err("user list unavailable".to_string());
    }

    Ok(performance_row(&bundle, user_id, season))
}

/// Derives the subject's performance row from a complete league bundle.
/// Pure; all the interesting standings arithmetic lives here.
pub(crate) fn performance_row(
    bundle: &LeagueBundle,
    user_id: &str,
    season: u16,
) -> Option<SeasonPerformance> {
    let rosters = &bundle.rosters;
    let own = rosters
        .iter()
        .find(|r| r.owner_id.as_deref() == Some(user_id))?;

    let total_teams = rosters.len();
    let standing = standing_of(rosters, own.roster_id)?;
    let (in_top_tier, in_bottom_tier) = tier_flags(standing, total_teams);

    // Champion only for completed seasons with a recorded winner whose
    // roster id string-matches ours; anything missing or malformed is
    // simply "no"
    let is_champion = bundle.league.is_complete()
        && bundle.league.winner_roster_id() == Some(own.roster_id.to_string().as_str());

    Some(SeasonPerformance {
        season,
        league_name: bundle.league.name_or_unknown().to_string(),
        games_above_500: own.wins() - own.losses(),
        standing,
        total_teams,
        is_regular_season_winner: standing == 1,
        is_champion,
        in_top_tier,
        in_bottom_tier,
        league_id: bundle.league.league_id.clone(),
    })
}

/// 1-based rank of a roster within its league-season.
///
/// Rosters are ordered by wins descending, then season points descending.
/// Ties in both are broken by ascending roster id: the remote's list order
/// is not guaranteed, so a deterministic secondary key is used instead of
/// inheriting it.
pub(crate) fn standing_of(rosters: &[Roster], roster_id: i64) -> Option<usize> {
    let mut order: Vec<&Roster> = rosters.iter().collect();
    order.sort_by(|a, b| {
        b.wins()
            .cmp(&a.wins())
            .then_with(|| b.season_points().total_cmp(&a.season_points()))
            .then_with(|| a.roster_id.cmp(&b.roster_id))
    });
    order
        .iter()
        .position(|r| r.roster_id == roster_id)
        .map(|i| i + 1)
}

/// Computes the (top tier, bottom tier) flags for a standing.
///
/// Full-size leagues (8+ teams) use fixed cutoffs: top 6 and last 4.
/// Smaller leagues scale instead: top tier is the best 75% of standings,
/// bottom tier is strictly below the midpoint. The fractional thresholds
/// are compared as-is (6 teams: standing 4 <= 4.5 is top tier, 5 is not).
pub(crate) fn tier_flags(standing: usize, total_teams: usize) -> (bool, bool) {
    if total_teams >= tiers::FULL_LEAGUE_MIN_TEAMS {
        (
            standing <= tiers::TOP_TIER_STANDING,
            standing > total_teams.saturating_sub(tiers::BOTTOM_TIER_SIZE),
        )
    } else {
        (
            standing as f64 <= total_teams as f64 * tiers::SMALL_LEAGUE_TOP_FRACTION,
            standing as f64 > total_teams as f64 * tiers::SMALL_LEAGUE_BOTTOM_FRACTION,
        )
    }
}
