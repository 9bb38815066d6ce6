// Derived career and series summaries
// Pure aggregations over the standings rows and the meeting ledger; the
// display layer renders these without recomputing anything.

use serde::Serialize;

use crate::analysis::head_to_head::{Meeting, MeetingPhase, Outcome};
use crate::analysis::standings::SeasonPerformance;

/// Career totals across every performance row in view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerSummary {
    /// Distinct seasons covered (a season with two leagues counts once)
    pub seasons: usize,
    pub championships: usize,
    pub regular_season_titles: usize,
    pub top_tier_finishes: usize,
    pub bottom_tier_finishes: usize,
    pub average_standing: f64,
    pub average_games_above_500: f64,
}

impl CareerSummary {
    /// Aggregates the rows of one standings report
    pub fn from_rows(rows: &[SeasonPerformance]) -> Self {
        let mut seasons: Vec<u16> = rows.iter().map(|r| r.season).collect();
        seasons.sort_unstable();
        seasons.dedup();

        let count = rows.len();
        let (standing_sum, games_sum) = rows.iter().fold((0usize, 0i64), |(s, g), row| {
            (s + row.standing, g + row.games_above_500)
        });

        Self {
            seasons: seasons.len(),
            championships: rows.iter().filter(|r| r.is_champion).count(),
            regular_season_titles: rows.iter().filter(|r| r.is_regular_season_winner).count(),
            top_tier_finishes: rows.iter().filter(|r| r.in_top_tier).count(),
            bottom_tier_finishes: rows.iter().filter(|r| r.in_bottom_tier).count(),
            average_standing: if count == 0 {
                0.0
            } else {
                standing_sum as f64 / count as f64
            },
            average_games_above_500: if count == 0 {
                0.0
            } else {
                games_sum as f64 / count as f64
            },
        }
    }
}

/// Formats a count with its percentage of a total, e.g. "3 (30%)"
pub fn format_stat(count: usize, total: usize) -> String {
    if total == 0 {
        return "0 (0%)".to_string();
    }
    let percentage = (count as f64 / total as f64) * 100.0;
    format!("{count} ({percentage:.0}%)")
}

/// Who leads the all-time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesLeader {
    User,
    Opponent,
    Tied,
}

/// All-time series totals between two managers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub meetings: usize,
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
    pub playoff_wins: usize,
    pub playoff_losses: usize,
}

impl SeriesSummary {
    /// Tallies a meeting ledger (outcomes are relative to the primary
    /// subject, as produced by reconciliation)
    pub fn from_meetings(meetings: &[Meeting]) -> Self {
        let mut summary = Self {
            meetings: meetings.len(),
            wins: 0,
            losses: 0,
            ties: 0,
            playoff_wins: 0,
            playoff_losses: 0,
        };

        for meeting in meetings {
            match meeting.outcome {
                Outcome::Win => {
                    summary.wins += 1;
                    if meeting.phase == MeetingPhase::Playoffs {
                        summary.playoff_wins += 1;
                    }
                }
                Outcome::Loss => {
                    summary.losses += 1;
                    if meeting.phase == MeetingPhase::Playoffs {
                        summary.playoff_losses += 1;
                    }
                }
                Outcome::Tie => summary.ties += 1,
            }
        }

        summary
    }

    pub fn leader(&self) -> SeriesLeader {
        match self.wins.cmp(&self.losses) {
            std::cmp::Ordering::Greater => SeriesLeader::User,
            std::cmp::Ordering::Less => SeriesLeader::Opponent,
            std::cmp::Ordering::Equal => SeriesLeader::Tied,
        }
    }

    /// Series record from the leader's perspective, e.g. "5–3–1 (0.556)".
    /// A tied series omits the winning percentage.
    pub fn record_line(&self) -> String {
        let (leading, trailing) = match self.leader() {
            SeriesLeader::Opponent => (self.losses, self.wins),
            _ => (self.wins, self.losses),
        };
        if self.leader() == SeriesLeader::Tied {
            format!("{leading}\u{2013}{trailing}\u{2013}{}", self.ties)
        } else {
            let pct = leading as f64 / self.meetings as f64;
            format!("{leading}\u{2013}{trailing}\u{2013}{} ({pct:.3})", self.ties)
        }
    }
}
