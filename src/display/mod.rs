//! Terminal rendering of the analysis results
//!
//! Pure presentation: everything shown here arrives precomputed from the
//! analysis layer. Colors go through crossterm and are suppressed wholesale
//! in plain mode so output can be piped.

use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::stdout;

use crate::analysis::{
    CareerSummary, LeagueSkip, Meeting, MeetingPhase, Outcome, SeriesLeader, SeriesSummary,
    format_stat,
};
use crate::analysis::standings::SeasonPerformance;
use crate::error::AppError;

const HEADER_COLOR: Color = Color::Cyan;
const WIN_COLOR: Color = Color::Green;
const LOSS_COLOR: Color = Color::Red;
const ACCENT_COLOR: Color = Color::Yellow;

/// Prints a line in the given color, or uncolored in plain mode
fn print_line(text: &str, color: Option<Color>, plain: bool) -> Result<(), AppError> {
    match (plain, color) {
        (false, Some(color)) => {
            execute!(
                stdout(),
                SetForegroundColor(color),
                Print(text),
                ResetColor,
                Print("\n")
            )?;
        }
        _ => println!("{text}"),
    }
    Ok(())
}

fn print_header(text: &str, plain: bool) -> Result<(), AppError> {
    print_line(text, Some(HEADER_COLOR), plain)?;
    print_line(&"─".repeat(text.chars().count().max(36)), Some(HEADER_COLOR), plain)
}

/// Renders the career summary block above the standings table
pub fn render_career_summary(
    username: &str,
    summary: &CareerSummary,
    plain: bool,
) -> Result<(), AppError> {
    print_header(&format!("Career Summary — {username}"), plain)?;

    print_line(
        &format!(
            "Championships 👑      {}",
            format_stat(summary.championships, summary.seasons)
        ),
        Some(ACCENT_COLOR),
        plain,
    )?;
    println!(
        "Regular Season Titles {}",
        format_stat(summary.regular_season_titles, summary.seasons)
    );
    println!(
        "Top Tier Finishes     {}",
        format_stat(summary.top_tier_finishes, summary.seasons)
    );
    println!(
        "Bottom Tier Finishes  {}",
        format_stat(summary.bottom_tier_finishes, summary.seasons)
    );
    println!("Average Standing      {:.1}", summary.average_standing);
    println!(
        "Avg Games +/- .500    {:+.1}",
        summary.average_games_above_500
    );
    println!();
    Ok(())
}

/// Renders the per-league-season standings table
pub fn render_standings_table(rows: &[SeasonPerformance], plain: bool) -> Result<(), AppError> {
    if rows.is_empty() {
        println!("No league seasons found in the selected range.");
        return Ok(());
    }

    let league_width = rows
        .iter()
        .map(|r| r.league_name.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    print_line(
        &format!(
            "{:<6} {:<league_width$} {:>8} {:>7} {:>6}  {}",
            "Season", "League", "Standing", "+/-500", "Teams", "Honors"
        ),
        Some(HEADER_COLOR),
        plain,
    )?;

    for row in rows {
        let mut honors = Vec::new();
        if row.is_champion {
            honors.push("Champion 👑");
        }
        if row.is_regular_season_winner {
            honors.push("Reg. season #1");
        }
        let honors = honors.join(", ");

        let line = format!(
            "{:<6} {:<league_width$} {:>8} {:>7} {:>6}  {}",
            row.season,
            row.league_name,
            format!("{}/{}", row.standing, row.total_teams),
            format!("{:+}", row.games_above_500),
            row.total_teams,
            honors
        );

        let color = if row.is_champion {
            Some(ACCENT_COLOR)
        } else if row.in_top_tier {
            Some(WIN_COLOR)
        } else if row.in_bottom_tier {
            Some(LOSS_COLOR)
        } else {
            None
        };
        print_line(&line, color, plain)?;
    }
    println!();
    Ok(())
}

/// Renders the series summary between two managers
pub fn render_series_summary(
    username: &str,
    opponent: &str,
    series: &SeriesSummary,
    plain: bool,
) -> Result<(), AppError> {
    print_header(&format!("Head-to-Head — {username} vs {opponent}"), plain)?;

    if series.meetings == 0 {
        println!("No head-to-head matchups found with {opponent}.");
        println!();
        return Ok(());
    }

    println!("Meetings total        {}", series.meetings);

    let series_text = match series.leader() {
        SeriesLeader::User => format!("{username} leads"),
        SeriesLeader::Opponent => format!("{opponent} leads"),
        SeriesLeader::Tied => "Series tied".to_string(),
    };
    println!("All-time series       {series_text} {}", series.record_line());

    if series.playoff_wins + series.playoff_losses > 0 {
        print_line(
            &format!(
                "Playoff record 🏆     {}\u{2013}{}",
                series.playoff_wins, series.playoff_losses
            ),
            Some(ACCENT_COLOR),
            plain,
        )?;
    }
    println!();
    Ok(())
}

/// Renders the chronological meeting ledger
pub fn render_meetings_table(
    meetings: &[Meeting],
    username: &str,
    opponent: &str,
    plain: bool,
) -> Result<(), AppError> {
    if meetings.is_empty() {
        return Ok(());
    }

    let league_width = meetings
        .iter()
        .map(|m| m.league_name.chars().count() + 2)
        .max()
        .unwrap_or(6)
        .max(6);
    let week_width = meetings
        .iter()
        .map(|m| m.week_label.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    print_line(
        &format!(
            "{:<6} {:<week_width$} {:<league_width$} {:>15} {:<}",
            "Season", "Week", "League", "Score", "  Winner"
        ),
        Some(HEADER_COLOR),
        plain,
    )?;

    for meeting in meetings {
        let league = if meeting.phase == MeetingPhase::Playoffs {
            format!("{} 🏆", meeting.league_name)
        } else {
            meeting.league_name.clone()
        };

        let winner = match meeting.outcome {
            Outcome::Win => username,
            Outcome::Loss => opponent,
            Outcome::Tie => "—",
        };

        let line = format!(
            "{:<6} {:<week_width$} {:<league_width$} {:>15} {:<}",
            meeting.season,
            meeting.week_label,
            league,
            format!("{:.1} - {:.1}", meeting.user_score, meeting.opponent_score),
            format!("  {winner}")
        );

        let color = match meeting.outcome {
            Outcome::Win => Some(WIN_COLOR),
            Outcome::Loss => Some(LOSS_COLOR),
            Outcome::Tie => None,
        };
        print_line(&line, color, plain)?;
    }
    println!();
    Ok(())
}

/// Renders the comparison pool built by the manager directory
pub fn render_manager_list(names: &[&str], plain: bool) -> Result<(), AppError> {
    print_header("Managers available for --compare", plain)?;

    if names.is_empty() {
        println!("No other managers found in the selected leagues.");
    } else {
        for name in names {
            println!("  {name}");
        }
    }
    println!();
    Ok(())
}

/// Renders the leagues the scan had to skip, if any
pub fn render_skips(skipped: &[LeagueSkip], plain: bool) -> Result<(), AppError> {
    if skipped.is_empty() {
        return Ok(());
    }

    print_line(
        &format!("{} league-season(s) skipped due to missing data:", skipped.len()),
        Some(ACCENT_COLOR),
        plain,
    )?;
    for skip in skipped {
        let id = if skip.league_id.is_empty() {
            "all leagues".to_string()
        } else {
            format!("league {}", skip.league_id)
        };
        let season = if skip.season == 0 {
            "unknown season".to_string()
        } else {
            format!("season {}", skip.season)
        };
        println!("  {season}: {id}: {}", skip.reason);
    }
    println!();
    Ok(())
}
