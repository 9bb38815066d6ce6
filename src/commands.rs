use crate::cli::Args;
use crate::config::Config;
use crate::constants::seasons;
use crate::display;
use crate::error::AppError;
use crate::fetcher::SleeperClient;
use crate::analysis::{
    CareerSummary, SeriesSummary, StandingsReport, compute_standings, reconcile, resolve_managers,
};
use crate::analysis::standings::SeasonPerformance;
use chrono::{Datelike, Utc};
use std::ops::RangeInclusive;
use tracing::info;

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await?;
    Ok(())
}

/// Handles configuration update commands (--config, --set-log-file, --clear-log-file).
///
/// Updates configuration based on the provided arguments and saves changes.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().await.unwrap_or_default();

    if let Some(new_base_url) = &args.new_api_base_url {
        config.api_base_url = new_base_url.clone();
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Season range for the scan: CLI bounds clamped to the supported floor,
/// defaulting to everything from the platform's first season through the
/// current year
pub fn season_range(args: &Args) -> Result<RangeInclusive<u16>, AppError> {
    let current_year = Utc::now().year() as u16;
    let from = args
        .from_season
        .unwrap_or(seasons::FIRST_SUPPORTED_SEASON)
        .max(seasons::FIRST_SUPPORTED_SEASON);
    let to = args.to_season.unwrap_or(current_year).min(current_year);

    if from > to {
        return Err(AppError::config_error(format!(
            "Invalid season range: {from} is after {to}"
        )));
    }
    Ok(from..=to)
}

/// Applies the --league filters (case-insensitive substring match on the
/// league name). No filters means everything passes.
pub fn filter_rows(rows: Vec<SeasonPerformance>, filters: &[String]) -> Vec<SeasonPerformance> {
    if filters.is_empty() {
        return rows;
    }
    let filters: Vec<String> = filters.iter().map(|f| f.to_lowercase()).collect();
    rows.into_iter()
        .filter(|row| {
            let name = row.league_name.to_lowercase();
            filters.iter().any(|f| name.contains(f))
        })
        .collect()
}

/// League ids of the filtered rows, deduplicated in discovery order
fn league_ids_of(rows: &[SeasonPerformance]) -> Vec<String> {
    let mut ids = Vec::new();
    for row in rows {
        if !ids.contains(&row.league_id) {
            ids.push(row.league_id.clone());
        }
    }
    ids
}

/// Runs the analysis flow: standings for the subject, then optionally the
/// manager list or a full comparison against another manager.
pub async fn handle_analysis_command(args: &Args, username: &str) -> Result<(), AppError> {
    let config = Config::load().await?;
    let client = SleeperClient::new(&config)?;
    let seasons = season_range(args)?;

    let Some(report) = compute_standings(&client, username, seasons.clone()).await? else {
        println!("No leagues found for this username or the username doesn't exist.");
        return Ok(());
    };

    let rows = filter_rows(report.rows.clone(), &args.leagues);
    if rows.is_empty() {
        println!(
            "No league seasons matched for {} in {}..{}.",
            username,
            seasons.start(),
            seasons.end()
        );
        display::render_skips(&report.skipped, args.plain)?;
        return Ok(());
    }

    let summary = CareerSummary::from_rows(&rows);
    display::render_career_summary(username, &summary, args.plain)?;
    display::render_standings_table(&rows, args.plain)?;
    display::render_skips(&report.skipped, args.plain)?;

    // The manager directory is only needed for comparison flows
    if !args.list_managers && args.compare.is_none() {
        return Ok(());
    }

    let league_ids = league_ids_of(&rows);
    let mut directory = resolve_managers(&client, &league_ids).await;
    // The subject can't compare against themselves
    directory.remove(&report.subject.user_id);

    if args.list_managers {
        display::render_manager_list(&directory.sorted_names(), args.plain)?;
        return Ok(());
    }

    let Some(compare_name) = &args.compare else {
        return Ok(());
    };

    let Some(opponent_id) = directory.user_id_by_name(compare_name).map(String::from) else {
        println!(
            "No manager named '{compare_name}' found in these leagues. \
             Try --list-managers to see who's available."
        );
        return Ok(());
    };
    let opponent_label = directory
        .display_name(&opponent_id)
        .unwrap_or(compare_name)
        .to_string();

    // Opponent's own career over the same filters, for side-by-side context
    if let Some(opponent_report) =
        compute_standings(&client, &opponent_label, seasons).await?
    {
        render_opponent_summary(args, &opponent_label, &opponent_report)?;
    }

    info!(
        "Reconciling head-to-head: {} vs {} across {} league(s)",
        username,
        opponent_label,
        league_ids.len()
    );
    let h2h = reconcile(&client, &league_ids, &report.subject.user_id, &opponent_id).await;

    let series = SeriesSummary::from_meetings(&h2h.meetings);
    display::render_series_summary(username, &opponent_label, &series, args.plain)?;
    display::render_meetings_table(&h2h.meetings, username, &opponent_label, args.plain)?;
    display::render_skips(&h2h.skipped, args.plain)?;

    Ok(())
}

fn render_opponent_summary(
    args: &Args,
    opponent_label: &str,
    report: &StandingsReport,
) -> Result<(), AppError> {
    let rows = filter_rows(report.rows.clone(), &args.leagues);
    if rows.is_empty() {
        return Ok(());
    }
    let summary = CareerSummary::from_rows(&rows);
    display::render_career_summary(opponent_label, &summary, args.plain)?;
    display::render_standings_table(&rows, args.plain)
}
