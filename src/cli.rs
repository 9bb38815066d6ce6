use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Determines if the invocation only manages configuration and should not
/// run an analysis scan
pub fn is_config_operation(args: &Args) -> bool {
    args.new_api_base_url.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// Sleeper League Rewind
///
/// Season-over-season history for Sleeper fantasy football managers.
/// Shows career standings, achievements and per-league finishes for a
/// username, and full head-to-head meeting ledgers (regular season and
/// playoffs) against any other manager from the same leagues.
///
/// Data comes from the public Sleeper API; responses are cached in memory
/// for an hour, so repeated queries within one run don't refetch.
#[derive(Parser, Debug)]
#[command(author = "Niko Salonen", about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Sleeper username to analyze
    pub username: Option<String>,

    /// Compare against another manager from the same leagues, by display
    /// name. Implies fetching that manager's standings and the full
    /// head-to-head meeting history.
    #[arg(long = "compare", short = 'x', help_heading = "Analysis Options")]
    pub compare: Option<String>,

    /// First season to include (default: 2015, the platform's first)
    #[arg(long = "from", help_heading = "Analysis Options")]
    pub from_season: Option<u16>,

    /// Last season to include (default: the current year)
    #[arg(long = "to", help_heading = "Analysis Options")]
    pub to_season: Option<u16>,

    /// Only include leagues whose name matches (repeatable,
    /// case-insensitive)
    #[arg(long = "league", help_heading = "Analysis Options")]
    pub leagues: Vec<String>,

    /// List the managers available for --compare and exit
    #[arg(long = "list-managers", short = 'm', help_heading = "Analysis Options")]
    pub list_managers: bool,

    /// Plain text output without colors.
    /// Useful for piping output or terminals without color support.
    #[arg(long = "plain", short = 'p', help_heading = "Display Options")]
    pub plain: bool,

    /// Update API base URL in config.
    #[arg(
        long = "config",
        help_heading = "Configuration",
        value_name = "API_URL"
    )]
    pub new_api_base_url: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Enable debug mode: log to stdout as well as the log file
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
