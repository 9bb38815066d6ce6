// src/main.rs
use clap::Parser;
use sleeper_rewind::cli::{Args, is_config_operation};
use sleeper_rewind::commands;
use sleeper_rewind::error::AppError;
use sleeper_rewind::logging;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Keep the guard alive for the whole run so logs get flushed
    let (log_file_path, _guard) = logging::setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    // Handle configuration operations without touching the network
    if args.list_config {
        commands::handle_list_config_command().await?;
        return Ok(());
    }

    if is_config_operation(&args) {
        commands::handle_config_update_command(&args).await?;
        return Ok(());
    }

    let Some(username) = args.username.clone() else {
        return Err(AppError::config_error(
            "A username is required. Try: sleeper_rewind <username>",
        ));
    };

    commands::handle_analysis_command(&args, &username).await
}
