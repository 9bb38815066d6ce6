use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings.
///
/// The base URL must be non-empty and look like a URL or host; a custom
/// log file path, if set, must be non-empty and have a parent directory
/// that exists or can be created.
pub fn validate_config(api_base_url: &str, log_file_path: &Option<String>) -> Result<(), AppError> {
    validate_base_url(api_base_url)?;
    if let Some(log_path) = log_file_path {
        validate_log_path(log_path)?;
    }
    Ok(())
}

fn validate_base_url(api_base_url: &str) -> Result<(), AppError> {
    if api_base_url.is_empty() {
        return Err(AppError::config_error("API base URL cannot be empty"));
    }

    if api_base_url.starts_with("http://") || api_base_url.starts_with("https://") {
        return Ok(());
    }

    // No scheme: accept anything that at least looks like a host
    if api_base_url.contains('.') || api_base_url.starts_with("localhost") {
        return Ok(());
    }

    Err(AppError::config_error(
        "API base URL must be a valid URL or domain name",
    ))
}

fn validate_log_path(log_path: &str) -> Result<(), AppError> {
    if log_path.is_empty() {
        return Err(AppError::config_error("Log file path cannot be empty"));
    }

    // The parent directory must exist or be creatable; creating it here
    // doubles as the writability check
    if let Some(parent) = Path::new(log_path).parent()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::config_error(format!(
                "Cannot create log directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    Ok(())
}
