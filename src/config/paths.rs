use std::path::{Path, PathBuf};

/// Application directory under the platform config root
/// (e.g. ~/.config/sleeper_rewind on Linux), falling back to the current
/// directory when no config root is available
fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join("sleeper_rewind")
}

/// Absolute path of the config file
pub fn get_config_path() -> String {
    app_dir().join("config.toml").to_string_lossy().to_string()
}

/// Absolute path of the log directory
pub fn get_log_dir_path() -> String {
    app_dir().join("logs").to_string_lossy().to_string()
}
