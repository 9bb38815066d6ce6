use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the league API, including the version prefix.
    /// Defaults to the public Sleeper API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

/// Default API base URL (public Sleeper API)
fn default_api_base_url() -> String {
    crate::constants::DEFAULT_API_BASE_URL.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// If no config file exists, falls back to built-in defaults (the public
    /// Sleeper API needs no credentials, so first-run works without setup).
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `SLEEPER_API_URL` - Override API base URL
    /// - `SLEEPER_LOG_FILE` - Override log file path
    /// - `SLEEPER_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded or defaulted configuration
    /// * `Err(AppError)` - Error occurred during load
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            let content = fs::read_to_string(&config_path).await?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // Override with environment variables if present
        if let Ok(api_base_url) = std::env::var(crate::constants::env_vars::API_BASE_URL) {
            config.api_base_url = api_base_url;
        }

        if let Ok(log_file_path) = std::env::var(crate::constants::env_vars::LOG_FILE) {
            config.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(crate::constants::env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.http_timeout_seconds = timeout;
        }

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration settings
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is valid
    /// * `Err(AppError)` - Configuration validation failed
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(&self.api_base_url, &self.log_file_path)
    }

    /// Saves current configuration to the default config file location.
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved configuration
    /// * `Err(AppError)` - Error occurred during save
    ///
    /// # Notes
    /// - Creates config directory if it doesn't exist
    /// - Ensures api_base_url has https:// prefix
    /// - Uses TOML format for storage
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Returns
    /// * `Ok(())` - Successfully displayed configuration
    /// * `Err(AppError)` - Error occurred while reading config
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - Handles case when no config file exists
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("API Base URL:");
            println!("{}", config.api_base_url);
            println!("────────────────────────────────────");
            println!("HTTP Timeout:");
            println!("{} seconds", config.http_timeout_seconds);
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/sleeper_rewind.log");
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            println!("Using built-in defaults (API: {})", Config::default().api_base_url);
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and ensures the API
    /// base URL has the proper https:// prefix.
    ///
    /// # Arguments
    /// * `path` - The file path where the configuration should be saved
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let api_base_url = if !self.api_base_url.starts_with("https://") {
            format!(
                "https://{}",
                self.api_base_url.trim_start_matches("http://")
            )
        } else {
            self.api_base_url.clone()
        };
        let content = toml::to_string_pretty(&Config {
            api_base_url,
            log_file_path: self.log_file_path.clone(),
            http_timeout_seconds: self.http_timeout_seconds,
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path (for testing).
    #[allow(dead_code)] // Used in tests
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
api_base_url = "https://api.example.com/v1"
log_file_path = "/custom/log/path"
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.api_base_url, "https://api.example.com/v1");
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
    }

    #[tokio::test]
    async fn test_config_defaults_when_fields_missing() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        // An empty file is valid: every field has a default
        tokio::fs::write(&config_path, "").await.unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(
            config.api_base_url,
            crate::constants::DEFAULT_API_BASE_URL
        );
        assert_eq!(config.log_file_path, None);
        assert_eq!(
            config.http_timeout_seconds,
            crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS
        );
    }

    #[tokio::test]
    async fn test_config_save_new_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config {
            api_base_url: "https://api.example.com/v1".to_string(),
            log_file_path: Some("/custom/log/path".to_string()),
            http_timeout_seconds: default_http_timeout(),
        };
        config.save_to_path(&config_path_str).await.unwrap();
        assert!(config_path.exists());
        let content = tokio::fs::read_to_string(&config_path).await.unwrap();
        assert!(
            content.contains("api_base_url") && content.contains("https://api.example.com/v1"),
            "Content should contain api_base_url and https://api.example.com/v1. Content: {content}"
        );
        let loaded_config = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded_config.api_base_url, "https://api.example.com/v1");
        assert_eq!(
            loaded_config.log_file_path,
            Some("/custom/log/path".to_string())
        );
    }

    #[tokio::test]
    async fn test_config_save_without_https_prefix() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config {
            api_base_url: "api.example.com".to_string(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        };
        config.save_to_path(&config_path_str).await.unwrap();
        let loaded_config = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded_config.api_base_url, "https://api.example.com");
    }

    #[tokio::test]
    async fn test_config_save_with_http_prefix() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config {
            api_base_url: "http://api.example.com".to_string(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        };
        config.save_to_path(&config_path_str).await.unwrap();
        let loaded_config = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded_config.api_base_url, "https://api.example.com");
    }

    #[tokio::test]
    async fn test_config_save_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let config_dir = temp_dir.path().join("sleeper_rewind");
        let config_path = config_dir.join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config::default();
        config.save_to_path(&config_path_str).await.unwrap();
        assert!(config_dir.exists());
        assert!(config_path.exists());
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let original_config = Config {
            api_base_url: "https://api.example.com/v1".to_string(),
            log_file_path: Some("/custom/log/path".to_string()),
            http_timeout_seconds: 10,
        };
        original_config
            .save_to_path(&config_path_str)
            .await
            .unwrap();
        let loaded_config = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(original_config.api_base_url, loaded_config.api_base_url);
        assert_eq!(original_config.log_file_path, loaded_config.log_file_path);
        assert_eq!(
            original_config.http_timeout_seconds,
            loaded_config.http_timeout_seconds
        );
    }

    #[test]
    fn test_get_config_path() {
        let config_path = Config::get_config_path();

        assert!(config_path.contains("sleeper_rewind"));
        assert!(config_path.ends_with("config.toml"));
    }

    #[test]
    fn test_get_log_dir_path() {
        let log_dir_path = Config::get_log_dir_path();

        assert!(log_dir_path.contains("sleeper_rewind"));
        assert!(log_dir_path.ends_with("logs"));
    }

    #[tokio::test]
    async fn test_config_malformed_toml_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("malformed_config.toml");
        let config_path_str = config_path.to_string_lossy();

        let malformed_content = r#"
api_base_url = "https://api.example.com"
[invalid_section
malformed = "data
"#;
        tokio::fs::write(&config_path, malformed_content)
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path_str).await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    async fn test_config_load_from_nonexistent_path() {
        let result = Config::load_from_path("/nonexistent/path/config.toml").await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[test]
    fn test_config_serialization_skips_missing_log_path() {
        let config = Config {
            api_base_url: "https://api.example.com/v1".to_string(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        };

        let toml_string = toml::to_string_pretty(&config).unwrap();
        assert!(toml_string.contains("api_base_url = \"https://api.example.com/v1\""));
        // log_file_path should not appear in TOML when it's None due to skip_serializing_if
        assert!(!toml_string.contains("log_file_path"));

        let deserialized_config: Config = toml::from_str(&toml_string).unwrap();
        assert_eq!(config.api_base_url, deserialized_config.api_base_url);
        assert_eq!(config.log_file_path, deserialized_config.log_file_path);
    }

    #[test]
    fn test_config_validation_valid_configs() {
        let valid_configs = vec![
            Config::default(),
            Config {
                api_base_url: "http://localhost:8080".to_string(),
                log_file_path: Some("/tmp/test.log".to_string()),
                http_timeout_seconds: default_http_timeout(),
            },
            Config {
                api_base_url: "api.example.com".to_string(),
                log_file_path: None,
                http_timeout_seconds: default_http_timeout(),
            },
        ];

        for config in valid_configs {
            assert!(
                config.validate().is_ok(),
                "Config should be valid: {config:?}"
            );
        }
    }

    #[test]
    fn test_config_validation_invalid_configs() {
        let invalid_configs = vec![
            // Empty API base URL
            Config {
                api_base_url: "".to_string(),
                log_file_path: None,
                http_timeout_seconds: default_http_timeout(),
            },
            // Invalid base URL format
            Config {
                api_base_url: "invalid_domain".to_string(),
                log_file_path: None,
                http_timeout_seconds: default_http_timeout(),
            },
            // Empty log file path
            Config {
                api_base_url: "https://api.example.com".to_string(),
                log_file_path: Some("".to_string()),
                http_timeout_seconds: default_http_timeout(),
            },
        ];

        for config in invalid_configs {
            assert!(
                config.validate().is_err(),
                "Config should be invalid: {config:?}"
            );
        }
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_environment_variable_override() {
        unsafe {
            std::env::set_var("SLEEPER_API_URL", "https://env.example.com/v1");
            std::env::set_var("SLEEPER_HTTP_TIMEOUT", "7");
        }

        let config = Config::load().await.unwrap();
        assert_eq!(config.api_base_url, "https://env.example.com/v1");
        assert_eq!(config.http_timeout_seconds, 7);

        unsafe {
            std::env::remove_var("SLEEPER_API_URL");
            std::env::remove_var("SLEEPER_HTTP_TIMEOUT");
        }
    }
}
