use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("csv_path cannot be empty")]
    EmptyCsvPath,

    #[error("output_dir cannot be empty")]
    EmptyOutputDir,

    #[error("invalid sample count: {0}. Must be between 1 and 20")]
    InvalidSamples(usize),

    #[error("invalid top_k: {0}. Must be between 1 and the sample count ({1})")]
    InvalidTopK(usize, usize),

    #[error("invalid rate limit: {0}. Must be positive")]
    InvalidRateLimit(f64),

    #[error("invalid burst_size: {0}. Must be at least 1")]
    InvalidBurstSize(u32),

    #[error("invalid max_retries: {0}. Cannot be 0")]
    InvalidMaxRetries(u32),

    #[error(
        "invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. sift.yaml (project config)
    /// 3. sift.local.yaml (local overrides, optional)
    /// 4. Environment variables (SIFT_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("sift.yaml"))
            .merge(Yaml::file("sift.local.yaml"))
            .merge(Env::prefixed("SIFT_").split("__"))
            .extract()
            .context("failed to extract configuration")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!("failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.store.csv_path.trim().is_empty() {
            return Err(ConfigError::EmptyCsvPath);
        }
        if config.store.output_dir.trim().is_empty() {
            return Err(ConfigError::EmptyOutputDir);
        }

        if config.scoring.samples == 0 || config.scoring.samples > 20 {
            return Err(ConfigError::InvalidSamples(config.scoring.samples));
        }
        if config.scoring.top_k == 0 || config.scoring.top_k > config.scoring.samples {
            return Err(ConfigError::InvalidTopK(
                config.scoring.top_k,
                config.scoring.samples,
            ));
        }

        if config.rate_limit.requests_per_second <= 0.0 {
            return Err(ConfigError::InvalidRateLimit(config.rate_limit.requests_per_second));
        }
        if config.rate_limit.burst_size == 0 {
            return Err(ConfigError::InvalidBurstSize(config.rate_limit.burst_size));
        }

        if config.retry.max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries(config.retry.max_retries));
        }
        if config.retry.initial_backoff_ms >= config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }
        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(ConfigLoader::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_top_k_must_not_exceed_samples() {
        let mut config = Config::default();
        config.scoring.samples = 3;
        config.scoring.top_k = 5;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTopK(5, 3))
        ));
    }

    #[test]
    fn test_empty_csv_path_is_rejected() {
        let mut config = Config::default();
        config.store.csv_path = "  ".into();
        assert!(matches!(ConfigLoader::validate(&config), Err(ConfigError::EmptyCsvPath)));
    }

    #[test]
    fn test_backoff_ordering_is_enforced() {
        let mut config = Config::default();
        config.retry.initial_backoff_ms = 60_000;
        config.retry.max_backoff_ms = 1_000;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBackoff(60_000, 1_000))
        ));
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".into();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sift.yaml");
        std::fs::write(
            &path,
            "store:\n  csv_path: batch.csv\nscoring:\n  samples: 7\n  top_k: 2\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.store.csv_path, "batch.csv");
        assert_eq!(config.scoring.samples, 7);
        assert_eq!(config.scoring.top_k, 2);
        // Untouched sections keep their defaults.
        assert_eq!(config.collaborators.max_repos, 3);
    }
}
