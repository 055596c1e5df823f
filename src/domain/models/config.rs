use serde::{Deserialize, Serialize};

/// Main configuration structure for sift.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Candidate table and output locations
    #[serde(default)]
    pub store: StoreConfig,

    /// Scoring service configuration
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// External collaborator configuration
    #[serde(default)]
    pub collaborators: CollaboratorsConfig,

    /// Ranking reference tables
    #[serde(default)]
    pub rankings: RankingsConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Candidate table and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StoreConfig {
    /// Path to the candidate CSV table
    #[serde(default = "default_csv_path")]
    pub csv_path: String,

    /// Directory for charts and per-candidate logs
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_csv_path() -> String {
    "applicants.csv".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            output_dir: default_output_dir(),
        }
    }
}

/// Scoring service (LLM) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoringConfig {
    /// Base URL of the generation endpoint
    #[serde(default = "default_scoring_base_url")]
    pub base_url: String,

    /// Model identifier passed to the endpoint
    #[serde(default = "default_scoring_model")]
    pub model: String,

    /// Independent samples requested per criterion
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Highest samples averaged into the final score
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_scoring_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_scoring_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_scoring_model() -> String {
    "llama3.2:3b".to_string()
}

const fn default_samples() -> usize {
    5
}

const fn default_top_k() -> usize {
    3
}

const fn default_scoring_timeout_secs() -> u64 {
    120
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_url: default_scoring_base_url(),
            model: default_scoring_model(),
            samples: default_samples(),
            top_k: default_top_k(),
            timeout_secs: default_scoring_timeout_secs(),
        }
    }
}

/// External collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CollaboratorsConfig {
    /// Code-host REST API base URL
    #[serde(default = "default_code_host_api_base")]
    pub code_host_api_base: String,

    /// Optional API token; raises the code-host rate limit
    #[serde(default)]
    pub code_host_token: Option<String>,

    /// Directory of pre-captured network-profile JSON snapshots
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,

    /// Directory of pre-extracted résumé text files
    #[serde(default = "default_resume_dir")]
    pub resume_dir: String,

    /// Repositories fetched per code-host profile
    #[serde(default = "default_max_repos")]
    pub max_repos: usize,

    /// Website fetch timeout in seconds
    #[serde(default = "default_website_timeout_secs")]
    pub website_timeout_secs: u64,
}

fn default_code_host_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_snapshot_dir() -> String {
    "snapshots".to_string()
}

fn default_resume_dir() -> String {
    "cvs".to_string()
}

const fn default_max_repos() -> usize {
    3
}

const fn default_website_timeout_secs() -> u64 {
    10
}

impl Default for CollaboratorsConfig {
    fn default() -> Self {
        Self {
            code_host_api_base: default_code_host_api_base(),
            code_host_token: None,
            snapshot_dir: default_snapshot_dir(),
            resume_dir: default_resume_dir(),
            max_repos: default_max_repos(),
            website_timeout_secs: default_website_timeout_secs(),
        }
    }
}

/// Ranking reference table paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RankingsConfig {
    /// Domestic notation table (Name, Notation)
    #[serde(default = "default_domestic_table")]
    pub domestic_table: String,

    /// World mean-rank table (University Name, Mean Rank, Region)
    #[serde(default = "default_world_table")]
    pub world_table: String,
}

fn default_domestic_table() -> String {
    "domestic_rankings.csv".to_string()
}

fn default_world_table() -> String {
    "world_rankings.csv".to_string()
}

impl Default for RankingsConfig {
    fn default() -> Self {
        Self {
            domestic_table: default_domestic_table(),
            world_table: default_world_table(),
        }
    }
}

/// Rate limiting configuration for outbound service calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RateLimitConfig {
    /// Requests per second allowed
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: f64,

    /// Burst size for the token bucket
    #[serde(default = "default_burst_size")]
    pub burst_size: u32,
}

const fn default_requests_per_second() -> f64 {
    2.0
}

const fn default_burst_size() -> u32 {
    2
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            burst_size: default_burst_size(),
        }
    }
}

/// Retry policy configuration for the scoring client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum retry attempts for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    1_000
}

const fn default_max_backoff_ms() -> u64 {
    30_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.csv_path, "applicants.csv");
        assert_eq!(config.scoring.samples, 5);
        assert_eq!(config.scoring.top_k, 3);
        assert_eq!(config.collaborators.max_repos, 3);
        assert!(config.collaborators.code_host_token.is_none());
    }

    #[test]
    fn test_config_deserializes_partial_input() {
        let config: Config =
            serde_json::from_value(serde_json::json!({ "scoring": { "samples": 7 } })).unwrap();
        assert_eq!(config.scoring.samples, 7);
        assert_eq!(config.scoring.top_k, 3);
    }
}
