// src/config.rs
// Startup configuration, resolved once from the environment and passed into
// the pipeline explicitly. Inner components never read env vars themselves.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://artificialanalysis.ai/";
pub const DEFAULT_INTERVAL_MINUTES: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub pushover_token: String,
    pub pushover_user: String,
    pub base_url: String,
    pub data_path: PathBuf,
    pub history_path: PathBuf,
    pub interval_minutes: u64,
}

impl Config {
    /// Resolve configuration from the environment (after `dotenvy` has run).
    /// Missing credentials are left empty here; startup validation decides
    /// whether that is fatal.
    pub fn from_env() -> Self {
        Self {
            pushover_token: std::env::var("PUSHOVER_API_TOKEN").unwrap_or_default(),
            pushover_user: std::env::var("PUSHOVER_USER_KEY").unwrap_or_default(),
            base_url: std::env::var("BENCHWATCH_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            data_path: std::env::var("BENCHWATCH_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("benchmark_data.json")),
            history_path: std::env::var("BENCHWATCH_HISTORY_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("benchmark_history.json")),
            interval_minutes: std::env::var("BENCHWATCH_INTERVAL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_INTERVAL_MINUTES),
        }
    }
}
