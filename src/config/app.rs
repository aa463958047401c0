//! Main application configuration
//!
//! This module defines the primary configuration structures for the rating
//! replay, including TOML file loading, environment variable loading and
//! validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub replay: ReplaySettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Input and output locations for a replay run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaySettings {
    /// Directory holding `contests.json` and `standings/<contest>.json`
    pub data_dir: PathBuf,
    /// Where the dense rating history is written
    pub output_path: PathBuf,
    /// Number of leaderboard entries logged after a replay
    pub leaderboard_size: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "school-rating".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_path: PathBuf::from("rating/rating_school.json"),
            leaderboard_size: 20,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file; missing keys fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Rating settings
        if let Ok(default_rating) = env::var("RATING_DEFAULT") {
            config.rating.default_rating = default_rating
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_DEFAULT value: {}", default_rating))?;
        }
        if let Ok(min) = env::var("RATING_MIN_SEARCH") {
            config.rating.min_search_rating = min
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_MIN_SEARCH value: {}", min))?;
        }
        if let Ok(max) = env::var("RATING_MAX_SEARCH") {
            config.rating.max_search_rating = max
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_MAX_SEARCH value: {}", max))?;
        }
        if let Ok(parallel) = env::var("RATING_PARALLEL") {
            config.rating.parallel = parallel
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_PARALLEL value: {}", parallel))?;
        }

        // Replay settings
        if let Ok(data_dir) = env::var("RATING_DATA_DIR") {
            config.replay.data_dir = PathBuf::from(data_dir);
        }
        if let Ok(output) = env::var("RATING_OUTPUT") {
            config.replay.output_path = PathBuf::from(output);
        }
        if let Ok(size) = env::var("LEADERBOARD_SIZE") {
            config.replay.leaderboard_size = size
                .parse()
                .map_err(|_| anyhow!("Invalid LEADERBOARD_SIZE value: {}", size))?;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    config.rating.validate()?;

    if config.replay.output_path.as_os_str().is_empty() {
        return Err(anyhow!("Output path cannot be empty"));
    }

    Ok(())
}
