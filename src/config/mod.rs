//! Configuration management for gradekeeper
//!
//! Layers an embedded default config, repository config files and
//! `GRADEKEEPER_`-prefixed environment variables, highest priority last,
//! and extracts the merged result into typed structs.

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Main configuration structure for gradekeeper
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GradekeeperConfig {
    /// Access cache tuning
    pub cache: CacheConfig,

    /// Batch report engine tuning
    pub batch: BatchConfig,

    /// Report output locations
    pub reports: ReportsConfig,

    /// Record data source
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached entries
    pub max_capacity: usize,

    /// Staleness window for the refresh sweep, in minutes
    pub staleness_minutes: u64,

    /// Number of hot records pre-loaded on startup and refresh
    pub warm_quota: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 150,
            staleness_minutes: 5,
            warm_quota: 20,
        }
    }
}

impl CacheConfig {
    pub fn staleness_window(&self) -> Duration {
        Duration::from_secs(self.staleness_minutes * 60)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Worker pool size, clamped to 1-8 at invocation (0 = auto-detect)
    pub default_parallelism: usize,

    /// Bounded wait for each task's outcome, in seconds
    pub task_timeout_secs: u64,

    /// Progress sampling cadence, in milliseconds
    pub progress_interval_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            default_parallelism: 4,
            task_timeout_secs: 10,
            progress_interval_ms: 100,
        }
    }
}

impl BatchConfig {
    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.task_timeout_secs)
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    pub csv_dir: String,
    pub json_dir: String,
    pub binary_dir: String,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            csv_dir: "./reports/csv".to_string(),
            json_dir: "./reports/json".to_string(),
            binary_dir: "./reports/binary".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON file the in-memory stores are seeded from
    pub records_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            records_file: "./records.json".to_string(),
        }
    }
}

impl GradekeeperConfig {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    pub fn load_with_custom_config(custom_config: Option<&str>) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG)); // Embedded defaults

        // If a custom config is specified, use only that + defaults + env vars
        if let Some(custom_path) = custom_config {
            figment = figment
                .merge(Toml::file(custom_path))
                .merge(Json::file(custom_path));
        } else {
            figment = figment
                .merge(Toml::file("gradekeeper.toml"))
                .merge(Json::file("gradekeeper.json"));
        }

        // Environment variables always have highest priority, nested keys
        // separated by a double underscore (GRADEKEEPER_CACHE__MAX_CAPACITY)
        figment = figment.merge(Env::prefixed("GRADEKEEPER_").split("__"));

        figment
            .extract()
            .context("Failed to load gradekeeper configuration")
    }
}
