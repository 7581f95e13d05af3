//! Configuration for Pulso.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::PulsoResult;

/// Main configuration for Pulso.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Probe settings.
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Freshness cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// History log settings.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Periodic watcher settings.
    #[serde(default)]
    pub watcher: WatcherConfig,

    /// Notes settings.
    #[serde(default)]
    pub notes: NotesConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Simulated probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Simulated measurement delay (in milliseconds).
    #[serde(default = "default_probe_latency")]
    pub latency_ms: u64,

    /// Probability of a simulated measurement failing (0.0 - 1.0).
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
}

impl ProbeConfig {
    /// Returns the measurement delay as a `Duration`.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_probe_latency(),
            failure_rate: default_failure_rate(),
        }
    }
}

fn default_probe_latency() -> u64 {
    2000 // 2 segundos, como uma chamada de rede real
}

fn default_failure_rate() -> f64 {
    0.0
}

/// Freshness cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Reuse window for cached results (in seconds).
    #[serde(default = "default_freshness_window")]
    pub freshness_window_secs: u64,
}

impl CacheConfig {
    /// Returns the freshness window as a `Duration`.
    pub fn freshness_window(&self) -> Duration {
        Duration::from_secs(self.freshness_window_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness_window_secs: default_freshness_window(),
        }
    }
}

fn default_freshness_window() -> u64 {
    60 // 1 minuto
}

/// History log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of retained records.
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

fn default_history_capacity() -> usize {
    20
}

/// Periodic watcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Interval between automatic re-analyses (in seconds).
    #[serde(default = "default_watch_interval")]
    pub interval_secs: u64,
}

impl WatcherConfig {
    /// Returns the watch interval as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_watch_interval(),
        }
    }
}

fn default_watch_interval() -> u64 {
    5
}

/// Notes settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// SQLite database path for the notebook.
    #[serde(default = "default_notes_db_path")]
    pub db_path: PathBuf,

    /// Maximum attachment size (in bytes).
    #[serde(default = "default_max_attachment_bytes")]
    pub max_attachment_bytes: usize,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            db_path: default_notes_db_path(),
            max_attachment_bytes: default_max_attachment_bytes(),
        }
    }
}

fn default_notes_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pulso")
        .join("notes.db")
}

fn default_max_attachment_bytes() -> usize {
    5 * 1024 * 1024 // 5 MiB
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> PulsoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> PulsoResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            probe: ProbeConfig::default(),
            cache: CacheConfig::default(),
            history: HistoryConfig::default(),
            watcher: WatcherConfig::default(),
            notes: NotesConfig::default(),
        }
    }

    /// Tries to load configuration from current directory or uses default.
    pub fn load_or_default() -> Self {
        Self::load("pulso.toml").unwrap_or_else(|_| Self::default_config())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
