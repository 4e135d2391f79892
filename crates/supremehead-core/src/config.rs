//! Orchestrator configuration, loaded from a JSON file with per-key defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_ANALYSIS_BACKEND_URL: &str = "http://localhost:3001";
pub const DEFAULT_STORAGE_BACKEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_MINT_THRESHOLD: i64 = 85;
pub const DEFAULT_RETRY_COUNT: u32 = 2;
pub const DEFAULT_RETRY_DELAY_SECONDS: u64 = 1;

/// Log directory for ledger output, from `SUPREMEHEAD_LOG_DIR`.
pub fn log_dir() -> PathBuf {
    std::env::var("SUPREMEHEAD_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Top-level SupremeHead configuration. Every key is optional; each backend
/// URL is a complete endpoint, posted to verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupremeHeadConfig {
    #[serde(default = "default_analysis_backend_url")]
    pub analysis_backend_url: String,
    #[serde(default = "default_storage_backend_url")]
    pub storage_backend_url: String,
    #[serde(default = "default_mint_threshold")]
    pub mint_threshold: i64,
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,
    /// Total attempts per downstream call, not extra retries.
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_delay_seconds")]
    pub retry_delay_seconds: u64,
}

fn default_analysis_backend_url() -> String {
    DEFAULT_ANALYSIS_BACKEND_URL.into()
}
fn default_storage_backend_url() -> String {
    DEFAULT_STORAGE_BACKEND_URL.into()
}
fn default_mint_threshold() -> i64 {
    DEFAULT_MINT_THRESHOLD
}
fn default_ledger_path() -> PathBuf {
    log_dir().join("codex_ledger.log")
}
fn default_retry_count() -> u32 {
    DEFAULT_RETRY_COUNT
}
fn default_retry_delay_seconds() -> u64 {
    DEFAULT_RETRY_DELAY_SECONDS
}

impl Default for SupremeHeadConfig {
    fn default() -> Self {
        Self {
            analysis_backend_url: default_analysis_backend_url(),
            storage_backend_url: default_storage_backend_url(),
            mint_threshold: default_mint_threshold(),
            ledger_path: default_ledger_path(),
            retry_count: default_retry_count(),
            retry_delay_seconds: default_retry_delay_seconds(),
        }
    }
}

impl SupremeHeadConfig {
    /// Load config from a JSON file. Missing keys keep their defaults; a
    /// missing or unparseable file yields the full defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Config parse failed for {} ({}), using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Fixed delay between retry attempts.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_seconds)
    }
}
