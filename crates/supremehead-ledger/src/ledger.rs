//! Ledger entries and the append-only writer.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use supremehead_core::now_iso;

/// Event tags recorded in the codex ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEvent {
    ScrollReceived,
    ScrollAnalyzed,
    NftTriggered,
    ScrollStored,
    ActionFailed,
}

impl std::fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerEvent::ScrollReceived => write!(f, "scroll_received"),
            LedgerEvent::ScrollAnalyzed => write!(f, "scroll_analyzed"),
            LedgerEvent::NftTriggered => write!(f, "nft_triggered"),
            LedgerEvent::ScrollStored => write!(f, "scroll_stored"),
            LedgerEvent::ActionFailed => write!(f, "action_failed"),
        }
    }
}

/// One ledger line. Every line is an independently parseable JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub event_type: LedgerEvent,
    pub timestamp: String,
    pub payload: serde_json::Value,
}

/// Append-only JSONL ledger.
///
/// Recording never surfaces an error: a ledger outage must not take the
/// ingestion pipeline down, so failures are logged and absorbed.
#[derive(Debug, Clone)]
pub struct CodexLedger {
    path: PathBuf,
}

impl CodexLedger {
    /// Create a ledger writing to `path`. The parent directory is created
    /// best-effort; a failure here surfaces again on the first append.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    warn!("Ledger dir {} not created: {}", parent.display(), e);
                }
            }
        }
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry. Blocking.
    pub fn record(&self, event: LedgerEvent, payload: serde_json::Value) {
        let entry = LedgerEntry {
            event_type: event,
            timestamp: now_iso(),
            payload,
        };
        match self.append(&entry) {
            Ok(()) => debug!("Recorded event: {}", event),
            Err(e) => warn!("Ledger write failed for {}: {}", event, e),
        }
    }

    /// Append one entry without blocking the scheduler: the file write runs
    /// on the blocking pool and is awaited, so entries recorded in sequence
    /// by one task keep their order.
    pub async fn record_async(&self, event: LedgerEvent, payload: serde_json::Value) {
        let ledger = self.clone();
        if let Err(e) = tokio::task::spawn_blocking(move || ledger.record(event, payload)).await {
            warn!("Ledger write task failed for {}: {}", event, e);
        }
    }

    fn append(&self, entry: &LedgerEntry) -> std::io::Result<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        line.push('\n');
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        // Single write per entry so concurrent appends cannot split a line.
        file.write_all(line.as_bytes())
    }
}
