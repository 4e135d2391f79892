//! Swarm engine: NFT mint trigger, stubbed until the on-chain backend lands.

use serde::{Deserialize, Serialize};
use tracing::info;

use supremehead_core::Analysis;

use crate::transport::Result;

/// Receipt returned by a mint trigger. `tx` stays empty until a real
/// minting service signs a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintReceipt {
    pub status: String,
    pub tx: Option<String>,
}

/// Mint client with the production call shape. The current engine
/// acknowledges locally; the fallible signature is the contract a networked
/// implementation slots into.
#[derive(Debug, Clone, Default)]
pub struct SwarmEngine;

impl SwarmEngine {
    pub fn new() -> Self {
        Self
    }

    /// Trigger a mint for a high-value scroll. Blocking.
    pub fn trigger(&self, _raw: &str, analysis: &Analysis) -> Result<MintReceipt> {
        info!("Swarm engine: minting scroll with score {} (stubbed)", analysis.value_score);
        Ok(MintReceipt {
            status: "mint_triggered".into(),
            tx: None,
        })
    }

    /// Non-blocking form of [`SwarmEngine::trigger`].
    pub async fn trigger_async(&self, raw: &str, analysis: &Analysis) -> Result<MintReceipt> {
        self.trigger(raw, analysis)
    }
}
