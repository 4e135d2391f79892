//! The SupremeHead orchestrator: every scroll is received, analyzed, and
//! then either minted or stored, with each stage recorded in the ledger.
//!
//! The pipeline state machine is written once and parameterized by an
//! execution mode, so the blocking and non-blocking entry points cannot
//! drift apart.

use std::path::Path;

use serde_json::{json, Value};
use tracing::{info, warn};

use supremehead_clients::{
    MemoryCoreClient, MindNexusClient, MintReceipt, SwarmEngine, TransportError,
};
use supremehead_core::{Analysis, IngestReport, Scroll, ScrollAction, SupremeHeadConfig};
use supremehead_ledger::{CodexLedger, LedgerEvent};

use crate::retry::{with_retry, with_retry_async};

/// Retried backend effects for one execution mode. Implementations decide
/// how a call runs and waits; the pipeline decides everything else.
trait ExecutionMode {
    async fn analyze(&self, scroll: &Scroll) -> Result<Analysis, TransportError>;
    async fn store(&self, scroll: &Scroll, analysis: &Analysis) -> Result<Value, TransportError>;
    async fn mint(&self, scroll: &Scroll, analysis: &Analysis)
        -> Result<MintReceipt, TransportError>;
    async fn record(&self, event: LedgerEvent, payload: Value);
}

/// Blocking execution: blocking clients, real sleeps between retries. Its
/// effect futures never yield, so a plain executor drives them without a
/// runtime.
struct BlockingMode<'a>(&'a SupremeHead);

impl ExecutionMode for BlockingMode<'_> {
    async fn analyze(&self, scroll: &Scroll) -> Result<Analysis, TransportError> {
        let head = self.0;
        with_retry(
            || head.nexus.analyze(&scroll.raw, &scroll.source),
            head.config.retry_count,
            head.config.retry_delay(),
        )
    }

    async fn store(&self, scroll: &Scroll, analysis: &Analysis) -> Result<Value, TransportError> {
        let head = self.0;
        with_retry(
            || head.memory.store(scroll, analysis),
            head.config.retry_count,
            head.config.retry_delay(),
        )
    }

    async fn mint(
        &self,
        scroll: &Scroll,
        analysis: &Analysis,
    ) -> Result<MintReceipt, TransportError> {
        let head = self.0;
        with_retry(
            || head.swarm.trigger(&scroll.raw, analysis),
            head.config.retry_count,
            head.config.retry_delay(),
        )
    }

    async fn record(&self, event: LedgerEvent, payload: Value) {
        self.0.ledger.record(event, payload);
    }
}

/// Non-blocking execution: async clients, scheduler-friendly sleeps and
/// ledger writes.
struct NonBlockingMode<'a>(&'a SupremeHead);

impl ExecutionMode for NonBlockingMode<'_> {
    async fn analyze(&self, scroll: &Scroll) -> Result<Analysis, TransportError> {
        let head = self.0;
        with_retry_async(
            || head.nexus.analyze_async(&scroll.raw, &scroll.source),
            head.config.retry_count,
            head.config.retry_delay(),
        )
        .await
    }

    async fn store(&self, scroll: &Scroll, analysis: &Analysis) -> Result<Value, TransportError> {
        let head = self.0;
        with_retry_async(
            || head.memory.store_async(scroll, analysis),
            head.config.retry_count,
            head.config.retry_delay(),
        )
        .await
    }

    async fn mint(
        &self,
        scroll: &Scroll,
        analysis: &Analysis,
    ) -> Result<MintReceipt, TransportError> {
        let head = self.0;
        with_retry_async(
            || head.swarm.trigger_async(&scroll.raw, analysis),
            head.config.retry_count,
            head.config.retry_delay(),
        )
        .await
    }

    async fn record(&self, event: LedgerEvent, payload: Value) {
        self.0.ledger.record_async(event, payload).await;
    }
}

async fn record_failed_action(
    mode: &impl ExecutionMode,
    score: i64,
    error: &TransportError,
) -> ScrollAction {
    warn!("Action failed after retries: {}", error);
    mode.record(
        LedgerEvent::ActionFailed,
        json!({ "score": score, "error": error.to_string() }),
    )
    .await;
    ScrollAction::Failed
}

/// Decision-routing orchestrator over the Mind Nexus, Memory Core, and
/// Swarm Engine backends.
///
/// Ingestion is infallible: backend outages degrade the verdict or fail
/// the action, but the caller always gets a report back.
pub struct SupremeHead {
    config: SupremeHeadConfig,
    ledger: CodexLedger,
    nexus: MindNexusClient,
    memory: MemoryCoreClient,
    swarm: SwarmEngine,
}

impl SupremeHead {
    pub fn new(config: SupremeHeadConfig) -> Self {
        let ledger = CodexLedger::new(&config.ledger_path);
        let nexus = MindNexusClient::new(&config.analysis_backend_url);
        let memory = MemoryCoreClient::new(&config.storage_backend_url);
        info!(
            "SupremeHead initialized: nexus={}, memory={}, threshold={}",
            nexus.endpoint(),
            memory.endpoint(),
            config.mint_threshold
        );
        Self {
            config,
            ledger,
            nexus,
            memory,
            swarm: SwarmEngine::new(),
        }
    }

    /// Build an orchestrator from a config file path.
    pub fn from_config_path(path: impl AsRef<Path>) -> Self {
        Self::new(SupremeHeadConfig::load(path.as_ref()))
    }

    pub fn config(&self) -> &SupremeHeadConfig {
        &self.config
    }

    pub fn ledger(&self) -> &CodexLedger {
        &self.ledger
    }

    /// A score equal to the threshold mints.
    fn should_mint(&self, score: i64) -> bool {
        score >= self.config.mint_threshold
    }

    /// Run one scroll through the full pipeline. Blocking; must not be
    /// called from inside an async runtime.
    pub fn ingest_scroll(&self, raw: &str, source: &str) -> IngestReport {
        futures::executor::block_on(self.run_pipeline(&BlockingMode(self), raw, source))
    }

    /// Non-blocking form of [`SupremeHead::ingest_scroll`].
    pub async fn ingest_scroll_async(&self, raw: &str, source: &str) -> IngestReport {
        self.run_pipeline(&NonBlockingMode(self), raw, source).await
    }

    /// The single pipeline definition both entry points drive.
    async fn run_pipeline(
        &self,
        mode: &impl ExecutionMode,
        raw: &str,
        source: &str,
    ) -> IngestReport {
        let scroll = Scroll::new(raw, source);
        info!("Ingesting scroll from {}", scroll.source);
        mode.record(
            LedgerEvent::ScrollReceived,
            json!({ "source": scroll.source, "snippet": scroll.snippet() }),
        )
        .await;

        let analysis = match mode.analyze(&scroll).await {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("Analysis failed, continuing with neutral verdict: {}", e);
                Analysis::degraded(&e.to_string())
            }
        };
        let score = analysis.value_score;
        mode.record(
            LedgerEvent::ScrollAnalyzed,
            json!({ "score": score, "analysis_meta": analysis.timestamp }),
        )
        .await;

        let action = if self.should_mint(score) {
            info!("High value scroll (score {}), triggering NFT mint", score);
            match mode.mint(&scroll, &analysis).await {
                Ok(receipt) => {
                    mode.record(
                        LedgerEvent::NftTriggered,
                        json!({ "score": score, "result": receipt }),
                    )
                    .await;
                    ScrollAction::MintTriggered
                }
                Err(e) => record_failed_action(mode, score, &e).await,
            }
        } else {
            info!("Standard scroll (score {}), storing in Memory Core", score);
            match mode.store(&scroll, &analysis).await {
                Ok(ack) => {
                    mode.record(
                        LedgerEvent::ScrollStored,
                        json!({ "score": score, "result": ack }),
                    )
                    .await;
                    ScrollAction::Stored
                }
                Err(e) => record_failed_action(mode, score, &e).await,
            }
        };

        IngestReport::processed(action, score, &scroll.source, analysis)
    }
}
