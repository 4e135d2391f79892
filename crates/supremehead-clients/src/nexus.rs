//! Mind Nexus client: submits raw scroll text for analysis.

use serde_json::{json, Value};

use supremehead_core::Analysis;

use crate::transport::{Result, Transport, TransportError};

/// Client for the Mind Nexus analysis backend.
///
/// Transport failures propagate; whether to retry or degrade to a neutral
/// verdict is the pipeline's call, not this client's.
#[derive(Debug, Clone)]
pub struct MindNexusClient {
    endpoint: String,
    transport: Transport,
}

impl MindNexusClient {
    /// Point the client at a fully specified analysis endpoint.
    pub fn new(endpoint: &str) -> Self {
        Self::with_transport(endpoint, Transport::new())
    }

    pub fn with_transport(endpoint: &str, transport: Transport) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            transport,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Analyze raw text. Blocking.
    pub fn analyze(&self, raw: &str, source: &str) -> Result<Analysis> {
        let value = self
            .transport
            .post_blocking(&self.endpoint, &analyze_body(raw, source))?;
        self.decode(value)
    }

    /// Non-blocking form of [`MindNexusClient::analyze`].
    pub async fn analyze_async(&self, raw: &str, source: &str) -> Result<Analysis> {
        let value = self
            .transport
            .post(&self.endpoint, &analyze_body(raw, source))
            .await?;
        self.decode(value)
    }

    fn decode(&self, value: Value) -> Result<Analysis> {
        serde_json::from_value(value)
            .map_err(|e| TransportError::Decode(self.endpoint.clone(), e.to_string()))
    }
}

fn analyze_body(raw: &str, source: &str) -> Value {
    json!({ "raw": raw, "meta": { "source": source } })
}
