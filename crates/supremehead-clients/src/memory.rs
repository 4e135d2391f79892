//! Memory Core client: persists analyzed scrolls to the storage backend.

use serde_json::{json, Value};

use supremehead_core::{Analysis, Scroll};

use crate::transport::{Result, Transport};

/// Client for the Memory Core storage backend.
///
/// Errors come back as values for the caller to retry or record; nothing is
/// swallowed here, or retry exhaustion could never be observed upstream.
#[derive(Debug, Clone)]
pub struct MemoryCoreClient {
    endpoint: String,
    transport: Transport,
}

impl MemoryCoreClient {
    /// Point the client at a fully specified storage endpoint.
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

    /// Store a scroll with its analysis. Blocking. Returns the backend's
    /// acknowledgement verbatim.
    pub fn store(&self, scroll: &Scroll, analysis: &Analysis) -> Result<Value> {
        self.transport
            .post_blocking(&self.endpoint, &store_body(scroll, analysis))
    }

    /// Non-blocking form of [`MemoryCoreClient::store`].
    pub async fn store_async(&self, scroll: &Scroll, analysis: &Analysis) -> Result<Value> {
        self.transport
            .post(&self.endpoint, &store_body(scroll, analysis))
            .await
    }
}

fn store_body(scroll: &Scroll, analysis: &Analysis) -> Value {
    json!({ "scroll": scroll, "analysis": analysis })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::post;
    use axum::{Json, Router};

    fn stub_router() -> Router {
        Router::new().route(
            "/",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "status": "ok",
                    "received": true,
                    "source": body["scroll"]["source"],
                }))
            }),
        )
    }

    #[tokio::test]
    async fn test_store_async_returns_ack() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, stub_router()).await.unwrap();
        });

        let client = MemoryCoreClient::new(&format!("http://{}", addr));
        let scroll = Scroll::new("raw text", "archive");
        let analysis = Analysis::degraded("n/a");

        let ack = client.store_async(&scroll, &analysis).await.unwrap();
        assert_eq!(ack["status"], "ok");
        assert_eq!(ack["received"], true);
        assert_eq!(ack["source"], "archive");
    }

    #[test]
    fn test_store_body_shape() {
        let scroll = Scroll::new("raw text", "archive");
        let analysis = Analysis::degraded("n/a");

        let body = store_body(&scroll, &analysis);
        assert_eq!(body["scroll"]["raw"], "raw text");
        assert_eq!(body["scroll"]["source"], "archive");
        assert!(body["scroll"]["ingested_at"].is_string());
        assert_eq!(body["analysis"]["value_score"], 50);
        assert_eq!(body["analysis"]["sentiment"], "neutral");
    }
}
