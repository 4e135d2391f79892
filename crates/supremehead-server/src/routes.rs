//! HTTP route handlers for the ingest API.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use supremehead_core::IngestReport;
use supremehead_pipeline::SupremeHead;

/// Build the main Axum router.
pub fn build_router(head: Arc<SupremeHead>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .with_state(head)
}

fn api_routes() -> Router<Arc<SupremeHead>> {
    Router::new()
        .route("/ingest", post(post_ingest))
        .route("/health", get(get_health))
}

#[derive(Debug, Deserialize)]
struct IngestRequest {
    raw: String,
    #[serde(default = "default_source")]
    source: String,
}

fn default_source() -> String {
    "api".to_string()
}

/// POST /api/ingest — run one scroll through the pipeline and return the
/// report. Always 200; backend trouble shows up in the report's action.
async fn post_ingest(
    State(head): State<Arc<SupremeHead>>,
    Json(request): Json<IngestRequest>,
) -> Json<IngestReport> {
    Json(head.ingest_scroll_async(&request.raw, &request.source).await)
}

/// GET /api/health — liveness plus the active routing settings.
async fn get_health(State(head): State<Arc<SupremeHead>>) -> Json<serde_json::Value> {
    let config = head.config();
    Json(serde_json::json!({
        "status": "ok",
        "mintThreshold": config.mint_threshold,
        "analysisBackend": config.analysis_backend_url,
        "storageBackend": config.storage_backend_url,
        "ledgerPath": head.ledger().path().display().to_string(),
    }))
}
