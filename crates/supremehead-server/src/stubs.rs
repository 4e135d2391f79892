//! Local stub backends: a deterministic Mind Nexus and an acknowledging
//! Memory Core, so the pipeline can run without the real services.

use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use supremehead_core::now_iso;

/// Deterministic stand-in for real analysis. Text length drives the score,
/// with a small bonus for the word "fire", clamped to 1..=99.
pub fn score_scroll(raw: &str) -> i64 {
    let base = 50 + (raw.len() as i64) % 50;
    let bonus = if raw.contains("fire") { 1 } else { 0 };
    (base + bonus).clamp(1, 99)
}

fn sentiment_of(raw: &str) -> &'static str {
    if raw.contains("good") {
        "positive"
    } else {
        "neutral"
    }
}

/// Router for the stub analysis backend. Answers on `/` and `/analyze`.
pub fn nexus_router() -> Router {
    Router::new()
        .route("/", post(analyze))
        .route("/analyze", post(analyze))
}

async fn analyze(Json(body): Json<Value>) -> Json<Value> {
    let raw = body["raw"].as_str().unwrap_or_default();
    Json(json!({
        "patterns": ["temporal"],
        "sentiment": sentiment_of(raw),
        "value_score": score_scroll(raw),
        "timestamp": now_iso(),
    }))
}

/// Router for the stub storage backend. Answers on `/` and `/store`.
pub fn memory_router() -> Router {
    Router::new()
        .route("/", post(store))
        .route("/store", post(store))
}

async fn store(Json(body): Json<Value>) -> Json<Value> {
    let source = body["scroll"]["source"].as_str().unwrap_or("unknown");
    info!("Memory core stub: stored scroll from {}", source);
    Json(json!({ "status": "ok", "received": true }))
}

/// Run both stub backends until the process is stopped.
pub async fn run(analysis_port: u16, storage_port: u16) -> anyhow::Result<()> {
    let nexus = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", analysis_port)).await?;
    let memory = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", storage_port)).await?;
    info!("Stub Mind Nexus listening on 0.0.0.0:{}", analysis_port);
    info!("Stub Memory Core listening on 0.0.0.0:{}", storage_port);

    let (nexus_result, memory_result) = tokio::join!(
        axum::serve(nexus, nexus_router()),
        axum::serve(memory, memory_router()),
    );
    nexus_result?;
    memory_result?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_tracks_text_length() {
        assert_eq!(score_scroll(""), 50);
        assert_eq!(score_scroll("abcde"), 55);
        // Length wraps at 50.
        assert_eq!(score_scroll(&"x".repeat(50)), 50);
        assert_eq!(score_scroll(&"x".repeat(62)), 62);
    }

    #[test]
    fn test_fire_bonus() {
        let plain = "a calm word";
        let heated = "a fire word";
        assert_eq!(plain.len(), heated.len());
        assert_eq!(score_scroll(heated), score_scroll(plain) + 1);
    }

    #[test]
    fn test_score_is_deterministic() {
        let raw = "the same scroll twice";
        assert_eq!(score_scroll(raw), score_scroll(raw));
    }

    #[test]
    fn test_score_stays_in_range() {
        for len in 0..200 {
            let score = score_scroll(&"f".repeat(len));
            assert!((1..=99).contains(&score), "score {} out of range", score);
        }
    }

    #[test]
    fn test_sentiment_keys_off_good() {
        assert_eq!(sentiment_of("a good omen"), "positive");
        assert_eq!(sentiment_of("an ordinary omen"), "neutral");
    }
}
