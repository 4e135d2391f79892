//! Data types shared across the scroll pipeline.

use serde::{Deserialize, Serialize};

/// Maximum characters of raw text quoted in ledger payloads.
pub const SNIPPET_MAX_CHARS: usize = 160;

/// Current UTC time as an ISO-8601 string with a `Z` suffix.
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// A text document flowing through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scroll {
    pub raw: String,
    pub source: String,
    pub ingested_at: String,
}

impl Scroll {
    /// Build a scroll, stamping the ingestion time.
    pub fn new(raw: &str, source: &str) -> Self {
        Self {
            raw: raw.to_string(),
            source: source.to_string(),
            ingested_at: now_iso(),
        }
    }

    /// Bounded excerpt of the raw text. Ledger payloads carry this instead
    /// of the full document.
    pub fn snippet(&self) -> String {
        self.raw.chars().take(SNIPPET_MAX_CHARS).collect()
    }
}

/// Verdict returned by the Mind Nexus analysis backend.
///
/// Unknown response fields are ignored; missing ones fall back to empty
/// values so a sparse backend response still decodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub value_score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub timestamp: String,
}

impl Analysis {
    /// Neutral substitute used when the analysis backend is unreachable.
    /// The pipeline keeps going with this verdict instead of failing.
    pub fn degraded(cause: &str) -> Self {
        Self {
            patterns: Vec::new(),
            sentiment: "neutral".into(),
            value_score: 50,
            notes: Some(format!("fallback: {}", cause)),
            timestamp: now_iso(),
        }
    }
}

/// Outcome label for one ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollAction {
    #[serde(rename = "NFT Mint Triggered")]
    MintTriggered,
    #[serde(rename = "Stored in Memory Core")]
    Stored,
    #[serde(rename = "Action Failed")]
    Failed,
}

impl std::fmt::Display for ScrollAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrollAction::MintTriggered => write!(f, "NFT Mint Triggered"),
            ScrollAction::Stored => write!(f, "Stored in Memory Core"),
            ScrollAction::Failed => write!(f, "Action Failed"),
        }
    }
}

/// Result handed back to the caller for every ingestion, including the
/// degraded and action-failed cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub status: String,
    pub action: ScrollAction,
    pub score: i64,
    pub source: String,
    pub analysis: Analysis,
}

impl IngestReport {
    /// Build the report for a completed ingestion.
    pub fn processed(action: ScrollAction, score: i64, source: &str, analysis: Analysis) -> Self {
        Self {
            status: "Processed".into(),
            action,
            score,
            source: source.to_string(),
            analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_iso_is_utc_with_z_suffix() {
        let ts = now_iso();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn test_scroll_snippet_caps_length() {
        let raw = "x".repeat(500);
        let scroll = Scroll::new(&raw, "test");
        assert_eq!(scroll.snippet().chars().count(), SNIPPET_MAX_CHARS);
    }

    #[test]
    fn test_scroll_snippet_short_text_unchanged() {
        let scroll = Scroll::new("short", "test");
        assert_eq!(scroll.snippet(), "short");
    }

    #[test]
    fn test_scroll_snippet_respects_char_boundaries() {
        let raw = "é".repeat(300);
        let scroll = Scroll::new(&raw, "test");
        let snippet = scroll.snippet();
        assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS);
        assert!(raw.starts_with(&snippet));
    }

    #[test]
    fn test_analysis_decodes_sparse_response() {
        let analysis: Analysis =
            serde_json::from_value(serde_json::json!({ "value_score": 72 })).unwrap();
        assert_eq!(analysis.value_score, 72);
        assert!(analysis.patterns.is_empty());
        assert_eq!(analysis.sentiment, "");
        assert!(analysis.notes.is_none());
    }

    #[test]
    fn test_analysis_ignores_unknown_fields() {
        let analysis: Analysis = serde_json::from_value(serde_json::json!({
            "patterns": ["temporal"],
            "sentiment": "positive",
            "value_score": 91,
            "timestamp": "2026-01-01T00:00:00Z",
            "extra": {"nested": true},
        }))
        .unwrap();
        assert_eq!(analysis.value_score, 91);
        assert_eq!(analysis.patterns, vec!["temporal".to_string()]);
    }

    #[test]
    fn test_degraded_analysis_is_neutral() {
        let analysis = Analysis::degraded("connection refused");
        assert!(analysis.patterns.is_empty());
        assert_eq!(analysis.sentiment, "neutral");
        assert_eq!(analysis.value_score, 50);
        assert_eq!(analysis.notes.as_deref(), Some("fallback: connection refused"));
        assert!(analysis.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(ScrollAction::MintTriggered.to_string(), "NFT Mint Triggered");
        assert_eq!(ScrollAction::Stored.to_string(), "Stored in Memory Core");
        assert_eq!(ScrollAction::Failed.to_string(), "Action Failed");

        let json = serde_json::to_value(ScrollAction::Stored).unwrap();
        assert_eq!(json, serde_json::json!("Stored in Memory Core"));
        let back: ScrollAction = serde_json::from_value(json).unwrap();
        assert_eq!(back, ScrollAction::Stored);
    }

    #[test]
    fn test_report_shape() {
        let report = IngestReport::processed(
            ScrollAction::Stored,
            60,
            "archive",
            Analysis::degraded("timeout"),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "Processed");
        assert_eq!(json["action"], "Stored in Memory Core");
        assert_eq!(json["score"], 60);
        assert_eq!(json["source"], "archive");
        assert_eq!(json["analysis"]["value_score"], 50);
    }
}
