//! JSON-over-HTTP transport: one POST attempt per call, in both execution
//! modes. The configured URL is posted to verbatim.

use std::time::Duration;

use once_cell::sync::OnceCell;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Default per-request timeout for backend calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure of a single transport attempt.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request to {0} timed out")]
    Timeout(String),

    #[error("Request to {0} failed: {1}")]
    Request(String, String),

    #[error("{0} returned status {1}")]
    Status(String, u16),

    #[error("Undecodable response from {0}: {1}")]
    Decode(String, String),
}

pub type Result<T> = std::result::Result<T, TransportError>;

/// Paired HTTP clients for JSON POSTs.
///
/// The blocking client is built lazily on the first blocking call; blocking
/// operations must not run inside an async runtime, which is also reqwest's
/// own contract for its blocking client.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    blocking: OnceCell<reqwest::blocking::Client>,
    timeout: Duration,
}

impl Transport {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Transport with an explicit per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            blocking: OnceCell::new(),
            timeout,
        }
    }

    /// POST `body` as JSON and decode the JSON response. One attempt, no
    /// retries.
    pub async fn post(&self, url: &str, body: &Value) -> Result<Value> {
        debug!("POST {}", url);
        let response = self
            .http
            .post(url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(url.to_string(), status.as_u16()));
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Decode(url.to_string(), e.to_string()))
    }

    /// Blocking form of [`Transport::post`].
    pub fn post_blocking(&self, url: &str, body: &Value) -> Result<Value> {
        debug!("POST {} (blocking)", url);
        let client = self
            .blocking
            .get_or_try_init(|| reqwest::blocking::Client::builder().build())
            .map_err(|e| {
                TransportError::Request(url.to_string(), format!("client init failed: {}", e))
            })?;

        let response = client
            .post(url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(url.to_string(), status.as_u16()));
        }
        response
            .json::<Value>()
            .map_err(|e| TransportError::Decode(url.to_string(), e.to_string()))
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(url: &str, e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(url.to_string())
    } else {
        TransportError::Request(url.to_string(), e.to_string())
    }
}
