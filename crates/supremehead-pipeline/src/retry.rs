//! Bounded retry with a fixed delay between attempts.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Run `op` up to `max_attempts` times (a zero budget still runs once),
/// sleeping `delay` between attempts but never after the last. Returns the
/// first success, or the error from the final attempt.
pub fn with_retry<T, E, F>(mut op: F, max_attempts: u32, delay: Duration) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: std::fmt::Display,
{
    let attempts = max_attempts.max(1);
    for attempt in 1..attempts {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!("Attempt {}/{} failed: {}", attempt, attempts, e);
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
            }
        }
    }
    // The final attempt's outcome is the caller's outcome.
    op().map_err(|e| {
        warn!("All {} attempt(s) failed: {}", attempts, e);
        e
    })
}

/// Non-blocking form of [`with_retry`]: `op` builds a fresh future per
/// attempt, and the delay suspends instead of blocking the thread.
pub async fn with_retry_async<T, E, F, Fut>(
    mut op: F,
    max_attempts: u32,
    delay: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let attempts = max_attempts.max(1);
    for attempt in 1..attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!("Attempt {}/{} failed: {}", attempt, attempts, e);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
    op().await.map_err(|e| {
        warn!("All {} attempt(s) failed: {}", attempts, e);
        e
    })
}
