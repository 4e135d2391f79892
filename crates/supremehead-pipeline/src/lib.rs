//! Scroll ingestion pipeline: retry policy and the SupremeHead orchestrator.

pub mod orchestrator;
pub mod retry;

pub use orchestrator::SupremeHead;
pub use retry::{with_retry, with_retry_async};
