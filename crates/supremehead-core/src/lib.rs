//! SupremeHead core: configuration and the scroll pipeline's data types.

pub mod config;
pub mod types;

pub use config::SupremeHeadConfig;
pub use types::{now_iso, Analysis, IngestReport, Scroll, ScrollAction};
