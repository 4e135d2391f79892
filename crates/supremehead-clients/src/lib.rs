//! Backend clients for the scroll pipeline: Mind Nexus analysis, Memory Core
//! storage, and the swarm mint engine.
//!
//! Every client exposes each operation in a blocking and a non-blocking
//! form; callers pick the mode instead of probing for it. Retries belong to
//! the caller, never to the clients.

pub mod memory;
pub mod nexus;
pub mod swarm;
pub mod transport;

pub use memory::MemoryCoreClient;
pub use nexus::MindNexusClient;
pub use swarm::{MintReceipt, SwarmEngine};
pub use transport::{Result, Transport, TransportError, DEFAULT_TIMEOUT};
