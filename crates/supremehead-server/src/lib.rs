//! SupremeHead server internals: the HTTP surface and the local dev stubs.

pub mod routes;
pub mod stubs;
