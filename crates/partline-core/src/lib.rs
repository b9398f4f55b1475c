//! Shared plumbing for Partline services: health handlers, request-id
//! middleware, tracing init, and serde helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
