//! Shared service plumbing: configuration, tracing, middleware and health checks.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
