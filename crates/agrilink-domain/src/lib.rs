//! Domain types shared across all Agrilink crates.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod equipment;
pub mod id;
pub mod job;
pub mod user;

/// Returned when a wire string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
