//! Shared building blocks for the platform contract suite.
//!
//! - [`ttl`]: the storage lifetime policy applied on every write.
//! - [`address_set`]: admin-managed allow-lists kept in instance storage.
//! - [`math`]: checked fixed-point and calendar helpers.

#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod address_set;
pub mod math;
pub mod ttl;

pub use ttl::{TTL_EXTEND_TO, TTL_THRESHOLD};
