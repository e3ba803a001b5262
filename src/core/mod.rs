//! Core components of the `marketwire` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`MwClient`] and its builder.
//! - The primary [`MwError`] type and the [`FetchFailure`] classification.
//! - The generic [`TtlCache`] used by every cached operation.
//! - Internal networking.

/// In-memory TTL caches (`TtlCache`, `TtlMap`).
pub mod cache;
/// The main client (`MwClient`), builder, and configuration.
pub mod client;
/// The error types for the crate.
pub mod error;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::MwClient`
pub use cache::{CacheEntry, TtlCache, TtlMap};
pub use client::{CacheTtls, MwClient, MwClientBuilder, Timeouts};
pub use error::{FailureReason, FetchFailure, MwError};
