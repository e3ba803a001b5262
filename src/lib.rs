//! marketwire: cached aggregation of news feeds and S&P 500 price snapshots.
//!
//! The pipeline is fetch -> normalize -> aggregate -> cache:
//!
//! - [`feeds`] pulls RSS/Atom endpoints per registry source, normalizes entries
//!   into [`Article`]s, dedupes by link and orders newest first.
//! - [`prices`] reads the constituents listing and fetches the latest daily close
//!   for every symbol in batched requests.
//! - [`crate::core::cache`] memoizes each operation with its own TTL.
//!
//! [`Aggregator`] ties these together behind the operations a serving layer needs.

pub mod core;
pub mod feeds;
pub mod prices;

mod aggregator;

pub use aggregator::{Aggregator, ArticleQuery};
pub use crate::core::client::constants::DEFAULT_PER_SOURCE;
pub use crate::core::{
    CacheEntry, CacheTtls, FailureReason, FetchFailure, MwClient, MwClientBuilder, MwError,
    Timeouts, TtlCache, TtlMap,
};
pub use feeds::{Article, ArticlesBuilder, CapPolicy, Source, SourceRegistry};
pub use prices::PriceQuote;

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Intended for demos and tests; libraries embedding this crate install their own.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second call (e.g. from another test) is a no-op.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
